// ==========================================
// Fertigung API - SQLite 连接初始化与迁移
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为（外键、busy_timeout）
// - 按版本顺序执行内置迁移，并记录到 schema_version
// ==========================================

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::time::Duration;
use tracing::info;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version（与 `migrations/v0.*.sql` 对齐）
pub const CURRENT_SCHEMA_VERSION: i64 = 2;

/// 内置迁移: (版本, 名称, SQL)
const MIGRATIONS: &[(i64, &str, &str)] = &[
    (1, "maschinen", include_str!("../migrations/v0.1_maschinen.sql")),
    (
        2,
        "produkt_material",
        include_str!("../migrations/v0.2_produkt_material.sql"),
    ),
];

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启（级联删除依赖它）
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// 执行所有尚未应用的迁移
///
/// # 返回
/// - Ok(i64): 迁移完成后的 schema_version
///
/// # 说明
/// - 每个迁移在独立事务中执行，失败则整体回滚该版本
/// - 重复调用是幂等的
pub fn run_migrations(conn: &mut Connection) -> rusqlite::Result<i64> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );
        "#,
    )?;

    let current = read_schema_version(conn)?.unwrap_or(0);

    for (version, name, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.execute(
            "INSERT INTO schema_version (version, name, applied_at) VALUES (?1, ?2, ?3)",
            params![version, name, Utc::now()],
        )?;
        tx.commit()?;
        info!(version = *version, name = *name, "已应用数据库迁移");
    }

    Ok(read_schema_version(conn)?.unwrap_or(0))
}
