// ==========================================
// Fertigung API - 数据库会话
// ==========================================
// 职责: 每次仓储操作独占一个会话（连接 + 事务）
// 约束: 操作成功则提交，任意错误则回滚；操作结束即释放连接
// ==========================================

use crate::db::{open_sqlite_connection, read_schema_version, run_migrations};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Transaction;
use std::sync::Arc;
use tracing::{debug, info};

/// 数据库句柄
///
/// 只保存数据库路径，不持有连接；连接在 `session` 中按需打开。
#[derive(Clone, Debug)]
pub struct Database {
    db_path: Arc<str>,
}

impl Database {
    /// 打开数据库并执行迁移
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let mut conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        let version = run_migrations(&mut conn)?;
        info!(db_path, schema_version = version, "数据库已就绪");

        Ok(Self {
            db_path: Arc::from(db_path),
        })
    }

    /// 数据库文件路径
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// 在独立会话中执行一次操作
    ///
    /// SQLite 调用是阻塞的，放在 tokio 阻塞线程池上执行。
    pub async fn session<T, F>(&self, op: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> RepositoryResult<T> + Send + 'static,
    {
        let db_path = Arc::clone(&self.db_path);

        tokio::task::spawn_blocking(move || {
            let mut conn = open_sqlite_connection(&db_path)
                .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
            let tx = conn
                .transaction()
                .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

            // 出错时 tx 在此处被 drop，自动回滚
            let value = op(&tx)?;

            tx.commit()
                .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
            debug!("会话已提交");
            Ok(value)
        })
        .await
        .map_err(|e| RepositoryError::InternalError(format!("会话任务异常终止: {}", e)))?
    }

    /// 读取当前 schema_version
    pub async fn schema_version(&self) -> RepositoryResult<Option<i64>> {
        self.session(|tx| Ok(read_schema_version(tx)?)).await
    }
}
