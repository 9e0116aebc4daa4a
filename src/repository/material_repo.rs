// ==========================================
// Fertigung API - 物料仓储
// ==========================================
// 职责: 管理 material 表的 CRUD 操作
// 红线: 被物料需求引用的物料不可删除（外键约束，无级联）
// ==========================================

use crate::domain::material::Material;
use crate::repository::crud::{CrudRepository, Page};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::session::Database;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};

const ENTITY: &str = "Material";

/// 物料列（`material_from_row` 的列顺序）
pub(crate) const MATERIAL_COLUMNS: &str = "id, name, kostenStueck, bestand, aufstockenMinute";

/// 从 `offset` 开始的 5 列映射为物料（供产品仓储 JOIN 复用）
pub(crate) fn material_from_row(row: &Row<'_>, offset: usize) -> SqliteResult<Material> {
    Ok(Material {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        unit_cost: row.get(offset + 2)?,
        stock: row.get(offset + 3)?,
        restock_per_minute: row.get(offset + 4)?,
    })
}

// ==========================================
// MaterialRepository - 物料仓储
// ==========================================
pub struct MaterialRepository {
    db: Database,
}

impl MaterialRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub(crate) fn find_by_id(conn: &Connection, id: &str) -> RepositoryResult<Option<Material>> {
        let sql = format!("SELECT {} FROM material WHERE id = ?1", MATERIAL_COLUMNS);
        let material = conn
            .query_row(&sql, params![id], |row| material_from_row(row, 0))
            .optional()?;
        Ok(material)
    }

    fn list_page(conn: &Connection, page: Page) -> RepositoryResult<Vec<Material>> {
        let sql = format!(
            "SELECT {} FROM material ORDER BY rowid LIMIT ?1 OFFSET ?2",
            MATERIAL_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let materials = stmt
            .query_map(params![page.take, page.skip], |row| material_from_row(row, 0))?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(materials)
    }

    fn insert(conn: &Connection, material: &Material) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO material (id, name, kostenStueck, bestand, aufstockenMinute)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                material.id,
                material.name,
                material.unit_cost,
                material.stock,
                material.restock_per_minute,
            ],
        )?;
        Ok(())
    }

    fn remove(conn: &Connection, id: &str) -> RepositoryResult<()> {
        let affected = conn.execute("DELETE FROM material WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}

#[async_trait]
impl CrudRepository<Material> for MaterialRepository {
    async fn list(&self, page: Page) -> RepositoryResult<Vec<Material>> {
        self.db.session(move |tx| Self::list_page(tx, page)).await
    }

    async fn get(&self, id: &str) -> RepositoryResult<Material> {
        let id = id.to_string();
        self.db
            .session(move |tx| {
                Self::find_by_id(tx, &id)?.ok_or_else(|| RepositoryError::not_found(ENTITY, &id))
            })
            .await
    }

    async fn create(&self, record: Material) -> RepositoryResult<Material> {
        self.db
            .session(move |tx| {
                Self::insert(tx, &record)?;
                Self::find_by_id(tx, &record.id)?
                    .ok_or_else(|| RepositoryError::not_found(ENTITY, &record.id))
            })
            .await
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let id = id.to_string();
        self.db.session(move |tx| Self::remove(tx, &id)).await
    }
}
