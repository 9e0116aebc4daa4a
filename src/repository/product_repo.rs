// ==========================================
// Fertigung API - 产品仓储
// ==========================================
// 职责: 管理 produkt / produktionsschritt / materialbedarf 表
// 红线: 生产步骤与物料需求随产品原子写入、级联删除；物料只引用不删除
// ==========================================

use crate::domain::product::{MaterialRequirement, Product, ProductionStep};
use crate::repository::crud::{CrudRepository, Page};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::material_repo::{material_from_row, MaterialRepository};
use crate::repository::session::Database;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use tracing::{debug, warn};

const ENTITY: &str = "Produkt";

// ==========================================
// ProductRepository - 产品仓储
// ==========================================
pub struct ProductRepository {
    db: Database,
}

impl ProductRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn map_product(row: &Row<'_>) -> SqliteResult<Product> {
        Ok(Product {
            id: row.get(0)?,
            name: row.get(1)?,
            sale_price: row.get(2)?,
            steps: Vec::new(),
            requirements: Vec::new(),
        })
    }

    fn load_steps(conn: &Connection, product_id: &str) -> RepositoryResult<Vec<ProductionStep>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, schritt
            FROM produktionsschritt
            WHERE produkt_id = ?1
            ORDER BY position
            "#,
        )?;
        let steps = stmt
            .query_map(params![product_id], |row| {
                Ok(ProductionStep {
                    id: row.get(0)?,
                    sequence: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(steps)
    }

    /// 加载物料需求，并解析其引用的物料
    fn load_requirements(
        conn: &Connection,
        product_id: &str,
    ) -> RepositoryResult<Vec<MaterialRequirement>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT mb.id, mb.menge,
                   m.id, m.name, m.kostenStueck, m.bestand, m.aufstockenMinute
            FROM materialbedarf mb
            JOIN material m ON m.id = mb.material_id
            WHERE mb.produkt_id = ?1
            ORDER BY mb.position
            "#,
        )?;
        let requirements = stmt
            .query_map(params![product_id], |row| {
                Ok(MaterialRequirement {
                    id: row.get(0)?,
                    quantity: row.get(1)?,
                    material: material_from_row(row, 2)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(requirements)
    }

    fn hydrate(conn: &Connection, product: &mut Product) -> RepositoryResult<()> {
        product.steps = Self::load_steps(conn, &product.id)?;
        product.requirements = Self::load_requirements(conn, &product.id)?;
        Ok(())
    }

    fn find_by_id(conn: &Connection, id: &str) -> RepositoryResult<Option<Product>> {
        let product = conn
            .query_row(
                "SELECT id, name, verkaufspreis FROM produkt WHERE id = ?1",
                params![id],
                Self::map_product,
            )
            .optional()?;

        match product {
            Some(mut product) => {
                Self::hydrate(conn, &mut product)?;
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    fn list_page(conn: &Connection, page: Page) -> RepositoryResult<Vec<Product>> {
        let mut stmt = conn.prepare(
            "SELECT id, name, verkaufspreis FROM produkt ORDER BY rowid LIMIT ?1 OFFSET ?2",
        )?;
        let mut products = stmt
            .query_map(params![page.take, page.skip], Self::map_product)?
            .collect::<SqliteResult<Vec<_>>>()?;

        for product in products.iter_mut() {
            Self::hydrate(conn, product)?;
        }
        Ok(products)
    }

    /// 所有被引用的物料必须已存在，否则在写入任何数据前失败
    fn ensure_materials_exist(conn: &Connection, product: &Product) -> RepositoryResult<()> {
        for requirement in &product.requirements {
            let material_id = &requirement.material.id;
            if MaterialRepository::find_by_id(conn, material_id)?.is_none() {
                warn!(product_id = %product.id, material_id = %material_id, "物料需求引用了不存在的物料");
                return Err(RepositoryError::ValidationError(format!(
                    "Material with id: {} does not exist",
                    material_id
                )));
            }
        }
        Ok(())
    }

    fn insert(conn: &Connection, product: &Product) -> RepositoryResult<()> {
        Self::ensure_materials_exist(conn, product)?;

        conn.execute(
            "INSERT INTO produkt (id, name, verkaufspreis) VALUES (?1, ?2, ?3)",
            params![product.id, product.name, product.sale_price],
        )?;

        let mut step_stmt = conn.prepare(
            r#"
            INSERT INTO produktionsschritt (id, produkt_id, position, schritt)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )?;
        for (position, step) in product.steps.iter().enumerate() {
            step_stmt.execute(params![step.id, product.id, position as i64, step.sequence])?;
        }

        let mut requirement_stmt = conn.prepare(
            r#"
            INSERT INTO materialbedarf (id, produkt_id, material_id, position, menge)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )?;
        for (position, requirement) in product.requirements.iter().enumerate() {
            requirement_stmt.execute(params![
                requirement.id,
                product.id,
                requirement.material.id,
                position as i64,
                requirement.quantity,
            ])?;
        }
        Ok(())
    }

    fn remove(conn: &Connection, id: &str) -> RepositoryResult<()> {
        conn.execute(
            "DELETE FROM produktionsschritt WHERE produkt_id = ?1",
            params![id],
        )?;
        conn.execute("DELETE FROM materialbedarf WHERE produkt_id = ?1", params![id])?;
        let affected = conn.execute("DELETE FROM produkt WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}

#[async_trait]
impl CrudRepository<Product> for ProductRepository {
    async fn list(&self, page: Page) -> RepositoryResult<Vec<Product>> {
        self.db.session(move |tx| Self::list_page(tx, page)).await
    }

    async fn get(&self, id: &str) -> RepositoryResult<Product> {
        let id = id.to_string();
        self.db
            .session(move |tx| {
                Self::find_by_id(tx, &id)?.ok_or_else(|| RepositoryError::not_found(ENTITY, &id))
            })
            .await
    }

    async fn create(&self, record: Product) -> RepositoryResult<Product> {
        debug!(
            product_id = %record.id,
            steps = record.steps.len(),
            requirements = record.requirements.len(),
            "写入产品"
        );
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
