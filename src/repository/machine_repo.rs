// ==========================================
// Fertigung API - 机器仓储
// ==========================================
// 职责: 管理 maschine / maschinenbefaehigung 表
// 红线: Repository 不含业务逻辑，只负责数据访问
// ==========================================

use crate::domain::machine::{Machine, MachineCapability};
use crate::repository::crud::{CrudRepository, Page};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::session::Database;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use tracing::debug;

const ENTITY: &str = "Maschine";

const SELECT_MACHINE: &str = r#"
    SELECT id, name, ruestzeit, kostenMinute, ausfallWahrscheinlichkeit,
           mitarbeiterMin, mitarbeiterMax
    FROM maschine
"#;

// ==========================================
// MachineRepository - 机器仓储
// ==========================================
pub struct MachineRepository {
    db: Database,
}

impl MachineRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 行 → 机器（能力列表另行加载）
    fn map_machine(row: &Row<'_>) -> SqliteResult<Machine> {
        Ok(Machine {
            id: row.get(0)?,
            name: row.get(1)?,
            setup_time: row.get(2)?,
            cost_per_minute: row.get(3)?,
            failure_probability: row.get(4)?,
            min_staff: row.get(5)?,
            max_staff: row.get(6)?,
            capabilities: Vec::new(),
        })
    }

    fn load_capabilities(
        conn: &Connection,
        machine_id: &str,
    ) -> RepositoryResult<Vec<MachineCapability>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, schrittId, taktrate
            FROM maschinenbefaehigung
            WHERE maschine_id = ?1
            ORDER BY position
            "#,
        )?;

        let capabilities = stmt
            .query_map(params![machine_id], |row| {
                Ok(MachineCapability {
                    id: row.get(0)?,
                    step_id: row.get(1)?,
                    cycle_rate: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(capabilities)
    }

    fn find_by_id(conn: &Connection, id: &str) -> RepositoryResult<Option<Machine>> {
        let sql = format!("{} WHERE id = ?1", SELECT_MACHINE);
        let machine = conn
            .query_row(&sql, params![id], Self::map_machine)
            .optional()?;

        match machine {
            Some(mut machine) => {
                machine.capabilities = Self::load_capabilities(conn, &machine.id)?;
                Ok(Some(machine))
            }
            None => Ok(None),
        }
    }

    fn list_page(conn: &Connection, page: Page) -> RepositoryResult<Vec<Machine>> {
        let sql = format!("{} ORDER BY rowid LIMIT ?1 OFFSET ?2", SELECT_MACHINE);
        let mut stmt = conn.prepare(&sql)?;
        let mut machines = stmt
            .query_map(params![page.take, page.skip], Self::map_machine)?
            .collect::<SqliteResult<Vec<_>>>()?;

        for machine in machines.iter_mut() {
            machine.capabilities = Self::load_capabilities(conn, &machine.id)?;
        }
        Ok(machines)
    }

    fn insert(conn: &Connection, machine: &Machine) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO maschine (
                id, name, ruestzeit, kostenMinute, ausfallWahrscheinlichkeit,
                mitarbeiterMin, mitarbeiterMax
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                machine.id,
                machine.name,
                machine.setup_time,
                machine.cost_per_minute,
                machine.failure_probability,
                machine.min_staff,
                machine.max_staff,
            ],
        )?;

        let mut stmt = conn.prepare(
            r#"
            INSERT INTO maschinenbefaehigung (id, maschine_id, position, schrittId, taktrate)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )?;
        for (position, capability) in machine.capabilities.iter().enumerate() {
            stmt.execute(params![
                capability.id,
                machine.id,
                position as i64,
                capability.step_id,
                capability.cycle_rate,
            ])?;
        }
        Ok(())
    }

    fn remove(conn: &Connection, id: &str) -> RepositoryResult<()> {
        // 先删能力，再删机器
        conn.execute(
            "DELETE FROM maschinenbefaehigung WHERE maschine_id = ?1",
            params![id],
        )?;
        let affected = conn.execute("DELETE FROM maschine WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}

#[async_trait]
impl CrudRepository<Machine> for MachineRepository {
    async fn list(&self, page: Page) -> RepositoryResult<Vec<Machine>> {
        self.db.session(move |tx| Self::list_page(tx, page)).await
    }

    async fn get(&self, id: &str) -> RepositoryResult<Machine> {
        let id = id.to_string();
        self.db
            .session(move |tx| {
                Self::find_by_id(tx, &id)?.ok_or_else(|| RepositoryError::not_found(ENTITY, &id))
            })
            .await
    }

    async fn create(&self, record: Machine) -> RepositoryResult<Machine> {
        debug!(
            machine_id = %record.id,
            capabilities = record.capabilities.len(),
            "写入机器"
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
