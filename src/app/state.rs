// ==========================================
// Fertigung API - 应用状态
// ==========================================
// 职责: 每个处理函数显式注入的上下文（配置 + 仓储）
// ==========================================

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::domain::{Machine, Material, Product};
use crate::repository::{
    CrudRepository, Database, MachineRepository, MaterialRepository, ProductRepository,
    RepositoryResult,
};

/// 应用状态
///
/// 仓储以 trait 对象持有，测试可替换为任意实现
#[derive(Clone)]
pub struct AppState {
    /// 服务配置
    pub config: Arc<ServerConfig>,

    /// 数据库句柄（健康检查读取 schema_version）
    pub db: Database,

    pub machines: Arc<dyn CrudRepository<Machine>>,
    pub materials: Arc<dyn CrudRepository<Material>>,
    pub products: Arc<dyn CrudRepository<Product>>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// 打开（并迁移）配置中的数据库，初始化所有仓储
    pub fn new(config: ServerConfig) -> RepositoryResult<Self> {
        let db_path = config.resolved_db_path();
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let db = Database::open(&db_path)?;
        Ok(Self::with_database(config, db))
    }

    /// 基于已打开的数据库创建
    pub fn with_database(config: ServerConfig, db: Database) -> Self {
        Self {
            config: Arc::new(config),
            machines: Arc::new(MachineRepository::new(db.clone())),
            materials: Arc::new(MaterialRepository::new(db.clone())),
            products: Arc::new(ProductRepository::new(db.clone())),
            db,
        }
    }
}
