// ==========================================
// Fertigung API - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// 约束: 每次操作独占一个会话（连接 + 事务）
// ==========================================

pub mod crud;
pub mod error;
pub mod machine_repo;
pub mod material_repo;
pub mod product_repo;
pub mod session;

// 重导出核心仓储
pub use crud::{CrudRepository, Page};
pub use error::{RepositoryError, RepositoryResult};
pub use machine_repo::MachineRepository;
pub use material_repo::MaterialRepository;
pub use product_repo::ProductRepository;
pub use session::Database;
