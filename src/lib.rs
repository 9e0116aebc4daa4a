// ==========================================
// Fertigung API - 核心库
// ==========================================
// 系统定位: 生产主数据（机器、物料、产品）REST 服务
// 技术栈: axum + tokio + SQLite
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 配置层 - 服务配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/迁移）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 请求整形与路由
pub mod api;

// 应用层 - 上下文与路由装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{Machine, MachineCapability, Material, MaterialRequirement, Product, ProductionStep};

// 仓储
pub use repository::{CrudRepository, Database, Page, RepositoryError};

// API
pub use api::{ApiError, ApiResult};

// 应用
pub use app::{build_router, AppState};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Fertigung API";
