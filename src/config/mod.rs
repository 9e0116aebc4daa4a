// ==========================================
// Fertigung API - 配置层
// ==========================================
// 职责: 服务配置加载（默认值 / TOML 文件 / 环境变量）
// ==========================================

pub mod server_config;

// 重导出核心配置
pub use server_config::{get_default_db_path, ConfigError, LogFormat, ServerConfig};
