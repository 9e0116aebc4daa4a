// ==========================================
// Fertigung API - API 层
// ==========================================
// 职责: 请求/响应整形、输入校验、错误映射、通用资源路由
// ==========================================

pub mod dto;
pub mod error;
pub mod machine_api;
pub mod material_api;
pub mod product_api;
pub mod resource;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ErrorBody, ValidationViolation};
pub use machine_api::MachineResource;
pub use material_api::MaterialResource;
pub use product_api::ProductResource;
pub use resource::{resource_routes, ApiResource};
