// ==========================================
// Fertigung API - 应用层
// ==========================================
// 职责: 应用上下文与 HTTP 路由装配
// ==========================================

pub mod router;
pub mod state;

// 重导出
pub use router::build_router;
pub use state::AppState;
