// ==========================================
// Fertigung API - 路由装配
// ==========================================

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::error::ApiResult;
use crate::api::{resource_routes, MachineResource, MaterialResource, ProductResource};
use crate::app::AppState;

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub schema_version: Option<i64>,
}

async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let schema_version = state.db.schema_version().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        schema_version,
    }))
}

/// 构建完整路由
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .merge(resource_routes::<MachineResource>())
        .merge(resource_routes::<MaterialResource>())
        .merge(resource_routes::<ProductResource>())
        .layer(TraceLayer::new_for_http());

    if state.config.cors_allow_any {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}
