// ==========================================
// Fertigung API - 通用资源路由
// ==========================================
// 职责: 一套 list/get/create/delete 处理函数与路由，按实体类型参数化
// 约定: POST 返回 201；GET/DELETE 返回 200；单条路由末尾斜杠可选
// ==========================================

use crate::api::dto::{DeleteResponse, PageQuery};
use crate::api::error::{ApiError, ApiResult};
use crate::api::validator;
use crate::app::AppState;
use crate::repository::CrudRepository;
use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

// ==========================================
// ApiResource - 资源描述
// ==========================================

/// 一种可通过 REST 管理的实体
#[async_trait]
pub trait ApiResource: Send + Sync + 'static {
    /// 集合路径，带首尾斜杠（如 `/maschinen/`）
    const COLLECTION: &'static str;
    /// 消息中使用的实体名
    const LABEL: &'static str;

    type Record: Send + 'static;
    type Input: DeserializeOwned + Send + 'static;
    type Output: Serialize + Send + 'static;

    fn repository(state: &AppState) -> Arc<dyn CrudRepository<Self::Record>>;

    /// 校验请求并构造领域记录（分配新 id）
    async fn into_record(state: &AppState, input: Self::Input) -> ApiResult<Self::Record>;

    fn to_output(record: Self::Record) -> Self::Output;
}

// ==========================================
// 处理函数
// ==========================================

pub async fn list<R: ApiResource>(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<R::Output>>> {
    let Query(query) = query?;
    let page = validator::resolve_page(&query, &state.config)?;

    let records = R::repository(&state).list(page).await?;
    Ok(Json(records.into_iter().map(R::to_output).collect()))
}

pub async fn get_one<R: ApiResource>(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<R::Output>> {
    let Path(id) = id?;
    let record = R::repository(&state).get(&id).await?;
    Ok(Json(R::to_output(record)))
}

pub async fn create<R: ApiResource>(
    State(state): State<AppState>,
    payload: Result<Json<R::Input>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<R::Output>)> {
    let Json(input) = payload?;
    let record = R::into_record(&state, input).await?;

    let stored = R::repository(&state).create(record).await?;
    Ok((StatusCode::CREATED, Json(R::to_output(stored))))
}

pub async fn delete<R: ApiResource>(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(id) = id?;
    R::repository(&state).delete(&id).await?;

    info!(entity = R::LABEL, id = %id, "已删除");
    Ok(Json(DeleteResponse {
        message: format!("{} with id: {} deleted successfully!", R::LABEL, id),
    }))
}

/// 资源路由
pub fn resource_routes<R: ApiResource>() -> Router<AppState> {
    let collection = R::COLLECTION;
    let item = format!("{}:id", collection);
    let item_slash = format!("{}:id/", collection);

    Router::new()
        .route(collection, get(list::<R>).post(create::<R>))
        .route(
            collection.trim_end_matches('/'),
            get(list::<R>).post(create::<R>),
        )
        .route(&item, get(get_one::<R>).delete(delete::<R>))
        .route(&item_slash, get(get_one::<R>).delete(delete::<R>))
}

/// 把“引用的实体不存在”转换为校验失败
pub(crate) fn missing_reference(field: String, err: ApiError) -> ApiError {
    match err {
        ApiError::NotFound(message) => ApiError::ValidationFailed {
            reason: message.replace("not found", "does not exist"),
            violations: vec![crate::api::error::ValidationViolation {
                field,
                reason: "referenced entity does not exist".to_string(),
            }],
        },
        other => other,
    }
}
