// ==========================================
// Fertigung API - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository错误为带状态码的响应
// 约定: 所有错误响应体均为 {"message": "..."}（校验失败时附带 violations）
// ==========================================

use crate::repository::error::RepositoryError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// 输入校验失败（带详细原因）
    #[error("{reason}")]
    ValidationFailed {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    /// 与已存储数据冲突（唯一约束、外键引用）
    #[error("{0}")]
    ConflictFailed(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 不带字段明细的校验失败
    pub fn invalid(reason: impl Into<String>) -> Self {
        ApiError::ValidationFailed {
            reason: reason.into(),
            violations: Vec::new(),
        }
    }

    /// HTTP 状态码映射
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ConflictFailed(_) => StatusCode::CONFLICT,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => ApiError::NotFound(err.to_string()),

            RepositoryError::ValidationError(msg) => ApiError::invalid(msg),

            RepositoryError::UniqueConstraintViolation(_)
            | RepositoryError::ForeignKeyViolation(_) => ApiError::ConflictFailed(err.to_string()),

            RepositoryError::DatabaseConnectionError(msg)
            | RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),

            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

// ==========================================
// 从 axum 提取器拒绝转换
// ==========================================
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::invalid(rejection.body_text())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 校验违规详情
// ==========================================

/// 校验违规详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// 违规字段（线上字段名，如 `maschinenbefaehigungen[0].taktrate`）
    pub field: String,
    /// 违规原因
    pub reason: String,
}

/// 错误响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<ValidationViolation>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = %status, error = %message, "请求处理失败");
        } else {
            warn!(status = %status, error = %message, "请求被拒绝");
        }

        let violations = match self {
            ApiError::ValidationFailed { violations, .. } => violations,
            _ => Vec::new(),
        };

        (status, Json(ErrorBody { message, violations })).into_response()
    }
}
