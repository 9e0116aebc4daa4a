// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 在进程内驱动完整路由（无需监听端口）
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use fertigung_api::app::{build_router, AppState};
use fertigung_api::config::ServerConfig;
use serde_json::Value;
use std::error::Error;
use tempfile::NamedTempFile;
use tower::ServiceExt;

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
pub struct ApiTestEnv {
    pub db_path: String,
    pub state: AppState,
    pub router: Router,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Result<Self, Box<dyn Error>> {
        let (temp_file, db) = test_helpers::create_test_db()?;
        let db_path = db.path().to_string();
        let state = AppState::with_database(config, db);
        let router = build_router(state.clone());

        Ok(Self {
            db_path,
            state,
            router,
            _temp_file: temp_file,
        })
    }

    /// 发送请求，返回状态码与 JSON 响应体（空响应体为 Null）
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("无法构建请求");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("路由调用失败");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("无法读取响应体");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("响应体不是 JSON")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    pub fn count_rows(&self, table: &str, column: &str, value: &str) -> i64 {
        test_helpers::count_rows(&self.db_path, table, column, value)
    }

    pub fn count_all(&self, table: &str) -> i64 {
        test_helpers::count_all(&self.db_path, table)
    }
}
