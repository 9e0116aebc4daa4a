// ==========================================
// Fertigung API - 服务主入口
// ==========================================

use anyhow::Context;
use fertigung_api::app::{build_router, AppState};
use fertigung_api::config::ServerConfig;
use fertigung_api::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("加载配置失败")?;

    // 初始化日志系统
    logging::init(config.log_format);

    tracing::info!("==================================================");
    tracing::info!("{}", fertigung_api::APP_NAME);
    tracing::info!("系统版本: {}", fertigung_api::VERSION);
    tracing::info!("==================================================");

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config).context("初始化AppState失败")?;
    tracing::info!("AppState初始化成功");

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("无法监听 {}", bind_addr))?;
    tracing::info!("HTTP 服务已启动: {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP 服务异常退出")?;

    tracing::info!("服务已退出");
    Ok(())
}

/// 等待 Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("收到退出信号，正在关闭");
}
