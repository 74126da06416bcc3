//! 产品 API 服务入口

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use products_api::config::load_config;
use products_api::infrastructure::{logger::Logger, store::JsonFileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config().context("加载配置失败")?;
    Logger::init(&config.logging.level);

    match source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let store = JsonFileStore::new(&config.storage.data_file);
    info!("数据文件: {}", store.path().display());
    let app = products_api::build_app(Arc::new(store));

    let addr = config.server.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("✅ 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /                  - 首页");
    info!("   GET    /output            - 产品表格 (HTML)");
    info!("   GET    /products          - 获取所有产品");
    info!("   GET    /products/instock  - 获取有货产品");
    info!("   POST   /products          - 创建产品");
    info!("   PUT    /products/:id      - 更新产品");
    info!("   DELETE /products/:id      - 删除产品");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("监听退出信号失败: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在关闭服务器...");
}
