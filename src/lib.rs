//! # 产品 API
//!
//! 基于 JSON 文件持久化的产品 CRUD 服务：
//! - `app`：产品模型、业务服务、处理器与路由
//! - `core`：错误处理、响应结构、请求日志中间件
//! - `infrastructure`：存储与日志
//! - `config`：服务配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use app::products::{self, handler::AppState, service::ProductService};
use infrastructure::store::ProductStore;

/// 组装完整的应用路由和中间件
pub fn build_app(store: Arc<dyn ProductStore>) -> Router {
    let state = AppState {
        product_service: ProductService::new(store),
    };

    products::router(state)
        .layer(middleware::from_fn(crate::core::middleware::request_logging_middleware))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
