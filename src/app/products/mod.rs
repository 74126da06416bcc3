//! 产品应用

pub mod handler;
pub mod model;
pub mod service;
pub mod view;

use axum::{
    routing::{get, put},
    Router,
};

use handler::AppState;

/// 产品路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::index))
        .route("/output", get(handler::render_output))
        .route(
            "/products",
            get(handler::list_products).post(handler::create_product),
        )
        // 静态段优先于 :id；"instock" 不是合法 id，PUT/DELETE 按未找到处理
        .route(
            "/products/instock",
            get(handler::list_in_stock)
                .put(handler::unknown_product)
                .delete(handler::unknown_product),
        )
        .route(
            "/products/:id",
            put(handler::update_product).delete(handler::delete_product),
        )
        .with_state(state)
}
