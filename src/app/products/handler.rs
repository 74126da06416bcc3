//! 产品处理器

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{Html, Json},
};
use serde_json::{Map, Value};
use tokio::task;

use super::{model::Product, service::ProductService, view};
use crate::core::{error::CoreError, response::MessageResponse};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

/// 首页
pub async fn index() -> Html<String> {
    Html(view::landing_page())
}

/// 以 HTML 表格展示全部产品
pub async fn render_output(State(state): State<AppState>) -> Result<Html<String>, CoreError> {
    let products = run_blocking(move || state.product_service.list()).await?;
    Ok(Html(view::product_table(&products)))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let products = run_blocking(move || state.product_service.list()).await?;
    Ok(Json(products))
}

pub async fn list_in_stock(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let products = run_blocking(move || state.product_service.list_in_stock()).await?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Product>, CoreError> {
    let body = parse_body(&body)?;
    let product = run_blocking(move || state.product_service.create(&body)).await?;
    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>, CoreError> {
    let patch = match parse_body(&body)? {
        Value::Object(fields) => fields,
        _ => return Err(CoreError::InvalidInput),
    };
    let id = parse_id(&id).ok_or(CoreError::NotFound)?;
    let product = run_blocking(move || state.product_service.update(id, &patch)).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, CoreError> {
    let id = parse_id(&id).ok_or(CoreError::NotFound)?;
    run_blocking(move || state.product_service.delete(id)).await?;
    Ok(Json(MessageResponse::new("Deleted successfully")))
}

/// 路径段不是数字 id 时不匹配任何产品
pub async fn unknown_product() -> CoreError {
    CoreError::NotFound
}

/// 存储读写是同步文件 I/O，放到阻塞线程池中执行
async fn run_blocking<T, F>(job: F) -> Result<T, CoreError>
where
    F: FnOnce() -> Result<T, CoreError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(job).await?
}

/// 解析请求体；空请求体视为空对象，与 Content-Type 无关
fn parse_body(body: &[u8]) -> Result<Value, CoreError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|_| CoreError::InvalidInput)
}

/// 路径中的 id 无法解析时不匹配任何产品
fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b"").unwrap(), json!({}));
        assert_eq!(parse_body(b"  \n").unwrap(), json!({}));
        assert_eq!(parse_body(br#"{"price": 1}"#).unwrap(), json!({"price": 1}));
        assert!(matches!(parse_body(b"{oops"), Err(CoreError::InvalidInput)));
    }

    #[tokio::test]
    async fn test_run_blocking_returns_result() {
        let value = run_blocking(|| Ok::<_, CoreError>(7)).await.unwrap();
        assert_eq!(value, 7);

        let err = run_blocking(|| Err::<u8, _>(CoreError::NotFound)).await;
        assert!(matches!(err, Err(CoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_run_blocking_panic_is_internal_error() {
        let result = run_blocking(|| -> Result<(), CoreError> { panic!("存储线程崩溃") }).await;
        let err = result.unwrap_err();
        assert!(matches!(err, CoreError::Task(_)));
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("2"), Some(2));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id(""), None);
    }
}
