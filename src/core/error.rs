//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::task::JoinError;
use tracing::error;

use super::response::ErrorBody;
use crate::infrastructure::store::StoreError;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid input")]
    InvalidInput,
    #[error("Not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("后台任务执行失败: {0}")]
    Task(#[from] JoinError),
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::InvalidInput => StatusCode::BAD_REQUEST,
            CoreError::NotFound => StatusCode::NOT_FOUND,
            CoreError::Storage(_) | CoreError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            CoreError::Storage(source) => {
                error!("存储故障: {}", source);
                "Internal server error".to_string()
            }
            CoreError::Task(source) => {
                error!("后台任务执行失败: {}", source);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
