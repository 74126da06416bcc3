//! 核心响应处理模块

use serde::Serialize;

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 操作结果提示
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
