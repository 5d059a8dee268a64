//! 测试脚本中间件
//!
//! 记录每个请求，并按路径返回预设的故障状态码

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::models::ApiError;
use crate::state::DeviceState;

/// 记录请求方法与路径
pub async fn record_request(
    State(state): State<Arc<DeviceState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    state.record(&method, &path).await;
    next.run(request).await
}

/// 返回预设的状态码（若有）
pub async fn scripted_failure(
    State(state): State<Arc<DeviceState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if let Some(status) = state.forced_status(&path).await {
        debug!("scripted {} for {}", status, path);
        return (
            status,
            Json(ApiError::new("scripted", format!("forced {} for {}", status, path))),
        )
            .into_response();
    }
    next.run(request).await
}
