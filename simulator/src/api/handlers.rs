use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::state::DeviceState;

/// 健康检查
pub async fn health_check(State(state): State<Arc<DeviceState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "restarts": state.restart_count(),
        })),
    )
}
