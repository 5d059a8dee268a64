use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Form, Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};
use validator::Validate;

use crate::models::{ApiError, AuthContext, FirmwareImage, ValueForm, WifiForm};
use crate::state::{DeviceState, InvalidEffect};

pub type DeviceStateHandle = Arc<DeviceState>;

fn ok() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// GET /status - 获取设备状态
pub async fn get_status(State(state): State<DeviceStateHandle>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.status().await))
}

/// POST /setBright - 设置亮度
pub async fn set_bright(
    State(state): State<DeviceStateHandle>,
    Form(form): Form<ValueForm<i64>>,
) -> impl IntoResponse {
    state.set_brightness(form.value).await;
    ok()
}

/// POST /setSpeed - 设置滚动速度
pub async fn set_speed(
    State(state): State<DeviceStateHandle>,
    Form(form): Form<ValueForm<i64>>,
) -> impl IntoResponse {
    state.set_speed(form.value).await;
    ok()
}

/// POST /setEffect - 设置特效
pub async fn set_effect(
    State(state): State<DeviceStateHandle>,
    Form(form): Form<ValueForm<i64>>,
) -> impl IntoResponse {
    match state.set_effect(form.value).await {
        Ok(()) => ok().into_response(),
        Err(InvalidEffect(index)) => {
            warn!("Rejected effect index {}", index);
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new(
                    "invalid_effect",
                    format!("Effect {} is out of range", index),
                )),
            )
                .into_response()
        }
    }
}

/// POST /setMessage - 设置实时消息
pub async fn set_message(
    State(state): State<DeviceStateHandle>,
    Form(form): Form<ValueForm<String>>,
) -> impl IntoResponse {
    state.set_message(form.value).await;
    ok()
}

/// POST /setWifi - 保存 WiFi 配置并重启
pub async fn set_wifi(
    State(state): State<DeviceStateHandle>,
    Extension(auth): Extension<AuthContext>,
    Form(form): Form<WifiForm>,
) -> impl IntoResponse {
    if let Err(errors) = form.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("validation_error", format!("{}", errors))),
        )
            .into_response();
    }

    info!("{} configured WiFi network {}", auth.username, form.ssid);
    state.set_wifi(form.ssid, form.password).await;
    ok().into_response()
}

/// POST /resetAll - 清除设置并重启
pub async fn reset_all(
    State(state): State<DeviceStateHandle>,
    Extension(auth): Extension<AuthContext>,
) -> impl IntoResponse {
    info!("{} requested factory reset", auth.username);
    state.reset().await;
    ok()
}

/// POST /update - OTA 固件上传
pub async fn upload_firmware(
    State(state): State<DeviceStateHandle>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read multipart body: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiError::new("upload_failed", e.to_string())),
                )
                    .into_response();
            }
        };

        if field.name() != Some("firmware") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to read firmware part: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiError::new("upload_failed", e.to_string())),
                )
                    .into_response();
            }
        };

        if data.is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new("empty_firmware", "Firmware image is empty")),
            )
                .into_response();
        }

        state
            .store_firmware(FirmwareImage {
                file_name,
                size: data.len(),
            })
            .await;
        return ok().into_response();
    }

    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new("missing_firmware", "No firmware part in upload")),
    )
        .into_response()
}
