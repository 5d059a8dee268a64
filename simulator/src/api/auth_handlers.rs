use axum::{extract::State, http::StatusCode, response::IntoResponse, Form, Json};
use std::sync::Arc;
use tracing::{error, info, warn};
use validator::Validate;

use crate::middleware::generate_token;
use crate::models::{ApiError, LoginForm, LoginResponse};
use crate::state::DeviceState;

/// POST /login - 用户登录
pub async fn login(
    State(state): State<Arc<DeviceState>>,
    Form(payload): Form<LoginForm>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("validation_error", format!("{}", errors))),
        )
            .into_response();
    }

    let config = state.config();
    if payload.username != config.username || payload.password != config.password {
        warn!("Rejected login for {}", payload.username);
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiError::new("invalid_credentials", "Incorrect username or password")),
        )
            .into_response();
    }

    match generate_token(config, &payload.username, state.token_epoch()) {
        Ok(token) => {
            info!("User {} logged in", payload.username);
            (StatusCode::OK, Json(LoginResponse { token })).into_response()
        }
        Err(e) => {
            error!("Failed to generate token: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("internal_error", "Failed to generate token")),
            )
                .into_response()
        }
    }
}
