use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use std::sync::Arc;

use crate::config::SimulatorConfig;
use crate::models::{ApiError, AuthContext, Claims};
use crate::state::DeviceState;

/// 生成 JWT Token
pub fn generate_token(
    config: &SimulatorConfig,
    username: &str,
    epoch: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: username.to_string(),
        epoch,
        exp: now + config.jwt_expiration,
        iat: now,
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// 验证 JWT Token
pub fn verify_token(
    config: &SimulatorConfig,
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiError::new("unauthorized", message)),
    )
        .into_response()
}

/// 认证中间件
pub async fn auth_middleware(
    State(state): State<Arc<DeviceState>>,
    mut request: Request,
    next: Next,
) -> Response {
    // 从 Authorization header 获取 token
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return unauthorized("Missing or invalid Authorization header"),
    };

    match verify_token(state.config(), token) {
        Ok(claims) if claims.epoch == state.token_epoch() => {
            request.extensions_mut().insert(AuthContext {
                username: claims.sub,
            });
            next.run(request).await
        }
        Ok(_) => unauthorized("Session has been revoked"),
        Err(_) => unauthorized("Invalid or expired token"),
    }
}
