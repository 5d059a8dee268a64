use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth_handlers::login;
use super::device_handlers::{
    get_status, reset_all, set_bright, set_effect, set_message, set_speed, set_wifi,
    upload_firmware,
};
use super::handlers::health_check;
use crate::middleware::{auth_middleware, record_request, scripted_failure};
use crate::state::DeviceState;

pub fn create_router(state: Arc<DeviceState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let firmware_limit = state.config().max_firmware_bytes;

    // 登录（无需认证）
    let public_routes = Router::new()
        .route("/login", post(login))
        .route("/health", get(health_check));

    // 设备控制（需要认证）
    let protected_routes = Router::new()
        .route("/status", get(get_status))
        .route("/setBright", post(set_bright))
        .route("/setSpeed", post(set_speed))
        .route("/setEffect", post(set_effect))
        .route("/setMessage", post(set_message))
        .route("/setWifi", post(set_wifi))
        .route("/resetAll", post(reset_all))
        .route(
            "/update",
            post(upload_firmware).layer(DefaultBodyLimit::max(firmware_limit)),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(state.clone(), scripted_failure))
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
