use serde::{Deserialize, Serialize};

/// 登录表单（application/x-www-form-urlencoded）
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 登录响应
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// 单值表单：value=<...>
#[derive(Debug, Clone, Serialize)]
pub struct ValueForm<T> {
    pub value: T,
}

/// WiFi 配置表单
#[derive(Debug, Clone, Serialize)]
pub struct WifiRequest {
    pub ssid: String,
    pub password: String,
}
