use serde::{Deserialize, Serialize};
use validator::Validate;

/// 亮度范围
pub const BRIGHTNESS_MIN: i64 = 1;
pub const BRIGHTNESS_MAX: i64 = 15;

/// 速度范围
pub const SPEED_MIN: i64 = 1;
pub const SPEED_MAX: i64 = 10;

/// 设备支持的特效数量
pub const EFFECT_COUNT: i64 = 28;

/// 设备状态（GET /status 响应）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub brightness: i64,
    pub speed: i64,
    pub effect: i64,
    pub message: String,
    pub ip: String,
    pub ssid: String,
    pub curtime: String,
    pub uptime: String,
    pub ap_mode: bool,
}

/// 单值表单（value=<...>）
#[derive(Debug, Clone, Deserialize)]
pub struct ValueForm<T> {
    pub value: T,
}

/// 登录表单
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// 登录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// WiFi 配置表单
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WifiForm {
    #[validate(length(min = 1, message = "SSID is required"))]
    pub ssid: String,
    #[serde(default)]
    pub password: String,
}

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Token generation; bumped when all sessions are revoked
    pub epoch: u64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// 认证上下文（注入到请求中）
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub username: String,
}

/// 已接收的固件镜像
#[derive(Debug, Clone, PartialEq)]
pub struct FirmwareImage {
    pub file_name: Option<String>,
    pub size: usize,
}

/// 请求记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub method: String,
    pub path: String,
}

/// API 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
        }
    }
}
