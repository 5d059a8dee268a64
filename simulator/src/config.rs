use serde::{Deserialize, Serialize};
use std::env;

/// 模拟器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// 监听地址
    pub server_addr: String,
    /// 监听端口（0 表示由系统分配）
    pub server_port: u16,
    /// 登录用户名
    pub username: String,
    /// 登录密码
    pub password: String,
    /// JWT 密钥
    pub jwt_secret: String,
    /// JWT 过期时间（秒）
    pub jwt_expiration: i64,
    /// 状态中上报的设备 IP
    pub device_ip: String,
    /// 启动时已配置的 WiFi（为空时设备处于 AP 模式）
    pub initial_ssid: Option<String>,
    /// 固件上传大小上限（字节）
    pub max_firmware_bytes: usize,
    /// 日志级别
    pub log_level: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0".to_string(),
            server_port: 8080,
            username: "admin".to_string(),
            password: "admin".to_string(),
            jwt_secret: "parola-simulator-secret".to_string(),
            jwt_expiration: 24 * 60 * 60,
            device_ip: "192.168.4.1".to_string(),
            initial_ssid: None,
            max_firmware_bytes: 4 * 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

impl SimulatorConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_addr: env::var("SIM_ADDR").unwrap_or(defaults.server_addr),
            server_port: env::var("SIM_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            username: env::var("PAROLA_SIM_USER").unwrap_or(defaults.username),
            password: env::var("PAROLA_SIM_PASSWORD").unwrap_or(defaults.password),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.jwt_expiration),
            device_ip: env::var("SIM_DEVICE_IP").unwrap_or(defaults.device_ip),
            initial_ssid: env::var("SIM_SSID").ok().filter(|s| !s.is_empty()),
            max_firmware_bytes: env::var("SIM_MAX_FIRMWARE_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_firmware_bytes),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// 仅监听本地回环、端口由系统分配，供测试使用
    pub fn local() -> Self {
        Self {
            server_addr: "127.0.0.1".to_string(),
            server_port: 0,
            ..Self::default()
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.server_port)
    }
}
