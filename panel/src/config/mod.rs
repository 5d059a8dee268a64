use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// 控制面板配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// 设备地址
    pub device_url: String,
    /// 会话文件路径（保存 token）
    pub session_file: PathBuf,
    /// 状态轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 提示消息显示时长（毫秒）
    pub toast_ms: u64,
    /// WiFi 保存 / 复位后重新加载的延迟（毫秒）
    pub reload_delay_ms: u64,
    /// HTTP 请求超时（毫秒）
    pub http_timeout_ms: u64,
    /// 固件上传总超时（毫秒），0 表示不限制
    pub firmware_timeout_ms: u64,
    /// 滑块拖动时的请求合并窗口（毫秒），0 表示每次移动都发送
    pub slider_coalesce_ms: u64,
    /// 日志级别
    pub log_level: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            device_url: "http://192.168.4.1".to_string(),
            session_file: default_session_file(),
            poll_interval_ms: 4000,
            toast_ms: 1900,
            reload_delay_ms: 3000,
            http_timeout_ms: 10_000,
            firmware_timeout_ms: 0,
            slider_coalesce_ms: 120,
            log_level: "info".to_string(),
        }
    }
}

impl PanelConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            device_url: env::var("PAROLA_URL").unwrap_or(defaults.device_url),
            session_file: env::var("PAROLA_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            poll_interval_ms: env_nonzero("POLL_INTERVAL_MS", defaults.poll_interval_ms),
            toast_ms: env_u64("TOAST_MS", defaults.toast_ms),
            reload_delay_ms: env_u64("RELOAD_DELAY_MS", defaults.reload_delay_ms),
            http_timeout_ms: env_nonzero("HTTP_TIMEOUT_MS", defaults.http_timeout_ms),
            firmware_timeout_ms: env_u64("FIRMWARE_TIMEOUT_MS", defaults.firmware_timeout_ms),
            slider_coalesce_ms: env_u64("SLIDER_COALESCE_MS", defaults.slider_coalesce_ms),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// 轮询间隔，至少 1 毫秒
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms.max(1))
    }

    pub fn firmware_timeout(&self) -> Option<Duration> {
        (self.firmware_timeout_ms > 0).then(|| Duration::from_millis(self.firmware_timeout_ms))
    }

    pub fn slider_coalesce(&self) -> Duration {
        Duration::from_millis(self.slider_coalesce_ms)
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// 0 没有意义的配置项，按未设置处理
fn env_nonzero(key: &str, default: u64) -> u64 {
    match env_u64(key, default) {
        0 => default,
        value => value,
    }
}

/// 默认会话文件：~/.config/parola/session.toml，无 HOME 时使用当前目录
fn default_session_file() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".config")
            .join("parola")
            .join("session.toml"),
        None => PathBuf::from("parola-session.toml"),
    }
}
