//! 模拟设备状态
//!
//! 保存设备设置、请求记录以及测试脚本注入的故障

use axum::http::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::SimulatorConfig;
use crate::models::{
    DeviceStatus, FirmwareImage, RequestRecord, BRIGHTNESS_MAX, BRIGHTNESS_MIN, EFFECT_COUNT,
    SPEED_MAX, SPEED_MIN,
};

/// 可持久化的设备设置（对应固件 EEPROM 中的内容）
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSettings {
    pub brightness: i64,
    pub speed: i64,
    pub effect: i64,
    pub message: String,
    pub ssid: String,
    pub wifi_password: String,
    pub ap_mode: bool,
}

impl DeviceSettings {
    fn factory(initial_ssid: Option<&str>) -> Self {
        Self {
            brightness: 5,
            speed: 5,
            effect: 0,
            message: "Hello Parola".to_string(),
            ssid: initial_ssid.unwrap_or_default().to_string(),
            wifi_password: String::new(),
            ap_mode: initial_ssid.is_none(),
        }
    }
}

/// 特效索引越界
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidEffect(pub i64);

/// 请求日志最多保留的条数，超出时丢弃最早的记录
pub const REQUEST_LOG_CAPACITY: usize = 1024;

pub struct DeviceState {
    config: SimulatorConfig,
    settings: RwLock<DeviceSettings>,
    firmware: RwLock<Option<FirmwareImage>>,
    forced: RwLock<HashMap<String, StatusCode>>,
    requests: RwLock<VecDeque<RequestRecord>>,
    token_epoch: AtomicU64,
    restarts: AtomicU32,
    started_at: Instant,
}

impl DeviceState {
    pub fn new(config: SimulatorConfig) -> Self {
        let settings = DeviceSettings::factory(config.initial_ssid.as_deref());
        Self {
            config,
            settings: RwLock::new(settings),
            firmware: RwLock::new(None),
            forced: RwLock::new(HashMap::new()),
            requests: RwLock::new(VecDeque::with_capacity(REQUEST_LOG_CAPACITY)),
            token_epoch: AtomicU64::new(0),
            restarts: AtomicU32::new(0),
            started_at: Instant::now(),
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub async fn settings(&self) -> DeviceSettings {
        self.settings.read().await.clone()
    }

    /// 生成状态快照
    pub async fn status(&self) -> DeviceStatus {
        let settings = self.settings.read().await;
        DeviceStatus {
            brightness: settings.brightness,
            speed: settings.speed,
            effect: settings.effect,
            message: settings.message.clone(),
            ip: self.config.device_ip.clone(),
            ssid: settings.ssid.clone(),
            curtime: chrono::Local::now().format("%H:%M:%S").to_string(),
            uptime: format_uptime(self.started_at.elapsed().as_secs()),
            ap_mode: settings.ap_mode,
        }
    }

    pub async fn set_brightness(&self, value: i64) -> i64 {
        let value = value.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX);
        self.settings.write().await.brightness = value;
        debug!("brightness -> {}", value);
        value
    }

    pub async fn set_speed(&self, value: i64) -> i64 {
        let value = value.clamp(SPEED_MIN, SPEED_MAX);
        self.settings.write().await.speed = value;
        debug!("speed -> {}", value);
        value
    }

    pub async fn set_effect(&self, value: i64) -> Result<(), InvalidEffect> {
        if !(0..EFFECT_COUNT).contains(&value) {
            return Err(InvalidEffect(value));
        }
        self.settings.write().await.effect = value;
        debug!("effect -> {}", value);
        Ok(())
    }

    pub async fn set_message(&self, message: String) {
        debug!("message -> {:?}", message);
        self.settings.write().await.message = message;
    }

    /// 保存 WiFi 配置并模拟重启
    pub async fn set_wifi(&self, ssid: String, password: String) {
        {
            let mut settings = self.settings.write().await;
            settings.ssid = ssid;
            settings.wifi_password = password;
            settings.ap_mode = false;
        }
        self.restart();
    }

    /// 恢复出厂设置并模拟重启
    pub async fn reset(&self) {
        *self.settings.write().await = DeviceSettings::factory(None);
        self.restart();
    }

    pub async fn store_firmware(&self, image: FirmwareImage) {
        info!("firmware received: {:?} ({} bytes)", image.file_name, image.size);
        *self.firmware.write().await = Some(image);
        self.restart();
    }

    pub async fn firmware(&self) -> Option<FirmwareImage> {
        self.firmware.read().await.clone()
    }

    fn restart(&self) {
        let count = self.restarts.fetch_add(1, Ordering::SeqCst) + 1;
        info!("device restart requested (#{})", count);
    }

    pub fn restart_count(&self) -> u32 {
        self.restarts.load(Ordering::SeqCst)
    }

    pub fn token_epoch(&self) -> u64 {
        self.token_epoch.load(Ordering::SeqCst)
    }

    /// 使所有已签发的 token 失效
    pub fn revoke_tokens(&self) {
        let epoch = self.token_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        info!("all sessions revoked (epoch {})", epoch);
    }

    /// 让指定路径固定返回某个状态码
    pub async fn force_status(&self, path: &str, status: StatusCode) {
        self.forced.write().await.insert(path.to_string(), status);
    }

    pub async fn clear_forced(&self) {
        self.forced.write().await.clear();
    }

    pub async fn forced_status(&self, path: &str) -> Option<StatusCode> {
        self.forced.read().await.get(path).copied()
    }

    pub async fn record(&self, method: &str, path: &str) {
        let mut requests = self.requests.write().await;
        if requests.len() == REQUEST_LOG_CAPACITY {
            requests.pop_front();
        }
        requests.push_back(RequestRecord {
            method: method.to_string(),
            path: path.to_string(),
        });
    }

    /// 最近的请求，按到达顺序
    pub async fn requests(&self) -> Vec<RequestRecord> {
        self.requests.read().await.iter().cloned().collect()
    }

    pub async fn request_count(&self, path: &str) -> usize {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(0), "0d 00:00:00");
        assert_eq!(format_uptime(90_061), "1d 01:01:01");
    }

    #[tokio::test]
    async fn factory_settings_start_in_ap_mode() {
        let state = DeviceState::new(SimulatorConfig::local());
        let status = state.status().await;
        assert!(status.ap_mode);
        assert_eq!(status.brightness, 5);
        assert_eq!(status.ssid, "");
    }

    #[tokio::test]
    async fn setters_clamp_and_validate() {
        let state = DeviceState::new(SimulatorConfig::local());
        assert_eq!(state.set_brightness(99).await, BRIGHTNESS_MAX);
        assert_eq!(state.set_speed(0).await, SPEED_MIN);
        assert_eq!(state.set_effect(28).await, Err(InvalidEffect(28)));
        assert!(state.set_effect(27).await.is_ok());
        assert_eq!(state.settings().await.effect, 27);
    }

    #[tokio::test]
    async fn request_log_keeps_only_recent_entries() {
        let state = DeviceState::new(SimulatorConfig::local());
        for _ in 0..REQUEST_LOG_CAPACITY {
            state.record("GET", "/status").await;
        }
        state.record("POST", "/setBright").await;

        let requests = state.requests().await;
        assert_eq!(requests.len(), REQUEST_LOG_CAPACITY);
        assert_eq!(requests.last().map(|r| r.path.as_str()), Some("/setBright"));
        assert_eq!(state.request_count("/status").await, REQUEST_LOG_CAPACITY - 1);
    }

    #[tokio::test]
    async fn wifi_leaves_ap_mode_and_reset_restores_it() {
        let state = DeviceState::new(SimulatorConfig::local());
        state.set_wifi("Home".into(), String::new()).await;
        assert!(!state.status().await.ap_mode);
        state.reset().await;
        assert!(state.status().await.ap_mode);
        assert_eq!(state.restart_count(), 2);
    }
}
