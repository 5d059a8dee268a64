use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

use crate::models::DeviceStatus;
use crate::ui::{PillSlider, SliderKind, Toaster};

/// 登录弹窗
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginPrompt {
    pub visible: bool,
    pub error: Option<String>,
}

/// 固件上传进度条
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FirmwareProgress {
    pub percent: u8,
    pub bar_text: String,
    pub log: String,
}

impl FirmwareProgress {
    pub fn preparing(&mut self) {
        self.set(0, "0%", "Preparing upload...");
    }

    pub fn uploading(&mut self, sent: u64, total: u64) {
        if total == 0 {
            return;
        }
        let percent = ((sent as f64 / total as f64) * 100.0).round().min(100.0) as u8;
        self.set(percent, &format!("Uploading: {}%", percent), "Uploading...");
    }

    pub fn complete(&mut self) {
        self.set(100, "Upload complete!", "Upload complete. Rebooting...");
    }

    pub fn rejected(&mut self) {
        self.set(0, "Failed!", "Update failed!");
    }

    pub fn network_error(&mut self) {
        self.set(0, "Error!", "Upload failed (network error)!");
    }

    fn set(&mut self, percent: u8, bar_text: &str, log: &str) {
        self.percent = percent;
        self.bar_text = bar_text.to_string();
        self.log = log.to_string();
    }
}

/// 客户端唯一的状态对象；界面完全由 `ui::render` 从它投影出来
#[derive(Debug, Clone)]
pub struct PanelState {
    /// 最近一次成功获取的设备状态
    pub status: Option<DeviceStatus>,
    pub brightness: PillSlider,
    pub speed: PillSlider,
    /// 消息输入框内容
    pub message: String,
    /// 已发送特效、等待状态同步；期间不高亮任何特效
    pub effect_resync_pending: bool,
    pub login: LoginPrompt,
    pub toaster: Toaster,
    pub firmware: FirmwareProgress,
}

impl PanelState {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            status: None,
            brightness: PillSlider::new(SliderKind::Brightness),
            speed: PillSlider::new(SliderKind::Speed),
            message: String::new(),
            effect_resync_pending: false,
            login: LoginPrompt::default(),
            toaster: Toaster::new(toast_duration),
            firmware: FirmwareProgress::default(),
        }
    }

    pub fn slider(&self, kind: SliderKind) -> &PillSlider {
        match kind {
            SliderKind::Brightness => &self.brightness,
            SliderKind::Speed => &self.speed,
        }
    }

    pub fn slider_mut(&mut self, kind: SliderKind) -> &mut PillSlider {
        match kind {
            SliderKind::Brightness => &mut self.brightness,
            SliderKind::Speed => &mut self.speed,
        }
    }

    /// 用设备状态覆盖所有依赖它的控件
    pub fn apply_status(&mut self, status: DeviceStatus) {
        self.brightness.set_value(status.brightness());
        self.speed.set_value(status.speed());
        self.message = status.message.clone();
        self.effect_resync_pending = false;
        self.status = Some(status);
    }

    pub fn show_login(&mut self) {
        self.login.visible = true;
        self.login.error = None;
    }

    pub fn hide_login(&mut self) {
        self.login.visible = false;
    }
}

/// 共享状态单元：短暂加锁，从不跨越 await；每次修改都会通知订阅者重新渲染
pub struct StateCell {
    state: Mutex<PanelState>,
    renders: watch::Sender<u64>,
}

impl StateCell {
    pub fn new(state: PanelState) -> Self {
        let (renders, _) = watch::channel(0);
        Self {
            state: Mutex::new(state),
            renders,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut PanelState) -> R) -> R {
        let result = f(&mut *self.lock());
        self.renders.send_modify(|n| *n += 1);
        result
    }

    pub fn snapshot(&self) -> PanelState {
        self.lock().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.renders.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firmware_progress_rounds_percent() {
        let mut progress = FirmwareProgress::default();
        progress.preparing();
        assert_eq!(progress.bar_text, "0%");
        progress.uploading(1, 3);
        assert_eq!(progress.percent, 33);
        assert_eq!(progress.bar_text, "Uploading: 33%");
        progress.uploading(2, 3);
        assert_eq!(progress.percent, 67);
        progress.rejected();
        assert_eq!(progress.percent, 0);
        assert_eq!(progress.log, "Update failed!");
    }

    #[test]
    fn apply_status_updates_dependent_controls() {
        let mut state = PanelState::new(Duration::from_millis(1900));
        state.effect_resync_pending = true;
        state.apply_status(DeviceStatus {
            brightness: Some(12),
            speed: Some(0),
            message: "Hi".into(),
            ..DeviceStatus::default()
        });
        assert_eq!(state.brightness.value(), 12);
        assert_eq!(state.speed.value(), 5);
        assert_eq!(state.message, "Hi");
        assert!(!state.effect_resync_pending);
    }

    #[test]
    fn showing_login_clears_error() {
        let mut state = PanelState::new(Duration::from_millis(1900));
        state.login.error = Some("Incorrect username or password.".into());
        state.show_login();
        assert!(state.login.visible);
        assert_eq!(state.login.error, None);
    }
}
