//! 界面投影
//!
//! `render` 是纯函数：同一个 `PanelState` 与时刻总是得到同一个视图。

use std::fmt;
use tokio::time::Instant;

use super::slider::{ColorTier, PillSlider, SliderKind};
use crate::models::{DeviceStatus, EFFECTS};
use crate::panel::{FirmwareProgress, LoginPrompt, PanelState};

pub const AP_MODE_BANNER: &str = "Currently in AP Mode - Connect to configure WiFi";

#[derive(Debug, Clone, PartialEq)]
pub struct SliderView {
    pub kind: SliderKind,
    pub value: i64,
    pub fill_percent: u8,
    pub tier: ColorTier,
    pub dragging: bool,
}

impl SliderView {
    fn from_slider(slider: &PillSlider) -> Self {
        Self {
            kind: slider.kind(),
            value: slider.value(),
            fill_percent: slider.fill_percent(),
            tier: slider.tier(),
            dragging: slider.is_dragging(),
        }
    }

    pub fn color(&self) -> &'static str {
        self.tier.color()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectCell {
    pub index: usize,
    pub icon: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerClass {
    Ap,
    Connected,
}

impl BannerClass {
    pub fn css_class(self) -> &'static str {
        match self {
            BannerClass::Ap => "wifi-status ap",
            BannerClass::Connected => "wifi-status connected",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WifiBanner {
    pub text: String,
    pub class: BannerClass,
}

impl WifiBanner {
    pub fn from_status(status: &DeviceStatus) -> Self {
        if status.ap_mode {
            Self {
                text: AP_MODE_BANNER.to_string(),
                class: BannerClass::Ap,
            }
        } else {
            let ssid = if status.ssid.is_empty() {
                "Unknown"
            } else {
                status.ssid.as_str()
            };
            Self {
                text: format!("Connected to: {}", ssid),
                class: BannerClass::Connected,
            }
        }
    }
}

/// 完整的界面快照
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub brightness: SliderView,
    pub speed: SliderView,
    pub effects: Vec<EffectCell>,
    pub message: String,
    /// 获取到状态之前不显示
    pub banner: Option<WifiBanner>,
    pub ip: String,
    pub curtime: String,
    pub uptime: String,
    pub ssid_label: String,
    pub login: LoginPrompt,
    pub toast: Option<String>,
    pub firmware: FirmwareProgress,
}

impl PanelView {
    pub fn selected_effect(&self) -> Option<&EffectCell> {
        self.effects.iter().find(|cell| cell.selected)
    }
}

pub fn render(state: &PanelState, now: Instant) -> PanelView {
    let placeholder = DeviceStatus::default();
    let status = state.status.as_ref().unwrap_or(&placeholder);

    let selected = state
        .status
        .as_ref()
        .filter(|_| !state.effect_resync_pending)
        .and_then(DeviceStatus::effect_index);

    let effects = EFFECTS
        .iter()
        .enumerate()
        .map(|(index, def)| EffectCell {
            index,
            icon: def.icon,
            name: def.name,
            selected: selected == Some(index),
        })
        .collect();

    PanelView {
        brightness: SliderView::from_slider(state.slider(SliderKind::Brightness)),
        speed: SliderView::from_slider(state.slider(SliderKind::Speed)),
        effects,
        message: state.message.clone(),
        banner: state.status.as_ref().map(WifiBanner::from_status),
        ip: status.ip.clone(),
        curtime: status.curtime.clone(),
        uptime: status.uptime.clone(),
        ssid_label: status.ssid_label().to_string(),
        login: state.login.clone(),
        toast: state.toaster.visible_at(now).map(str::to_string),
        firmware: state.firmware.clone(),
    }
}

impl fmt::Display for SliderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const WIDTH: usize = 20;
        let filled = (self.fill_percent as usize * WIDTH + 50) / 100;
        write!(
            f,
            "{:<10} [{}{}] {:>2} ({})",
            self.kind.label(),
            "#".repeat(filled),
            "-".repeat(WIDTH - filled),
            self.value,
            self.tier.name()
        )
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(banner) = &self.banner {
            writeln!(f, "{}", banner.text)?;
        }
        writeln!(
            f,
            "{}  IP {}  Time {}  Uptime {}",
            self.ssid_label, self.ip, self.curtime, self.uptime
        )?;
        writeln!(f, "{}", self.brightness)?;
        writeln!(f, "{}", self.speed)?;
        match self.selected_effect() {
            Some(cell) => writeln!(f, "Effect     {:>2} {} ({})", cell.index, cell.name, cell.icon)?,
            None => writeln!(f, "Effect     -")?,
        }
        writeln!(f, "Message    {:?}", self.message)?;

        if self.login.visible {
            write!(f, "Login required")?;
            if let Some(error) = &self.login.error {
                write!(f, ": {}", error)?;
            }
            writeln!(f)?;
        }
        if !self.firmware.bar_text.is_empty() {
            writeln!(
                f,
                "Firmware   {:>3}% {} {}",
                self.firmware.percent, self.firmware.bar_text, self.firmware.log
            )?;
        }
        if let Some(toast) = &self.toast {
            writeln!(f, "> {}", toast)?;
        }
        Ok(())
    }
}
