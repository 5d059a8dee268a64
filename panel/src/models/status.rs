use serde::{Deserialize, Serialize};

/// 闭区间 [min, max]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

impl Bounds {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

pub const BRIGHTNESS: Bounds = Bounds::new(1, 15);
pub const SPEED: Bounds = Bounds::new(1, 10);

/// Value shown when the device reports 0 or omits a slider field.
pub const SLIDER_FALLBACK: i64 = 5;

/// 设备状态（GET /status），设备是唯一可信来源
///
/// 数值字段允许缺失；字符串字段缺失时为空串。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    #[serde(default)]
    pub brightness: Option<i64>,
    #[serde(default)]
    pub speed: Option<i64>,
    #[serde(default)]
    pub effect: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub ssid: String,
    #[serde(default)]
    pub curtime: String,
    #[serde(default)]
    pub uptime: String,
    #[serde(default)]
    pub ap_mode: bool,
}

impl Default for DeviceStatus {
    /// 首次获取状态之前显示的占位值
    fn default() -> Self {
        Self {
            brightness: Some(SLIDER_FALLBACK),
            speed: Some(SLIDER_FALLBACK),
            effect: Some(0),
            message: String::new(),
            ip: String::new(),
            ssid: "...".to_string(),
            curtime: "--:--:--".to_string(),
            uptime: String::new(),
            ap_mode: false,
        }
    }
}

impl DeviceStatus {
    pub fn brightness(&self) -> i64 {
        slider_value(self.brightness, BRIGHTNESS)
    }

    pub fn speed(&self) -> i64 {
        slider_value(self.speed, SPEED)
    }

    /// 选中的特效索引；越界时没有任何特效被选中
    pub fn effect_index(&self) -> Option<usize> {
        self.effect
            .and_then(|e| usize::try_from(e).ok())
            .filter(|&e| e < super::EFFECTS.len())
    }

    /// SSID 标签，为空时显示 "WiFi"
    pub fn ssid_label(&self) -> &str {
        if self.ssid.is_empty() {
            "WiFi"
        } else {
            &self.ssid
        }
    }
}

fn slider_value(raw: Option<i64>, bounds: Bounds) -> i64 {
    let value = match raw {
        Some(0) | None => SLIDER_FALLBACK,
        Some(v) => v,
    };
    bounds.clamp(value)
}
