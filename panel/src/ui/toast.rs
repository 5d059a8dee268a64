use std::time::Duration;
use tokio::time::Instant;

/// 短暂提示消息
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
}

/// 同一时间只显示一条提示，新提示覆盖旧提示
#[derive(Debug, Clone)]
pub struct Toaster {
    current: Option<Toast>,
    duration: Duration,
}

impl Toaster {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.current = Some(Toast {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// 最近一条提示（不论是否过期）
    pub fn last(&self) -> Option<&str> {
        self.current.as_ref().map(|t| t.message.as_str())
    }

    pub fn visible_at(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|t| now.saturating_duration_since(t.shown_at) < self.duration)
            .map(|t| t.message.as_str())
    }

    pub fn visible(&self) -> Option<&str> {
        self.visible_at(Instant::now())
    }
}
