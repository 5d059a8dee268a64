//! 胶囊滑块（亮度 / 速度）
//!
//! 指针在轨道上的水平位置线性映射到 [min, max] 内的整数。

use crate::api::Endpoint;
use crate::models::{Bounds, BRIGHTNESS, SLIDER_FALLBACK, SPEED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderKind {
    Brightness,
    Speed,
}

impl SliderKind {
    pub fn bounds(self) -> Bounds {
        match self {
            SliderKind::Brightness => BRIGHTNESS,
            SliderKind::Speed => SPEED,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SliderKind::Brightness => "Brightness",
            SliderKind::Speed => "Speed",
        }
    }

    pub fn endpoint(self) -> Endpoint {
        match self {
            SliderKind::Brightness => Endpoint::SetBright,
            SliderKind::Speed => Endpoint::SetSpeed,
        }
    }
}

/// 轨道在视口中的水平位置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackRect {
    pub left: f64,
    pub width: f64,
}

impl TrackRect {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }
}

/// 鼠标与触摸统一的指针事件
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64 },
    Move { x: f64 },
    Up,
    Leave,
    Click { x: f64 },
}

/// round(min + clamp((x - left) / width, 0, 1) * (max - min))
///
/// A zero-width track maps every position to `min`.
pub fn position_to_value(x: f64, track: TrackRect, min: i64, max: i64) -> i64 {
    let rel = if track.width > 0.0 {
        ((x - track.left) / track.width).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let value = (min as f64 + rel * (max - min) as f64).round() as i64;
    value.clamp(min, max)
}

/// (value - min) / (max - min)
pub fn fill_fraction(value: i64, bounds: Bounds) -> f64 {
    let span = (bounds.max - bounds.min) as f64;
    if span <= 0.0 {
        return 1.0;
    }
    (value - bounds.min) as f64 / span
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTier {
    Low,
    Mid,
    High,
}

impl ColorTier {
    pub fn from_fraction(pct: f64) -> Self {
        if pct < 0.34 {
            ColorTier::Low
        } else if pct < 0.67 {
            ColorTier::Mid
        } else {
            ColorTier::High
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ColorTier::Low => "#13e872",
            ColorTier::Mid => "#fca638",
            ColorTier::High => "#fc3460",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorTier::Low => "low",
            ColorTier::Mid => "mid",
            ColorTier::High => "high",
        }
    }
}

/// 滑块本地状态：当前值、轨道位置、是否正在拖动
#[derive(Debug, Clone, PartialEq)]
pub struct PillSlider {
    kind: SliderKind,
    track: TrackRect,
    value: i64,
    dragging: bool,
}

impl PillSlider {
    pub fn new(kind: SliderKind) -> Self {
        Self {
            kind,
            track: TrackRect::new(0.0, 100.0),
            value: kind.bounds().clamp(SLIDER_FALLBACK),
            dragging: false,
        }
    }

    pub fn kind(&self) -> SliderKind {
        self.kind
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_track(&mut self, track: TrackRect) {
        self.track = track;
    }

    /// 直接设置值（来自设备状态或键盘输入），总是先钳制
    pub fn set_value(&mut self, value: i64) -> i64 {
        self.value = self.kind.bounds().clamp(value);
        self.value
    }

    pub fn fraction(&self) -> f64 {
        fill_fraction(self.value, self.kind.bounds())
    }

    pub fn fill_percent(&self) -> u8 {
        (self.fraction() * 100.0).round() as u8
    }

    pub fn tier(&self) -> ColorTier {
        ColorTier::from_fraction(self.fraction())
    }

    /// 处理指针事件；产生新值时返回 Some
    ///
    /// 拖动在 Down 之后开始，文档内任何位置的 Move 都会更新，
    /// Up / Leave 结束拖动；Click 不依赖拖动状态。
    pub fn handle(&mut self, event: PointerEvent) -> Option<i64> {
        match event {
            PointerEvent::Down { x } => {
                self.dragging = true;
                Some(self.update_from_pos(x))
            }
            PointerEvent::Move { x } if self.dragging => Some(self.update_from_pos(x)),
            PointerEvent::Move { .. } => None,
            PointerEvent::Up | PointerEvent::Leave => {
                self.dragging = false;
                None
            }
            PointerEvent::Click { x } => Some(self.update_from_pos(x)),
        }
    }

    fn update_from_pos(&mut self, x: f64) -> i64 {
        let bounds = self.kind.bounds();
        self.value = position_to_value(x, self.track, bounds.min, bounds.max);
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: TrackRect = TrackRect {
        left: 50.0,
        width: 200.0,
    };

    #[test]
    fn maps_track_endpoints() {
        assert_eq!(position_to_value(50.0, TRACK, 1, 15), 1);
        assert_eq!(position_to_value(250.0, TRACK, 1, 15), 15);
        assert_eq!(position_to_value(150.0, TRACK, 1, 15), 8);
    }

    #[test]
    fn clamps_outside_track() {
        assert_eq!(position_to_value(-1000.0, TRACK, 1, 10), 1);
        assert_eq!(position_to_value(1000.0, TRACK, 1, 10), 10);
    }

    #[test]
    fn every_position_stays_in_range() {
        for px in -100..400 {
            let x = px as f64 + 0.5;
            let rel = ((x - TRACK.left) / TRACK.width).clamp(0.0, 1.0);
            let expected = (1.0 + rel * 9.0).round() as i64;
            let value = position_to_value(x, TRACK, 1, 10);
            assert_eq!(value, expected);
            assert!((1..=10).contains(&value));
        }
    }

    #[test]
    fn each_slider_posts_to_its_own_endpoint() {
        assert_eq!(SliderKind::Brightness.endpoint().path(), "/setBright");
        assert_eq!(SliderKind::Speed.endpoint().path(), "/setSpeed");
    }

    #[test]
    fn zero_width_track_maps_to_min() {
        assert_eq!(position_to_value(10.0, TrackRect::new(10.0, 0.0), 1, 15), 1);
    }

    #[test]
    fn color_tiers() {
        assert_eq!(ColorTier::from_fraction(0.0), ColorTier::Low);
        assert_eq!(ColorTier::from_fraction(0.339), ColorTier::Low);
        assert_eq!(ColorTier::from_fraction(0.34), ColorTier::Mid);
        assert_eq!(ColorTier::from_fraction(0.669), ColorTier::Mid);
        assert_eq!(ColorTier::from_fraction(0.67), ColorTier::High);
        assert_eq!(ColorTier::High.color(), "#fc3460");
    }

    #[test]
    fn tiers_follow_slider_value() {
        let mut slider = PillSlider::new(SliderKind::Speed);
        slider.set_value(1);
        assert_eq!(slider.tier(), ColorTier::Low);
        assert_eq!(slider.fill_percent(), 0);
        slider.set_value(5);
        assert_eq!(slider.tier(), ColorTier::Mid);
        assert_eq!(slider.fill_percent(), 44);
        slider.set_value(10);
        assert_eq!(slider.tier(), ColorTier::High);
        assert_eq!(slider.fill_percent(), 100);
    }

    #[test]
    fn drag_sequence() {
        let mut slider = PillSlider::new(SliderKind::Brightness);
        slider.set_track(TRACK);

        assert_eq!(slider.handle(PointerEvent::Move { x: 250.0 }), None);
        assert_eq!(slider.handle(PointerEvent::Down { x: 50.0 }), Some(1));
        assert!(slider.is_dragging());
        // 指针离开轨道后继续跟踪
        assert_eq!(slider.handle(PointerEvent::Move { x: 900.0 }), Some(15));
        assert_eq!(slider.handle(PointerEvent::Up), None);
        assert!(!slider.is_dragging());
        assert_eq!(slider.handle(PointerEvent::Move { x: 50.0 }), None);
        assert_eq!(slider.value(), 15);
    }

    #[test]
    fn click_without_drag_sets_value() {
        let mut slider = PillSlider::new(SliderKind::Brightness);
        slider.set_track(TRACK);
        assert_eq!(slider.handle(PointerEvent::Click { x: 150.0 }), Some(8));
        assert!(!slider.is_dragging());
    }

    #[test]
    fn leave_ends_drag() {
        let mut slider = PillSlider::new(SliderKind::Speed);
        slider.set_track(TRACK);
        slider.handle(PointerEvent::Down { x: 60.0 });
        slider.handle(PointerEvent::Leave);
        assert_eq!(slider.handle(PointerEvent::Move { x: 240.0 }), None);
    }
}
