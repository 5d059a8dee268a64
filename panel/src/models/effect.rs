/// 特效定义：图标（Material Icons 名称）与显示名
///
/// 列表下标就是发送给设备的值，顺序与固件一一对应，不能调整。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectDefinition {
    pub icon: &'static str,
    pub name: &'static str,
}

const fn fx(icon: &'static str, name: &'static str) -> EffectDefinition {
    EffectDefinition { icon, name }
}

pub const EFFECTS: [EffectDefinition; 28] = [
    fx("block", "No Effect"),
    fx("print", "Print"),
    fx("arrow_upward", "Scroll Up"),
    fx("arrow_downward", "Scroll Down"),
    fx("arrow_back", "Scroll Left"),
    fx("arrow_forward", "Scroll Right"),
    fx("animation", "Slice"),
    fx("grid_on", "Mesh"),
    fx("blur_on", "Fade"),
    fx("grain", "Dissolve"),
    fx("view_week", "Blinds"),
    fx("shuffle", "Random"),
    fx("waterfall_chart", "Wipe"),
    fx("keyboard_tab", "Wipe Cursor"),
    fx("deselect", "Scan Horiz"),
    fx("table_chart", "Scan HorizX"),
    fx("height", "Scan Vert"),
    fx("align_vertical_bottom", "Scan VertX"),
    fx("open_in_full", "Opening"),
    fx("keyboard_return", "Opening Cursor"),
    fx("fullscreen_exit", "Closing"),
    fx("undo", "Closing Cursor"),
    fx("north_east", "Scroll Up Left"),
    fx("north_west", "Scroll Up Right"),
    fx("south_east", "Scroll Down Left"),
    fx("south_west", "Scroll Down Right"),
    fx("vertical_align_top", "Grow Up"),
    fx("vertical_align_bottom", "Grow Down"),
];

pub fn effect(index: usize) -> Option<&'static EffectDefinition> {
    EFFECTS.get(index)
}

/// 按下标或名称（不区分大小写）查找特效
pub fn find_effect(query: &str) -> Option<usize> {
    let query = query.trim();
    if let Ok(index) = query.parse::<usize>() {
        return (index < EFFECTS.len()).then_some(index);
    }
    EFFECTS
        .iter()
        .position(|e| e.name.eq_ignore_ascii_case(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_order_is_fixed() {
        assert_eq!(EFFECTS.len(), 28);
        assert_eq!(EFFECTS[0].name, "No Effect");
        assert_eq!(EFFECTS[12], fx("waterfall_chart", "Wipe"));
        assert_eq!(EFFECTS[27].name, "Grow Down");
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in EFFECTS.iter().enumerate() {
            for b in &EFFECTS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn lookup_by_index_or_name() {
        assert_eq!(find_effect("4"), Some(4));
        assert_eq!(find_effect("scroll down right"), Some(25));
        assert_eq!(find_effect("28"), None);
        assert_eq!(find_effect("sparkle"), None);
    }
}
