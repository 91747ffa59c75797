//! Built-in colormaps for automatic item coloring.

use crate::render::Color;

/// Selectable colormap: one of the built-in tables or a caller-supplied
/// one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Colormap {
    /// Qualitative map derived from the X11 named colors.
    #[default]
    Default,
    /// ColorBrewer Set1.
    Dark,
    /// ColorBrewer Pastel1.
    Pastel,
    /// Matplotlib viridis, perceptually uniform.
    Viridis,
    /// Explicit color table.
    Custom(Vec<Color>),
}

const DEFAULT: [Color; 10] = [
    Color::new(0.0, 0.749_019_6, 1.0, 1.0),
    Color::new(1.0, 0.0, 0.0, 1.0),
    Color::new(0.498_039_22, 1.0, 0.0, 1.0),
    Color::new(1.0, 1.0, 0.0, 1.0),
    Color::new(0.0, 1.0, 1.0, 1.0),
    Color::new(1.0, 0.647_058_84, 0.0, 1.0),
    Color::new(1.0, 0.0, 1.0, 1.0),
    Color::new(0.541_176_5, 0.168_627_46, 0.886_274_52, 1.0),
    Color::new(0.5, 0.5, 0.5, 1.0),
    Color::new(0.823_529_4, 0.705_882_37, 0.549_019_63, 1.0),
];

const DARK: [Color; 9] = [
    Color::new(0.894_118, 0.101_961, 0.109_804, 1.0),
    Color::new(0.215_686, 0.494_118, 0.721_569, 1.0),
    Color::new(0.301_961, 0.686_275, 0.290_196, 1.0),
    Color::new(0.596_078, 0.305_882, 0.639_216, 1.0),
    Color::new(1.0, 0.498_039, 0.0, 1.0),
    Color::new(1.0, 1.0, 0.2, 1.0),
    Color::new(0.650_980, 0.337_255, 0.156_863, 1.0),
    Color::new(0.968_627, 0.505_882, 0.749_020, 1.0),
    Color::new(0.6, 0.6, 0.6, 1.0),
];

const PASTEL: [Color; 9] = [
    Color::new(0.984_314, 0.705_882, 0.682_353, 1.0),
    Color::new(0.701_961, 0.803_922, 0.890_196, 1.0),
    Color::new(0.8, 0.921_569, 0.772_549, 1.0),
    Color::new(0.870_588, 0.796_078, 0.894_118, 1.0),
    Color::new(0.996_078, 0.850_980, 0.650_980, 1.0),
    Color::new(1.0, 1.0, 0.8, 1.0),
    Color::new(0.898_039, 0.847_059, 0.741_176, 1.0),
    Color::new(0.992_157, 0.854_902, 0.925_490, 1.0),
    Color::new(0.949_020, 0.949_020, 0.949_020, 1.0),
];

const VIRIDIS: [Color; 11] = [
    Color::new(0.267_004, 0.004_874, 0.329_415, 1.0),
    Color::new(0.282_623, 0.140_926, 0.457_517, 1.0),
    Color::new(0.253_935, 0.265_254, 0.529_983, 1.0),
    Color::new(0.206_756, 0.371_758, 0.553_117, 1.0),
    Color::new(0.163_625, 0.471_133, 0.558_148, 1.0),
    Color::new(0.127_568, 0.566_949, 0.550_556, 1.0),
    Color::new(0.134_692, 0.658_636, 0.517_649, 1.0),
    Color::new(0.266_941, 0.748_751, 0.440_573, 1.0),
    Color::new(0.477_504, 0.821_444, 0.318_195, 1.0),
    Color::new(0.741_388, 0.873_449, 0.149_561, 1.0),
    Color::new(0.993_248, 0.906_157, 0.143_936, 1.0),
];

impl Colormap {
    /// Colors in this map.
    pub fn colors(&self) -> &[Color] {
        match self {
            Colormap::Default => &DEFAULT,
            Colormap::Dark => &DARK,
            Colormap::Pastel => &PASTEL,
            Colormap::Viridis => &VIRIDIS,
            Colormap::Custom(colors) => colors,
        }
    }

    /// Number of colors in this map.
    pub fn len(&self) -> usize {
        self.colors().len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors().is_empty()
    }

    /// Color at an index, wrapping past the end of the map. An empty
    /// custom map yields white.
    pub fn color(&self, index: usize) -> Color {
        let colors = self.colors();
        if colors.is_empty() {
            return Color::WHITE;
        }
        colors[index % colors.len()]
    }

    /// Interpolate across the whole map, `t` clamped to 0..=1.
    pub fn lerp(&self, t: f32) -> Color {
        let colors = self.colors();
        if colors.is_empty() {
            return Color::WHITE;
        }
        let t = t.clamp(0.0, 1.0);
        let last = colors.len() - 1;
        let i1 = (last as f32 * t) as usize;
        let i2 = i1 + 1;
        if i2 > last {
            return colors[last];
        }
        let t1 = i1 as f32 / last as f32;
        let t2 = i2 as f32 / last as f32;
        colors[i1].lerp(colors[i2], (t - t1) / (t2 - t1))
    }

    /// Look up a colormap by its lowercase name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Colormap::Default),
            "dark" => Some(Colormap::Dark),
            "pastel" => Some(Colormap::Pastel),
            "viridis" => Some(Colormap::Viridis),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_wraps_past_end() {
        assert_eq!(Colormap::Default.color(0), Colormap::Default.color(10));
        assert_eq!(Colormap::Dark.color(1), Colormap::Dark.color(10));
    }

    #[test]
    fn lerp_hits_endpoints_and_clamps() {
        let map = Colormap::Viridis;
        assert_eq!(map.lerp(0.0), map.colors()[0]);
        assert_eq!(map.lerp(1.0), map.colors()[10]);
        assert_eq!(map.lerp(2.0), map.colors()[10]);
        assert_eq!(map.lerp(-1.0), map.colors()[0]);
    }

    #[test]
    fn lerp_midpoint_blends_neighbors() {
        let map = Colormap::Dark;
        let mid = map.lerp(0.5);
        assert_eq!(mid, map.colors()[4]);
    }

    #[test]
    fn by_name_round_trips() {
        assert_eq!(Colormap::by_name("viridis"), Some(Colormap::Viridis));
        assert_eq!(Colormap::by_name("magma"), None);
    }

    #[test]
    fn custom_table_wraps_and_lerps() {
        let map = Colormap::Custom(vec![Color::BLACK, Color::WHITE]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.color(0), Color::BLACK);
        assert_eq!(map.color(2), Color::BLACK);
        assert_eq!(map.lerp(0.5), Color::BLACK.lerp(Color::WHITE, 0.5));
    }

    #[test]
    fn empty_custom_table_is_survivable() {
        let map = Colormap::Custom(Vec::new());
        assert!(map.is_empty());
        assert_eq!(map.color(3), Color::WHITE);
        assert_eq!(map.lerp(0.5), Color::WHITE);
    }
}
