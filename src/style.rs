//! Plot styling: colors, sizing variables, and the push/pop stacks that
//! scope temporary overrides to a region of caller code.

use crate::render::Color;

/// Addressable style colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleColor {
    /// Background of the whole plot frame.
    FrameBg,
    /// Background of the plot area.
    PlotBg,
    /// Border of the plot area.
    PlotBorder,
    /// X axis grid lines and tick marks.
    XAxisGrid,
    /// First Y axis grid lines and tick marks.
    YAxisGrid,
    /// Second Y axis tick marks.
    YAxisGrid2,
    /// Third Y axis tick marks.
    YAxisGrid3,
    /// Tick label and axis label text.
    TickText,
    /// Plot title text.
    TitleText,
    /// Box selection overlay.
    Selection,
    /// Query region overlay.
    Query,
    /// Legend background.
    LegendBg,
}

impl StyleColor {
    pub(crate) const COUNT: usize = 12;

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Addressable scalar style variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleVar {
    /// Item line weight in pixels.
    LineWeight,
    /// Marker size in pixels.
    MarkerSize,
    /// Marker outline weight in pixels.
    MarkerWeight,
    /// Alpha multiplier applied to item fills.
    FillAlpha,
    /// Padding between the frame edge and the canvas.
    PlotPadding,
}

/// Visual parameters for a plot context.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    colors: [Color; StyleColor::COUNT],
    /// Item line weight in pixels.
    pub line_weight: f32,
    /// Marker size in pixels.
    pub marker_size: f32,
    /// Marker outline weight in pixels.
    pub marker_weight: f32,
    /// Alpha multiplier applied to item fills.
    pub fill_alpha: f32,
    /// Padding between the frame edge and the canvas.
    pub plot_padding: f32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        let mut colors = [Color::WHITE; StyleColor::COUNT];
        colors[StyleColor::FrameBg.index()] = Color::new(0.06, 0.06, 0.06, 1.0);
        colors[StyleColor::PlotBg.index()] = Color::new(0.08, 0.08, 0.08, 1.0);
        colors[StyleColor::PlotBorder.index()] = Color::new(0.43, 0.43, 0.43, 1.0);
        colors[StyleColor::XAxisGrid.index()] = Color::new(0.9, 0.9, 0.9, 0.25);
        colors[StyleColor::YAxisGrid.index()] = Color::new(0.9, 0.9, 0.9, 0.25);
        colors[StyleColor::YAxisGrid2.index()] = Color::new(0.9, 0.9, 0.9, 0.25);
        colors[StyleColor::YAxisGrid3.index()] = Color::new(0.9, 0.9, 0.9, 0.25);
        colors[StyleColor::Selection.index()] = Color::new(1.0, 1.0, 0.0, 1.0);
        colors[StyleColor::Query.index()] = Color::new(0.0, 1.0, 0.0, 1.0);
        colors[StyleColor::LegendBg.index()] = Color::new(0.08, 0.08, 0.08, 0.9);
        Self {
            colors,
            line_weight: 1.0,
            marker_size: 4.0,
            marker_weight: 1.0,
            fill_alpha: 1.0,
            plot_padding: 10.0,
        }
    }
}

impl PlotStyle {
    pub fn color(&self, which: StyleColor) -> Color {
        self.colors[which.index()]
    }

    pub fn set_color(&mut self, which: StyleColor, color: Color) {
        self.colors[which.index()] = color;
    }

    pub(crate) fn var(&self, which: StyleVar) -> f32 {
        match which {
            StyleVar::LineWeight => self.line_weight,
            StyleVar::MarkerSize => self.marker_size,
            StyleVar::MarkerWeight => self.marker_weight,
            StyleVar::FillAlpha => self.fill_alpha,
            StyleVar::PlotPadding => self.plot_padding,
        }
    }

    pub(crate) fn set_var(&mut self, which: StyleVar, value: f32) {
        match which {
            StyleVar::LineWeight => self.line_weight = value,
            StyleVar::MarkerSize => self.marker_size = value,
            StyleVar::MarkerWeight => self.marker_weight = value,
            StyleVar::FillAlpha => self.fill_alpha = value,
            StyleVar::PlotPadding => self.plot_padding = value,
        }
    }
}

/// Saved values for scoped style overrides. Pops restore in LIFO order.
#[derive(Debug, Default)]
pub(crate) struct StyleStacks {
    colors: Vec<(StyleColor, Color)>,
    vars: Vec<(StyleVar, f32)>,
}

impl StyleStacks {
    pub(crate) fn push_color(&mut self, style: &mut PlotStyle, which: StyleColor, color: Color) {
        self.colors.push((which, style.color(which)));
        style.set_color(which, color);
    }

    /// Restore the most recent color override. Returns false on an
    /// unbalanced pop.
    pub(crate) fn pop_color(&mut self, style: &mut PlotStyle) -> bool {
        match self.colors.pop() {
            Some((which, saved)) => {
                style.set_color(which, saved);
                true
            }
            None => false,
        }
    }

    pub(crate) fn push_var(&mut self, style: &mut PlotStyle, which: StyleVar, value: f32) {
        self.vars.push((which, style.var(which)));
        style.set_var(which, value);
    }

    pub(crate) fn pop_var(&mut self, style: &mut PlotStyle) -> bool {
        match self.vars.pop() {
            Some((which, saved)) => {
                style.set_var(which, saved);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_restores_in_lifo_order() {
        let mut style = PlotStyle::default();
        let mut stacks = StyleStacks::default();
        let original = style.color(StyleColor::PlotBg);

        stacks.push_color(&mut style, StyleColor::PlotBg, Color::BLACK);
        stacks.push_color(&mut style, StyleColor::PlotBg, Color::WHITE);
        assert_eq!(style.color(StyleColor::PlotBg), Color::WHITE);

        assert!(stacks.pop_color(&mut style));
        assert_eq!(style.color(StyleColor::PlotBg), Color::BLACK);
        assert!(stacks.pop_color(&mut style));
        assert_eq!(style.color(StyleColor::PlotBg), original);
        assert!(!stacks.pop_color(&mut style));
    }

    #[test]
    fn var_push_pop() {
        let mut style = PlotStyle::default();
        let mut stacks = StyleStacks::default();
        stacks.push_var(&mut style, StyleVar::LineWeight, 3.0);
        assert_eq!(style.line_weight, 3.0);
        assert!(stacks.pop_var(&mut style));
        assert_eq!(style.line_weight, 1.0);
    }
}
