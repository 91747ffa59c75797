//! Plot area layout.
//!
//! Each frame the plot frame is shrunk to a canvas, then to the inner plot
//! rectangle once tick label sizes are known. The strips left over around
//! the plot rectangle double as the hover regions that let the pointer grab
//! a single axis.

use crate::axis::YAxis;
use crate::geom::{ScreenPoint, ScreenRect};

/// Gap between tick labels and the plot edge, and between stacked Y axis
/// label columns.
pub(crate) const LABEL_OFFSET: f32 = 5.0;

/// Widths and heights feeding the padding pass, gathered after tick
/// generation.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LayoutSpec {
    /// Height of the title line, zero when there is no title.
    pub title_height: f32,
    /// Height of the X tick labels, zero when they are hidden.
    pub x_label_height: f32,
    /// Width of the widest tick label per Y axis, zero when hidden or the
    /// axis is absent.
    pub y_label_widths: [f32; 3],
    /// Which Y axes are in use this frame.
    pub y_present: [bool; 3],
}

/// Resolved rectangles for one plot frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotLayout {
    /// Outer rectangle handed in by the caller.
    pub frame_rect: ScreenRect,
    /// Frame minus the outer padding.
    pub canvas_rect: ScreenRect,
    /// Area where data is drawn.
    pub plot_rect: ScreenRect,
    x_region: ScreenRect,
    y_regions: [ScreenRect; 3],
}

impl PlotLayout {
    pub(crate) fn canvas(frame: ScreenRect, padding: f32) -> ScreenRect {
        ScreenRect::new(
            frame.min.offset(padding, padding),
            frame.max.offset(-padding, -padding),
        )
    }

    pub(crate) fn compute(frame: ScreenRect, canvas: ScreenRect, spec: LayoutSpec) -> Self {
        let pad_top = if spec.title_height > 0.0 {
            spec.title_height + LABEL_OFFSET
        } else {
            0.0
        };
        let pad_bot = if spec.x_label_height > 0.0 {
            spec.x_label_height + LABEL_OFFSET
        } else {
            0.0
        };
        let column = |i: usize| -> f32 {
            if spec.y_present[i] && spec.y_label_widths[i] > 0.0 {
                spec.y_label_widths[i] + LABEL_OFFSET
            } else {
                0.0
            }
        };
        let pad_left = column(0);
        let pad_right = column(1) + column(2);

        let plot_rect = ScreenRect::new(
            canvas.min.offset(pad_left, pad_top),
            canvas.max.offset(-pad_right, -pad_bot),
        );

        // The X strip covers the tick labels below the plot; each Y strip
        // covers one axis's label column beside it.
        let x_region = ScreenRect::new(
            ScreenPoint::new(plot_rect.min.x, plot_rect.max.y),
            ScreenPoint::new(plot_rect.max.x, frame.max.y),
        );
        let mut y_regions = [ScreenRect::default(); 3];
        y_regions[0] = ScreenRect::new(
            ScreenPoint::new(frame.min.x, plot_rect.min.y),
            ScreenPoint::new(plot_rect.min.x, plot_rect.max.y),
        );
        y_regions[1] = ScreenRect::new(
            ScreenPoint::new(plot_rect.max.x, plot_rect.min.y),
            ScreenPoint::new(plot_rect.max.x + column(1), plot_rect.max.y),
        );
        y_regions[2] = ScreenRect::new(
            ScreenPoint::new(plot_rect.max.x + column(1), plot_rect.min.y),
            ScreenPoint::new(frame.max.x, plot_rect.max.y),
        );

        Self {
            frame_rect: frame,
            canvas_rect: canvas,
            plot_rect,
            x_region,
            y_regions,
        }
    }

    /// Pointer is over the plot area proper.
    pub fn hovers_plot(&self, point: ScreenPoint) -> bool {
        self.plot_rect.contains(point)
    }

    /// Pointer is over the X axis label strip.
    pub fn hovers_x_region(&self, point: ScreenPoint) -> bool {
        self.x_region.contains(point)
    }

    /// Pointer is over a Y axis label column.
    pub fn hovers_y_region(&self, axis: YAxis, point: ScreenPoint) -> bool {
        self.y_regions[axis.index()].contains(point)
    }
}

/// Major tick count for an X axis, scaled to the canvas width.
pub(crate) fn x_tick_count(width: f32) -> usize {
    ((width * 0.01).round() as usize).max(2)
}

/// Major tick count for a Y axis, scaled to the canvas height.
pub(crate) fn y_tick_count(height: f32) -> usize {
    ((height * 0.02).round() as usize).max(2)
}

/// How many time labels of the given width fit across the plot.
pub(crate) fn time_label_capacity(plot_width: f32, label_width: f32) -> usize {
    if label_width <= 0.0 {
        return 2;
    }
    ((plot_width / (label_width + LABEL_OFFSET * 2.0)) as usize).max(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> PlotLayout {
        let frame = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(640.0, 480.0));
        let canvas = PlotLayout::canvas(frame, 10.0);
        let spec = LayoutSpec {
            title_height: 13.0,
            x_label_height: 13.0,
            y_label_widths: [28.0, 21.0, 0.0],
            y_present: [true, true, false],
        };
        PlotLayout::compute(frame, canvas, spec)
    }

    #[test]
    fn plot_rect_shrinks_by_label_columns() {
        let layout = layout();
        assert_eq!(layout.canvas_rect.min, ScreenPoint::new(10.0, 10.0));
        assert_eq!(layout.plot_rect.min.x, 10.0 + 28.0 + LABEL_OFFSET);
        assert_eq!(layout.plot_rect.min.y, 10.0 + 13.0 + LABEL_OFFSET);
        assert_eq!(layout.plot_rect.max.x, 630.0 - (21.0 + LABEL_OFFSET));
        assert_eq!(layout.plot_rect.max.y, 470.0 - (13.0 + LABEL_OFFSET));
    }

    #[test]
    fn hover_regions_partition_the_margins() {
        let layout = layout();
        let below = ScreenPoint::new(300.0, layout.plot_rect.max.y + 8.0);
        assert!(layout.hovers_x_region(below));
        assert!(!layout.hovers_plot(below));

        let left = ScreenPoint::new(layout.plot_rect.min.x - 8.0, 200.0);
        assert!(layout.hovers_y_region(YAxis::Y0, left));
        assert!(!layout.hovers_y_region(YAxis::Y1, left));

        let right = ScreenPoint::new(layout.plot_rect.max.x + 8.0, 200.0);
        assert!(layout.hovers_y_region(YAxis::Y1, right));
    }

    #[test]
    fn tick_counts_scale_with_size_and_floor_at_two() {
        assert_eq!(x_tick_count(600.0), 6);
        assert_eq!(x_tick_count(50.0), 2);
        assert_eq!(y_tick_count(300.0), 6);
        assert_eq!(time_label_capacity(600.0, 56.0), 9);
        assert_eq!(time_label_capacity(80.0, 56.0), 2);
    }
}
