//! Coordinate transforms between data space and screen space.
//!
//! The cache is derived state: it must be rebuilt after any range mutation
//! and before any conversion in the same frame. A stale cache produces
//! silently wrong coordinates rather than a crash, so the frame pipeline
//! rebuilds eagerly instead of invalidating lazily.

use crate::axis::{AxisState, YAxis};
use crate::geom::{PlotPoint, ScreenPoint, ScreenRect};
use crate::range::Range;

/// Directed pixel interval per screen dimension: `min` is the pixel that
/// maps to the range minimum, which is the far edge when the axis is
/// inverted.
#[derive(Debug, Clone, Copy, Default)]
struct PixelRange {
    min: ScreenPoint,
    max: ScreenPoint,
}

/// Per-frame transform cache for the X axis and all three Y axes.
#[derive(Debug, Clone, Default)]
pub struct TransformCache {
    pixel_range: [PixelRange; 3],
    mx: f64,
    my: [f64; 3],
    log_den_x: f64,
    log_den_y: [f64; 3],
    x_range: Range,
    y_range: [Range; 3],
    x_log: bool,
    y_log: [bool; 3],
}

impl TransformCache {
    /// Rebuild the cache from the plot rectangle and current axis ranges.
    pub fn rebuild(plot_rect: ScreenRect, x_axis: &AxisState, y_axes: &[AxisState; 3]) -> Self {
        let x_inverted = x_axis.options.inverted;
        let x_log = x_axis.options.scale == crate::axis::AxisScale::Log10;
        let mut cache = Self {
            mx: 0.0,
            my: [0.0; 3],
            pixel_range: [PixelRange::default(); 3],
            log_den_x: (x_axis.range.max / x_axis.range.min).log10(),
            log_den_y: [0.0; 3],
            x_range: x_axis.range,
            y_range: [y_axes[0].range, y_axes[1].range, y_axes[2].range],
            x_log,
            y_log: [false; 3],
        };
        for (i, y_axis) in y_axes.iter().enumerate() {
            let y_inverted = y_axis.options.inverted;
            // Screen Y grows downward, so an uninverted Y axis maps its
            // minimum to the bottom edge.
            let range = PixelRange {
                min: ScreenPoint::new(
                    if x_inverted { plot_rect.max.x } else { plot_rect.min.x },
                    if y_inverted { plot_rect.min.y } else { plot_rect.max.y },
                ),
                max: ScreenPoint::new(
                    if x_inverted { plot_rect.min.x } else { plot_rect.max.x },
                    if y_inverted { plot_rect.max.y } else { plot_rect.min.y },
                ),
            };
            cache.my[i] =
                (range.max.y as f64 - range.min.y as f64) / y_axis.range.span();
            cache.log_den_y[i] = (y_axis.range.max / y_axis.range.min).log10();
            cache.y_log[i] = y_axis.options.scale == crate::axis::AxisScale::Log10;
            cache.pixel_range[i] = range;
        }
        cache.mx = (cache.pixel_range[0].max.x as f64 - cache.pixel_range[0].min.x as f64)
            / x_axis.range.span();
        cache
    }

    /// Inverse transform: screen pixels to data coordinates.
    pub fn pixels_to_plot(&self, pixel: ScreenPoint, y_axis: YAxis) -> PlotPoint {
        let i = y_axis.index();
        let mut x =
            (pixel.x as f64 - self.pixel_range[i].min.x as f64) / self.mx + self.x_range.min;
        let mut y =
            (pixel.y as f64 - self.pixel_range[i].min.y as f64) / self.my[i] + self.y_range[i].min;
        if self.x_log {
            let t = (x - self.x_range.min) / self.x_range.span();
            x = 10f64.powf(t * self.log_den_x) * self.x_range.min;
        }
        if self.y_log[i] {
            let t = (y - self.y_range[i].min) / self.y_range[i].span();
            y = 10f64.powf(t * self.log_den_y[i]) * self.y_range[i].min;
        }
        PlotPoint::new(x, y)
    }

    /// Forward transform: data coordinates to screen pixels.
    pub fn plot_to_pixels(&self, point: PlotPoint, y_axis: YAxis) -> ScreenPoint {
        let i = y_axis.index();
        let mut x = point.x;
        let mut y = point.y;
        if self.x_log {
            let t = (x / self.x_range.min).log10() / self.log_den_x;
            x = self.x_range.min + t * self.x_range.span();
        }
        if self.y_log[i] {
            let t = (y / self.y_range[i].min).log10() / self.log_den_y[i];
            y = self.y_range[i].min + t * self.y_range[i].span();
        }
        ScreenPoint::new(
            (self.pixel_range[i].min.x as f64 + self.mx * (x - self.x_range.min)) as f32,
            (self.pixel_range[i].min.y as f64 + self.my[i] * (y - self.y_range[i].min)) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{AxisOptions, AxisState};
    use proptest::prelude::*;

    fn axis(range: Range, options: AxisOptions) -> AxisState {
        let mut axis = AxisState::default();
        axis.range = range;
        axis.options = options;
        axis
    }

    fn rect() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(50.0, 20.0), ScreenPoint::new(450.0, 320.0))
    }

    fn linear_cache() -> TransformCache {
        let x = axis(Range::new(0.0, 10.0), AxisOptions::default());
        let ys = [
            axis(Range::new(-5.0, 5.0), AxisOptions::default()),
            AxisState::default(),
            AxisState::default(),
        ];
        TransformCache::rebuild(rect(), &x, &ys)
    }

    #[test]
    fn linear_forward_maps_corners() {
        let cache = linear_cache();
        let bottom_left = cache.plot_to_pixels(PlotPoint::new(0.0, -5.0), YAxis::Y0);
        assert_eq!(bottom_left, ScreenPoint::new(50.0, 320.0));
        let top_right = cache.plot_to_pixels(PlotPoint::new(10.0, 5.0), YAxis::Y0);
        assert_eq!(top_right, ScreenPoint::new(450.0, 20.0));
    }

    #[test]
    fn inverted_x_flips_direction() {
        let x = axis(
            Range::new(0.0, 10.0),
            AxisOptions::default().with_inverted(true),
        );
        let ys = [
            axis(Range::new(0.0, 1.0), AxisOptions::default()),
            AxisState::default(),
            AxisState::default(),
        ];
        let cache = TransformCache::rebuild(rect(), &x, &ys);
        let at_min = cache.plot_to_pixels(PlotPoint::new(0.0, 0.0), YAxis::Y0);
        assert_eq!(at_min.x, 450.0);
    }

    #[test]
    fn log_roundtrip() {
        let x = axis(Range::new(1.0, 1000.0), AxisOptions::log10());
        let ys = [
            axis(Range::new(0.1, 10.0), AxisOptions::log10()),
            AxisState::default(),
            AxisState::default(),
        ];
        let cache = TransformCache::rebuild(rect(), &x, &ys);
        let pixel = cache.plot_to_pixels(PlotPoint::new(100.0, 1.0), YAxis::Y0);
        let back = cache.pixels_to_plot(pixel, YAxis::Y0);
        assert!((back.x - 100.0).abs() / 100.0 < 1e-4);
        assert!((back.y - 1.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn linear_roundtrip_within_rect(px in 50.0f32..450.0, py in 20.0f32..320.0) {
            let cache = linear_cache();
            let data = cache.pixels_to_plot(ScreenPoint::new(px, py), YAxis::Y0);
            let pixel = cache.plot_to_pixels(data, YAxis::Y0);
            prop_assert!((pixel.x - px).abs() < 1e-2);
            prop_assert!((pixel.y - py).abs() < 1e-2);
        }
    }
}
