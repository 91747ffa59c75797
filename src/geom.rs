//! Geometric primitives used by the plotting pipeline.
//!
//! Data-space coordinates are `f64`; screen-space (pixel) coordinates are
//! `f32`, matching the precision the host toolkit draws with.

/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    /// X value in data coordinates.
    pub x: f64,
    /// Y value in data coordinates.
    pub y: f64,
}

impl PlotPoint {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise offset.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from two arbitrary corners, normalizing min/max.
    pub fn from_corners(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            min: ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: ScreenPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center of the rectangle.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether a point lies inside the rectangle (inclusive).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Translate both corners by a pixel delta.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            min: self.min.offset(dx, dy),
            max: self.max.offset(dx, dy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_edges() {
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        assert!(rect.contains(ScreenPoint::new(0.0, 0.0)));
        assert!(rect.contains(ScreenPoint::new(10.0, 10.0)));
        assert!(!rect.contains(ScreenPoint::new(10.1, 5.0)));
    }

    #[test]
    fn from_corners_normalizes() {
        let rect = ScreenRect::from_corners(ScreenPoint::new(8.0, 1.0), ScreenPoint::new(2.0, 9.0));
        assert_eq!(rect.min, ScreenPoint::new(2.0, 1.0));
        assert_eq!(rect.max, ScreenPoint::new(8.0, 9.0));
    }
}
