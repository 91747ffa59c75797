//! Numeric ranges and the per-frame constraint pass.
//!
//! Every axis range is sanitized once per frame before any transform or tick
//! work happens: NaN and infinite bounds are replaced, log-scale domains are
//! floored to a positive value, time axes are clamped to the supported epoch
//! window, and `max > min` is enforced with an epsilon bump. Degenerate input
//! never propagates as an error: a plot must always render something.

use crate::time::{MAX_TIME_S, MIN_TIME_S, US_PER_SEC};

/// Smallest value a log-scale bound is floored to.
const LOG_FLOOR: f64 = f64::MIN_POSITIVE;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Default for Range {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether a value lies within the range, with epsilon slack so
    /// ticks landing exactly on a bound survive floating-point drift.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min - f64::EPSILON && value <= self.max + f64::EPSILON
    }

    /// Clamp a value into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Expand the range to include a finite value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }
}

/// Replace NaN with zero.
pub(crate) fn constrain_nan(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

/// Replace infinities with the largest finite magnitude.
pub(crate) fn constrain_inf(value: f64) -> f64 {
    if value == f64::INFINITY {
        f64::MAX
    } else if value == f64::NEG_INFINITY {
        -f64::MAX
    } else {
        value
    }
}

/// Push non-positive values up to the smallest positive float so a log
/// mapping stays defined.
pub(crate) fn constrain_log(value: f64) -> f64 {
    if value <= 0.0 { LOG_FLOOR } else { value }
}

/// Clamp a microsecond timestamp into the supported epoch window.
pub(crate) fn constrain_time(value_us: f64) -> f64 {
    let secs = value_us / US_PER_SEC;
    secs.clamp(MIN_TIME_S, MAX_TIME_S) * US_PER_SEC
}

/// Sanitize a range for a linear axis: finite bounds, strictly `max > min`.
pub(crate) fn sanitize(range: Range) -> Range {
    let min = constrain_nan(constrain_inf(range.min));
    let mut max = constrain_nan(constrain_inf(range.max));
    if max <= min {
        max = min + f64::EPSILON;
    }
    Range { min, max }
}

/// Sanitize a range for a log10 axis.
pub(crate) fn sanitize_log(range: Range) -> Range {
    sanitize(Range {
        min: constrain_log(range.min),
        max: constrain_log(range.max),
    })
}

/// Sanitize a range for a time axis (microsecond timestamps).
///
/// A time axis cannot represent a span below one microsecond, so a
/// degenerate range is widened to two microseconds.
pub(crate) fn sanitize_time(range: Range) -> Range {
    let min = constrain_time(constrain_nan(constrain_inf(range.min)));
    let mut max = constrain_time(constrain_nan(constrain_inf(range.max)));
    if max <= min + 1.0 {
        max = min + 2.0;
    }
    Range { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_nan_and_inf() {
        let range = sanitize(Range {
            min: f64::NAN,
            max: f64::INFINITY,
        });
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, f64::MAX);
    }

    #[test]
    fn sanitize_enforces_strict_order() {
        let range = sanitize(Range { min: 5.0, max: 5.0 });
        assert!(range.max > range.min);
    }

    #[test]
    fn sanitize_log_floors_non_positive() {
        let range = sanitize_log(Range {
            min: -10.0,
            max: 100.0,
        });
        assert!(range.min > 0.0);
        assert_eq!(range.max, 100.0);
    }

    #[test]
    fn sanitize_time_enforces_two_microsecond_span() {
        let range = sanitize_time(Range {
            min: 1_000_000.0,
            max: 1_000_000.0,
        });
        assert_eq!(range.span(), 2.0);
    }

    #[test]
    fn contains_tolerates_bound_drift() {
        let range = Range::new(0.0, 1.0);
        assert!(range.contains(1.0 + f64::EPSILON / 2.0));
        assert!(!range.contains(1.1));
    }
}
