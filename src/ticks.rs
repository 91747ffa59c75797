//! Tick generation and labeling for linear, logarithmic, and time axes.
//!
//! Ticks live in a [`TickSet`] together with a shared append-only label
//! buffer. Default ticks are regenerated from scratch every frame; custom
//! ticks are supplied by the caller and survive until replaced. A tick that
//! already carries a label (a custom one) is never re-labeled.

use crate::nice::nice_num;
use crate::range::Range;
use crate::text::{TextMeasurer, TextSize};
use crate::time::{TimeFormatter, TimeStepper, TimeUnit, auto_time_unit, nice_time_step};

/// Minor step size for time ticks, indexed by major step sizes up to 15.
/// Zero means the interval is not subdivided.
const TIME_MINOR_STEPS: [i64; 16] = [0, 0, 1, 1, 2, 1, 2, 1, 2, 3, 2, 1, 3, 1, 2, 3];

/// A single tick on one axis.
#[derive(Debug, Clone)]
pub struct Tick {
    /// Position in data space.
    pub position: f64,
    /// Position along the axis in screen pixels; assigned after the
    /// transform cache for the frame is built.
    pub pixel: f32,
    /// Major (primary, labeled) tick.
    pub major: bool,
    /// Whether the tick wants a label at all.
    pub show_label: bool,
    /// Measured label extents.
    pub label_size: TextSize,
    /// Calendar granularity of a time-axis tick.
    pub time_unit: Option<TimeUnit>,
    /// Byte span of the label in the set's shared buffer.
    label_span: Option<(usize, usize)>,
}

impl Tick {
    fn new(position: f64, major: bool, show_label: bool) -> Self {
        Self {
            position,
            pixel: 0.0,
            major,
            show_label,
            label_size: (0.0, 0.0),
            time_unit: None,
            label_span: None,
        }
    }

    /// Whether a label has been assigned.
    pub fn labeled(&self) -> bool {
        self.label_span.is_some()
    }
}

/// Ticks for one axis plus their shared label text buffer.
///
/// Cleared unconditionally at the start of every frame so label memory is
/// bounded by a single frame's output.
#[derive(Debug, Clone, Default)]
pub struct TickSet {
    ticks: Vec<Tick>,
    labels: String,
}

impl TickSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all ticks and label text.
    pub fn clear(&mut self) {
        self.ticks.clear();
        self.labels.clear();
    }

    /// Number of ticks.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Whether the set holds no ticks.
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Iterate over the ticks in position order.
    pub fn iter(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter()
    }

    /// Iterate mutably, e.g. to assign pixel positions.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tick> {
        self.ticks.iter_mut()
    }

    /// Label text for a tick, empty if none was assigned.
    pub fn label(&self, tick: &Tick) -> &str {
        match tick.label_span {
            Some((offset, len)) => &self.labels[offset..offset + len],
            None => "",
        }
    }

    /// Widest label in the set.
    pub fn max_label_width(&self) -> f32 {
        self.ticks
            .iter()
            .filter(|tick| tick.show_label)
            .map(|tick| tick.label_size.0)
            .fold(0.0, f32::max)
    }

    /// Tallest label in the set.
    pub fn max_label_height(&self) -> f32 {
        self.ticks
            .iter()
            .filter(|tick| tick.show_label)
            .map(|tick| tick.label_size.1)
            .fold(0.0, f32::max)
    }

    /// Generate default ticks for a linear or log10 axis.
    ///
    /// Linear: a nice step is derived from the range span and
    /// `major_count`, majors are laid on step multiples covering the range,
    /// and each major interval is split into `minor_per_major` parts. Log:
    /// one major per power of ten inside the range, eight minors per
    /// decade. All ticks are clipped to the range; positions come out in
    /// increasing order.
    pub fn add_default(&mut self, range: Range, major_count: usize, minor_per_major: usize, log: bool) {
        if log {
            self.add_log(range);
        } else {
            self.add_linear(range, major_count, minor_per_major);
        }
    }

    fn add_linear(&mut self, range: Range, major_count: usize, minor_per_major: usize) {
        if major_count < 2 || range.span() <= 0.0 {
            return;
        }
        let nice_range = nice_num(range.span() * 0.99, false);
        let interval = nice_num(nice_range / (major_count - 1) as f64, true);
        let graph_min = (range.min / interval).floor() * interval;
        let graph_max = (range.max / interval).ceil() * interval;
        let mut major = graph_min;
        while major < graph_max + 0.5 * interval {
            if range.contains(major) {
                self.ticks.push(Tick::new(major, true, true));
            }
            for i in 1..minor_per_major {
                let minor = major + i as f64 * interval / minor_per_major as f64;
                if range.contains(minor) {
                    self.ticks.push(Tick::new(minor, false, false));
                }
            }
            major += interval;
        }
    }

    fn add_log(&mut self, range: Range) {
        if range.min <= 0.0 || range.max <= 0.0 {
            return;
        }
        let exp_min = range.min.log10().floor() as i32;
        let exp_max = range.max.log10().ceil() as i32;
        for e in (exp_min - 1)..(exp_max + 1) {
            let major1 = 10f64.powi(e);
            let major2 = 10f64.powi(e + 1);
            let interval = (major2 - major1) / 9.0;
            if range.contains(major1) {
                self.ticks.push(Tick::new(major1, true, true));
            }
            for i in 1..9 {
                let minor = major1 + i as f64 * interval;
                if range.contains(minor) {
                    self.ticks.push(Tick::new(minor, false, false));
                }
            }
        }
    }

    /// Generate default ticks for a time axis over microsecond timestamps.
    ///
    /// The coarsest calendar unit fitting `major_count` divisions is
    /// selected, an integer step in that unit is chosen from the
    /// unit-specific nice tables, and majors are emitted at floor-aligned
    /// boundaries. Minor ticks subdivide each interval at round offsets
    /// only. Ranges below one microsecond produce no ticks.
    pub fn add_time(&mut self, range: Range, major_count: usize, minor_per_major: usize) {
        if range.span() < 1.0 || major_count < 2 {
            return;
        }
        let unit = auto_time_unit(range.min, range.max, major_count);
        let raw = (range.span() / unit.size_us()) / (major_count - 1) as f64;
        let step = nice_time_step(raw, unit).max(1);

        let mut end = TimeStepper::new(range.max, unit, step);
        end.step(step);
        let end_value = end.value_us();

        let minor_step = if minor_per_major > 1 {
            if step > 15 {
                step / 5
            } else {
                TIME_MINOR_STEPS[step as usize]
            }
        } else {
            0
        };

        let mut walker = TimeStepper::new(range.min, unit, step);
        loop {
            let current = walker.value_us();
            if current > end_value {
                break;
            }
            if range.contains(current) {
                let mut tick = Tick::new(current, true, true);
                tick.time_unit = Some(unit);
                self.ticks.push(tick);
            }
            walker.step(step);
            let next = walker.value_us();
            if minor_step >= 1 {
                let mut minor = TimeStepper::new(current, unit, step);
                minor.step(minor_step);
                loop {
                    let value = minor.value_us();
                    if value >= next {
                        break;
                    }
                    if value > current && range.contains(value) {
                        let mut tick = Tick::new(value, false, false);
                        tick.time_unit = Some(unit);
                        self.ticks.push(tick);
                    }
                    minor.step(minor_step);
                }
            }
        }
    }

    /// Install caller-supplied ticks, optionally with explicit labels.
    ///
    /// A tick given a label here is final: [`TickSet::label_all`] will not
    /// overwrite it.
    pub fn add_custom(
        &mut self,
        values: &[f64],
        labels: Option<&[&str]>,
        measurer: &dyn TextMeasurer,
    ) {
        for (i, &value) in values.iter().enumerate() {
            let mut tick = Tick::new(value, false, true);
            if let Some(labels) = labels
                && let Some(text) = labels.get(i)
            {
                let offset = self.labels.len();
                self.labels.push_str(text);
                tick.label_span = Some((offset, text.len()));
                tick.label_size = measurer.measure(text);
            }
            self.ticks.push(tick);
        }
    }

    /// Assign label text and measured sizes to every un-labeled tick that
    /// wants one.
    pub fn label_all(&mut self, scientific: bool, time: bool, measurer: &dyn TextMeasurer) {
        for tick in &mut self.ticks {
            if !tick.show_label || tick.label_span.is_some() {
                continue;
            }
            let text = if scientific {
                format!("{:.0e}", tick.position)
            } else if time {
                let unit = tick.time_unit.unwrap_or(TimeUnit::Second);
                TimeFormatter::new(tick.position).range_label(unit)
            } else {
                format_compact(tick.position)
            };
            let offset = self.labels.len();
            self.labels.push_str(&text);
            tick.label_span = Some((offset, text.len()));
            tick.label_size = measurer.measure(&text);
        }
    }
}

/// Format a value with up to ten significant digits and no trailing zeros,
/// switching to exponent form for very large or very small magnitudes.
pub(crate) fn format_compact(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    if !(-5..10).contains(&magnitude) {
        let formatted = format!("{:.9e}", value);
        return trim_exponent(&formatted);
    }
    let decimals = (9 - magnitude).clamp(0, 17) as usize;
    let formatted = format!("{value:.decimals$}");
    trim_fraction(&formatted).to_string()
}

fn trim_fraction(text: &str) -> &str {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.')
}

fn trim_exponent(text: &str) -> String {
    match text.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonospaceMeasurer;
    use crate::time::US_PER_SEC;
    use proptest::prelude::*;

    fn positions(set: &TickSet, major_only: bool) -> Vec<f64> {
        set.iter()
            .filter(|tick| !major_only || tick.major)
            .map(|tick| tick.position)
            .collect()
    }

    #[test]
    fn linear_ticks_ordered_and_in_range() {
        let mut set = TickSet::new();
        let range = Range::new(-3.2, 17.9);
        set.add_default(range, 6, 5, false);
        let all = positions(&set, false);
        assert!(!all.is_empty());
        assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
        for position in &all {
            assert!(range.contains(*position));
        }
    }

    #[test]
    fn log_ticks_hit_powers_of_ten() {
        let mut set = TickSet::new();
        set.add_default(Range::new(1.0, 1000.0), 10, 0, true);
        let majors = positions(&set, true);
        assert_eq!(majors, vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn log_ticks_empty_for_non_positive_range() {
        let mut set = TickSet::new();
        set.add_default(Range::new(-1.0, 10.0), 10, 0, true);
        assert!(set.is_empty());
    }

    #[test]
    fn time_ticks_align_and_dedupe() {
        let mut set = TickSet::new();
        let range = Range::new(0.0, 60.0 * US_PER_SEC);
        set.add_time(range, 5, 2);
        let majors = positions(&set, true);
        assert!(!majors.is_empty());
        assert!(majors.windows(2).all(|pair| pair[0] < pair[1]));
        // minute granularity: every major sits on a whole minute
        for major in &majors {
            assert_eq!(major % (60.0 * US_PER_SEC), 0.0, "major {major} off-boundary");
        }
    }

    #[test]
    fn sub_microsecond_range_has_no_ticks() {
        let mut set = TickSet::new();
        set.add_time(Range::new(0.0, 0.5), 5, 2);
        assert!(set.is_empty());
    }

    #[test]
    fn custom_labels_survive_relabeling() {
        let measurer = MonospaceMeasurer::default();
        let mut set = TickSet::new();
        set.add_custom(&[1.0, 2.0], Some(&["one", "two"]), &measurer);
        set.label_all(false, false, &measurer);
        let labels: Vec<&str> = set.iter().map(|tick| set.label(tick)).collect();
        assert_eq!(labels, vec!["one", "two"]);
    }

    #[test]
    fn unlabeled_custom_ticks_get_default_labels() {
        let measurer = MonospaceMeasurer::default();
        let mut set = TickSet::new();
        set.add_custom(&[0.25], None, &measurer);
        set.label_all(false, false, &measurer);
        let tick = set.iter().next().unwrap();
        assert_eq!(set.label(tick), "0.25");
    }

    #[test]
    fn compact_format_drops_noise() {
        assert_eq!(format_compact(0.0), "0");
        assert_eq!(format_compact(0.1 + 0.2), "0.3");
        assert_eq!(format_compact(1000.0), "1000");
        assert_eq!(format_compact(0.25), "0.25");
        assert_eq!(format_compact(3e12), "3e12");
    }

    proptest! {
        #[test]
        fn linear_ticks_strictly_increasing(
            min in -1e6f64..1e6,
            span in 1e-3f64..1e6,
            majors in 2usize..20,
        ) {
            let mut set = TickSet::new();
            let range = Range::new(min, min + span);
            set.add_default(range, majors, 5, false);
            let all = positions(&set, false);
            prop_assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
            for position in all {
                prop_assert!(range.contains(position));
            }
        }
    }
}
