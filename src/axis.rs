//! Axis configuration and persistent per-axis state.

use crate::range::{self, Range};

/// Axis scale type.
///
/// A single enum rather than independent flags: log and time scaling are
/// mutually exclusive by construction, so the undefined combination cannot
/// be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    /// Linear scaling.
    #[default]
    Linear,
    /// Base-10 logarithmic scaling.
    Log10,
    /// Time axis over microsecond UTC timestamps.
    Time,
}

/// Per-axis configuration, re-applied on every `begin_plot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisOptions {
    /// Scale type.
    pub scale: AxisScale,
    /// Flip which screen edge maps to the range minimum.
    pub inverted: bool,
    /// Interactions may not move the range minimum.
    pub lock_min: bool,
    /// Interactions may not move the range maximum.
    pub lock_max: bool,
    /// Draw grid lines at tick positions.
    pub grid_lines: bool,
    /// Draw tick marks on the axis.
    pub tick_marks: bool,
    /// Draw tick labels.
    pub tick_labels: bool,
    /// Format labels in scientific notation.
    pub scientific: bool,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            scale: AxisScale::Linear,
            inverted: false,
            lock_min: false,
            lock_max: false,
            grid_lines: true,
            tick_marks: true,
            tick_labels: true,
            scientific: false,
        }
    }
}

impl AxisOptions {
    /// Linear axis with default decorations.
    pub fn linear() -> Self {
        Self::default()
    }

    /// Log10 axis with default decorations.
    pub fn log10() -> Self {
        Self {
            scale: AxisScale::Log10,
            ..Self::default()
        }
    }

    /// Time axis with default decorations.
    pub fn time() -> Self {
        Self {
            scale: AxisScale::Time,
            ..Self::default()
        }
    }

    /// Set the scale.
    pub fn with_scale(mut self, scale: AxisScale) -> Self {
        self.scale = scale;
        self
    }

    /// Invert the axis direction.
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Lock the range minimum against interaction.
    pub fn with_lock_min(mut self, lock: bool) -> Self {
        self.lock_min = lock;
        self
    }

    /// Lock the range maximum against interaction.
    pub fn with_lock_max(mut self, lock: bool) -> Self {
        self.lock_max = lock;
        self
    }

    /// Toggle grid lines.
    pub fn with_grid_lines(mut self, show: bool) -> Self {
        self.grid_lines = show;
        self
    }

    /// Toggle tick marks.
    pub fn with_tick_marks(mut self, show: bool) -> Self {
        self.tick_marks = show;
        self
    }

    /// Toggle tick labels.
    pub fn with_tick_labels(mut self, show: bool) -> Self {
        self.tick_labels = show;
        self
    }

    /// Toggle scientific label formatting.
    pub fn with_scientific(mut self, scientific: bool) -> Self {
        self.scientific = scientific;
        self
    }

    /// Both bounds locked: no interaction may move this axis.
    pub fn fully_locked(&self) -> bool {
        self.lock_min && self.lock_max
    }

    /// Whether any decoration requires tick generation.
    pub fn wants_ticks(&self) -> bool {
        self.grid_lines || self.tick_marks || self.tick_labels
    }
}

/// Persistent state for one axis of a plot.
#[derive(Debug, Clone)]
pub struct AxisState {
    /// Current data range.
    pub range: Range,
    /// Options in effect this frame.
    pub options: AxisOptions,
    /// Options passed on the previous frame, for change detection.
    prev_options: AxisOptions,
    /// Pointer is panning this axis.
    pub dragging: bool,
    /// Pointer is over this axis's extended hover region.
    pub hovered_ext: bool,
    /// Pointer is over the extended region or the plot area.
    pub hovered_tot: bool,
}

impl Default for AxisState {
    fn default() -> Self {
        Self {
            range: Range::new(0.0, 1.0),
            options: AxisOptions::default(),
            prev_options: AxisOptions::default(),
            dragging: false,
            hovered_ext: false,
            hovered_tot: false,
        }
    }
}

impl AxisState {
    /// Re-apply caller options, keeping runtime mutations when the caller's
    /// options did not change since last frame.
    pub(crate) fn apply_options(&mut self, options: AxisOptions, just_created: bool) {
        if just_created || options != self.prev_options {
            self.options = options;
        }
        self.prev_options = options;
    }

    /// Sanitize the range for this axis's scale.
    pub(crate) fn constrain(&mut self) {
        self.range = match self.options.scale {
            AxisScale::Linear => range::sanitize(self.range),
            AxisScale::Log10 => range::sanitize_log(self.range),
            AxisScale::Time => range::sanitize_time(self.range),
        };
    }

    /// Reset per-frame transient flags.
    pub(crate) fn begin_frame(&mut self) {
        self.hovered_ext = false;
        self.hovered_tot = false;
    }
}

/// Selector for one of the three Y axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YAxis {
    /// Primary (left) Y axis.
    #[default]
    Y0,
    /// First auxiliary (right) Y axis.
    Y1,
    /// Second auxiliary (far right) Y axis.
    Y2,
}

impl YAxis {
    /// All Y axes in storage order.
    pub const ALL: [YAxis; 3] = [YAxis::Y0, YAxis::Y1, YAxis::Y2];

    /// Storage index.
    pub fn index(self) -> usize {
        match self {
            Self::Y0 => 0,
            Self::Y1 => 1,
            Self::Y2 => 2,
        }
    }
}

/// Selector for any axis of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The shared X axis.
    X,
    /// One of the Y axes.
    Y(YAxis),
}
