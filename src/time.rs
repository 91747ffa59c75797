//! Calendar units for time-scale axes.
//!
//! Time axes carry microsecond UTC timestamps as `f64` data values. This
//! module owns the unit table used for automatic tick granularity, a stepper
//! that walks timestamps along unit boundaries, and a formatter that renders
//! timestamps at a given unit precision.
//!
//! Calendar arithmetic for day/month/year stepping uses fixed average unit
//! sizes, so boundaries drift against variable-length months. That matches
//! the tick semantics this engine inherits and is a documented accuracy
//! limitation, not a bug.

use chrono::{DateTime, Datelike, NaiveDate, Timelike};

use crate::nice::nice_num;

/// Microseconds per second, as `f64` for range math.
pub const US_PER_SEC: f64 = 1_000_000.0;

/// Microseconds per second, integer form.
pub(crate) const US_PER_SEC_I: i64 = 1_000_000;

/// Earliest supported timestamp, in seconds since the Unix epoch.
///
/// Calendar conversion below the epoch is rejected by the formatter, so the
/// constraint pass never lets a time axis go negative.
pub const MIN_TIME_S: f64 = 0.0;

/// Latest supported timestamp: 3000-01-01T00:00:00Z, in seconds.
pub const MAX_TIME_S: f64 = 32_503_680_000.0;

/// Calendar unit granularities for time axes, finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimeUnit {
    /// One microsecond.
    Microsecond,
    /// One millisecond.
    Millisecond,
    /// One second.
    Second,
    /// One minute.
    Minute,
    /// One hour.
    Hour,
    /// One day.
    Day,
    /// One month (average length, 30.4375 days).
    Month,
    /// One year (average length, 365.25 days).
    Year,
}

/// All units, finest to coarsest, in auto-granularity scan order.
pub const TIME_UNITS: [TimeUnit; 8] = [
    TimeUnit::Microsecond,
    TimeUnit::Millisecond,
    TimeUnit::Second,
    TimeUnit::Minute,
    TimeUnit::Hour,
    TimeUnit::Day,
    TimeUnit::Month,
    TimeUnit::Year,
];

impl TimeUnit {
    /// Unit size in microseconds.
    pub fn size_us(self) -> f64 {
        self.size_us_i() as f64
    }

    pub(crate) fn size_us_i(self) -> i64 {
        match self {
            Self::Microsecond => 1,
            Self::Millisecond => 1_000,
            Self::Second => 1_000_000,
            Self::Minute => 60 * 1_000_000,
            Self::Hour => 3_600 * 1_000_000,
            Self::Day => 86_400 * 1_000_000,
            // Average month and year lengths; calendar truncation corrects
            // the floor, stepping stays approximate.
            Self::Month => 2_629_800 * 1_000_000,
            Self::Year => 31_557_600 * 1_000_000,
        }
    }

    /// Whether the unit participates in automatic tick granularity.
    pub fn is_common(self) -> bool {
        true
    }

    /// Step multiplier applied when testing whether this unit fits a span.
    pub fn default_step(self) -> f64 {
        1.0
    }

    /// strftime-style format for a tick label at this granularity.
    fn value_format(self) -> &'static str {
        match self {
            Self::Microsecond | Self::Millisecond => "%H:%M:%S.",
            Self::Second => "%H:%M:%S",
            Self::Minute | Self::Hour => "%H:%M",
            Self::Day => "%m/%d",
            Self::Month => "%Y/%m",
            Self::Year => "%Y",
        }
    }

    /// strftime-style format for the coarse context prefix of a range.
    fn prefix_format(self) -> &'static str {
        match self {
            Self::Microsecond
            | Self::Millisecond
            | Self::Second
            | Self::Minute
            | Self::Hour => "%Y/%m/%d",
            Self::Day | Self::Month => "%Y/%m",
            Self::Year => "%Y",
        }
    }
}

/// Pick the coarsest calendar unit whose boundaries fit within `capacity`
/// divisions of `[min, max]` (microseconds). Scans finest to coarsest; the
/// first qualifying unit wins, falling back to years when nothing fits.
pub fn auto_time_unit(min: f64, max: f64, capacity: usize) -> TimeUnit {
    for unit in TIME_UNITS {
        if !unit.is_common() {
            continue;
        }
        let per_division = unit.default_step() * unit.size_us();
        if ((max - min) / per_division).ceil() <= capacity as f64 {
            return unit;
        }
    }
    TimeUnit::Year
}

/// Round a raw step count to an integer step that lands on calendar-friendly
/// boundaries for the given unit.
///
/// Seconds and minutes favor `{1,2,5,10,15,30,60,...}`, hours favor
/// `{1,2,4,6,12,24,...}`, months favor `{1,6,12,...}`; sub-second units,
/// days below a month, and years fall back to [`nice_num`].
pub fn nice_time_step(x: f64, unit: TimeUnit) -> i64 {
    let f = x as i64;
    match unit {
        TimeUnit::Microsecond | TimeUnit::Millisecond => nice_num(x.max(1.0), true) as i64,
        TimeUnit::Second | TimeUnit::Minute => {
            if f < 2 {
                1
            } else if f < 4 {
                2
            } else if f < 10 {
                5
            } else if f < 15 {
                10
            } else if f < 23 {
                // upper threshold is the midpoint of (15, 30)
                15
            } else if f < 45 {
                30
            } else if f < 60 {
                60
            } else {
                (f / 60) * 60
            }
        }
        TimeUnit::Hour => {
            if f < 2 {
                1
            } else if f < 4 {
                2
            } else if f < 6 {
                4
            } else if f < 12 {
                6
            } else if f < 24 {
                12
            } else {
                (f / 24) * 24
            }
        }
        TimeUnit::Day => {
            if f < 30 {
                nice_num(x.max(1.0), true) as i64
            } else {
                (f / 30) * 30
            }
        }
        TimeUnit::Month => {
            if f < 2 {
                1
            } else if f < 6 {
                6
            } else if f < 12 {
                12
            } else {
                (f / 12) * 12
            }
        }
        TimeUnit::Year => nice_num(x.max(1.0), true) as i64,
    }
}

/// Split a microsecond timestamp into whole seconds and the sub-second
/// microsecond remainder.
fn split_us(timestamp_us: f64) -> (i64, i64) {
    let total = timestamp_us as i64;
    let secs = total.div_euclid(US_PER_SEC_I);
    let micros = total - secs * US_PER_SEC_I;
    (secs, micros)
}

/// Walks a timestamp along boundaries of one calendar unit.
///
/// Construction floors the timestamp down to the nearest `step_size`
/// multiple within its unit; [`TimeStepper::step`] then advances whole
/// units, carrying sub-second overflow into the seconds field.
#[derive(Debug, Clone, Copy)]
pub struct TimeStepper {
    secs: i64,
    micros: i64,
    unit: TimeUnit,
}

impl TimeStepper {
    /// Create a stepper floored to a `step_size` boundary of `unit`.
    pub fn new(timestamp_us: f64, unit: TimeUnit, step_size: i64) -> Self {
        let (secs, micros) = split_us(timestamp_us);
        let mut stepper = Self { secs, micros, unit };
        stepper.floor(step_size.max(1));
        stepper
    }

    /// Advance by `n` units.
    pub fn step(&mut self, n: i64) {
        if self.unit < TimeUnit::Second {
            self.micros += self.unit.size_us_i() * n;
            let carry = self.micros.div_euclid(US_PER_SEC_I);
            self.micros -= carry * US_PER_SEC_I;
            self.secs += carry;
        } else {
            self.secs += n * (self.unit.size_us_i() / US_PER_SEC_I);
        }
    }

    /// Current position as a microsecond timestamp.
    pub fn value_us(&self) -> f64 {
        (self.secs * US_PER_SEC_I + self.micros) as f64
    }

    /// Round down to the nearest `step_size` multiple of the unit.
    fn floor(&mut self, step_size: i64) {
        if self.secs < 0 {
            // below the supported epoch window; leave untouched
            return;
        }
        match self.unit {
            TimeUnit::Microsecond => {
                let ms = (self.micros / 1_000) * 1_000;
                let us = self.micros - ms;
                self.micros = ms + (us / step_size) * step_size;
                return;
            }
            TimeUnit::Millisecond => {
                self.micros = ((self.micros / 1_000) / step_size) * step_size * 1_000;
                return;
            }
            _ => self.micros = 0,
        }
        let Some(datetime) = DateTime::from_timestamp(self.secs, 0) else {
            return;
        };
        let time = datetime.naive_utc();
        let (year, month, day) = (time.year(), time.month(), time.day());
        let (hour, minute, second) = (time.hour(), time.minute(), time.second());
        let step = step_size as u32;
        let (year, month, day, hour, minute, second) = match self.unit {
            TimeUnit::Second => (year, month, day, hour, minute, (second / step) * step),
            TimeUnit::Minute => (year, month, day, hour, (minute / step) * step, 0),
            TimeUnit::Hour => (year, month, day, (hour / step) * step, 0, 0),
            TimeUnit::Day => {
                let floored = (day / step) * step;
                (year, month, floored.max(1), 0, 0, 0)
            }
            TimeUnit::Month => {
                // truncate the zero-based month index, then back to 1-based
                let floored = ((month - 1) / step) * step + 1;
                (year, floored, 1, 0, 0, 0)
            }
            TimeUnit::Year => (year, 1, 1, 0, 0, 0),
            TimeUnit::Microsecond | TimeUnit::Millisecond => unreachable!(),
        };
        if let Some(floored) = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
        {
            self.secs = floored.and_utc().timestamp();
        }
    }
}

/// Renders a microsecond timestamp at calendar-unit precision.
///
/// Timestamps outside the supported epoch window render as empty strings
/// rather than garbage.
#[derive(Debug, Clone, Copy)]
pub struct TimeFormatter {
    secs: i64,
    micros: i64,
}

impl TimeFormatter {
    /// Create a formatter for a microsecond timestamp.
    pub fn new(timestamp_us: f64) -> Self {
        let (secs, micros) = split_us(timestamp_us);
        Self { secs, micros }
    }

    /// Full date-time string with microsecond suffix.
    pub fn full(&self) -> String {
        let Some(time) = self.naive() else {
            return String::new();
        };
        format!(
            "{}{:06}",
            time.format("%Y/%m/%d %H:%M:%S."),
            self.micros
        )
    }

    /// Coarse context prefix for a tick range at the given unit.
    pub fn range_prefix(&self, unit: TimeUnit) -> String {
        let Some(time) = self.naive() else {
            return String::new();
        };
        time.format(unit.prefix_format()).to_string()
    }

    /// Unit-granular tick label, zero-padding sub-second suffixes.
    pub fn range_label(&self, unit: TimeUnit) -> String {
        let Some(time) = self.naive() else {
            return String::new();
        };
        let base = time.format(unit.value_format()).to_string();
        match unit {
            TimeUnit::Millisecond => format!("{base}{:03}", self.micros / 1_000),
            TimeUnit::Microsecond => format!("{base}{:06}", self.micros),
            _ => base,
        }
    }

    fn naive(&self) -> Option<chrono::NaiveDateTime> {
        if self.secs < 0 {
            return None;
        }
        DateTime::from_timestamp(self.secs, 0).map(|datetime| datetime.naive_utc())
    }
}
