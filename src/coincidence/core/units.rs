//! Time units for event streams.
//!
//! - [`TimeUnit`] declares the granularity of timestamps (nano/micro/milli/seconds).
//!
//! Notes
//! -----
//! - `TimeUnit` is metadata only; it does not rescale values by itself. Shifts,
//!   windows and projected differences are always expressed in the stream's
//!   own unit.

/// Units of measurement for timestamps in an [`EventStream`](super::stream::EventStream).
///
/// This records the time scale of the data for reporting and interpretation
/// downstream. It does **not** rescale values automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    /// Nanoseconds (1e-9 s).
    Nanoseconds,
    /// Microseconds (1e-6 s).
    Microseconds,
    /// Milliseconds (1e-3 s).
    Milliseconds,
    /// Seconds.
    Seconds,
    /// Instrument clock ticks of unspecified length.
    #[default]
    Ticks,
}

impl TimeUnit {
    /// Length of one unit in seconds, or `None` for [`TimeUnit::Ticks`].
    pub fn seconds_per_unit(self) -> Option<f64> {
        match self {
            TimeUnit::Nanoseconds => Some(1e-9),
            TimeUnit::Microseconds => Some(1e-6),
            TimeUnit::Milliseconds => Some(1e-3),
            TimeUnit::Seconds => Some(1.0),
            TimeUnit::Ticks => None,
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TimeUnit::Nanoseconds => "nanoseconds",
            TimeUnit::Microseconds => "microseconds",
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Ticks => "ticks",
        };
        f.write_str(name)
    }
}
