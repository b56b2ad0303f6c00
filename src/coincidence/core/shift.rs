//! Offset shifting — constant time offsets applied to a stop stream.
//!
//! Purpose
//! -------
//! Apply a constant additive shift to a stream's timestamps without touching
//! the caller's stream. The matching pipeline works on a borrowed
//! [`ShiftedTimes`] view, so offset scans never copy the stop stream; callers
//! that want an owned result use [`EventStream::shifted`].
//!
//! Key behaviors
//! -------------
//! - [`ShiftedTimes`] reads `times[i] + shift` on demand and answers the
//!   sorted-search query "first index whose shifted time is not earlier than
//!   `t`".
//! - [`EventStream::shifted`] materializes a new stream with shifted
//!   timestamps and the original payloads.
//!
//! Invariants & assumptions
//! ------------------------
//! - The shift is finite; a constant shift preserves ascending order. A finite
//!   shift can still overflow a timestamp to ±∞, so [`EventStream::shifted`]
//!   re-validates its output.
//! - A shifted value is always computed as `times[i] + shift`, so the view and
//!   the materialized stream agree bit for bit.

use crate::coincidence::{
    core::{
        stream::EventStream,
        validation::{validate_finite, validate_timestamps},
    },
    errors::CoincidenceResult,
};
use ndarray::Array1;

/// `ShiftedTimes` — borrowed view of a timestamp sequence plus a constant shift.
///
/// Fields
/// ------
/// - `times`: `&[f64]`
///   Sorted, finite timestamps of the underlying stream.
/// - `shift`: `f64`
///   Finite offset added to every timestamp on read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftedTimes<'a> {
    times: &'a [f64],
    shift: f64,
}

impl<'a> ShiftedTimes<'a> {
    /// Build a shifted view over `stream`.
    ///
    /// Errors
    /// ------
    /// - `CoincidenceError::NonFiniteArgument { name: "shift", .. }`
    ///   Returned when `shift` is NaN or ±∞.
    pub fn new(stream: &'a EventStream, shift: f64) -> CoincidenceResult<Self> {
        validate_finite("shift", shift)?;
        Ok(ShiftedTimes { times: stream.time_slice(), shift })
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Shifted timestamp of event `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.times.get(index).map(|&t| t + self.shift)
    }

    /// Index of the first event whose shifted time is `>= t`.
    ///
    /// Returns `self.len()` when every shifted time is earlier than `t`.
    /// Equivalent to a left-sided sorted search; O(log m).
    #[inline]
    pub fn first_not_before(&self, t: f64) -> usize {
        self.times.partition_point(|&s| s + self.shift < t)
    }

    /// Materialize the shifted timestamps.
    pub fn to_array(&self) -> Array1<f64> {
        self.times.iter().map(|&t| t + self.shift).collect()
    }
}

impl EventStream {
    /// New stream with every timestamp increased by `shift`.
    ///
    /// Payloads and unit are carried over unchanged; `self` is untouched.
    ///
    /// Errors
    /// ------
    /// - `CoincidenceError::NonFiniteArgument { name: "shift", .. }`
    ///   Returned when `shift` is NaN or ±∞.
    /// - `CoincidenceError::NonFiniteTimestamp`
    ///   Returned when a shifted timestamp overflows to ±∞.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_coincidence::coincidence::core::stream::EventStream;
    /// let stop = EventStream::new(array![1.0, 11.0]).unwrap();
    /// let shifted = stop.shifted(-1.0).unwrap();
    /// assert_eq!(shifted.times(), &array![0.0, 10.0]);
    /// assert_eq!(stop.times(), &array![1.0, 11.0]);
    /// ```
    pub fn shifted(&self, shift: f64) -> CoincidenceResult<EventStream> {
        let times = ShiftedTimes::new(self, shift)?.to_array();
        validate_timestamps(times.as_slice().unwrap_or_default())?;
        Ok(EventStream::from_parts_unchecked(
            times,
            self.energy().cloned(),
            self.shape().cloned(),
            self.unit(),
        ))
    }
}
