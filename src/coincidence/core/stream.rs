//! Event stream containers for coincidence matching.
//!
//! Purpose
//! -------
//! Provide the validated, immutable container for one channel of timestamped
//! events, together with the optional per-event payloads (energy, pulse shape)
//! that paired projections read. This module centralizes the input checks so
//! the matching pipeline can rely on sorted, finite timestamps.
//!
//! Key behaviors
//! -------------
//! - [`EventStream`] owns its timestamps as an `ndarray::Array1<f64>` and
//!   enforces finiteness and non-decreasing order at construction.
//! - Payloads are attached with [`EventStream::with_energy`] /
//!   [`EventStream::with_shape`], which enforce one value per event.
//! - [`Channel`] and [`Payload`] name the side and the field in errors and
//!   trace records.
//!
//! Invariants & assumptions
//! ------------------------
//! - `times` is finite and sorted ascending (ties allowed).
//! - Every present payload has exactly `times.len()` entries, indexed like
//!   the timestamps.
//! - Streams are never mutated after construction; all fields are private and
//!   builders consume `self`.
//! - Timestamps are stored in standard (contiguous) layout so the matcher can
//!   binary-search a plain slice.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; event `i` is `(times[i], energy[i], shape[i])`.
//! - Timestamps are expressed in the stream's [`TimeUnit`]; the unit is
//!   metadata only.
//! - Empty streams are valid and simply produce no matches.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction (happy path, empty, unsorted, non-finite),
//!   payload attachment and length mismatches, and payload lookup.

use crate::coincidence::{
    core::{
        units::TimeUnit,
        validation::{validate_payload_len, validate_timestamps},
    },
    errors::CoincidenceResult,
};
use ndarray::Array1;

/// Side of a start/stop coincidence measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The stream whose events open a coincidence window.
    Start,
    /// The stream searched for the nearest following event.
    Stop,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Start => write!(f, "start"),
            Channel::Stop => write!(f, "stop"),
        }
    }
}

/// Per-event payload carried in parallel with the timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Payload {
    /// Deposited energy (or pulse height) of the event.
    Energy,
    /// Pulse-shape discrimination value of the event.
    Shape,
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Energy => write!(f, "energy"),
            Payload::Shape => write!(f, "shape"),
        }
    }
}

/// `EventStream` — validated, sorted timestamps plus optional payloads.
///
/// Purpose
/// -------
/// Represent one detector channel as a finite, fully materialized sequence of
/// events ordered by time.
///
/// Fields
/// ------
/// - `times`: `Array1<f64>`
///   Event timestamps; finite and non-decreasing.
/// - `energy`: `Option<Array1<f64>>`
///   Optional per-event energy, same length as `times`.
/// - `shape`: `Option<Array1<f64>>`
///   Optional per-event pulse-shape value, same length as `times`.
/// - `unit`: [`TimeUnit`]
///   Interpretation of the timestamps.
///
/// Performance
/// -----------
/// - Validation is a single O(n) scan per sequence. After construction the
///   stream is read-only and can be shared across threads by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct EventStream {
    times: Array1<f64>,
    energy: Option<Array1<f64>>,
    shape: Option<Array1<f64>>,
    unit: TimeUnit,
}

impl EventStream {
    /// Construct a validated [`EventStream`] from raw timestamps.
    ///
    /// Parameters
    /// ----------
    /// - `times`: `Array1<f64>`
    ///   Event timestamps. Must be finite and sorted ascending; may be empty.
    ///
    /// Returns
    /// -------
    /// `CoincidenceResult<EventStream>`
    ///   A stream without payloads in [`TimeUnit::Ticks`].
    ///
    /// Errors
    /// ------
    /// - `CoincidenceError::NonFiniteTimestamp { index, value }`
    ///   Returned for the first NaN/±∞ timestamp.
    /// - `CoincidenceError::UnsortedTimestamps { index, previous, value }`
    ///   Returned for the first timestamp smaller than its predecessor.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_coincidence::coincidence::core::stream::EventStream;
    /// let stream = EventStream::new(array![0.0, 10.0, 20.0]).unwrap();
    /// assert_eq!(stream.len(), 3);
    /// assert!(EventStream::new(array![1.0, 0.0]).is_err());
    /// ```
    pub fn new(times: Array1<f64>) -> CoincidenceResult<Self> {
        let times =
            if times.is_standard_layout() { times } else { Array1::from(times.to_vec()) };
        validate_timestamps(times.as_slice().unwrap_or_default())?;
        Ok(EventStream { times, energy: None, shape: None, unit: TimeUnit::default() })
    }

    /// Construct a stream from a timestamp slice (copied).
    pub fn from_slice(times: &[f64]) -> CoincidenceResult<Self> {
        EventStream::new(Array1::from(times.to_vec()))
    }

    /// Attach a per-event energy payload.
    ///
    /// Errors
    /// ------
    /// - `CoincidenceError::PayloadLengthMismatch { payload: Energy, .. }`
    ///   Returned when `energy.len() != self.len()`.
    pub fn with_energy(mut self, energy: Array1<f64>) -> CoincidenceResult<Self> {
        validate_payload_len(Payload::Energy, self.times.len(), energy.len())?;
        self.energy = Some(energy);
        Ok(self)
    }

    /// Attach a per-event pulse-shape payload.
    ///
    /// Errors
    /// ------
    /// - `CoincidenceError::PayloadLengthMismatch { payload: Shape, .. }`
    ///   Returned when `shape.len() != self.len()`.
    pub fn with_shape(mut self, shape: Array1<f64>) -> CoincidenceResult<Self> {
        validate_payload_len(Payload::Shape, self.times.len(), shape.len())?;
        self.shape = Some(shape);
        Ok(self)
    }

    /// Tag the stream with a time unit. Values are not rescaled.
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Timestamps, sorted ascending.
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    /// Timestamps as a contiguous slice.
    pub fn time_slice(&self) -> &[f64] {
        // `new` stores timestamps in standard layout.
        self.times.as_slice().unwrap_or_default()
    }

    pub fn energy(&self) -> Option<&Array1<f64>> {
        self.energy.as_ref()
    }

    pub fn shape(&self) -> Option<&Array1<f64>> {
        self.shape.as_ref()
    }

    /// Payload by kind, or `None` when the stream does not carry it.
    pub fn payload(&self, payload: Payload) -> Option<&Array1<f64>> {
        match payload {
            Payload::Energy => self.energy(),
            Payload::Shape => self.shape(),
        }
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// First and last timestamp, or `None` for an empty stream.
    pub fn span(&self) -> Option<(f64, f64)> {
        if self.times.is_empty() {
            return None;
        }
        Some((self.times[0], self.times[self.times.len() - 1]))
    }

    /// Reassemble a stream from parts that already satisfy the invariants.
    pub(crate) fn from_parts_unchecked(
        times: Array1<f64>, energy: Option<Array1<f64>>, shape: Option<Array1<f64>>,
        unit: TimeUnit,
    ) -> Self {
        EventStream { times, energy, shape, unit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coincidence::errors::CoincidenceError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `EventStream::new` on valid, empty, unsorted and non-finite input.
    // - Payload attachment and length enforcement.
    // - Payload lookup by kind, unit tagging and span.
    //
    // These tests intentionally DO NOT cover:
    // - Matching behavior, which lives in `coincidence::pipeline`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a sorted stream with ties is accepted and preserved.
    //
    // Given
    // -----
    // - `times = [0.0, 1.0, 1.0, 4.0]`.
    //
    // Expect
    // ------
    // - `Ok(stream)` with identical timestamps, no payloads, `Ticks` unit.
    fn event_stream_new_accepts_sorted_times_with_ties() {
        // Arrange
        let times = array![0.0, 1.0, 1.0, 4.0];

        // Act
        let stream = EventStream::new(times.clone()).unwrap();

        // Assert
        assert_eq!(stream.times(), &times);
        assert_eq!(stream.len(), 4);
        assert!(stream.energy().is_none() && stream.shape().is_none());
        assert_eq!(stream.unit(), TimeUnit::Ticks);
        assert_eq!(stream.span(), Some((0.0, 4.0)));
    }

    #[test]
    // Purpose
    // -------
    // Ensure empty streams are valid and report no span.
    //
    // Expect
    // ------
    // - `Ok(stream)` with `is_empty()` and `span() == None`.
    fn event_stream_new_accepts_empty_series() {
        let stream = EventStream::from_slice(&[]).unwrap();

        assert!(stream.is_empty());
        assert_eq!(stream.span(), None);
    }

    #[test]
    // Purpose
    // -------
    // Ensure unsorted input is rejected at construction.
    //
    // Given
    // -----
    // - `times = [0.0, 2.0, 1.0]`.
    //
    // Expect
    // ------
    // - `Err(UnsortedTimestamps { index: 2, previous: 2.0, value: 1.0 })`.
    fn event_stream_new_rejects_unsorted_times() {
        let result = EventStream::new(array![0.0, 2.0, 1.0]);

        assert_eq!(
            result.unwrap_err(),
            CoincidenceError::UnsortedTimestamps { index: 2, previous: 2.0, value: 1.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure infinite timestamps are rejected.
    //
    // Expect
    // ------
    // - `Err(NonFiniteTimestamp { index: 1, value: +∞ })`.
    fn event_stream_new_rejects_non_finite_times() {
        let result = EventStream::new(array![0.0, f64::INFINITY]);

        assert_eq!(
            result.unwrap_err(),
            CoincidenceError::NonFiniteTimestamp { index: 1, value: f64::INFINITY }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify payload attachment and lookup by kind.
    //
    // Given
    // -----
    // - Three events with energy and shape payloads of length three.
    //
    // Expect
    // ------
    // - Both payloads are retrievable via accessors and `payload(kind)`.
    fn event_stream_payloads_attach_and_lookup() {
        let stream = EventStream::new(array![0.0, 1.0, 2.0])
            .and_then(|s| s.with_energy(array![10.0, 20.0, 30.0]))
            .and_then(|s| s.with_shape(array![0.1, 0.2, 0.3]))
            .unwrap()
            .with_unit(TimeUnit::Nanoseconds);

        assert_eq!(stream.payload(Payload::Energy), Some(&array![10.0, 20.0, 30.0]));
        assert_eq!(stream.payload(Payload::Shape), Some(&array![0.1, 0.2, 0.3]));
        assert_eq!(stream.unit(), TimeUnit::Nanoseconds);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a payload with the wrong length is rejected.
    //
    // Given
    // -----
    // - Three events and a two-element energy payload.
    //
    // Expect
    // ------
    // - `Err(PayloadLengthMismatch { payload: Energy, expected: 3, actual: 2 })`.
    fn event_stream_with_energy_rejects_length_mismatch() {
        let stream = EventStream::new(array![0.0, 1.0, 2.0]).unwrap();

        let result = stream.with_energy(array![1.0, 2.0]);

        assert_eq!(
            result.unwrap_err(),
            CoincidenceError::PayloadLengthMismatch {
                payload: Payload::Energy,
                expected: 3,
                actual: 2
            }
        );
    }
}
