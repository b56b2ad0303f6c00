//! coincidence::errors — error type and result alias for the coincidence stack.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`CoincidenceError`], and result alias,
//! [`CoincidenceResult`], shared by stream construction, the matching
//! pipeline, offset scans, and pair projections. Precondition violations are
//! surfaced at the offending call instead of producing silently wrong pairs.
//!
//! Key behaviors
//! -------------
//! - Group failures into three families:
//!   - invalid input (unsorted or non-finite timestamps, payload length
//!     mismatches, pair sets that do not fit the streams),
//!   - missing fields (a payload projection on a stream without that payload),
//!   - invalid arguments (step count, window, shift or bound values, and
//!     accidental-estimation parameters).
//! - Attach a human-readable `Display` message to each variant that embeds
//!   the offending index / value and, for pair-set failures, the channel.
//! - Convert into a Python `ValueError` at the PyO3 boundary when the
//!   `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Degenerate-but-valid inputs (empty streams, zero window, no matches) are
//!   never errors; they produce empty pair sets and zero counts.
//! - Every call either fully succeeds or fails with exactly one variant;
//!   there is no partial result.
//!
//! Conventions
//! -----------
//! - Indices are 0-based. Construction errors refer to the stream being
//!   built; pair-set errors name the stream via `channel`.
//! - Messages are phrased in terms of domain constraints ("timestamps must be
//!   sorted ascending") rather than implementation details.
//!
//! Testing notes
//! -------------
//! - Unit tests below check that `Display` messages embed their payloads and
//!   that the family helpers classify variants correctly.

use crate::coincidence::core::stream::{Channel, Payload};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for coincidence operations.
pub type CoincidenceResult<T> = Result<T, CoincidenceError>;

/// CoincidenceError — failures of the coincidence matching stack.
///
/// Variants
/// --------
/// Invalid input:
/// - `UnsortedTimestamps` — a timestamp is smaller than its predecessor.
/// - `NonFiniteTimestamp` — a timestamp is NaN or ±∞.
/// - `PayloadLengthMismatch` — a payload does not have one value per event.
/// - `IndexOutOfRange` — a pair set refers to an event the stream lacks.
/// - `PairLengthMismatch` — start and stop index sequences differ in length.
/// - `DuplicateIndex` — a pair set is not one-to-one.
///
/// Missing field:
/// - `MissingPayload` — a projection needs a payload the stream lacks.
///
/// Invalid argument:
/// - `InvalidStepCount` — an offset scan was asked for fewer than one step.
/// - `NegativeWindow` — a negative resolving window under strict validation.
/// - `NonFiniteArgument` — a shift, window, or scan bound is NaN or ±∞.
/// - `InvalidExclusion` — a negative or non-finite peak exclusion width.
/// - `InsufficientBackground` — no curve point lies outside the exclusion
///   zone used for an accidental-rate estimate.
/// - `InvalidLiveTime` — the overlap span of two streams is not positive.
#[derive(Debug, Clone, PartialEq)]
pub enum CoincidenceError {
    // ---- Invalid input ----
    /// Timestamp at `index` is smaller than the one before it.
    UnsortedTimestamps { index: usize, previous: f64, value: f64 },

    /// Timestamp at `index` is NaN/±inf.
    NonFiniteTimestamp { index: usize, value: f64 },

    /// A payload sequence differs in length from the timestamp sequence.
    PayloadLengthMismatch { payload: Payload, expected: usize, actual: usize },

    /// A matched index does not address an event in the stream.
    IndexOutOfRange { channel: Channel, index: usize, len: usize },

    /// Start and stop index sequences have different lengths.
    PairLengthMismatch { start: usize, stop: usize },

    /// An index appears twice on one side of a pair set.
    DuplicateIndex { channel: Channel, index: usize },

    // ---- Missing field ----
    /// The requested payload is absent from the stream.
    MissingPayload { channel: Channel, payload: Payload },

    // ---- Invalid argument ----
    /// Offset scans need at least one step.
    InvalidStepCount { steps: usize },

    /// Resolving window is negative and strict validation is active.
    NegativeWindow { window: f64 },

    /// A scalar argument is NaN/±inf.
    NonFiniteArgument { name: &'static str, value: f64 },

    /// Peak exclusion half-width must be finite and >= 0.
    InvalidExclusion { value: f64 },

    /// No curve points remain after excluding the peak region.
    InsufficientBackground { exclusion: f64 },

    /// Live time for an analytic accidental estimate must be finite and > 0.
    InvalidLiveTime { value: f64 },
}

impl CoincidenceError {
    /// `true` for the invalid-input family (malformed streams or pair sets).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            CoincidenceError::UnsortedTimestamps { .. }
                | CoincidenceError::NonFiniteTimestamp { .. }
                | CoincidenceError::PayloadLengthMismatch { .. }
                | CoincidenceError::IndexOutOfRange { .. }
                | CoincidenceError::PairLengthMismatch { .. }
                | CoincidenceError::DuplicateIndex { .. }
        )
    }

    /// `true` when a projection asked for an absent payload.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, CoincidenceError::MissingPayload { .. })
    }

    /// `true` for the invalid-argument family.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            CoincidenceError::InvalidStepCount { .. }
                | CoincidenceError::NegativeWindow { .. }
                | CoincidenceError::NonFiniteArgument { .. }
                | CoincidenceError::InvalidExclusion { .. }
                | CoincidenceError::InsufficientBackground { .. }
                | CoincidenceError::InvalidLiveTime { .. }
        )
    }
}

impl std::error::Error for CoincidenceError {}

impl std::fmt::Display for CoincidenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Invalid input ----
            CoincidenceError::UnsortedTimestamps { index, previous, value } => {
                write!(
                    f,
                    "Timestamps must be sorted ascending; index {index} has {value} after {previous}"
                )
            }
            CoincidenceError::NonFiniteTimestamp { index, value } => {
                write!(f, "Timestamp at index {index} is non-finite: {value}")
            }
            CoincidenceError::PayloadLengthMismatch { payload, expected, actual } => {
                write!(f, "{payload} payload length mismatch: expected {expected}, got {actual}")
            }
            CoincidenceError::IndexOutOfRange { channel, index, len } => {
                write!(f, "{channel} index {index} is out of range for a stream of length {len}")
            }
            CoincidenceError::PairLengthMismatch { start, stop } => {
                write!(
                    f,
                    "Matched index sequences must have equal length: start has {start}, stop has {stop}"
                )
            }
            CoincidenceError::DuplicateIndex { channel, index } => {
                write!(f, "{channel} index {index} appears in more than one matched pair")
            }
            // ---- Missing field ----
            CoincidenceError::MissingPayload { channel, payload } => {
                write!(f, "{channel} stream carries no {payload} payload")
            }
            // ---- Invalid argument ----
            CoincidenceError::InvalidStepCount { steps } => {
                write!(f, "Offset scan step count must be >= 1; got: {steps}")
            }
            CoincidenceError::NegativeWindow { window } => {
                write!(f, "Resolving window must be non-negative; got: {window}")
            }
            CoincidenceError::NonFiniteArgument { name, value } => {
                write!(f, "Argument `{name}` must be finite; got: {value}")
            }
            CoincidenceError::InvalidExclusion { value } => {
                write!(f, "Peak exclusion width must be finite and >= 0; got: {value}")
            }
            CoincidenceError::InsufficientBackground { exclusion } => {
                write!(
                    f,
                    "No curve points lie farther than {exclusion} from the peak offset; cannot estimate background"
                )
            }
            CoincidenceError::InvalidLiveTime { value } => {
                write!(f, "Live time must be finite and > 0; got: {value}")
            }
        }
    }
}

/// Convert a [`CoincidenceError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<CoincidenceError> for PyErr {
    fn from(err: CoincidenceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` messages embedding channel, index and value payloads.
    // - The family helpers (`is_invalid_input`, `is_missing_field`,
    //   `is_invalid_argument`).
    //
    // They intentionally DO NOT cover:
    // - The `From<CoincidenceError> for PyErr` conversion, which needs the
    //   Python C API and belongs to Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that an unsorted-timestamp error embeds the offending index and
    // both values.
    //
    // Given
    // -----
    // - `UnsortedTimestamps` at index 4 (3.5 after 7.0).
    //
    // Expect
    // ------
    // - The message contains "4", "3.5" and "7".
    fn unsorted_timestamps_display_includes_payload() {
        // Arrange
        let err = CoincidenceError::UnsortedTimestamps { index: 4, previous: 7.0, value: 3.5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('4') && msg.contains("3.5") && msg.contains('7'), "got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that a missing-payload error names both the channel and the
    // payload kind.
    //
    // Given
    // -----
    // - `MissingPayload` for the start channel's energy.
    //
    // Expect
    // ------
    // - The message contains "start" and "energy".
    fn missing_payload_display_names_channel_and_payload() {
        let err =
            CoincidenceError::MissingPayload { channel: Channel::Start, payload: Payload::Energy };

        let msg = err.to_string();

        assert!(msg.contains("start") && msg.contains("energy"), "got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure each variant belongs to exactly one error family.
    //
    // Given
    // -----
    // - One representative variant per family.
    //
    // Expect
    // ------
    // - Only the matching family helper returns `true`.
    fn error_families_are_disjoint() {
        let input = CoincidenceError::PairLengthMismatch { start: 1, stop: 2 };
        let missing =
            CoincidenceError::MissingPayload { channel: Channel::Stop, payload: Payload::Shape };
        let argument = CoincidenceError::InvalidStepCount { steps: 0 };

        for (err, family) in [(input, 0), (missing, 1), (argument, 2)] {
            let flags = [err.is_invalid_input(), err.is_missing_field(), err.is_invalid_argument()];
            for (i, flag) in flags.iter().enumerate() {
                assert_eq!(*flag, i == family, "{err:?} misclassified");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the step-count error embeds the offending value.
    //
    // Given
    // -----
    // - `InvalidStepCount { steps: 0 }`.
    //
    // Expect
    // ------
    // - The message contains "0" and ">= 1".
    fn invalid_step_count_display_includes_payload() {
        let msg = CoincidenceError::InvalidStepCount { steps: 0 }.to_string();

        assert!(msg.contains(">= 1") && msg.contains('0'), "got: {msg}");
    }
}
