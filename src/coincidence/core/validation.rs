//! coincidence::core::validation — shared input and argument guards.
//!
//! Purpose
//! -------
//! Centralize the precondition checks of the coincidence stack so that stream
//! construction, the matching pipeline, offset scans and projections report
//! violations the same way. Each guard returns `Ok` or the first violation
//! found as a [`CoincidenceError`].
//!
//! Key behaviors
//! -------------
//! - [`validate_timestamps`]: finite, non-decreasing timestamp sequences.
//! - [`validate_payload_len`]: one payload value per event.
//! - [`validate_finite`]: scalar arguments (shift, bounds) are finite.
//! - [`validate_window`]: resolving window policy (strict or degenerate).
//! - [`validate_step_count`]: offset scans need at least one step.
//! - [`validate_pair_indices`]: a pair set addresses events both streams have.
//!
//! Conventions
//! -----------
//! - Guards are pure and allocation-free; they stop at the first offending
//!   element and report its index and value.
//! - Equal consecutive timestamps are allowed (non-decreasing order).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the success path and every error branch.

use crate::coincidence::{
    core::{
        options::NegativeWindow,
        stream::{Channel, Payload},
    },
    errors::{CoincidenceError, CoincidenceResult},
};

/// Validate that a timestamp sequence is finite and sorted ascending.
///
/// Parameters
/// ----------
/// - `times`: `&[f64]`
///   Candidate timestamps. May be empty.
///
/// Returns
/// -------
/// `CoincidenceResult<()>`
///   `Ok(())` when every value is finite and `times[i - 1] <= times[i]`.
///
/// Errors
/// ------
/// - `CoincidenceError::NonFiniteTimestamp { index, value }`
///   Returned for the first NaN or ±∞ entry.
/// - `CoincidenceError::UnsortedTimestamps { index, previous, value }`
///   Returned for the first entry smaller than its predecessor.
///
/// Notes
/// -----
/// - Finiteness is checked before ordering at each position, so a NaN is
///   never reported as an ordering violation.
pub fn validate_timestamps(times: &[f64]) -> CoincidenceResult<()> {
    let mut previous = f64::NEG_INFINITY;
    for (index, &value) in times.iter().enumerate() {
        if !value.is_finite() {
            return Err(CoincidenceError::NonFiniteTimestamp { index, value });
        }
        if value < previous {
            return Err(CoincidenceError::UnsortedTimestamps { index, previous, value });
        }
        previous = value;
    }
    Ok(())
}

/// Validate that a payload carries exactly one value per event.
pub fn validate_payload_len(
    payload: Payload, expected: usize, actual: usize,
) -> CoincidenceResult<()> {
    if expected != actual {
        return Err(CoincidenceError::PayloadLengthMismatch { payload, expected, actual });
    }
    Ok(())
}

/// Validate that a named scalar argument is finite.
pub fn validate_finite(name: &'static str, value: f64) -> CoincidenceResult<()> {
    if !value.is_finite() {
        return Err(CoincidenceError::NonFiniteArgument { name, value });
    }
    Ok(())
}

/// Validate a resolving window under the given negative-window policy.
///
/// Parameters
/// ----------
/// - `window`: `f64`
///   Maximum accepted `stop - start` difference.
/// - `policy`: [`NegativeWindow`]
///   How to treat `window < 0`.
///
/// Returns
/// -------
/// `CoincidenceResult<bool>`
///   - `Ok(true)` when the window can admit pairs (`window >= 0`).
///   - `Ok(false)` when the window is negative and the policy is
///     [`NegativeWindow::Empty`]; callers return an empty result.
///
/// Errors
/// ------
/// - `CoincidenceError::NonFiniteArgument { name: "window", .. }`
///   Returned for NaN or ±∞ regardless of policy.
/// - `CoincidenceError::NegativeWindow { window }`
///   Returned when `window < 0` and the policy is [`NegativeWindow::Reject`].
pub fn validate_window(window: f64, policy: NegativeWindow) -> CoincidenceResult<bool> {
    validate_finite("window", window)?;
    if window < 0.0 {
        return match policy {
            NegativeWindow::Reject => Err(CoincidenceError::NegativeWindow { window }),
            NegativeWindow::Empty => Ok(false),
        };
    }
    Ok(true)
}

/// Validate an offset-scan step count (`steps >= 1`).
pub fn validate_step_count(steps: usize) -> CoincidenceResult<()> {
    if steps == 0 {
        return Err(CoincidenceError::InvalidStepCount { steps });
    }
    Ok(())
}

/// Validate a pair of index sequences against the lengths of both streams.
///
/// Parameters
/// ----------
/// - `start_indices`, `stop_indices`: `&[usize]`
///   Parallel index sequences of a matched pair set.
/// - `start_len`, `stop_len`: `usize`
///   Lengths of the start and stop streams.
///
/// Errors
/// ------
/// - `CoincidenceError::PairLengthMismatch` when the sequences differ in length.
/// - `CoincidenceError::IndexOutOfRange` for the first index that does not
///   address an event, naming the offending channel.
pub fn validate_pair_indices(
    start_indices: &[usize], stop_indices: &[usize], start_len: usize, stop_len: usize,
) -> CoincidenceResult<()> {
    if start_indices.len() != stop_indices.len() {
        return Err(CoincidenceError::PairLengthMismatch {
            start: start_indices.len(),
            stop: stop_indices.len(),
        });
    }
    for (&start, &stop) in start_indices.iter().zip(stop_indices) {
        if start >= start_len {
            return Err(CoincidenceError::IndexOutOfRange {
                channel: Channel::Start,
                index: start,
                len: start_len,
            });
        }
        if stop >= stop_len {
            return Err(CoincidenceError::IndexOutOfRange {
                channel: Channel::Stop,
                index: stop,
                len: stop_len,
            });
        }
    }
    Ok(())
}
