//! Pair projections — per-pair timing differences and payload values.
//!
//! Purpose
//! -------
//! Read values off the two original streams at the indices of a
//! [`MatchedPairSet`]. These are the inputs to timing histograms and
//! energy/shape correlation maps.
//!
//! Key behaviors
//! -------------
//! - Timing: `stop[j] + pairs.shift() - start[i]` for every pair, in pair
//!   order. The shift comes from the pair set, so the value matches the
//!   difference the window filter accepted.
//! - Payloads: the start-side and stop-side values of the requested payload,
//!   as two parallel arrays.
//! - Every projection checks that the pair set fits both streams first; a
//!   pair set built by hand or against other streams is rejected instead of
//!   indexing out of bounds.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output length always equals `pairs.len()`; output order is pair order.
//! - A missing payload is an error naming the channel that lacks it; there is
//!   no silent default.

use crate::coincidence::{
    core::{
        pairs::MatchedPairSet,
        stream::{Channel, EventStream, Payload},
    },
    errors::{CoincidenceError, CoincidenceResult},
};
use ndarray::{Array1, Axis};

/// Shifted time difference of every matched pair.
///
/// Parameters
/// ----------
/// - `start`, `stop`: `&EventStream`
///   The streams the pair set was computed from.
/// - `pairs`: `&MatchedPairSet`
///   Pairing whose recorded shift is applied to the stop times.
///
/// Returns
/// -------
/// `CoincidenceResult<Array1<f64>>`
///   One difference per pair, each in `[0, pairs.window()]` for a pair set
///   produced by `match_coincidences` on these streams.
///
/// Errors
/// ------
/// - `CoincidenceError::IndexOutOfRange` when an index does not address an
///   event of its stream.
pub fn pair_timing_differences(
    start: &EventStream, stop: &EventStream, pairs: &MatchedPairSet,
) -> CoincidenceResult<Array1<f64>> {
    pairs.check_against(start, stop)?;
    let start_times = start.times();
    let stop_times = stop.times();
    let shift = pairs.shift();
    Ok(pairs.iter().map(|(i, j)| (stop_times[j] + shift) - start_times[i]).collect())
}

/// Start-side and stop-side values of one payload for every matched pair.
///
/// Parameters
/// ----------
/// - `start`, `stop`: `&EventStream`
///   Streams carrying the requested payload.
/// - `pairs`: `&MatchedPairSet`
///   Pairing to project.
/// - `payload`: `Payload`
///   Which per-event value to read.
///
/// Returns
/// -------
/// `CoincidenceResult<(Array1<f64>, Array1<f64>)>`
///   `(start_values, stop_values)`, both of length `pairs.len()`.
///
/// Errors
/// ------
/// - `CoincidenceError::MissingPayload` naming the first stream (start, then
///   stop) that lacks the payload.
/// - `CoincidenceError::IndexOutOfRange` when the pair set does not fit the
///   streams.
pub fn pair_payloads(
    start: &EventStream, stop: &EventStream, pairs: &MatchedPairSet, payload: Payload,
) -> CoincidenceResult<(Array1<f64>, Array1<f64>)> {
    let start_values = start
        .payload(payload)
        .ok_or(CoincidenceError::MissingPayload { channel: Channel::Start, payload })?;
    let stop_values = stop
        .payload(payload)
        .ok_or(CoincidenceError::MissingPayload { channel: Channel::Stop, payload })?;
    pairs.check_against(start, stop)?;

    Ok((
        start_values.select(Axis(0), pairs.start_indices()),
        stop_values.select(Axis(0), pairs.stop_indices()),
    ))
}

/// Energy of both events of every matched pair.
///
/// Shorthand for [`pair_payloads`] with [`Payload::Energy`].
pub fn pair_energies(
    start: &EventStream, stop: &EventStream, pairs: &MatchedPairSet,
) -> CoincidenceResult<(Array1<f64>, Array1<f64>)> {
    pair_payloads(start, stop, pairs, Payload::Energy)
}

/// Pulse-shape value of both events of every matched pair.
pub fn pair_shapes(
    start: &EventStream, stop: &EventStream, pairs: &MatchedPairSet,
) -> CoincidenceResult<(Array1<f64>, Array1<f64>)> {
    pair_payloads(start, stop, pairs, Payload::Shape)
}
