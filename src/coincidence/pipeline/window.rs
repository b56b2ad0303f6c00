//! Window filter — accept nearest-following pairs inside the resolving window.
//!
//! Purpose
//! -------
//! Turn the per-start nearest-following positions into candidate pairs and
//! keep those whose shifted time difference lies in `[0, window]`.
//!
//! Key behaviors
//! -------------
//! - `diff = (stop[j] + shift) - start[i]`, read through [`ShiftedTimes`] so
//!   the value matches the materialized shifted stream exactly.
//! - Accept iff `0 <= diff <= window`. The lower bound is redundant for sorted
//!   input but kept as an explicit guard.
//! - Start events marked unmatched (`None`) are skipped.
//!
//! Invariants & assumptions
//! ------------------------
//! - `nearest.len() == start.len()`, as produced by
//!   [`nearest_following`](super::nearest::nearest_following).
//! - Output order is ascending in start index.

use crate::coincidence::core::{shift::ShiftedTimes, trace};

/// `Candidate` — one accepted start/stop pair before deduplication.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub start_index: usize,
    pub stop_index: usize,
    /// Shifted stop time minus start time.
    pub diff: f64,
}

/// Keep the nearest-following pairs whose difference lies in `[0, window]`.
///
/// Parameters
/// ----------
/// - `start`: `&[f64]`
///   Start timestamps.
/// - `stop`: `&ShiftedTimes`
///   Shifted stop timestamps used for the search.
/// - `nearest`: `&[Option<usize>]`
///   Per-start nearest-following stop index.
/// - `window`: `f64`
///   Non-negative resolving window.
/// - `emit_trace`: `bool`
///   Emit a `tracing` record for every rejected pair.
///
/// Returns
/// -------
/// `Vec<Candidate>`
///   Accepted pairs in ascending start order.
pub fn filter_window(
    start: &[f64], stop: &ShiftedTimes<'_>, nearest: &[Option<usize>], window: f64,
    emit_trace: bool,
) -> Vec<Candidate> {
    let mut accepted = Vec::with_capacity(nearest.len());
    for (start_index, (&start_time, position)) in start.iter().zip(nearest).enumerate() {
        let Some(stop_index) = *position else { continue };
        let Some(stop_time) = stop.get(stop_index) else { continue };
        let diff = stop_time - start_time;
        if (0.0..=window).contains(&diff) {
            accepted.push(Candidate { start_index, stop_index, diff });
        } else if emit_trace {
            trace::trace_rejected(start_index, stop_index, diff, window);
        }
    }
    accepted
}
