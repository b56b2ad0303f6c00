//! Coincidence entry points — matching and counting.
//!
//! Purpose
//! -------
//! Wire the pipeline stages together behind the two public operations:
//! [`match_coincidences`] (the matched pair set) and [`count_coincidences`]
//! (its size). The `_with` variants accept explicit [`MatchOptions`].
//!
//! Key behaviors
//! -------------
//! - Stages run in a fixed order: shift → nearest-following search → window
//!   filter → deduplication.
//! - Arguments are validated before any work: the shift must be finite; the
//!   window must be finite and is checked against the negative-window policy.
//! - With `MatchOptions::trace` set, the run is wrapped in a `tracing` span
//!   and every stage emits structured records.
//!
//! Invariants & assumptions
//! ------------------------
//! - Streams are validated at construction, so the sorted-search precondition
//!   always holds here.
//! - Every call is a pure function of its inputs; nothing is cached between
//!   calls.

use crate::coincidence::{
    core::{
        options::MatchOptions, pairs::MatchedPairSet, shift::ShiftedTimes, stream::EventStream,
        trace, validation::validate_window,
    },
    errors::CoincidenceResult,
    pipeline::{dedup::deduplicate, nearest::nearest_following, window::filter_window},
};

/// Match start events to stop events within a resolving window.
///
/// Parameters
/// ----------
/// - `start`: `&EventStream`
///   Start-channel events.
/// - `stop`: `&EventStream`
///   Stop-channel events; `shift` is added to their timestamps before matching.
/// - `shift`: `f64`
///   Finite offset applied to the stop stream.
/// - `window`: `f64`
///   Resolving window; a pair is accepted iff
///   `0 <= stop[j] + shift - start[i] <= window`.
///
/// Returns
/// -------
/// `CoincidenceResult<MatchedPairSet>`
///   The one-to-one pairing: every start is paired with its nearest following
///   stop, pairs outside the window are dropped, and each stop keeps only its
///   earliest start.
///
/// Errors
/// ------
/// - `CoincidenceError::NonFiniteArgument` for a NaN/±∞ `shift` or `window`.
/// - `CoincidenceError::NegativeWindow` for `window < 0` (default policy).
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_coincidence::coincidence::prelude::*;
/// let start = EventStream::new(array![0.0, 10.0, 20.0]).unwrap();
/// let stop = EventStream::new(array![1.0, 11.0, 50.0]).unwrap();
///
/// let pairs = match_coincidences(&start, &stop, 0.0, 2.0).unwrap();
/// assert_eq!(pairs.start_indices(), &[0, 1]);
/// assert_eq!(pairs.stop_indices(), &[0, 1]);
/// ```
pub fn match_coincidences(
    start: &EventStream, stop: &EventStream, shift: f64, window: f64,
) -> CoincidenceResult<MatchedPairSet> {
    match_coincidences_with(start, stop, shift, window, &MatchOptions::default())
}

/// [`match_coincidences`] with explicit options.
pub fn match_coincidences_with(
    start: &EventStream, stop: &EventStream, shift: f64, window: f64, opts: &MatchOptions,
) -> CoincidenceResult<MatchedPairSet> {
    let shifted = ShiftedTimes::new(stop, shift)?;
    if !validate_window(window, opts.negative_window)? {
        return Ok(MatchedPairSet::empty(shift, window));
    }

    let _span = opts
        .trace
        .then(|| trace::span_match(shift, window, start.len(), stop.len()).entered());

    let start_times = start.time_slice();
    let nearest = nearest_following(start_times, &shifted, opts.trace);
    let accepted = filter_window(start_times, &shifted, &nearest, window, opts.trace);
    let (start_indices, stop_indices) = deduplicate(&accepted, opts.trace);

    if opts.trace {
        let matched = nearest.iter().filter(|position| position.is_some()).count();
        trace::trace_match_summary(matched, accepted.len(), start_indices.len());
    }

    Ok(MatchedPairSet::from_unique(start_indices, stop_indices, shift, window))
}

/// Number of coincidences between `start` and `stop`.
///
/// Same arguments, errors and semantics as [`match_coincidences`]; returns the
/// size of the matched pair set.
pub fn count_coincidences(
    start: &EventStream, stop: &EventStream, shift: f64, window: f64,
) -> CoincidenceResult<usize> {
    count_coincidences_with(start, stop, shift, window, &MatchOptions::default())
}

/// [`count_coincidences`] with explicit options.
pub fn count_coincidences_with(
    start: &EventStream, stop: &EventStream, shift: f64, window: f64, opts: &MatchOptions,
) -> CoincidenceResult<usize> {
    Ok(match_coincidences_with(start, stop, shift, window, opts)?.len())
}
