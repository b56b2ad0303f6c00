//! Structured tracing hooks for the coincidence pipeline.
//!
//! The pipeline calls these only when `MatchOptions::trace` is set. Events carry
//! typed fields (indices, sorted positions, differences) instead of free text,
//! so a subscriber can filter or aggregate them. The crate never installs a
//! subscriber itself.

use tracing::{Level, Span, span};

/// Span covering one `match_coincidences` run.
#[inline]
pub fn span_match(shift: f64, window: f64, n_start: usize, n_stop: usize) -> Span {
    span!(Level::DEBUG, "match_coincidences", shift, window, n_start, n_stop)
}

/// Span covering one `scan_offsets` sweep.
#[inline]
pub fn span_scan(lower: f64, upper: f64, steps: usize, window: f64) -> Span {
    span!(Level::DEBUG, "scan_offsets", lower, upper, steps, window)
}

/// Sorted-search position found for a start event.
#[inline]
pub fn trace_nearest(start_index: usize, start_time: f64, position: usize) {
    tracing::trace!(start_index, start_time, position, "nearest following stop");
}

/// Start event with no stop at or after it.
#[inline]
pub fn trace_unmatched(start_index: usize, start_time: f64, stop_len: usize) {
    tracing::trace!(start_index, start_time, stop_len, "no following stop");
}

/// Candidate pair rejected by the window test.
#[inline]
pub fn trace_rejected(start_index: usize, stop_index: usize, diff: f64, window: f64) {
    tracing::trace!(start_index, stop_index, diff, window, "difference outside window");
}

/// Candidate pair dropped because its stop event is already taken.
#[inline]
pub fn trace_duplicate(start_index: usize, stop_index: usize, kept_start: usize) {
    tracing::trace!(start_index, stop_index, kept_start, "stop already paired");
}

/// Per-run totals after every stage.
#[inline]
pub fn trace_match_summary(matched: usize, accepted: usize, unique: usize) {
    tracing::debug!(matched, accepted, unique, "coincidence pipeline finished");
}
