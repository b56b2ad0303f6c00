//! Nearest-following search — first stop event not earlier than each start.
//!
//! Purpose
//! -------
//! For every start timestamp, locate the index of the earliest shifted stop
//! timestamp that is greater than or equal to it. This is the first stage of
//! the coincidence pipeline and the only one that searches.
//!
//! Key behaviors
//! -------------
//! - One left-sided binary search per start event via
//!   [`ShiftedTimes::first_not_before`]: O(log m) per lookup, O(n log m) total.
//! - Start events with no stop at or after them are marked `None` explicitly,
//!   wherever they occur in the start stream. Nothing assumes unmatched
//!   events form a trailing suffix.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both sequences are sorted ascending; [`EventStream`] construction
//!   guarantees this for every caller of the public API.
//! - The output has exactly one entry per start event, in start order.
//!
//! [`EventStream`]: crate::coincidence::core::stream::EventStream

use crate::coincidence::core::{shift::ShiftedTimes, trace};

/// Nearest following stop index for each start timestamp.
///
/// Parameters
/// ----------
/// - `start`: `&[f64]`
///   Sorted start timestamps.
/// - `stop`: `&ShiftedTimes`
///   Sorted stop timestamps with the scan shift applied.
/// - `emit_trace`: `bool`
///   Emit one `tracing` record per start event.
///
/// Returns
/// -------
/// `Vec<Option<usize>>`
///   Entry `i` is `Some(j)` where `j` is the smallest index with
///   `stop[j] + shift >= start[i]`, or `None` when no such stop exists.
pub fn nearest_following(
    start: &[f64], stop: &ShiftedTimes<'_>, emit_trace: bool,
) -> Vec<Option<usize>> {
    let stop_len = stop.len();
    start
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let position = stop.first_not_before(t);
            if position == stop_len {
                if emit_trace {
                    trace::trace_unmatched(i, t, stop_len);
                }
                None
            } else {
                if emit_trace {
                    trace::trace_nearest(i, t, position);
                }
                Some(position)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coincidence::core::stream::EventStream;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Left-sided search positions, including exact ties.
    // - Explicit `None` markers for the trailing start events that lie past
    //   the last (shifted) stop event.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify positions on a simple sorted pair of streams.
    //
    // Given
    // -----
    // - `start = [0, 10, 20]`, `stop = [1, 11, 50]`, no shift.
    //
    // Expect
    // ------
    // - `[Some(0), Some(1), Some(2)]`.
    fn nearest_following_finds_first_stop_not_earlier() {
        let stop = EventStream::new(array![1.0, 11.0, 50.0]).unwrap();
        let view = ShiftedTimes::new(&stop, 0.0).unwrap();

        let nearest = nearest_following(&[0.0, 10.0, 20.0], &view, false);

        assert_eq!(nearest, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a stop exactly equal to a start is matched (>=, not >).
    //
    // Given
    // -----
    // - `start = [5]`, `stop = [3, 5, 5]`.
    //
    // Expect
    // ------
    // - `[Some(1)]`, the first of the tied stops.
    fn nearest_following_matches_equal_timestamp_leftmost() {
        let stop = EventStream::new(array![3.0, 5.0, 5.0]).unwrap();
        let view = ShiftedTimes::new(&stop, 0.0).unwrap();

        assert_eq!(nearest_following(&[5.0], &view, false), vec![Some(1)]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure start events with no following stop are marked `None` and the
    // rest keep their true positions.
    //
    // Given
    // -----
    // - `start = [0, 4, 9]`, `stop = [2, 6]`, shift 0.
    //
    // Expect
    // ------
    // - `[Some(0), Some(1), None]`.
    fn nearest_following_marks_events_past_last_stop() {
        let stop = EventStream::new(array![2.0, 6.0]).unwrap();
        let view = ShiftedTimes::new(&stop, 0.0).unwrap();

        assert_eq!(nearest_following(&[0.0, 4.0, 9.0], &view, true), vec![Some(0), Some(1), None]);
    }

    #[test]
    // Purpose
    // -------
    // Check the empty-stop edge case.
    //
    // Expect
    // ------
    // - Every start event is `None`.
    fn nearest_following_empty_stop_marks_all_unmatched() {
        let stop = EventStream::from_slice(&[]).unwrap();
        let view = ShiftedTimes::new(&stop, 3.0).unwrap();

        assert_eq!(nearest_following(&[0.0, 1.0], &view, false), vec![None, None]);
    }
}
