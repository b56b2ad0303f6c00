//! Deduplication — collapse many-to-one matches into one pair per stop event.
//!
//! Purpose
//! -------
//! Several start events can share a nearest stop when no stop falls between
//! them. This stage keeps, for every stop index, only the pair with the
//! smallest start index, so the final pairing is one-to-one.
//!
//! Key behaviors
//! -------------
//! - Single linear pass with a map from stop index to the output slot that
//!   currently holds it.
//! - A later candidate with a smaller start index replaces the held pair in
//!   place; otherwise it is dropped. Output keeps the order in which stop
//!   indices were first discovered.
//!
//! Invariants & assumptions
//! ------------------------
//! - Start indices are unique among candidates (one candidate per start
//!   event), so after the pass neither side repeats.
//! - For candidates produced by the window filter (ascending start order) the
//!   replacement branch never fires; it keeps the rule correct for any order.

use crate::coincidence::{core::trace, pipeline::window::Candidate};
use std::collections::HashMap;

/// Keep the earliest start per stop index.
///
/// Parameters
/// ----------
/// - `candidates`: `&[Candidate]`
///   Window-accepted pairs, one per start event.
/// - `emit_trace`: `bool`
///   Emit a `tracing` record for every dropped pair.
///
/// Returns
/// -------
/// `(Vec<usize>, Vec<usize>)`
///   `(start_indices, stop_indices)`, equal in length, in discovery order of
///   the stop indices.
pub fn deduplicate(candidates: &[Candidate], emit_trace: bool) -> (Vec<usize>, Vec<usize>) {
    let mut slot_by_stop: HashMap<usize, usize> = HashMap::with_capacity(candidates.len());
    let mut start_indices: Vec<usize> = Vec::with_capacity(candidates.len());
    let mut stop_indices: Vec<usize> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match slot_by_stop.get(&candidate.stop_index) {
            None => {
                slot_by_stop.insert(candidate.stop_index, start_indices.len());
                start_indices.push(candidate.start_index);
                stop_indices.push(candidate.stop_index);
            }
            Some(&slot) => {
                let held = start_indices[slot];
                if candidate.start_index < held {
                    start_indices[slot] = candidate.start_index;
                }
                if emit_trace {
                    trace::trace_duplicate(
                        held.max(candidate.start_index),
                        candidate.stop_index,
                        start_indices[slot],
                    );
                }
            }
        }
    }

    (start_indices, stop_indices)
}
