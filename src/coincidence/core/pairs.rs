//! Matched pair sets — the one-to-one output of the coincidence pipeline.
//!
//! Purpose
//! -------
//! Hold the parallel start/stop index sequences produced by one pipeline run,
//! together with the shift and resolving window they were computed with, so
//! downstream projections can reproduce the shifted time differences without
//! extra arguments.
//!
//! Key behaviors
//! -------------
//! - [`MatchedPairSet`] is immutable once returned; accessors expose the index
//!   sequences as slices.
//! - [`MatchedPairSet::new`] validates externally supplied index sequences
//!   (equal length, no repeated index on either side).
//! - [`MatchedPairSet::check_against`] verifies that every index addresses an
//!   event of the given streams.
//!
//! Invariants & assumptions
//! ------------------------
//! - `start_indices.len() == stop_indices.len()`.
//! - No value repeats within `start_indices`, and none within `stop_indices`.
//! - Pairs appear in discovery order, which for sorted inputs is ascending in
//!   both start and stop index.

use crate::coincidence::{
    core::{
        stream::{Channel, EventStream},
        validation::validate_pair_indices,
    },
    errors::{CoincidenceError, CoincidenceResult},
};
use std::collections::HashSet;

/// `MatchedPairSet` — one-to-one pairing of start and stop event indices.
///
/// Fields
/// ------
/// - `start_indices`: `Vec<usize>`
///   Index into the start stream for each pair.
/// - `stop_indices`: `Vec<usize>`
///   Index into the stop stream for each pair.
/// - `shift`: `f64`
///   Offset that was added to stop timestamps before matching.
/// - `window`: `f64`
///   Resolving window used to accept pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPairSet {
    start_indices: Vec<usize>,
    stop_indices: Vec<usize>,
    shift: f64,
    window: f64,
}

impl MatchedPairSet {
    /// Build a pair set from explicit index sequences.
    ///
    /// Parameters
    /// ----------
    /// - `start_indices`, `stop_indices`: `Vec<usize>`
    ///   Parallel index sequences; must be equal in length and one-to-one.
    /// - `shift`: `f64`
    ///   Offset applied to stop timestamps when the pairs were formed.
    /// - `window`: `f64`
    ///   Resolving window the pairs satisfy.
    ///
    /// Errors
    /// ------
    /// - `CoincidenceError::PairLengthMismatch` when the lengths differ.
    /// - `CoincidenceError::DuplicateIndex` for the first repeated index,
    ///   checked on the start side first.
    ///
    /// Notes
    /// -----
    /// - Index bounds are not known here; use [`check_against`](Self::check_against)
    ///   once the streams are at hand.
    pub fn new(
        start_indices: Vec<usize>, stop_indices: Vec<usize>, shift: f64, window: f64,
    ) -> CoincidenceResult<Self> {
        if start_indices.len() != stop_indices.len() {
            return Err(CoincidenceError::PairLengthMismatch {
                start: start_indices.len(),
                stop: stop_indices.len(),
            });
        }
        ensure_unique(Channel::Start, &start_indices)?;
        ensure_unique(Channel::Stop, &stop_indices)?;
        Ok(MatchedPairSet { start_indices, stop_indices, shift, window })
    }

    /// Empty result for a run that produced no pairs.
    pub fn empty(shift: f64, window: f64) -> Self {
        MatchedPairSet { start_indices: Vec::new(), stop_indices: Vec::new(), shift, window }
    }

    /// Assemble a pair set the deduplicator has already made one-to-one.
    pub(crate) fn from_unique(
        start_indices: Vec<usize>, stop_indices: Vec<usize>, shift: f64, window: f64,
    ) -> Self {
        debug_assert_eq!(start_indices.len(), stop_indices.len());
        MatchedPairSet { start_indices, stop_indices, shift, window }
    }

    pub fn start_indices(&self) -> &[usize] {
        &self.start_indices
    }

    pub fn stop_indices(&self) -> &[usize] {
        &self.stop_indices
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    pub fn window(&self) -> f64 {
        self.window
    }

    /// Number of coincidences.
    pub fn len(&self) -> usize {
        self.start_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start_indices.is_empty()
    }

    /// Iterate `(start_index, stop_index)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.start_indices.iter().copied().zip(self.stop_indices.iter().copied())
    }

    /// Verify that every index addresses an event of `start` / `stop`.
    ///
    /// Errors
    /// ------
    /// - `CoincidenceError::IndexOutOfRange` naming the offending channel.
    pub fn check_against(&self, start: &EventStream, stop: &EventStream) -> CoincidenceResult<()> {
        validate_pair_indices(&self.start_indices, &self.stop_indices, start.len(), stop.len())
    }

    /// Split into `(start_indices, stop_indices)`.
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>) {
        (self.start_indices, self.stop_indices)
    }
}

fn ensure_unique(channel: Channel, indices: &[usize]) -> CoincidenceResult<()> {
    let mut seen: HashSet<usize> = HashSet::with_capacity(indices.len());
    for &index in indices {
        if !seen.insert(index) {
            return Err(CoincidenceError::DuplicateIndex { channel, index });
        }
    }
    Ok(())
}
