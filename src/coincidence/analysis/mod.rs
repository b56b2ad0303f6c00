//! coincidence::analysis — offset scans, pair projections, accidentals.
//!
//! Purpose
//! -------
//! Consume the pairing produced by [`crate::coincidence::pipeline`] and turn
//! it into the quantities an experiment reports: a coincidence-vs-offset
//! curve, per-pair timing differences and payload values, and an estimate of
//! the accidental background.
//!
//! Key behaviors
//! -------------
//! - [`scan`]: [`scan_offsets`] sweeps evenly spaced shifts (sequentially or
//!   over rayon) and returns a [`CoincidenceCurve`].
//! - [`projection`]: [`pair_timing_differences`], [`pair_energies`],
//!   [`pair_shapes`] and the generic [`pair_payloads`].
//! - [`accidentals`]: [`CoincidenceCurve::accidentals`] and
//!   [`expected_accidentals`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every function here is read-only over its inputs.

pub mod accidentals;
pub mod projection;
pub mod scan;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::accidentals::{AccidentalEstimate, expected_accidentals};
pub use self::projection::{pair_energies, pair_payloads, pair_shapes, pair_timing_differences};
pub use self::scan::{CoincidenceCurve, linspace, scan_offsets, scan_offsets_with};
