//! coincidence — start/stop timestamp matching, offset scans, and projections.
//!
//! Purpose
//! -------
//! Pair events of a "start" detector channel with the nearest following
//! events of a "stop" channel, within a resolving window and after a
//! constant time shift of the stop channel. This is the core of
//! delayed-coincidence and time-correlation measurements: the matched pairs
//! give coincidence counts, timing spectra and energy/shape correlations,
//! and sweeping the shift yields the coincidence-vs-offset curve whose peak
//! locates the true delay between the channels.
//!
//! Key behaviors
//! -------------
//! - Collect data types, guards, options and tracing hooks in [`core`]:
//!   [`EventStream`], [`ShiftedTimes`], [`MatchedPairSet`], [`MatchOptions`].
//! - Run the matching pipeline in [`pipeline`]: nearest-following search,
//!   window filter, deduplication; entry points [`match_coincidences`] and
//!   [`count_coincidences`].
//! - Derive reported quantities in [`analysis`]: [`scan_offsets`], the pair
//!   projections and accidental-background estimates.
//! - Centralize failures in [`errors`] (`CoincidenceError`,
//!   `CoincidenceResult`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Event streams are sorted ascending and finite; payloads match the
//!   timestamp length. Enforced once, at construction.
//! - A matched pair set is one-to-one: no start index and no stop index
//!   repeats. Every pair satisfies
//!   `0 <= stop[j] + shift - start[i] <= window`.
//! - Every operation is a pure function of its inputs.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based. Times are plain `f64` in the stream's
//!   [`TimeUnit`]; shift and window are in the same unit.
//! - The shift is always applied to the stop channel.
//! - The library performs no I/O. With `MatchOptions::trace` set it emits
//!   `tracing` spans and events; installing a subscriber is up to the caller.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Build two [`EventStream`]s, optionally with energy/shape payloads.
//!   2. Locate the delay with [`scan_offsets`] and
//!      [`CoincidenceCurve::peak`].
//!   3. Match at that shift with [`match_coincidences`].
//!   4. Project with [`pair_timing_differences`] / [`pair_energies`] and
//!      estimate the background with [`CoincidenceCurve::accidentals`].
//! - Python bindings import from this module and rely on the
//!   `CoincidenceError` → `PyErr` conversion in [`errors`].
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each stage and type; the integration test
//!   exercises full pipelines and the documented properties on generated
//!   data.

pub mod analysis;
pub mod core;
pub mod errors;
pub mod pipeline;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::analysis::{
    AccidentalEstimate, CoincidenceCurve, expected_accidentals, linspace, pair_energies,
    pair_payloads, pair_shapes, pair_timing_differences, scan_offsets, scan_offsets_with,
};
pub use self::core::{
    Channel, EventStream, MatchOptions, MatchedPairSet, NegativeWindow, Payload, ScanMode,
    ShiftedTimes, TimeUnit,
};
pub use self::errors::{CoincidenceError, CoincidenceResult};
pub use self::pipeline::{
    count_coincidences, count_coincidences_with, match_coincidences, match_coincidences_with,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_coincidence::coincidence::prelude::*;

pub mod prelude {
    pub use super::{
        AccidentalEstimate, Channel, CoincidenceCurve, CoincidenceError, CoincidenceResult,
        EventStream, MatchOptions, MatchedPairSet, NegativeWindow, Payload, ScanMode, TimeUnit,
        count_coincidences, count_coincidences_with, expected_accidentals, match_coincidences,
        match_coincidences_with, pair_energies, pair_payloads, pair_shapes,
        pair_timing_differences, scan_offsets, scan_offsets_with,
    };
}
