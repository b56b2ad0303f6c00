//! coincidence::core — data types, validation, options and tracing hooks.
//!
//! Purpose
//! -------
//! Collect the structural building blocks shared by the matching pipeline and
//! the analysis layer: validated event streams, the offset shifter, matched
//! pair sets, configuration, input guards and structured trace hooks.
//!
//! Key behaviors
//! -------------
//! - [`EventStream`] enforces sorted, finite timestamps and payload lengths at
//!   construction, so later stages never re-check them.
//! - [`ShiftedTimes`] applies a constant offset to a stream on read; the
//!   materialized form is [`EventStream::shifted`].
//! - [`MatchedPairSet`] carries the one-to-one index pairing plus the shift and
//!   window it was computed with.
//! - [`MatchOptions`] bundles the negative-window policy, scan mode and trace
//!   flag.
//! - [`validation`] holds the guards; [`trace`] holds the `tracing` hooks.
//!
//! Invariants & assumptions
//! ------------------------
//! - Nothing in this subtree holds state between calls; every value is
//!   immutable once constructed.
//! - Indexing is 0-based throughout.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its constructors and guards.

pub mod options;
pub mod pairs;
pub mod shift;
pub mod stream;
pub mod trace;
pub mod units;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::options::{MatchOptions, NegativeWindow, ScanMode};
pub use self::pairs::MatchedPairSet;
pub use self::shift::ShiftedTimes;
pub use self::stream::{Channel, EventStream, Payload};
pub use self::units::TimeUnit;
pub use self::validation::{
    validate_finite, validate_pair_indices, validate_payload_len, validate_step_count,
    validate_timestamps, validate_window,
};
