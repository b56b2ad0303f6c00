//! coincidence::pipeline — nearest-following search, window filter, dedup.
//!
//! Purpose
//! -------
//! Compute the unique one-to-one pairing of start and stop events for one
//! shift and resolving window. Everything else in the crate (counts, offset
//! scans, projections) is derived from this pairing.
//!
//! Key behaviors
//! -------------
//! - [`nearest`]: left-sided binary search of each start time in the shifted
//!   stop times; unmatched starts are `None`.
//! - [`window`]: keep pairs with `0 <= diff <= window`.
//! - [`dedup`]: keep the earliest start for each stop.
//! - [`api`]: [`match_coincidences`] / [`count_coincidences`] and their
//!   `_with` variants.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output pairs satisfy the window bound and are one-to-one on both sides.
//! - Identical inputs always give identical outputs.
//! - Widening the window never lowers the count: every pair accepted at a
//!   smaller window is still a candidate at the larger one, and dedup keeps
//!   one pair per distinct stop among candidates.
//!
//! Testing notes
//! -------------
//! - Stage-level unit tests live with each stage; end-to-end scenarios and
//!   argument validation are tested in [`api`].

pub mod api;
pub mod dedup;
pub mod nearest;
pub mod window;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{
    count_coincidences, count_coincidences_with, match_coincidences, match_coincidences_with,
};
pub use self::dedup::deduplicate;
pub use self::nearest::nearest_following;
pub use self::window::{Candidate, filter_window};
