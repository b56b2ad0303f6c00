//! Coincidence options — configuration for matching and offset scans.
//!
//! Purpose
//! -------
//! Collect the knobs that change how the coincidence pipeline treats edge
//! cases and how it executes, so call sites pass one explicit value instead of
//! ad-hoc flags.
//!
//! Key behaviors
//! -------------
//! - [`NegativeWindow`] chooses between strict rejection of negative resolving
//!   windows and degrading them to an empty result.
//! - [`ScanMode`] chooses sequential or rayon-parallel evaluation of offset
//!   scans. Both produce identical curves.
//! - [`MatchOptions::trace`] turns on structured diagnostic events (sorted
//!   positions, rejected differences, dropped duplicates) emitted through
//!   `tracing`. Results never depend on it.
//!
//! Invariants & assumptions
//! ------------------------
//! - Options are plain data carriers; they hold no validated numeric values
//!   and never fail to construct.
//! - Defaults are strict and deterministic: reject negative windows, scan
//!   sequentially, no tracing.
//!
//! Testing notes
//! -------------
//! - Unit tests check the defaults and that `new` preserves its inputs.

/// Policy for a negative resolving window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegativeWindow {
    /// Fail with `CoincidenceError::NegativeWindow`.
    #[default]
    Reject,
    /// Treat the window as admitting no pairs and return an empty result.
    Empty,
}

/// Execution strategy for offset scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Evaluate offsets one after another on the calling thread.
    #[default]
    Sequential,
    /// Evaluate offsets on the rayon global thread pool.
    Parallel,
}

/// `MatchOptions` — configuration for the coincidence pipeline.
///
/// Fields
/// ------
/// - `negative_window`: [`NegativeWindow`]
///   How a negative resolving window is handled.
/// - `scan_mode`: [`ScanMode`]
///   Whether offset scans fan out across threads.
/// - `trace`: `bool`
///   Emit per-event `tracing` records while matching. Off by default; the
///   records are meant for debugging small inputs.
///
/// Notes
/// -----
/// - `MatchOptions` is `Copy`; scans hand the same value to every per-offset
///   pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOptions {
    pub negative_window: NegativeWindow,
    pub scan_mode: ScanMode,
    pub trace: bool,
}

impl MatchOptions {
    /// Construct options from explicit settings.
    pub fn new(negative_window: NegativeWindow, scan_mode: ScanMode, trace: bool) -> MatchOptions {
        MatchOptions { negative_window, scan_mode, trace }
    }

    /// Copy of `self` with tracing switched on or off.
    pub fn with_trace(mut self, trace: bool) -> MatchOptions {
        self.trace = trace;
        self
    }

    /// Copy of `self` using the given scan mode.
    pub fn with_scan_mode(mut self, scan_mode: ScanMode) -> MatchOptions {
        self.scan_mode = scan_mode;
        self
    }

    /// Copy of `self` using the given negative-window policy.
    pub fn with_negative_window(mut self, negative_window: NegativeWindow) -> MatchOptions {
        self.negative_window = negative_window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the strict, sequential, silent defaults.
    //
    // Expect
    // ------
    // - `Reject`, `Sequential`, `trace == false`.
    fn match_options_default_is_strict_sequential_and_silent() {
        let opts = MatchOptions::default();

        assert_eq!(opts.negative_window, NegativeWindow::Reject);
        assert_eq!(opts.scan_mode, ScanMode::Sequential);
        assert!(!opts.trace);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `new` and the `with_*` helpers preserve their inputs.
    //
    // Given
    // -----
    // - Non-default values for every field.
    //
    // Expect
    // ------
    // - Both construction paths yield the same options.
    fn match_options_new_and_builders_agree() {
        let direct = MatchOptions::new(NegativeWindow::Empty, ScanMode::Parallel, true);
        let built = MatchOptions::default()
            .with_negative_window(NegativeWindow::Empty)
            .with_scan_mode(ScanMode::Parallel)
            .with_trace(true);

        assert_eq!(direct, built);
    }
}
