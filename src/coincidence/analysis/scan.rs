//! Offset scan — coincidence counts over an evenly spaced sweep of shifts.
//!
//! Purpose
//! -------
//! Build a [`CoincidenceCurve`]: for `steps` offsets spanning
//! `[lower, upper]` inclusive, run the full matching pipeline with each
//! offset as the shift and record the coincidence count. The curve's peak
//! locates the true relative delay between the two channels.
//!
//! Key behaviors
//! -------------
//! - Offsets come from [`linspace`]: the last point is exactly `upper` when
//!   `steps >= 2`; `steps == 1` gives the single point `lower`.
//! - `ScanMode::Sequential` evaluates offsets in order; `ScanMode::Parallel`
//!   fans them out over the rayon pool. Both return identical curves, since
//!   every offset is evaluated independently and results are collected in
//!   offset order.
//! - Arguments (bounds, window, step count) are validated once before the
//!   sweep, so a bad argument never produces a partial curve.
//!
//! Invariants & assumptions
//! ------------------------
//! - `offsets.len() == counts.len() == steps`.
//! - `counts[i] == count_coincidences(start, stop, offsets[i], window)`.
//! - `lower > upper` is allowed and sweeps in descending order.
//!
//! Downstream usage
//! ----------------
//! - [`CoincidenceCurve::peak`] for the best offset;
//!   [`CoincidenceCurve::accidentals`] for a background estimate.

use crate::coincidence::{
    core::{
        options::{MatchOptions, ScanMode},
        stream::EventStream,
        trace,
        validation::{validate_finite, validate_step_count, validate_window},
    },
    errors::CoincidenceResult,
    pipeline::api::count_coincidences_with,
};
use ndarray::Array1;
use rayon::prelude::*;
use tracing::{Dispatch, Span, dispatcher};

/// `CoincidenceCurve` — coincidence count as a function of stop-channel shift.
///
/// Parallel sequences of equal length: `offsets[i]` is the shift that was
/// applied and `counts[i]` the number of coincidences found with it.
#[derive(Debug, Clone, PartialEq)]
pub struct CoincidenceCurve {
    offsets: Array1<f64>,
    counts: Array1<usize>,
}

impl CoincidenceCurve {
    pub fn offsets(&self) -> &Array1<f64> {
        &self.offsets
    }

    pub fn counts(&self) -> &Array1<usize> {
        &self.counts
    }

    /// Number of sweep points.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Iterate `(offset, count)` points in sweep order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.offsets.iter().copied().zip(self.counts.iter().copied())
    }

    /// Offset and count of the highest point; the first one wins on ties.
    ///
    /// Returns `None` only for an empty curve, which `scan_offsets` never
    /// produces.
    pub fn peak(&self) -> Option<(f64, usize)> {
        self.iter().fold(None, |best, (offset, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((offset, count)),
        })
    }

    pub fn into_parts(self) -> (Array1<f64>, Array1<usize>) {
        (self.offsets, self.counts)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(offsets: Array1<f64>, counts: Array1<usize>) -> Self {
        assert_eq!(offsets.len(), counts.len());
        CoincidenceCurve { offsets, counts }
    }
}

/// Evenly spaced points over `[lower, upper]`, endpoints included.
///
/// Parameters
/// ----------
/// - `lower`, `upper`: `f64`
///   Finite sweep bounds. `lower > upper` yields a descending sweep.
/// - `steps`: `usize`
///   Number of points, `>= 1`.
///
/// Returns
/// -------
/// `CoincidenceResult<Array1<f64>>`
///   `steps` points with spacing `(upper - lower) / (steps - 1)`. Both
///   endpoints are exact. When `upper - lower` overflows `f64`, points are
///   interpolated as `lower * (1 - t) + upper * t` instead, so every point
///   stays finite.
///
/// Errors
/// ------
/// - `CoincidenceError::InvalidStepCount` for `steps == 0`.
/// - `CoincidenceError::NonFiniteArgument` for a NaN/±∞ bound.
pub fn linspace(lower: f64, upper: f64, steps: usize) -> CoincidenceResult<Array1<f64>> {
    validate_step_count(steps)?;
    validate_finite("lower", lower)?;
    validate_finite("upper", upper)?;

    if steps == 1 {
        return Ok(Array1::from_elem(1, lower));
    }
    let last = (steps - 1) as f64;
    let span = upper - lower;
    let mut offsets = if span.is_finite() {
        let step = span / last;
        Array1::from_shape_fn(steps, |i| lower + step * i as f64)
    } else {
        Array1::from_shape_fn(steps, |i| {
            let t = i as f64 / last;
            lower * (1.0 - t) + upper * t
        })
    };
    offsets[0] = lower;
    offsets[steps - 1] = upper;
    Ok(offsets)
}

/// Coincidence count for every offset of an evenly spaced sweep.
///
/// Parameters
/// ----------
/// - `start`, `stop`: `&EventStream`
///   The two channels; the sweep offsets are applied to `stop`.
/// - `lower`, `upper`: `f64`
///   Inclusive sweep bounds.
/// - `window`: `f64`
///   Resolving window used at every offset.
/// - `steps`: `usize`
///   Number of offsets, `>= 1`.
///
/// Returns
/// -------
/// `CoincidenceResult<CoincidenceCurve>`
///   `steps` offsets and their counts, in sweep order.
///
/// Errors
/// ------
/// - `CoincidenceError::InvalidStepCount` for `steps == 0`.
/// - `CoincidenceError::NonFiniteArgument` for a NaN/±∞ bound or window.
/// - `CoincidenceError::NegativeWindow` for `window < 0` (default policy).
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_coincidence::coincidence::prelude::*;
/// let start = EventStream::new(array![0.0, 10.0, 20.0]).unwrap();
/// let stop = EventStream::new(array![3.0, 13.0, 23.0]).unwrap();
///
/// let curve = scan_offsets(&start, &stop, -5.0, 5.0, 0.5, 11).unwrap();
/// assert_eq!(curve.len(), 11);
/// assert_eq!(curve.peak(), Some((-3.0, 3)));
/// ```
pub fn scan_offsets(
    start: &EventStream, stop: &EventStream, lower: f64, upper: f64, window: f64, steps: usize,
) -> CoincidenceResult<CoincidenceCurve> {
    scan_offsets_with(start, stop, lower, upper, window, steps, &MatchOptions::default())
}

/// [`scan_offsets`] with explicit options.
///
/// `opts.scan_mode` selects sequential or rayon-parallel evaluation; the
/// remaining options are forwarded to every per-offset match.
pub fn scan_offsets_with(
    start: &EventStream, stop: &EventStream, lower: f64, upper: f64, window: f64, steps: usize,
    opts: &MatchOptions,
) -> CoincidenceResult<CoincidenceCurve> {
    let offsets = linspace(lower, upper, steps)?;
    validate_window(window, opts.negative_window)?;

    let _span = opts.trace.then(|| trace::span_scan(lower, upper, steps, window).entered());

    let counts: Vec<usize> = match opts.scan_mode {
        ScanMode::Sequential => offsets
            .iter()
            .map(|&offset| count_coincidences_with(start, stop, offset, window, opts))
            .collect::<CoincidenceResult<_>>()?,
        ScanMode::Parallel => {
            // Rayon workers see neither the caller's dispatcher nor its span.
            let dispatch = dispatcher::get_default(Dispatch::clone);
            let parent = Span::current();
            offsets
                .to_vec()
                .into_par_iter()
                .map(|offset| {
                    dispatcher::with_default(&dispatch, || {
                        parent.in_scope(|| {
                            count_coincidences_with(start, stop, offset, window, opts)
                        })
                    })
                })
                .collect::<CoincidenceResult<_>>()?
        }
    };

    Ok(CoincidenceCurve { offsets, counts: Array1::from_vec(counts) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coincidence::{
        core::options::NegativeWindow, errors::CoincidenceError,
        pipeline::api::count_coincidences,
    };
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `linspace` endpoints, spacing, single point and descending sweeps.
    // - `scan_offsets` shape, per-offset agreement with `count_coincidences`,
    //   and sequential/parallel agreement.
    // - Argument validation before any sweep work.
    // - `CoincidenceCurve::peak` tie handling.
    //
    // These tests intentionally DO NOT cover:
    // - Accidental estimation (see `analysis::accidentals`).
    // -------------------------------------------------------------------------

    fn stream(times: &[f64]) -> EventStream {
        EventStream::from_slice(times).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify endpoints and even spacing.
    //
    // Given
    // -----
    // - `lower = -1`, `upper = 1`, `steps = 5`.
    //
    // Expect
    // ------
    // - `[-1, -0.5, 0, 0.5, 1]`.
    fn linspace_includes_both_endpoints() {
        let offsets = linspace(-1.0, 1.0, 5).unwrap();

        for (got, want) in offsets.iter().zip([-1.0, -0.5, 0.0, 0.5, 1.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        assert_eq!(offsets[4], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Check the single-point and descending edge cases.
    //
    // Expect
    // ------
    // - `steps == 1` gives `[lower]` even when `upper` differs.
    // - `lower > upper` sweeps downward and still ends exactly on `upper`.
    fn linspace_single_point_and_descending() {
        assert_eq!(linspace(3.0, 9.0, 1).unwrap(), array![3.0]);

        let descending = linspace(2.0, -2.0, 3).unwrap();
        assert_eq!(descending, array![2.0, 0.0, -2.0]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure bounds whose difference overflows `f64` still give a finite,
    // evenly spaced sweep.
    //
    // Given
    // -----
    // - `lower = -f64::MAX`, `upper = f64::MAX`, `steps = 3` and `5`.
    //
    // Expect
    // ------
    // - `[-MAX, 0, MAX]` for 3 steps; all 5 points finite with exact
    //   endpoints and a midpoint of 0.
    // - `scan_offsets` over the same bounds succeeds with 3 points.
    fn linspace_handles_overflowing_span() {
        assert_eq!(linspace(-f64::MAX, f64::MAX, 3).unwrap(), array![-f64::MAX, 0.0, f64::MAX]);

        let wide = linspace(-f64::MAX, f64::MAX, 5).unwrap();
        assert!(wide.iter().all(|offset| offset.is_finite()));
        assert_eq!(wide[0], -f64::MAX);
        assert_eq!(wide[2], 0.0);
        assert_eq!(wide[4], f64::MAX);

        let events = stream(&[0.0, 1.0]);
        let curve = scan_offsets(&events, &events, -f64::MAX, f64::MAX, 1.0, 3).unwrap();
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.offsets()[1], 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the scan shape property: `counts[i]` equals a direct count at
    // `offsets[i]`.
    //
    // Given
    // -----
    // - Stop events trail start events by 3; sweep `[-5, 5]` in 11 steps,
    //   window 0.5.
    //
    // Expect
    // ------
    // - 11 points; every count matches `count_coincidences`; peak at -3.
    fn scan_offsets_counts_agree_with_direct_counts() {
        let start = stream(&[0.0, 10.0, 20.0]);
        let stop = stream(&[3.0, 13.0, 23.0]);

        let curve = scan_offsets(&start, &stop, -5.0, 5.0, 0.5, 11).unwrap();

        assert_eq!(curve.len(), 11);
        assert_eq!(curve.counts().len(), 11);
        for (offset, count) in curve.iter() {
            assert_eq!(count, count_coincidences(&start, &stop, offset, 0.5).unwrap());
        }
        assert_eq!(curve.peak(), Some((-3.0, 3)));
    }

    #[test]
    // Purpose
    // -------
    // Ensure parallel mode returns exactly the sequential curve.
    fn scan_offsets_parallel_matches_sequential() {
        let start = stream(&[0.0, 1.5, 4.0, 7.25, 9.0, 12.0]);
        let stop = stream(&[0.5, 2.0, 2.1, 8.0, 9.5, 30.0]);
        let parallel = MatchOptions::default().with_scan_mode(ScanMode::Parallel);

        let sequential = scan_offsets(&start, &stop, -3.0, 3.0, 1.0, 25).unwrap();
        let fanned_out = scan_offsets_with(&start, &stop, -3.0, 3.0, 1.0, 25, &parallel).unwrap();

        assert_eq!(sequential, fanned_out);
    }

    #[test]
    // Purpose
    // -------
    // Verify argument validation happens before the sweep.
    //
    // Expect
    // ------
    // - `steps == 0` → `InvalidStepCount`.
    // - Negative window → `NegativeWindow` by default; all-zero curve under
    //   `NegativeWindow::Empty`.
    // - NaN bound → `NonFiniteArgument`.
    fn scan_offsets_validates_arguments() {
        let start = stream(&[0.0]);
        let stop = stream(&[0.0]);
        let lenient = MatchOptions::default().with_negative_window(NegativeWindow::Empty);

        assert_eq!(
            scan_offsets(&start, &stop, 0.0, 1.0, 1.0, 0).unwrap_err(),
            CoincidenceError::InvalidStepCount { steps: 0 }
        );
        assert_eq!(
            scan_offsets(&start, &stop, 0.0, 1.0, -1.0, 3).unwrap_err(),
            CoincidenceError::NegativeWindow { window: -1.0 }
        );
        let empty = scan_offsets_with(&start, &stop, 0.0, 1.0, -1.0, 3, &lenient).unwrap();
        assert!(empty.counts().iter().all(|&count| count == 0));
        let nan_bound = scan_offsets(&start, &stop, f64::NAN, 1.0, 1.0, 3).unwrap_err();
        assert!(nan_bound.is_invalid_argument());
    }

    #[test]
    // Purpose
    // -------
    // Ensure `peak` keeps the first of several equal maxima.
    fn coincidence_curve_peak_prefers_first_maximum() {
        let curve =
            CoincidenceCurve { offsets: array![0.0, 1.0, 2.0, 3.0], counts: array![1, 4, 4, 2] };

        assert_eq!(curve.peak(), Some((1.0, 4)));
    }
}
