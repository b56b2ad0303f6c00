//! Accidental coincidences — background level and peak significance.
//!
//! Purpose
//! -------
//! Separate true coincidences from accidental ones (uncorrelated start/stop
//! pairs that happen to fall inside the window). Two estimates are provided:
//!
//! - [`CoincidenceCurve::accidentals`]: empirical. The curve points far from
//!   the peak offset contain only accidentals; their mean is the background
//!   level under the peak.
//! - [`expected_accidentals`]: analytic. For uncorrelated streams with
//!   rates `r_start`, `r_stop` over a shared live time `T`, the expected
//!   accidental count at any offset is `r_start · r_stop · window · T`.
//!
//! Key behaviors
//! -------------
//! - Background points are those with `|offset - peak_offset| > exclusion`.
//! - Mean and sample standard deviation come from `statrs` `Statistics`; the
//!   peak significance is the Poisson upper tail `P(X >= peak_count)` with
//!   the background mean as rate.
//! - Live time for the analytic estimate is the overlap of the two stream
//!   spans.
//!
//! Invariants & assumptions
//! ------------------------
//! - Accidental estimates assume stationary event rates over the recording.
//! - Curve counts are treated as independent Poisson samples.

use crate::coincidence::{
    analysis::scan::CoincidenceCurve,
    core::{options::NegativeWindow, stream::EventStream, validation::validate_window},
    errors::{CoincidenceError, CoincidenceResult},
};
use statrs::{
    distribution::{DiscreteCDF, Poisson},
    statistics::Statistics,
};

/// `AccidentalEstimate` — background level of a coincidence curve.
///
/// Fields
/// ------
/// - `peak_offset`, `peak_count`: the curve maximum (first on ties).
/// - `background_mean`: mean count over the background points.
/// - `background_std_dev`: sample standard deviation over the background
///   points; NaN when only one point qualifies.
/// - `samples`: number of background points.
/// - `excess`: `peak_count - background_mean`, the true-coincidence estimate
///   at the peak.
/// - `p_value`: Poisson probability of a count at least `peak_count` from
///   background alone.
#[derive(Debug, Clone, PartialEq)]
pub struct AccidentalEstimate {
    pub peak_offset: f64,
    pub peak_count: usize,
    pub background_mean: f64,
    pub background_std_dev: f64,
    pub samples: usize,
    pub excess: f64,
    pub p_value: f64,
}

impl CoincidenceCurve {
    /// Background estimate from curve points away from the peak.
    ///
    /// Parameters
    /// ----------
    /// - `exclusion`: `f64`
    ///   Half-width around the peak offset treated as signal. Points with
    ///   `|offset - peak_offset| > exclusion` form the background.
    ///
    /// Returns
    /// -------
    /// `CoincidenceResult<AccidentalEstimate>`
    ///
    /// Errors
    /// ------
    /// - `CoincidenceError::InvalidExclusion`
    ///   `exclusion` is NaN, ±∞ or negative.
    /// - `CoincidenceError::InsufficientBackground`
    ///   No curve point lies outside the exclusion region.
    pub fn accidentals(&self, exclusion: f64) -> CoincidenceResult<AccidentalEstimate> {
        if !exclusion.is_finite() || exclusion < 0.0 {
            return Err(CoincidenceError::InvalidExclusion { value: exclusion });
        }
        let (peak_offset, peak_count) =
            self.peak().ok_or(CoincidenceError::InsufficientBackground { exclusion })?;

        let background: Vec<f64> = self
            .iter()
            .filter(|(offset, _)| (offset - peak_offset).abs() > exclusion)
            .map(|(_, count)| count as f64)
            .collect();
        if background.is_empty() {
            return Err(CoincidenceError::InsufficientBackground { exclusion });
        }

        let background_mean = background.iter().mean();
        let background_std_dev = background.iter().std_dev();

        Ok(AccidentalEstimate {
            peak_offset,
            peak_count,
            background_mean,
            background_std_dev,
            samples: background.len(),
            excess: peak_count as f64 - background_mean,
            p_value: poisson_upper_tail(background_mean, peak_count),
        })
    }
}

/// `P(X >= k)` for `X ~ Poisson(rate)`.
fn poisson_upper_tail(rate: f64, k: usize) -> f64 {
    if k == 0 {
        return 1.0;
    }
    match Poisson::new(rate) {
        Ok(poisson) => poisson.sf(k as u64 - 1),
        // Zero background: any positive count is impossible by chance.
        Err(_) => 0.0,
    }
}

/// Analytic accidental count for uncorrelated streams.
///
/// Parameters
/// ----------
/// - `start`, `stop`: `&EventStream`
///   The two channels.
/// - `window`: `f64`
///   Resolving window, finite and `>= 0`.
///
/// Returns
/// -------
/// `CoincidenceResult<f64>`
///   `n_start · n_stop · window / live_time`, where `live_time` is the overlap
///   of the two stream spans. Zero when either stream is empty.
///
/// Errors
/// ------
/// - `CoincidenceError::NonFiniteArgument` / `CoincidenceError::NegativeWindow`
///   for an invalid window.
/// - `CoincidenceError::InvalidLiveTime` when the spans overlap by zero or
///   less.
///
/// Notes
/// -----
/// - The estimate ignores the shift: for stationary uncorrelated rates the
///   accidental level is flat across offsets.
pub fn expected_accidentals(
    start: &EventStream, stop: &EventStream, window: f64,
) -> CoincidenceResult<f64> {
    validate_window(window, NegativeWindow::Reject)?;
    let (Some((start_first, start_last)), Some((stop_first, stop_last))) =
        (start.span(), stop.span())
    else {
        return Ok(0.0);
    };

    let live_time = start_last.min(stop_last) - start_first.max(stop_first);
    if live_time <= 0.0 {
        return Err(CoincidenceError::InvalidLiveTime { value: live_time });
    }
    Ok(start.len() as f64 * stop.len() as f64 * window / live_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coincidence::analysis::scan::scan_offsets;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Empirical background mean, spread, excess and Poisson tail.
    // - Exclusion validation and the no-background failure.
    // - Analytic expectation, including empty and non-overlapping streams.
    // -------------------------------------------------------------------------

    fn curve(offsets: &[f64], counts: &[usize]) -> CoincidenceCurve {
        CoincidenceCurve::from_parts(
            Array1::from_vec(offsets.to_vec()),
            Array1::from_vec(counts.to_vec()),
        )
    }

    #[test]
    // Purpose
    // -------
    // Verify background statistics on a hand-built curve.
    //
    // Given
    // -----
    // - Offsets `[0, 1, 2, 3, 4]`, counts `[1, 2, 10, 3, 2]`, exclusion 1.
    // - Peak at offset 2; background points are offsets 0 and 4.
    //
    // Expect
    // ------
    // - mean 1.5, sample std dev sqrt(0.5), 2 samples, excess 8.5, tiny p-value.
    fn accidentals_uses_points_outside_exclusion() {
        let c = curve(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1, 2, 10, 3, 2]);

        let estimate = c.accidentals(1.0).unwrap();

        assert_eq!(estimate.peak_offset, 2.0);
        assert_eq!(estimate.peak_count, 10);
        assert_eq!(estimate.samples, 2);
        assert_relative_eq!(estimate.background_mean, 1.5);
        assert_relative_eq!(estimate.background_std_dev, 0.5_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(estimate.excess, 8.5);
        assert!(estimate.p_value > 0.0 && estimate.p_value < 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid exclusions and empty backgrounds are rejected.
    //
    // Expect
    // ------
    // - Negative or NaN exclusion → `InvalidExclusion`.
    // - Exclusion covering every point → `InsufficientBackground`.
    fn accidentals_rejects_bad_exclusion_and_empty_background() {
        let c = curve(&[0.0, 1.0, 2.0], &[1, 5, 1]);

        assert_eq!(
            c.accidentals(-1.0).unwrap_err(),
            CoincidenceError::InvalidExclusion { value: -1.0 }
        );
        assert!(c.accidentals(f64::NAN).unwrap_err().is_invalid_argument());
        assert_eq!(
            c.accidentals(1.0).unwrap_err(),
            CoincidenceError::InsufficientBackground { exclusion: 1.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Check the Poisson tail edge cases.
    //
    // Expect
    // ------
    // - Zero background with a positive peak → p-value 0.
    // - A peak no higher than the background → p-value close to 1.
    fn accidentals_poisson_tail_edge_cases() {
        let spiky = curve(&[0.0, 1.0, 2.0], &[0, 4, 0]);
        assert_eq!(spiky.accidentals(0.5).unwrap().p_value, 0.0);

        let flat = curve(&[0.0, 1.0, 2.0], &[3, 3, 3]);
        let estimate = flat.accidentals(0.5).unwrap();
        assert_eq!(estimate.peak_offset, 0.0);
        assert_relative_eq!(estimate.excess, 0.0);
        assert!(estimate.p_value > 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Verify the estimate on a scanned curve with a clear delay.
    //
    // Given
    // -----
    // - Stop events trail start events by 3; sweep `[-5, 5]` in 11 steps.
    //
    // Expect
    // ------
    // - Peak at -3 with count 3; background of zeros, excess 3.
    fn accidentals_on_scanned_curve() {
        let start = EventStream::new(array![0.0, 10.0, 20.0]).unwrap();
        let stop = EventStream::new(array![3.0, 13.0, 23.0]).unwrap();
        let scanned = scan_offsets(&start, &stop, -5.0, 5.0, 0.5, 11).unwrap();

        let estimate = scanned.accidentals(0.5).unwrap();

        assert_eq!(estimate.peak_offset, -3.0);
        assert_eq!(estimate.samples, 10);
        assert_relative_eq!(estimate.excess, 3.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the analytic estimate and its degenerate cases.
    //
    // Given
    // -----
    // - 11 start events on `0..=10`, 3 stop events at `[0, 5, 10]`,
    //   window 0.5: live time 10.
    //
    // Expect
    // ------
    // - `11 · 3 · 0.5 / 10 = 1.65`.
    // - Empty stream → 0.
    // - Disjoint spans → `InvalidLiveTime { value: -4 }`.
    fn expected_accidentals_uses_overlap_live_time() {
        let ticks: Vec<f64> = (0..=10).map(f64::from).collect();
        let start = EventStream::from_slice(&ticks).unwrap();
        let stop = EventStream::new(array![0.0, 5.0, 10.0]).unwrap();
        let empty = EventStream::from_slice(&[]).unwrap();
        let early = EventStream::new(array![0.0, 1.0]).unwrap();
        let late = EventStream::new(array![5.0, 6.0]).unwrap();

        let expected = expected_accidentals(&start, &stop, 0.5).unwrap();
        assert_relative_eq!(expected, 1.65, epsilon = 1e-12);
        assert_eq!(expected_accidentals(&empty, &stop, 0.5).unwrap(), 0.0);
        assert_eq!(
            expected_accidentals(&early, &late, 0.5).unwrap_err(),
            CoincidenceError::InvalidLiveTime { value: -4.0 }
        );
    }
}
