//! rust_coincidence — start/stop timestamp coincidence matching with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the coincidence routines to Python via the `_rust_coincidence` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing classes and functions used by the `rust_coincidence`
//! package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module [`coincidence`] as the public crate
//!   surface.
//! - Define `#[pyclass]` wrappers (`EventStream`, `MatchedPairs`,
//!   `CoincidenceCurve`), `#[pyfunction]` entry points and the `#[pymodule]`
//!   initializer for `_rust_coincidence`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All matching and analysis happens in [`coincidence`]; this file performs
//!   only FFI glue and error mapping.
//! - Python objects are converted into validated core types before any work,
//!   so the invariants documented in [`coincidence::core`] hold for every
//!   call.
//!
//! Conventions
//! -----------
//! - Errors from the core are `CoincidenceError` values internally and become
//!   `ValueError` at the PyO3 boundary.
//! - Python-side option keywords (`negative_window`, `parallel`, `trace`) map
//!   onto `MatchOptions`; see [`utils::extract_match_options`].
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`coincidence`] (or its prelude) and
//!   can ignore the items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   integration tests under `tests/`. The PyO3 layer is exercised from
//!   Python.

pub mod coincidence;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    coincidence::{
        analysis::{
            projection::{pair_energies, pair_timing_differences},
            scan::{CoincidenceCurve, scan_offsets_with},
        },
        core::{pairs::MatchedPairSet, stream::EventStream},
        pipeline::api::{count_coincidences_with, match_coincidences_with},
    },
    utils::{extract_event_stream, extract_match_options},
};

/// EventStream — Python-facing wrapper for a validated event stream.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `EventStream(times, energy=None, shape=None, unit=None)`:
/// - `times`: array-like of sorted, finite timestamps.
/// - `energy`, `shape`: optional per-event payloads of the same length.
/// - `unit`: optional unit name (`"ticks"` when omitted).
///
/// Invariants
/// ----------
/// - `inner` satisfies every invariant of the Rust [`EventStream`].
#[cfg(feature = "python-bindings")]
#[pyclass(name = "EventStream", module = "rust_coincidence")]
pub struct PyEventStream {
    inner: EventStream,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyEventStream {
    #[new]
    #[pyo3(
        signature = (times, energy = None, shape = None, unit = None),
        text_signature = "(times, /, energy=None, shape=None, unit=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, times: &Bound<'py, PyAny>, energy: Option<&Bound<'py, PyAny>>,
        shape: Option<&Bound<'py, PyAny>>, unit: Option<&str>,
    ) -> PyResult<Self> {
        let inner = extract_event_stream(py, times, energy, shape, unit)?;
        Ok(PyEventStream { inner })
    }

    #[getter]
    pub fn times(&self) -> Vec<f64> {
        self.inner.times().to_vec()
    }

    #[getter]
    pub fn energy(&self) -> Option<Vec<f64>> {
        self.inner.energy().map(|values| values.to_vec())
    }

    #[getter]
    pub fn shape(&self) -> Option<Vec<f64>> {
        self.inner.shape().map(|values| values.to_vec())
    }

    #[getter]
    pub fn unit(&self) -> String {
        self.inner.unit().to_string()
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }
}

/// MatchedPairs — read-only view of a [`MatchedPairSet`] for Python.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "MatchedPairs", module = "rust_coincidence")]
pub struct PyMatchedPairs {
    inner: MatchedPairSet,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyMatchedPairs {
    #[getter]
    pub fn start_indices(&self) -> Vec<usize> {
        self.inner.start_indices().to_vec()
    }

    #[getter]
    pub fn stop_indices(&self) -> Vec<usize> {
        self.inner.stop_indices().to_vec()
    }

    #[getter]
    pub fn shift(&self) -> f64 {
        self.inner.shift()
    }

    #[getter]
    pub fn window(&self) -> f64 {
        self.inner.window()
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }
}

/// CoincidenceCurve — offset scan result for Python.
///
/// Exposes `offsets`, `counts`, the `peak` point and the empirical
/// `accidentals(exclusion)` estimate as a tuple
/// `(background_mean, background_std_dev, excess, p_value)`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "CoincidenceCurve", module = "rust_coincidence")]
pub struct PyCoincidenceCurve {
    inner: CoincidenceCurve,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyCoincidenceCurve {
    #[getter]
    pub fn offsets(&self) -> Vec<f64> {
        self.inner.offsets().to_vec()
    }

    #[getter]
    pub fn counts(&self) -> Vec<usize> {
        self.inner.counts().to_vec()
    }

    #[getter]
    pub fn peak(&self) -> Option<(f64, usize)> {
        self.inner.peak()
    }

    #[pyo3(text_signature = "(self, exclusion)")]
    pub fn accidentals(&self, exclusion: f64) -> PyResult<(f64, f64, f64, f64)> {
        let estimate = self.inner.accidentals(exclusion)?;
        Ok((
            estimate.background_mean,
            estimate.background_std_dev,
            estimate.excess,
            estimate.p_value,
        ))
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }
}

/// Match start events to stop events; see
/// [`match_coincidences`](crate::coincidence::match_coincidences).
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "match_coincidences")]
#[pyo3(
    signature = (start, stop, shift, window, negative_window = None, trace = None),
    text_signature = "(start, stop, shift, window, /, negative_window='reject', trace=False)"
)]
pub fn py_match_coincidences(
    start: PyRef<'_, PyEventStream>, stop: PyRef<'_, PyEventStream>, shift: f64, window: f64,
    negative_window: Option<&str>, trace: Option<bool>,
) -> PyResult<PyMatchedPairs> {
    let opts = extract_match_options(negative_window, None, trace)?;
    let inner = match_coincidences_with(&start.inner, &stop.inner, shift, window, &opts)?;
    Ok(PyMatchedPairs { inner })
}

/// Number of coincidences; same arguments as `match_coincidences`.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "count_coincidences")]
#[pyo3(
    signature = (start, stop, shift, window, negative_window = None, trace = None),
    text_signature = "(start, stop, shift, window, /, negative_window='reject', trace=False)"
)]
pub fn py_count_coincidences(
    start: PyRef<'_, PyEventStream>, stop: PyRef<'_, PyEventStream>, shift: f64, window: f64,
    negative_window: Option<&str>, trace: Option<bool>,
) -> PyResult<usize> {
    let opts = extract_match_options(negative_window, None, trace)?;
    Ok(count_coincidences_with(&start.inner, &stop.inner, shift, window, &opts)?)
}

/// Shifted time difference of every matched pair.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "pair_timing_differences")]
pub fn py_pair_timing_differences(
    start: PyRef<'_, PyEventStream>, stop: PyRef<'_, PyEventStream>,
    pairs: PyRef<'_, PyMatchedPairs>,
) -> PyResult<Vec<f64>> {
    Ok(pair_timing_differences(&start.inner, &stop.inner, &pairs.inner)?.to_vec())
}

/// `(start_energies, stop_energies)` of every matched pair.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "pair_energies")]
pub fn py_pair_energies(
    start: PyRef<'_, PyEventStream>, stop: PyRef<'_, PyEventStream>,
    pairs: PyRef<'_, PyMatchedPairs>,
) -> PyResult<(Vec<f64>, Vec<f64>)> {
    let (start_energy, stop_energy) = pair_energies(&start.inner, &stop.inner, &pairs.inner)?;
    Ok((start_energy.to_vec(), stop_energy.to_vec()))
}

/// Coincidence counts over an evenly spaced sweep of shifts.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "scan_offsets")]
#[pyo3(
    signature = (
        start,
        stop,
        lower,
        upper,
        window,
        steps,
        negative_window = None,
        parallel = None,
        trace = None,
    ),
    text_signature = "(start, stop, lower, upper, window, steps, /, negative_window='reject', \
                      parallel=False, trace=False)"
)]
#[allow(clippy::too_many_arguments)]
pub fn py_scan_offsets(
    py: Python<'_>, start: PyRef<'_, PyEventStream>, stop: PyRef<'_, PyEventStream>, lower: f64,
    upper: f64, window: f64, steps: usize, negative_window: Option<&str>, parallel: Option<bool>,
    trace: Option<bool>,
) -> PyResult<PyCoincidenceCurve> {
    let opts = extract_match_options(negative_window, parallel, trace)?;
    let (start, stop) = (&start.inner, &stop.inner);
    let inner =
        py.allow_threads(|| scan_offsets_with(start, stop, lower, upper, window, steps, &opts))?;
    Ok(PyCoincidenceCurve { inner })
}

/// _rust_coincidence — PyO3 module initializer for the Python extension.
///
/// Registers the three classes and five functions on the module. Invoked by
/// Python when importing the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_coincidence(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEventStream>()?;
    m.add_class::<PyMatchedPairs>()?;
    m.add_class::<PyCoincidenceCurve>()?;
    m.add_function(wrap_pyfunction!(py_match_coincidences, m)?)?;
    m.add_function(wrap_pyfunction!(py_count_coincidences, m)?)?;
    m.add_function(wrap_pyfunction!(py_pair_timing_differences, m)?)?;
    m.add_function(wrap_pyfunction!(py_pair_energies, m)?)?;
    m.add_function(wrap_pyfunction!(py_scan_offsets, m)?)?;
    Ok(())
}
