//! Conversion helpers for the Python bindings.
//!
//! Everything here turns Python arguments (numpy arrays, pandas Series, float
//! sequences, option strings) into core types. Validation of the resulting
//! values is left to the core constructors, so Python sees exactly the same
//! errors as Rust callers.

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::coincidence::core::{
    options::{MatchOptions, NegativeWindow, ScanMode},
    stream::EventStream,
    units::TimeUnit,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Borrow or copy a 1-D float64 array from a Python object.
///
/// Accepts a contiguous `numpy.ndarray`, anything with `to_numpy()` (pandas
/// Series), or a plain sequence of floats, tried in that order.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Owned copy of an array-like argument.
#[cfg(feature = "python-bindings")]
pub fn extract_array1<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    Ok(arr.as_array().to_owned())
}

/// Build a validated [`EventStream`] from Python arguments.
///
/// Parameters
/// ----------
/// - `times`: array-like of sorted, finite timestamps.
/// - `energy`, `shape`: optional array-likes of the same length.
/// - `unit`: optional unit name, see [`parse_time_unit`].
///
/// Errors
/// ------
/// - `TypeError` when an argument is not array-like.
/// - `ValueError` carrying the `CoincidenceError` message for invalid data,
///   or for an unknown unit name.
#[cfg(feature = "python-bindings")]
pub fn extract_event_stream<'py>(
    py: Python<'py>, times: &Bound<'py, PyAny>, energy: Option<&Bound<'py, PyAny>>,
    shape: Option<&Bound<'py, PyAny>>, unit: Option<&str>,
) -> PyResult<EventStream> {
    let mut stream = EventStream::new(extract_array1(py, times)?)?;
    if let Some(raw) = energy {
        stream = stream.with_energy(extract_array1(py, raw)?)?;
    }
    if let Some(raw) = shape {
        stream = stream.with_shape(extract_array1(py, raw)?)?;
    }
    Ok(stream.with_unit(parse_time_unit(unit)?))
}

/// Map a unit name to [`TimeUnit`]; `None` means [`TimeUnit::Ticks`].
#[cfg(feature = "python-bindings")]
pub fn parse_time_unit(unit: Option<&str>) -> PyResult<TimeUnit> {
    let Some(name) = unit else {
        return Ok(TimeUnit::Ticks);
    };
    match name.to_lowercase().as_str() {
        "ticks" => Ok(TimeUnit::Ticks),
        "seconds" | "s" => Ok(TimeUnit::Seconds),
        "milliseconds" | "ms" => Ok(TimeUnit::Milliseconds),
        "microseconds" | "us" => Ok(TimeUnit::Microseconds),
        "nanoseconds" | "ns" => Ok(TimeUnit::Nanoseconds),
        other => Err(PyValueError::new_err(format!(
            "invalid unit {other:?} (expected 'ticks', 'seconds', 'milliseconds', \
             'microseconds', or 'nanoseconds')"
        ))),
    }
}

/// Assemble [`MatchOptions`] from keyword arguments.
///
/// - `negative_window`: `"reject"` (default) or `"empty"`.
/// - `parallel`: rayon-parallel offset scans when `true`.
/// - `trace`: emit `tracing` diagnostics when `true`.
#[cfg(feature = "python-bindings")]
pub fn extract_match_options(
    negative_window: Option<&str>, parallel: Option<bool>, trace: Option<bool>,
) -> PyResult<MatchOptions> {
    let policy = match negative_window.unwrap_or("reject").to_lowercase().as_str() {
        "reject" => NegativeWindow::Reject,
        "empty" => NegativeWindow::Empty,
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid negative_window policy {other:?} (expected 'reject' or 'empty')"
            )));
        }
    };
    let scan_mode =
        if parallel.unwrap_or(false) { ScanMode::Parallel } else { ScanMode::Sequential };
    Ok(MatchOptions::new(policy, scan_mode, trace.unwrap_or(false)))
}
