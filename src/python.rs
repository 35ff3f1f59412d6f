use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::config::WINDOW_SIZE;
use crate::features::{self, FeatureError, FeatureVec, FEATURE_NAMES, NUM_FEATURES};
use crate::window::{Sample, Window};

fn value_error(err: FeatureError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn axis(arr: &PyReadonlyArray1<i32>, name: &str) -> PyResult<[i32; WINDOW_SIZE]> {
    let slice = arr.as_slice()?;
    <[i32; WINDOW_SIZE]>::try_from(slice).map_err(|_| {
        PyValueError::new_err(format!(
            "{name} has {} samples, window size is {WINDOW_SIZE}",
            slice.len()
        ))
    })
}

/// Features of one full window given as three int32 axis arrays.
#[pyfunction]
pub fn compute_features<'py>(
    py: Python<'py>,
    x: PyReadonlyArray1<i32>,
    y: PyReadonlyArray1<i32>,
    z: PyReadonlyArray1<i32>,
) -> PyResult<&'py PyArray1<f32>> {
    let window = Window::from_axes(axis(&x, "x")?, axis(&y, "y")?, axis(&z, "z")?);
    let fv = features::try_compute_features(&window).map_err(value_error)?;
    Ok(PyArray1::from_slice(py, fv.as_slice()))
}

#[pyfunction]
pub fn feature_names() -> Vec<&'static str> {
    FEATURE_NAMES.to_vec()
}

#[pyfunction]
pub fn feature_index(name: &str) -> Option<usize> {
    features::feature_index(name)
}

#[pyclass]
pub struct FeatureEngine {
    window: Window<WINDOW_SIZE>,
    fv: FeatureVec,
    /// Pre-allocated output buffer exposed to Python.
    out: Py<PyArray1<f32>>,
}

#[pymethods]
impl FeatureEngine {
    #[new]
    pub fn new(py: Python<'_>) -> PyResult<Self> {
        let out = PyArray1::<f32>::zeros(py, [NUM_FEATURES], false);
        Ok(Self {
            window: Window::new(),
            fv: FeatureVec::new(),
            out: out.into_py(py),
        })
    }

    /// Appends a sample; returns whether the window is full.
    pub fn push(&mut self, x: i32, y: i32, z: i32) -> bool {
        self.window.push(Sample::new(x, y, z))
    }

    pub fn compute<'py>(&'py mut self, py: Python<'py>) -> PyResult<&'py PyArray1<f32>> {
        if !self.window.is_full() {
            return Err(PyValueError::new_err(format!(
                "window holds {} of {WINDOW_SIZE} samples",
                self.window.len()
            )));
        }
        let result = features::try_compute_features_into(&self.window, &mut self.fv);
        self.window.reset();
        result.map_err(value_error)?;

        let out = self.out.as_ref(py);
        // Safety: `out` was allocated as a contiguous f32 array above and is
        // not aliased while we hold the GIL.
        let slice = unsafe { out.as_slice_mut()? };
        self.fv.copy_to_slice(slice);
        Ok(out)
    }

    pub fn reset(&mut self) {
        self.window.reset();
    }

    pub fn __len__(&self) -> usize {
        self.window.len()
    }

    #[getter]
    pub fn window_size(&self) -> usize {
        WINDOW_SIZE
    }
}

#[pymodule]
fn activity_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<FeatureEngine>()?;
    m.add_function(wrap_pyfunction!(compute_features, m)?)?;
    m.add_function(wrap_pyfunction!(feature_names, m)?)?;
    m.add_function(wrap_pyfunction!(feature_index, m)?)?;
    m.add("WINDOW_SIZE", WINDOW_SIZE)?;
    m.add("NUM_FEATURES", NUM_FEATURES)?;
    Ok(())
}
