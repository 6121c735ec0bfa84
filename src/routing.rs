use pyo3::prelude::*;
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};
use wayfinder_core::prelude::*;

use crate::model::{PyNavigationGraph, to_py_err};

/// One narrated step of a route
#[gen_stub_pyclass]
#[pyclass(name = "InstructionStep")]
#[derive(Clone)]
pub struct PyInstructionStep {
    pub inner: InstructionStep,
}

#[gen_stub_pymethods]
#[pymethods]
impl PyInstructionStep {
    #[getter]
    fn text(&self) -> String {
        self.inner.text.clone()
    }

    /// One of ``start``, ``turn_left``, ``turn_right``, ``floor_change``, ``arrival``
    #[getter]
    fn kind(&self) -> &'static str {
        self.inner.kind.as_str()
    }

    /// Meters walked since the previous step
    #[getter]
    fn distance(&self) -> DisplayDistance {
        self.inner.distance
    }

    fn __repr__(&self) -> String {
        format!(
            "InstructionStep({}, {:?}, {} m)",
            self.inner.kind.as_str(),
            self.inner.text,
            self.inner.distance
        )
    }
}

/// Route between two locations with turn-by-turn steps
#[gen_stub_pyclass]
#[pyclass(name = "RouteResult")]
pub struct PyRouteResult {
    pub inner: RouteResult,
}

#[gen_stub_pymethods]
#[pymethods]
impl PyRouteResult {
    /// Total walking distance in meters
    #[getter]
    fn total_distance(&self) -> DisplayDistance {
        self.inner.total_distance
    }

    /// Search cost in coordinate units, floor change penalties included
    #[getter]
    fn cost(&self) -> f64 {
        self.inner.cost
    }

    #[getter]
    fn accessible(&self) -> bool {
        self.inner.mode.accessible
    }

    #[getter]
    fn steps(&self) -> Vec<PyInstructionStep> {
        self.inner
            .steps
            .iter()
            .cloned()
            .map(|inner| PyInstructionStep { inner })
            .collect()
    }

    /// Location ids from start to destination
    #[getter]
    fn path(&self) -> Vec<String> {
        self.inner.path.iter().map(|l| l.id.clone()).collect()
    }

    /// Path positions as ``(x, y, floor)`` tuples
    #[getter]
    fn coordinates(&self) -> Vec<(f64, f64, Floor)> {
        self.inner.coordinates()
    }

    pub fn as_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Failed to serialize RouteResult to JSON: {e}"
            ))
        })
    }

    /// Route as a GeoJSON FeatureCollection string in floor plan coordinates
    pub fn to_geojson(&self) -> PyResult<String> {
        self.inner.to_geojson_string().map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!(
            "RouteResult({} -> {}, {} steps, {} m)",
            self.inner.path.first().map_or("", |l| l.id.as_str()),
            self.inner.path.last().map_or("", |l| l.id.as_str()),
            self.inner.steps.len(),
            self.inner.total_distance
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

/// Converts a core routing outcome, unreachable destinations become ``None``
pub(crate) fn optional_route(
    result: Result<RouteResult, Error>,
) -> PyResult<Option<PyRouteResult>> {
    match result {
        Ok(inner) => Ok(Some(PyRouteResult { inner })),
        Err(Error::Unreachable { .. }) => Ok(None),
        Err(e) => Err(to_py_err(e)),
    }
}

/// Find a walking route between two locations
///
/// Parameters
/// ----------
/// graph : NavigationGraph
/// start : str
///     Id of the start location
/// destination : str
///     Id of the destination location
/// accessible : bool, default=False
///     Require a step-free route (stairs are never used)
///
/// Returns
/// -------
/// RouteResult or None
///     ``None`` if no route exists, for example when only stairs lead to the
///     destination and ``accessible`` is set
///
/// Raises
/// ------
/// KeyError
///     If either id is not in the graph
#[gen_stub_pyfunction]
#[pyfunction]
#[pyo3(signature = (graph, start, destination, accessible = false))]
pub fn find_route(
    py: Python<'_>,
    graph: &PyNavigationGraph,
    start: &str,
    destination: &str,
    accessible: bool,
) -> PyResult<Option<PyRouteResult>> {
    let mode = NavigationMode { accessible };
    let result =
        py.detach(|| request_route(&graph.graph, start, destination, mode, &graph.config));

    optional_route(result)
}
