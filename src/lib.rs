use pyo3::prelude::*;
use pyo3_stub_gen::define_stub_info_gatherer;

use batch::find_routes;
use model::{PyNavigationGraph, py_load_navigation_graph, py_load_navigation_graph_csv};
use routing::{PyInstructionStep, PyRouteResult, find_route};

pub mod batch;
pub mod model;
pub mod routing;

/// A Python module implemented in Rust.
#[pymodule]
fn wayfinder(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyNavigationGraph>()?;
    m.add_function(wrap_pyfunction!(py_load_navigation_graph, m)?)?;
    m.add_function(wrap_pyfunction!(py_load_navigation_graph_csv, m)?)?;

    m.add_class::<PyRouteResult>()?;
    m.add_class::<PyInstructionStep>()?;
    m.add_function(wrap_pyfunction!(find_route, m)?)?;
    m.add_function(wrap_pyfunction!(find_routes, m)?)?;
    Ok(())
}

define_stub_info_gatherer!(stub_info);
