use pyo3::prelude::*;
use pyo3_stub_gen::derive::gen_stub_pyfunction;
use wayfinder_core::prelude::*;

use crate::model::PyNavigationGraph;
use crate::routing::{PyRouteResult, optional_route};

/// Find routes for many independent ``(start, destination)`` pairs
///
/// Routes are computed in parallel with the GIL released. The result list
/// follows the order of ``pairs``, unreachable pairs are ``None``.
///
/// Raises
/// ------
/// KeyError
///     If any id is not in the graph
#[gen_stub_pyfunction]
#[pyfunction]
#[pyo3(signature = (graph, pairs, accessible = false))]
pub fn find_routes(
    py: Python<'_>,
    graph: &PyNavigationGraph,
    pairs: Vec<(String, String)>,
    accessible: bool,
) -> PyResult<Vec<Option<PyRouteResult>>> {
    let mode = NavigationMode { accessible };
    let queries: Vec<RouteQuery> = pairs
        .into_iter()
        .map(|(start, destination)| RouteQuery::new(start, destination, mode))
        .collect();

    let results = py.detach(|| route_batch(&graph.graph, &queries, &graph.config));

    results.into_iter().map(optional_route).collect()
}
