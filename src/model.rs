use std::path::PathBuf;

use pyo3::exceptions::{PyIOError, PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};
use wayfinder_core::prelude::*;
use wayfinder_core::routing::config::{DEFAULT_DISTANCE_SCALE, DEFAULT_FLOOR_CHANGE_PENALTY};

/// NavigationGraph
///
/// The building graph: named locations on floors joined by corridors,
/// stairs and elevators, together with the routing policy used for every
/// route requested on it.
///
/// Example:
///
/// .. code-block:: python
///
///     graph = load_navigation_graph("nav_data.json")
///     route = find_route(graph, "entrance", "library", accessible=True)
#[gen_stub_pyclass]
#[pyclass(name = "NavigationGraph")]
pub struct PyNavigationGraph {
    pub(crate) graph: NavigationGraph,
    pub(crate) config: RoutingConfig,
}

#[gen_stub_pymethods]
#[pymethods]
impl PyNavigationGraph {
    pub fn location_count(&self) -> usize {
        self.graph.location_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.connection_count()
    }

    pub fn floors(&self) -> Vec<Floor> {
        self.graph.floors()
    }

    /// Display name of a location, raises ``KeyError`` for unknown ids
    pub fn location_name(&self, id: &str) -> PyResult<String> {
        self.graph
            .location(id)
            .map(|location| location.name.clone())
            .map_err(to_py_err)
    }

    /// Directly connected locations as ``(id, connection type)`` pairs
    pub fn neighbors(&self, id: &str) -> PyResult<Vec<(String, String)>> {
        let neighbors = self.graph.neighbors(id).map_err(to_py_err)?;
        Ok(neighbors
            .into_iter()
            .map(|n| (n.location.id.clone(), n.connection.kind.to_string()))
            .collect())
    }

    /// Ids of points of interest whose name contains ``term``
    pub fn search(&self, term: &str) -> Vec<String> {
        self.graph
            .search_pois(term)
            .into_iter()
            .map(|location| location.id.clone())
            .collect()
    }

    /// Id of the location nearest to a point of the floor plan
    pub fn nearest(&self, floor: Floor, x: f64, y: f64) -> Option<String> {
        self.graph
            .nearest_location(floor, x, y)
            .map(|location| location.id.clone())
    }

    fn __repr__(&self) -> String {
        format!(
            "NavigationGraph with {} locations, {} connections on {} floors",
            self.graph.location_count(),
            self.graph.connection_count(),
            self.graph.floors().len()
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

/// Load a navigation graph from a JSON document
///
/// Parameters
/// ----------
/// path : str
///     Path to a JSON file with ``nodes`` (id, name, x, y, floor, type) and
///     ``edges`` (start, end, type) arrays
/// floor_change_penalty : float, default=500.0
///     Extra cost of moving between floors, in coordinate units
/// distance_scale : float, default=10.0
///     Coordinate units per meter in narrated distances
///
/// Returns
/// -------
/// NavigationGraph
///
/// Raises
/// ------
/// OSError
///     If the file can not be read
/// ValueError
///     If the data is malformed or inconsistent (duplicate ids, dangling
///     connections)
#[gen_stub_pyfunction]
#[pyfunction(name = "load_navigation_graph")]
#[pyo3(signature = (path, floor_change_penalty = DEFAULT_FLOOR_CHANGE_PENALTY, distance_scale = DEFAULT_DISTANCE_SCALE))]
pub fn py_load_navigation_graph(
    py: Python<'_>,
    path: &str,
    floor_change_penalty: f64,
    distance_scale: f64,
) -> PyResult<PyNavigationGraph> {
    let source = NavDataSource::Json {
        path: PathBuf::from(path),
    };
    load(py, &source, floor_change_penalty, distance_scale)
}

/// Load a navigation graph from two CSV tables
///
/// Parameters
/// ----------
/// locations_path : str
///     CSV file with header ``id,name,x,y,floor,type``
/// connections_path : str
///     CSV file with header ``start,end,type``
/// floor_change_penalty : float, default=500.0
/// distance_scale : float, default=10.0
#[gen_stub_pyfunction]
#[pyfunction(name = "load_navigation_graph_csv")]
#[pyo3(signature = (locations_path, connections_path, floor_change_penalty = DEFAULT_FLOOR_CHANGE_PENALTY, distance_scale = DEFAULT_DISTANCE_SCALE))]
pub fn py_load_navigation_graph_csv(
    py: Python<'_>,
    locations_path: &str,
    connections_path: &str,
    floor_change_penalty: f64,
    distance_scale: f64,
) -> PyResult<PyNavigationGraph> {
    let source = NavDataSource::Csv {
        locations: PathBuf::from(locations_path),
        connections: PathBuf::from(connections_path),
    };
    load(py, &source, floor_change_penalty, distance_scale)
}

fn load(
    py: Python<'_>,
    source: &NavDataSource,
    floor_change_penalty: f64,
    distance_scale: f64,
) -> PyResult<PyNavigationGraph> {
    let config = RoutingConfig {
        floor_change_penalty,
        distance_scale,
        ..RoutingConfig::default()
    };
    config.validate().map_err(to_py_err)?;

    let graph = py
        .detach(|| create_navigation_graph(source))
        .map_err(to_py_err)?;

    Ok(PyNavigationGraph { graph, config })
}

/// Maps core errors to the closest Python exception
pub(crate) fn to_py_err(error: Error) -> PyErr {
    match &error {
        Error::UnknownLocation(_) => PyErr::new::<PyKeyError, _>(error.to_string()),
        Error::InvalidData(_) => PyErr::new::<PyValueError, _>(error.to_string()),
        Error::IoError(_) => PyErr::new::<PyIOError, _>(error.to_string()),
        Error::Unreachable { .. } | Error::GeoJsonError(_) => {
            PyErr::new::<PyRuntimeError, _>(error.to_string())
        }
    }
}
