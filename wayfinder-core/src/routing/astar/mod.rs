//! A* path search over the navigation graph

mod search;
mod state;

use log::{debug, trace};
use serde::Serialize;

use crate::{
    Error, Weight,
    model::{Location, NavigationGraph},
    routing::{NavigationMode, RoutingConfig},
};

pub(crate) use search::astar;

/// Ordered locations from start to destination, inclusive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub locations: Vec<Location>,
    /// Sum of edge weights along the path
    pub cost: Weight,
}

/// Finds the cheapest path between two locations
///
/// # Errors
///
/// Returns `Error::UnknownLocation` if either id is not in the graph and
/// `Error::Unreachable` if no path exists under `mode`.
pub fn find_path(
    graph: &NavigationGraph,
    start_id: &str,
    destination_id: &str,
    mode: NavigationMode,
    config: &RoutingConfig,
) -> Result<Path, Error> {
    let start = graph
        .node_index(start_id)
        .ok_or_else(|| Error::UnknownLocation(start_id.to_string()))?;
    let target = graph
        .node_index(destination_id)
        .ok_or_else(|| Error::UnknownLocation(destination_id.to_string()))?;

    let Some((cost, nodes)) = astar(graph, start, target, mode, config) else {
        debug!("No {mode} path from '{start_id}' to '{destination_id}'");
        return Err(Error::Unreachable {
            start: start_id.to_string(),
            destination: destination_id.to_string(),
            mode,
        });
    };

    trace!(
        "Found {mode} path from '{start_id}' to '{destination_id}': {} locations, cost {cost:.1}",
        nodes.len()
    );

    Ok(Path {
        locations: nodes.into_iter().map(|node| graph[node].clone()).collect(),
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        loading::ConnectionRecord,
        model::{ConnectionType, LocationKind},
    };

    fn graph() -> NavigationGraph {
        // a - b - c is the short way, a - d - c the long one
        let locations = vec![
            Location::new("a", "A", 0.0, 0.0, 1, LocationKind::Poi),
            Location::new("b", "B", 10.0, 0.0, 1, LocationKind::Connector),
            Location::new("c", "C", 20.0, 0.0, 1, LocationKind::Poi),
            Location::new("d", "D", 10.0, 30.0, 1, LocationKind::Connector),
        ];
        let connections = [("a", "b"), ("b", "c"), ("a", "d"), ("d", "c")]
            .into_iter()
            .map(|(start, end)| ConnectionRecord {
                start: start.to_string(),
                end: end.to_string(),
                kind: ConnectionType::Corridor,
            });
        NavigationGraph::build(locations, connections).unwrap()
    }

    fn ids(path: &Path) -> Vec<&str> {
        path.locations.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn picks_the_shorter_corridor() {
        let path = find_path(
            &graph(),
            "a",
            "c",
            NavigationMode::STANDARD,
            &RoutingConfig::default(),
        )
        .unwrap();
        assert_eq!(ids(&path), vec!["a", "b", "c"]);
        assert!((path.cost - 20.0).abs() < 1e-9);
    }

    #[test]
    fn same_start_and_destination() {
        let path = find_path(
            &graph(),
            "b",
            "b",
            NavigationMode::STANDARD,
            &RoutingConfig::default(),
        )
        .unwrap();
        assert_eq!(ids(&path), vec!["b"]);
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let result = find_path(
            &graph(),
            "a",
            "nowhere",
            NavigationMode::STANDARD,
            &RoutingConfig::default(),
        );
        assert!(matches!(result, Err(Error::UnknownLocation(id)) if id == "nowhere"));
    }
}
