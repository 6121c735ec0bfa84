//! Route requests: search plus narration

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Instructions, InstructionStep, NavigationMode, RoutingConfig, find_path, synthesize};
use crate::{DisplayDistance, Error, Floor, Weight, model::Location, model::NavigationGraph};

/// One route request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub start: String,
    pub destination: String,
    #[serde(flatten)]
    pub mode: NavigationMode,
}

impl RouteQuery {
    pub fn new(
        start: impl Into<String>,
        destination: impl Into<String>,
        mode: NavigationMode,
    ) -> Self {
        Self {
            start: start.into(),
            destination: destination.into(),
            mode,
        }
    }
}

/// Complete answer to a route request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    /// Locations from start to destination, inclusive
    pub path: Vec<Location>,
    pub steps: Vec<InstructionStep>,
    /// Sum of the step distances, in display units
    pub total_distance: DisplayDistance,
    /// Search cost in raw units, floor change penalties included
    pub cost: Weight,
    pub mode: NavigationMode,
}

impl RouteResult {
    /// Path positions as (x, y, floor) triples
    pub fn coordinates(&self) -> Vec<(f64, f64, Floor)> {
        self.path
            .iter()
            .map(|location| (location.x(), location.y(), location.floor))
            .collect()
    }

    /// Number of floor changes along the path
    pub fn floor_changes(&self) -> usize {
        self.path
            .windows(2)
            .filter(|pair| pair[0].floor != pair[1].floor)
            .count()
    }
}

/// Finds a route and narrates it
///
/// # Errors
///
/// Returns `Error::UnknownLocation` if either id is not in the graph and
/// `Error::Unreachable` if no route exists under `mode`.
pub fn request_route(
    graph: &NavigationGraph,
    start_id: &str,
    destination_id: &str,
    mode: NavigationMode,
    config: &RoutingConfig,
) -> Result<RouteResult, Error> {
    let path = find_path(graph, start_id, destination_id, mode, config)?;
    let Instructions {
        steps,
        total_distance,
    } = synthesize(&path.locations, config);

    debug!(
        "Route '{start_id}' -> '{destination_id}' ({mode}): {} steps, {total_distance} m",
        steps.len()
    );

    Ok(RouteResult {
        path: path.locations,
        steps,
        total_distance,
        cost: path.cost,
        mode,
    })
}

/// Evaluates independent route requests in parallel
///
/// Each request runs its own search, results are returned in query order.
pub fn route_batch(
    graph: &NavigationGraph,
    queries: &[RouteQuery],
    config: &RoutingConfig,
) -> Vec<Result<RouteResult, Error>> {
    queries
        .par_iter()
        .map(|query| request_route(graph, &query.start, &query.destination, query.mode, config))
        .collect()
}
