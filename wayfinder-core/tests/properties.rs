//! Property tests over small random buildings.
//!
//! Graphs have at most 8 locations on two floors, which keeps brute-force
//! enumeration of every simple path cheap enough to check optimality.

use proptest::prelude::*;
use wayfinder_core::prelude::*;

const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
struct Building {
    locations: Vec<Location>,
    connections: Vec<ConnectionRecord>,
    start: String,
    destination: String,
}

fn connection_type(tag: usize) -> ConnectionType {
    match tag {
        0 => ConnectionType::Corridor,
        1 => ConnectionType::Stairs,
        _ => ConnectionType::Elevator,
    }
}

fn arb_building() -> impl Strategy<Value = Building> {
    (2usize..=8)
        .prop_flat_map(|n| {
            (
                prop::collection::vec((0i32..100, 0i32..100, 1i32..=2), n),
                prop::collection::vec((0..n, 0..n, 0usize..3), 0..=2 * n),
                0..n,
                0..n,
            )
        })
        .prop_map(|(points, edges, start, destination)| Building {
            locations: points
                .into_iter()
                .enumerate()
                .map(|(i, (x, y, floor))| {
                    Location::new(
                        format!("n{i}"),
                        format!("Node {i}"),
                        f64::from(x),
                        f64::from(y),
                        floor,
                        LocationKind::Connector,
                    )
                })
                .collect(),
            connections: edges
                .into_iter()
                .map(|(a, b, tag)| ConnectionRecord {
                    start: format!("n{a}"),
                    end: format!("n{b}"),
                    kind: connection_type(tag),
                })
                .collect(),
            start: format!("n{start}"),
            destination: format!("n{destination}"),
        })
}

fn build(building: &Building) -> NavigationGraph {
    NavigationGraph::build(building.locations.clone(), building.connections.clone()).unwrap()
}

/// Cheapest cost over every simple path, by exhaustive search
fn brute_force_cost(
    graph: &NavigationGraph,
    start: &str,
    destination: &str,
    mode: NavigationMode,
    config: &RoutingConfig,
) -> Option<f64> {
    #[allow(clippy::too_many_arguments)]
    fn visit(
        graph: &NavigationGraph,
        current: &Location,
        destination: &str,
        mode: NavigationMode,
        config: &RoutingConfig,
        visited: &mut Vec<String>,
        cost: f64,
        best: &mut Option<f64>,
    ) {
        if current.id == destination {
            if best.is_none_or(|b| cost < b) {
                *best = Some(cost);
            }
            return;
        }
        for neighbor in graph.neighbors(&current.id).unwrap() {
            if visited.contains(&neighbor.location.id) {
                continue;
            }
            let Some(weight) =
                edge_cost(current, neighbor.location, neighbor.connection, mode, config)
            else {
                continue;
            };
            visited.push(neighbor.location.id.clone());
            visit(
                graph,
                neighbor.location,
                destination,
                mode,
                config,
                visited,
                cost + weight,
                best,
            );
            visited.pop();
        }
    }

    let mut best = None;
    let mut visited = vec![start.to_string()];
    visit(
        graph,
        graph.location(start).unwrap(),
        destination,
        mode,
        config,
        &mut visited,
        0.0,
        &mut best,
    );
    best
}

fn modes() -> [NavigationMode; 2] {
    [NavigationMode::STANDARD, NavigationMode::ACCESSIBLE]
}

proptest! {
    #[test]
    fn search_matches_brute_force(building in arb_building()) {
        let graph = build(&building);
        let config = RoutingConfig::default();

        for mode in modes() {
            let expected = brute_force_cost(&graph, &building.start, &building.destination, mode, &config);
            match find_path(&graph, &building.start, &building.destination, mode, &config) {
                Ok(path) => {
                    let expected = expected.expect("search found a path brute force did not");
                    prop_assert!((path.cost - expected).abs() < EPSILON, "{} vs {}", path.cost, expected);
                }
                Err(Error::Unreachable { .. }) => prop_assert!(expected.is_none()),
                Err(e) => prop_assert!(false, "unexpected error {e}"),
            }
        }
    }

    #[test]
    fn paths_follow_real_connections(building in arb_building()) {
        let graph = build(&building);
        let config = RoutingConfig::default();

        for mode in modes() {
            let Ok(path) = find_path(&graph, &building.start, &building.destination, mode, &config) else {
                continue;
            };
            prop_assert_eq!(&path.locations.first().unwrap().id, &building.start);
            prop_assert_eq!(&path.locations.last().unwrap().id, &building.destination);

            for pair in path.locations.windows(2) {
                let usable = graph
                    .neighbors(&pair[0].id)
                    .unwrap()
                    .into_iter()
                    .filter(|n| n.location.id == pair[1].id)
                    .any(|n| !mode.accessible || n.connection.kind != ConnectionType::Stairs);
                prop_assert!(usable, "{} -> {} is not traversable in {mode} mode", pair[0].id, pair[1].id);
            }
        }
    }

    #[test]
    fn edge_costs_are_symmetric(building in arb_building()) {
        let graph = build(&building);
        let config = RoutingConfig::default();

        for location in graph.locations() {
            for neighbor in graph.neighbors(&location.id).unwrap() {
                for mode in modes() {
                    let forward = edge_cost(location, neighbor.location, neighbor.connection, mode, &config);
                    let backward = edge_cost(neighbor.location, location, neighbor.connection, mode, &config);
                    prop_assert_eq!(forward, backward);
                }
            }
        }
    }

    #[test]
    fn routing_is_deterministic(building in arb_building()) {
        let config = RoutingConfig::default();
        let first = request_route(&build(&building), &building.start, &building.destination, NavigationMode::STANDARD, &config);
        let second = request_route(&build(&building), &building.start, &building.destination, NavigationMode::STANDARD, &config);

        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "outcomes differ"),
        }
    }

    #[test]
    fn total_distance_is_the_sum_of_steps(building in arb_building()) {
        let graph = build(&building);
        if let Ok(result) = request_route(&graph, &building.start, &building.destination, NavigationMode::STANDARD, &RoutingConfig::default()) {
            let sum: u32 = result.steps.iter().map(|s| s.distance).sum();
            prop_assert_eq!(result.total_distance, sum);
            prop_assert_eq!(result.steps.first().unwrap().kind, StepKind::Start);
            prop_assert_eq!(result.steps.last().unwrap().kind, StepKind::Arrival);
            prop_assert!(result.steps.iter().all(|s| s.distance > 0 || s.kind.is_endpoint()));
        }
    }
}
