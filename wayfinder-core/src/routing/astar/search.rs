use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::{HashMap, hash_map::Entry};
use petgraph::graph::NodeIndex;

use super::state::State;
use crate::{
    Weight,
    model::NavigationGraph,
    routing::{NavigationMode, RoutingConfig, edge_cost},
};

/// A* search between two graph nodes
///
/// The heuristic is the planar distance to the target. It ignores the floor
/// change penalty, so it never overestimates and the first time the target is
/// popped its cost is optimal. Returns the path cost and the node sequence
/// from `start` to `target`, or `None` if the target is unreachable in `mode`.
pub(crate) fn astar(
    graph: &NavigationGraph,
    start: NodeIndex,
    target: NodeIndex,
    mode: NavigationMode,
    config: &RoutingConfig,
) -> Option<(Weight, Vec<NodeIndex>)> {
    let node_count = graph.location_count();
    let goal = &graph[target];

    let mut costs: HashMap<NodeIndex, Weight> = HashMap::with_capacity(node_count.min(1000));
    let mut predecessors: HashMap<NodeIndex, NodeIndex> =
        HashMap::with_capacity(node_count.min(1000));
    let mut closed = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::new();

    heap.push(State {
        estimate: graph[start].planar_distance(goal),
        cost: 0.0,
        node: start,
    });
    costs.insert(start, 0.0);

    while let Some(State { cost, node, .. }) = heap.pop() {
        if node == target {
            return Some((cost, reconstruct_path(&predecessors, start, target)));
        }

        // Stale heap entry, the node was already settled through a cheaper path
        if closed.contains(node.index()) {
            continue;
        }
        closed.insert(node.index());

        let current = &graph[node];
        for (next, connection) in graph.adjacent(node) {
            if closed.contains(next.index()) {
                continue;
            }

            let Some(weight) = edge_cost(current, &graph[next], connection, mode, config) else {
                continue;
            };
            let next_cost = cost + weight;

            let improved = match costs.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    true
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        true
                    } else {
                        false
                    }
                }
            };

            if improved {
                predecessors.insert(next, node);
                heap.push(State {
                    estimate: next_cost + graph[next].planar_distance(goal),
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    None
}

fn reconstruct_path(
    predecessors: &HashMap<NodeIndex, NodeIndex>,
    start: NodeIndex,
    target: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        match predecessors.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse(); // Now path is from start to target
    path
}
