use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

use crate::Weight;

#[derive(Copy, Clone, Debug)]
pub(super) struct State {
    /// Cost so far plus the straight-line estimate to the target
    pub(super) estimate: Weight,
    pub(super) cost: Weight,
    pub(super) node: NodeIndex,
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by estimate (reversed from standard Rust BinaryHeap),
        // ties resolved by the lower node index
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}
