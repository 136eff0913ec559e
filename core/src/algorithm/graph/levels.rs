//! Reverse breadth-first level assignment
//!
//! Computes, for every node, the length of the shortest residual path to
//! the sink, together with the number of nodes holding each level. A node
//! `v` is discovered from `u` when the record `v -> u` (the pair of `u`'s
//! record towards `v`) still has residual capacity.
//!
//! Nodes that cannot reach the sink keep the label `n`, which also serves
//! as the "unreachable" sentinel of the augmenting engine.

use std::collections::VecDeque;

use crate::algorithm::traits::{Level, NodeId};
use crate::data_structures::residual::ResidualNetwork;

/// Distance labels and per-level population counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelAssignment {
    /// Distance label per node; `unreachable()` when the sink is out of reach
    pub levels: Vec<Level>,
    /// `gap[d]` counts the nodes currently labelled `d`, for `d` in `[0, n]`
    pub gap: Vec<usize>,
}

impl LevelAssignment {
    /// One full reverse BFS from `sink`
    pub fn from_sink(network: &ResidualNetwork, sink: NodeId) -> Self {
        let node_count = network.node_count();
        let mut levels = vec![node_count; node_count];
        let mut gap = vec![0; node_count + 1];
        let mut queue = VecDeque::with_capacity(node_count);

        levels[sink] = 0;
        gap[0] = 1;
        queue.push_back(sink);

        while let Some(node) = queue.pop_front() {
            let next_level = levels[node] + 1;
            for edge in network.edges_from(node) {
                let neighbor = edge.to();
                if levels[neighbor] == node_count
                    && network.residual(neighbor, edge.reverse()) > 0
                {
                    levels[neighbor] = next_level;
                    gap[next_level] += 1;
                    queue.push_back(neighbor);
                }
            }
        }

        Self { levels, gap }
    }

    /// Label carried by nodes that cannot reach the sink
    #[inline]
    pub fn unreachable(&self) -> Level {
        self.levels.len()
    }

    #[inline]
    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.levels[node] < self.unreachable()
    }
}
