//! Improved Shortest Augmenting Path (ISAP) maximum flow
//!
//! Distance labels are computed once per run by a reverse BFS from the
//! sink and then maintained locally by relabeling. The search walks
//! admissible edges (`level(u) == level(v) + 1`) from the source keeping an
//! explicit path stack, augments by the bottleneck whenever the sink is
//! reached, and retreats with a relabel when a node has no admissible edge
//! left. The gap heuristic stops the run as soon as some level becomes
//! empty: no augmenting path can cross an empty level.
//!
//! Per-node current-edge cursors persist across advances, retreats and
//! augmentations and are only rewound when their node is relabelled.
//!
//! Time: O(V^2 * E). Space: O(V + E).
//!
//! Flow already recorded on the network persists across runs, so a second
//! run on the same network returns only the additional flow.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::levels::LevelAssignment;
use crate::algorithm::traits::{Capacity, Level, NodeId};
use crate::data_structures::residual::ResidualNetwork;

/// Counters collected during one ISAP run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsapStats {
    /// Steps along an admissible edge
    pub advances: usize,
    /// Retreat steps, each with a relabel
    pub relabels: usize,
    /// Successful augmentations
    pub augmentations: usize,
    /// Whether the run ended because a level emptied
    pub gap_terminated: bool,
}

/// Maximum flow together with a minimum cut and run counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlowResult {
    /// Flow pushed from source to sink by this run
    pub max_flow: Capacity,
    /// Source side of a minimum cut in the residual graph
    pub min_cut: Vec<NodeId>,
    /// Algorithm performance counters
    pub stats: IsapStats,
}

/// ISAP solver with gap heuristic
#[derive(Debug, Clone, Default)]
pub struct IsapSolver {
    stats: IsapStats,
}

impl IsapSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters of the most recent run
    pub fn stats(&self) -> &IsapStats {
        &self.stats
    }

    /// Push as much additional flow as possible from `source` to `sink`
    /// and return the amount pushed.
    ///
    /// Returns 0 when the sink cannot be reached, and when
    /// `source == sink`.
    pub fn solve(&mut self, network: &mut ResidualNetwork, source: NodeId, sink: NodeId) -> Capacity {
        self.stats = IsapStats::default();

        if source == sink {
            warn!("ISAP called with source == sink ({}), returning zero flow", source);
            return 0;
        }

        let node_count = network.node_count();
        let LevelAssignment { mut levels, mut gap } = LevelAssignment::from_sink(network, sink);

        if levels[source] >= node_count {
            debug!("Sink {} unreachable from source {}", sink, source);
            return 0;
        }

        let mut current = vec![0usize; node_count];
        let mut path: Vec<NodeId> = Vec::with_capacity(node_count);
        let mut total: Capacity = 0;
        let mut node = source;

        while levels[source] < node_count {
            if node == sink {
                total += self.augment(network, &current, &path);
                node = source;
                path.clear();
            }

            if let Some(next) = advance(network, &levels, &mut current, node) {
                self.stats.advances += 1;
                path.push(node);
                node = next;
                continue;
            }

            // Retreat: relabel `node` from its residual neighbours
            self.stats.relabels += 1;
            let min_level = network
                .edges_from(node)
                .iter()
                .filter(|edge| edge.residual() > 0)
                .map(|edge| levels[edge.to()])
                .min()
                .unwrap_or(node_count);

            let old_level = levels[node];
            gap[old_level] -= 1;
            if gap[old_level] == 0 {
                trace!("Level {} emptied at node {}, stopping", old_level, node);
                self.stats.gap_terminated = true;
                break;
            }

            let new_level: Level = (min_level + 1).min(node_count);
            levels[node] = new_level;
            gap[new_level] += 1;
            current[node] = 0;

            if let Some(previous) = path.pop() {
                node = previous;
            }
        }

        debug!(
            "ISAP {} -> {}: flow {} ({} augmentations, {} relabels)",
            source, sink, total, self.stats.augmentations, self.stats.relabels
        );

        total
    }

    /// Run `solve` and extract the minimum cut left in the residual graph
    pub fn solve_with_cut(
        &mut self,
        network: &mut ResidualNetwork,
        source: NodeId,
        sink: NodeId,
    ) -> MaxFlowResult {
        let max_flow = self.solve(network, source, sink);
        let min_cut = network
            .source_side(source)
            .into_iter()
            .enumerate()
            .filter_map(|(node, reached)| reached.then_some(node))
            .collect();

        MaxFlowResult {
            max_flow,
            min_cut,
            stats: self.stats.clone(),
        }
    }

    /// Push the bottleneck along the edges selected by the cursors of the
    /// nodes on `path`
    fn augment(&mut self, network: &mut ResidualNetwork, current: &[usize], path: &[NodeId]) -> Capacity {
        let bottleneck = path
            .iter()
            .map(|&node| network.residual(node, current[node]))
            .fold(Capacity::MAX, Capacity::min);

        for &node in path {
            network.push(node, current[node], bottleneck);
        }

        self.stats.augmentations += 1;
        trace!("Augmented {} along {} edges", bottleneck, path.len());

        bottleneck
    }
}

/// Scan `node`'s edges from its cursor for an admissible one. The cursor
/// is left on the admitting edge.
fn advance(
    network: &ResidualNetwork,
    levels: &[Level],
    current: &mut [usize],
    node: NodeId,
) -> Option<NodeId> {
    let edges = network.edges_from(node);
    while current[node] < edges.len() {
        let edge = &edges[current[node]];
        if edge.residual() > 0 && levels[node] == levels[edge.to()] + 1 {
            return Some(edge.to());
        }
        current[node] += 1;
    }
    None
}

impl ResidualNetwork {
    /// Maximum additional flow from `source` to `sink` by ISAP
    pub fn isap(&mut self, source: NodeId, sink: NodeId) -> Capacity {
        IsapSolver::new().solve(self, source, sink)
    }
}
