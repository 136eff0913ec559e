//! Maximum-weight closure by minimum cut
//!
//! A closure of a directed graph is a node set closed under successors:
//! whenever `u` is in the set and `u -> v` is a dependency, `v` is too.
//! With a source feeding every positive-weight node, every negative-weight
//! node draining into a sink, and each dependency carried by an unbounded
//! edge, the optimal closure weight is the sum of positive weights minus
//! the maximum flow, and the closure itself is the source side of the
//! residual graph.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, FlowConfig, NodeId};
use crate::data_structures::residual::ResidualNetwork;

/// Optimal closure and its weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closure {
    pub weight: Capacity,
    /// Members in increasing order
    pub nodes: Vec<NodeId>,
}

/// Maximum-weight closure of nodes `0..weights.len()` under `dependencies`
/// (`(u, v)`: choosing `u` forces `v`).
pub fn max_weight_closure(
    weights: &[Capacity],
    dependencies: &[(NodeId, NodeId)],
    config: &FlowConfig,
) -> Closure {
    let node_count = weights.len();
    let source = node_count;
    let sink = node_count + 1;
    let mut network = ResidualNetwork::new(node_count + 2);

    let mut positive_total: Capacity = 0;
    for (node, &weight) in weights.iter().enumerate() {
        if weight > 0 {
            network.add_edge(source, node, weight);
            positive_total += weight;
        } else if weight < 0 {
            network.add_edge(node, sink, -weight);
        }
    }

    if !config.dominates(positive_total) {
        warn!(
            "Unbounded capacity {} does not exceed total positive weight {}",
            config.unbounded_capacity, positive_total
        );
    }
    for &(from, to) in dependencies {
        network.add_edge(from, to, config.unbounded_capacity);
    }

    let cut = network.isap(source, sink);
    let nodes: Vec<NodeId> = network
        .source_side(source)
        .into_iter()
        .take(node_count)
        .enumerate()
        .filter_map(|(node, reached)| reached.then_some(node))
        .collect();

    debug!("Closure of {} nodes, weight {}", nodes.len(), positive_total - cut);

    Closure {
        weight: positive_total - cut,
        nodes,
    }
}
