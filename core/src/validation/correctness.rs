//! Flow invariant verification
//!
//! Checks a residual network against the properties every valid flow must
//! satisfy: capacity bounds on each record, antisymmetry of each record
//! pair, and conservation at every node other than source and sink.
//! Used by tests and by the sample driver to certify results.

use thiserror::Error;

use crate::algorithm::traits::{Capacity, NodeId};
use crate::data_structures::residual::ResidualNetwork;

/// First invariant found broken
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Edge {from} -> {to} carries flow {flow} outside [0, {capacity}]")]
    CapacityExceeded {
        from: NodeId,
        to: NodeId,
        flow: Capacity,
        capacity: Capacity,
    },

    #[error("Edge {from} -> {to} has flow {flow} but its pair carries {paired}")]
    UnpairedFlow {
        from: NodeId,
        to: NodeId,
        flow: Capacity,
        paired: Capacity,
    },

    #[error("Node {node} is unbalanced by {excess}")]
    Unbalanced { node: NodeId, excess: Capacity },
}

/// Flow leaving `node` minus flow entering it
pub fn net_outflow(network: &ResidualNetwork, node: NodeId) -> Capacity {
    network.edges_from(node).iter().map(|edge| edge.flow()).sum()
}

/// Every record respects its capacity and mirrors its pair
pub fn check_capacity_bounds(network: &ResidualNetwork) -> Result<(), Violation> {
    for from in 0..network.node_count() {
        for edge in network.edges_from(from) {
            let to = edge.to();
            let flow = edge.flow();
            let capacity = edge.capacity();

            let lower = if capacity > 0 { 0 } else { Capacity::MIN };
            if flow < lower || flow > capacity {
                return Err(Violation::CapacityExceeded {
                    from,
                    to,
                    flow,
                    capacity,
                });
            }

            let paired = network.edges_from(to)[edge.reverse()].flow();
            if paired != -flow {
                return Err(Violation::UnpairedFlow {
                    from,
                    to,
                    flow,
                    paired,
                });
            }
        }
    }
    Ok(())
}

/// Every node other than `source` and `sink` is balanced
pub fn check_conservation(
    network: &ResidualNetwork,
    source: NodeId,
    sink: NodeId,
) -> Result<(), Violation> {
    (0..network.node_count())
        .filter(|&node| node != source && node != sink)
        .map(|node| (node, net_outflow(network, node)))
        .find(|&(_, excess)| excess != 0)
        .map_or(Ok(()), |(node, excess)| Err(Violation::Unbalanced { node, excess }))
}

/// Run all checks and return the flow value leaving `source`
pub fn check_flow(network: &ResidualNetwork, source: NodeId, sink: NodeId) -> Result<Capacity, Violation> {
    check_capacity_bounds(network)?;
    check_conservation(network, source, sink)?;
    Ok(net_outflow(network, source))
}
