//! Flow feasibility under lower and upper edge bounds
//!
//! Reduces the question "is there a flow from `s` to `t` with
//! `lower <= flow(e) <= upper` on every edge and a nonnegative net
//! `s -> t` value" to one maximum flow on an
//! auxiliary network with a supersource `SS = n` and a supersink
//! `TT = n + 1`:
//!
//! 1. every edge keeps only its slack `upper - lower` as capacity;
//! 2. the lower bounds become node demands, served from `SS` (positive
//!    demand) or drained into `TT` (negative demand);
//! 3. an edge `t -> s` of unbounded capacity closes the network into a
//!    circulation.
//!
//! The instance is feasible iff the maximum `SS -> TT` flow saturates every
//! supersource edge. Once feasible, the flow on the return edge is the net
//! `s -> t` value of the circulation found; disabling the return edge and
//! augmenting `s -> t` (or `t -> s`) on the same residual graph yields the
//! maximum (or minimum) feasible flow value.
//!
//! The return edge only runs `t -> s`, so it can only carry a net `s -> t`
//! value of zero or more. An instance whose every bounded flow has a
//! negative net value (flow forced from `t` back to `s`) is reported
//! infeasible. Once some flow with a nonnegative value exists, `min_flow`
//! may still go below zero.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, FlowConfig, NodeId};
use crate::data_structures::residual::{EdgeHandle, ResidualNetwork};

/// Edge with lower and upper flow bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Minimum flow the edge must carry
    pub lower: Capacity,
    /// Maximum flow the edge may carry
    pub upper: Capacity,
}

impl BoundedEdge {
    pub fn new(from: NodeId, to: NodeId, lower: Capacity, upper: Capacity) -> Self {
        Self {
            from,
            to,
            lower,
            upper,
        }
    }

    /// Adjustable range above the lower bound
    #[inline]
    pub fn slack(&self) -> Capacity {
        self.upper - self.lower
    }
}

/// Lower/upper bounded flow network between a fixed source and sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundedFlowNetwork {
    node_count: usize,
    source: NodeId,
    sink: NodeId,
    edges: Vec<BoundedEdge>,
    config: FlowConfig,
}

/// Feasible flow together with the extreme flow values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedSolution {
    /// Per-edge flow of one feasible flow, in edge order
    pub edge_flows: Vec<Capacity>,
    /// Largest net `s -> t` value
    pub max_flow: Capacity,
    /// Smallest net `s -> t` value
    pub min_flow: Capacity,
}

/// Auxiliary network after the `SS -> TT` run
#[derive(Debug, Clone)]
struct Circulation {
    network: ResidualNetwork,
    /// Slack edge of each bounded edge, absent when the slack is zero
    slack_edges: Vec<Option<EdgeHandle>>,
    /// The unbounded `t -> s` edge
    return_edge: EdgeHandle,
}

impl Circulation {
    /// Detach the return edge and report the net `s -> t` flow it carried
    fn release_return_edge(&mut self) -> Capacity {
        let carried = self.network.edge(self.return_edge).flow();
        self.network.disable_edge(self.return_edge);
        carried
    }

    fn edge_flows(&self, edges: &[BoundedEdge]) -> Vec<Capacity> {
        edges
            .iter()
            .zip(&self.slack_edges)
            .map(|(edge, slack)| edge.lower + slack.map_or(0, |handle| self.network.edge(handle).flow()))
            .collect()
    }

    /// Largest net `s -> t` value, consuming the circulation
    fn into_max_flow(mut self, source: NodeId, sink: NodeId) -> Capacity {
        let base = self.release_return_edge();
        let extra = self.network.isap(source, sink);
        debug!("Bounded max flow: base {} + augmented {}", base, extra);
        base + extra
    }

    /// Smallest net `s -> t` value, consuming the circulation
    fn into_min_flow(mut self, source: NodeId, sink: NodeId) -> Capacity {
        let base = self.release_return_edge();
        let cancelled = self.network.isap(sink, source);
        debug!("Bounded min flow: base {} - cancelled {}", base, cancelled);
        base - cancelled
    }
}

impl BoundedFlowNetwork {
    pub fn new(node_count: usize, source: NodeId, sink: NodeId) -> Self {
        Self {
            node_count,
            source,
            sink,
            edges: Vec::new(),
            config: FlowConfig::default(),
        }
    }

    /// Build from an existing edge list
    pub fn from_edges(node_count: usize, source: NodeId, sink: NodeId, edges: &[BoundedEdge]) -> Self {
        let mut network = Self::new(node_count, source, sink);
        network.edges.extend_from_slice(edges);
        network
    }

    /// Replace the configuration carrying the unbounded sentinel
    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, lower: Capacity, upper: Capacity) {
        self.edges.push(BoundedEdge::new(from, to, lower, upper));
    }

    pub fn edges(&self) -> &[BoundedEdge] {
        &self.edges
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Whether some flow with a nonnegative net `s -> t` value respects
    /// every edge's bounds
    pub fn is_feasible(&self) -> bool {
        self.circulation().is_some()
    }

    /// Per-edge flow values of one feasible flow, in edge order
    pub fn feasible_flow(&self) -> Option<Vec<Capacity>> {
        self.circulation().map(|circulation| circulation.edge_flows(&self.edges))
    }

    /// Largest net `s -> t` flow value respecting the bounds
    pub fn max_flow(&self) -> Option<Capacity> {
        self.circulation()
            .map(|circulation| circulation.into_max_flow(self.source, self.sink))
    }

    /// Smallest net `s -> t` flow value respecting the bounds
    pub fn min_flow(&self) -> Option<Capacity> {
        self.circulation()
            .map(|circulation| circulation.into_min_flow(self.source, self.sink))
    }

    /// Feasible assignment and both extreme values from a single
    /// `SS -> TT` run
    pub fn solve(&self) -> Option<BoundedSolution> {
        let circulation = self.circulation()?;
        let edge_flows = circulation.edge_flows(&self.edges);
        let max_flow = circulation.clone().into_max_flow(self.source, self.sink);
        let min_flow = circulation.into_min_flow(self.source, self.sink);

        Some(BoundedSolution {
            edge_flows,
            max_flow,
            min_flow,
        })
    }

    /// Build the auxiliary network, run `SS -> TT`, and keep it when every
    /// demand is met
    fn circulation(&self) -> Option<Circulation> {
        if let Some(edge) = self.edges.iter().find(|edge| edge.lower > edge.upper) {
            debug!(
                "Edge {} -> {} has lower bound {} above upper bound {}",
                edge.from, edge.to, edge.lower, edge.upper
            );
            return None;
        }

        let mut demand = vec![0 as Capacity; self.node_count];
        for edge in &self.edges {
            demand[edge.from] -= edge.lower;
            demand[edge.to] += edge.lower;
        }

        let supersource = self.node_count;
        let supersink = self.node_count + 1;
        let mut network = ResidualNetwork::new(self.node_count + 2);

        let slack_edges: Vec<Option<EdgeHandle>> = self
            .edges
            .iter()
            .map(|edge| (edge.slack() > 0).then(|| network.add_edge(edge.from, edge.to, edge.slack())))
            .collect();

        let mut total_positive_demand: Capacity = 0;
        for (node, &amount) in demand.iter().enumerate() {
            if amount > 0 {
                network.add_edge(supersource, node, amount);
                total_positive_demand += amount;
            } else if amount < 0 {
                network.add_edge(node, supersink, -amount);
            }
        }

        let total_upper: Capacity = self.edges.iter().map(|edge| edge.upper).sum();
        if !self.config.dominates(total_upper) {
            warn!(
                "Unbounded capacity {} does not exceed total upper bound {}",
                self.config.unbounded_capacity, total_upper
            );
        }
        let return_edge = network.add_edge(self.sink, self.source, self.config.unbounded_capacity);

        let served = network.isap(supersource, supersink);
        debug!(
            "Bounded feasibility: served {} of {} demand",
            served, total_positive_demand
        );

        (served == total_positive_demand).then_some(Circulation {
            network,
            slack_edges,
            return_edge,
        })
    }
}

/// Whether a flow from `source` to `sink` with a nonnegative net value
/// exists that respects every edge's lower and upper bound
pub fn has_feasible_flow(node_count: usize, source: NodeId, sink: NodeId, edges: &[BoundedEdge]) -> bool {
    BoundedFlowNetwork::from_edges(node_count, source, sink, edges).is_feasible()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(list: &[(NodeId, NodeId, Capacity, Capacity)]) -> Vec<BoundedEdge> {
        list.iter()
            .map(|&(from, to, lower, upper)| BoundedEdge::new(from, to, lower, upper))
            .collect()
    }

    fn assert_valid_assignment(network: &BoundedFlowNetwork, flows: &[Capacity]) {
        let mut balance = vec![0 as Capacity; network.node_count];
        for (edge, &flow) in network.edges().iter().zip(flows) {
            assert!(edge.lower <= flow && flow <= edge.upper, "{:?} carries {}", edge, flow);
            balance[edge.from] -= flow;
            balance[edge.to] += flow;
        }
        for (node, &excess) in balance.iter().enumerate() {
            if node != network.source && node != network.sink {
                assert_eq!(excess, 0, "node {} unbalanced", node);
            }
        }
    }

    #[test]
    fn test_feasible_instance() {
        let list = edges(&[(0, 1, 5, 10), (0, 2, 2, 8), (1, 3, 3, 6), (2, 3, 4, 9)]);
        assert!(has_feasible_flow(4, 0, 3, &list));
    }

    #[test]
    fn test_lower_above_upper() {
        let list = edges(&[(0, 1, 5, 3), (1, 2, 1, 4)]);
        assert!(!has_feasible_flow(3, 0, 2, &list));
    }

    #[test]
    fn test_inverted_bound_alone_makes_instance_infeasible() {
        // Edge 1 -> 2 with its lower bound taken as fixed flow would fit
        let list = edges(&[(0, 1, 5, 10), (0, 2, 2, 8), (1, 3, 3, 6), (2, 3, 4, 9), (1, 2, 5, 3)]);
        assert!(!has_feasible_flow(4, 0, 3, &list));

        let network = BoundedFlowNetwork::from_edges(4, 0, 3, &list);
        assert!(network.feasible_flow().is_none());
        assert!(network.max_flow().is_none());
        assert!(network.min_flow().is_none());
        assert!(network.solve().is_none());
    }

    #[test]
    fn test_only_negative_value_flows_are_infeasible() {
        let list = edges(&[(2, 2, 1, 3), (2, 0, 2, 3)]);
        assert!(!has_feasible_flow(3, 0, 2, &list));
    }

    #[test]
    fn test_solve_matches_separate_queries() {
        let list = edges(&[(0, 1, 5, 10), (0, 2, 2, 8), (1, 3, 3, 6), (2, 3, 4, 9)]);
        let network = BoundedFlowNetwork::from_edges(4, 0, 3, &list);
        let solution = network.solve().unwrap();

        assert_eq!(solution.max_flow, 14);
        assert_eq!(solution.min_flow, 9);
        assert_eq!(Some(solution.edge_flows.clone()), network.feasible_flow());
        assert_valid_assignment(&network, &solution.edge_flows);
    }

    #[test]
    fn test_insufficient_slack() {
        let list = edges(&[(0, 1, 6, 10), (0, 2, 4, 8), (1, 3, 1, 3), (2, 3, 2, 3)]);
        assert!(!has_feasible_flow(4, 0, 3, &list));
    }

    #[test]
    fn test_tight_feasible_instance() {
        let list = edges(&[(0, 1, 2, 5), (0, 2, 1, 3), (1, 3, 1, 3), (2, 3, 2, 4)]);
        assert!(has_feasible_flow(4, 0, 3, &list));
    }

    #[test]
    fn test_feasible_flow_respects_bounds() {
        let list = edges(&[(0, 1, 5, 10), (0, 2, 2, 8), (1, 3, 3, 6), (2, 3, 4, 9)]);
        let network = BoundedFlowNetwork::from_edges(4, 0, 3, &list);
        let flows = network.feasible_flow().unwrap();
        assert_eq!(flows.len(), 4);
        assert_valid_assignment(&network, &flows);
    }

    #[test]
    fn test_infeasible_has_no_assignment() {
        let list = edges(&[(0, 1, 6, 10), (0, 2, 4, 8), (1, 3, 1, 3), (2, 3, 2, 3)]);
        let network = BoundedFlowNetwork::from_edges(4, 0, 3, &list);
        assert!(network.feasible_flow().is_none());
        assert!(network.max_flow().is_none());
        assert!(network.min_flow().is_none());
    }

    #[test]
    fn test_max_and_min_flow() {
        let mut network = BoundedFlowNetwork::new(4, 0, 3);
        network.add_edge(0, 1, 5, 10);
        network.add_edge(0, 2, 2, 8);
        network.add_edge(1, 3, 3, 6);
        network.add_edge(2, 3, 4, 9);

        assert_eq!(network.max_flow(), Some(14));
        assert_eq!(network.min_flow(), Some(9));

        let mut tight = BoundedFlowNetwork::new(4, 0, 3);
        tight.add_edge(0, 1, 2, 5);
        tight.add_edge(0, 2, 1, 3);
        tight.add_edge(1, 3, 1, 3);
        tight.add_edge(2, 3, 2, 4);

        assert_eq!(tight.max_flow(), Some(6));
        assert_eq!(tight.min_flow(), Some(4));
    }

    #[test]
    fn test_min_flow_can_run_backwards() {
        // A bounded sink -> source edge lets the net value drop below zero
        let mut network = BoundedFlowNetwork::new(3, 0, 2);
        network.add_edge(0, 1, 1, 1);
        network.add_edge(1, 2, 1, 1);
        network.add_edge(2, 0, 0, 10);

        assert!(network.is_feasible());
        assert_eq!(network.max_flow(), Some(1));
        assert_eq!(network.min_flow(), Some(-9));
    }

    #[test]
    fn test_explicit_sentinel() {
        let list = edges(&[(0, 1, 5, 10), (0, 2, 2, 8), (1, 3, 3, 6), (2, 3, 4, 9)]);
        let total = list.iter().map(|edge| edge.upper).sum();
        let network =
            BoundedFlowNetwork::from_edges(4, 0, 3, &list).with_config(FlowConfig::sized_for(total));

        assert_eq!(network.config().unbounded_capacity, 34);
        assert_eq!(network.max_flow(), Some(14));
    }

    #[test]
    fn test_no_edges_is_feasible() {
        let network = BoundedFlowNetwork::new(2, 0, 1);
        assert!(network.is_feasible());
        assert_eq!(network.max_flow(), Some(0));
        assert_eq!(network.feasible_flow(), Some(Vec::new()));
    }
}
