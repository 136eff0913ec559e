//! Serializable problem instances
//!
//! Checked wrappers around the engine's unchecked construction API: an
//! instance is validated once (node ranges, capacity signs, distinct
//! terminals) before any network is built from it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::bounded_flow::{BoundedEdge, BoundedFlowNetwork};
use crate::algorithm::graph::max_flow::{IsapSolver, MaxFlowResult};
use crate::algorithm::traits::{Capacity, FlowConfig, FlowError, NodeId};
use crate::data_structures::residual::ResidualNetwork;

/// Plain maximum flow instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowInstance {
    pub node_count: usize,
    pub source: NodeId,
    pub sink: NodeId,
    /// `(from, to, capacity)` triples
    pub edges: Vec<(NodeId, NodeId, Capacity)>,
}

/// Feasibility instance with lower and upper bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedInstance {
    pub node_count: usize,
    pub source: NodeId,
    pub sink: NodeId,
    pub edges: Vec<BoundedEdge>,
    #[serde(default)]
    pub config: FlowConfig,
}

/// Either kind of instance, tagged by `"kind"` in JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instance {
    MaxFlow(FlowInstance),
    Bounded(BoundedInstance),
}

fn check_node(node: NodeId, node_count: usize) -> Result<(), FlowError> {
    if node < node_count {
        Ok(())
    } else {
        Err(FlowError::NodeOutOfRange { node, node_count })
    }
}

fn check_terminals(source: NodeId, sink: NodeId, node_count: usize) -> Result<(), FlowError> {
    check_node(source, node_count)?;
    check_node(sink, node_count)?;
    if source == sink {
        return Err(FlowError::SourceEqualsSink(source));
    }
    Ok(())
}

impl FlowInstance {
    pub fn validate(&self) -> Result<(), FlowError> {
        check_terminals(self.source, self.sink, self.node_count)?;
        for &(from, to, capacity) in &self.edges {
            check_node(from, self.node_count)?;
            check_node(to, self.node_count)?;
            if capacity < 0 {
                return Err(FlowError::NegativeCapacity { from, to, capacity });
            }
        }
        Ok(())
    }

    /// Residual network holding the instance's edges in order
    pub fn build_network(&self) -> Result<ResidualNetwork, FlowError> {
        self.validate()?;
        let mut network = ResidualNetwork::new(self.node_count);
        for &(from, to, capacity) in &self.edges {
            network.add_edge(from, to, capacity);
        }
        Ok(network)
    }

    pub fn solve(&self) -> Result<MaxFlowResult, FlowError> {
        let mut network = self.build_network()?;
        Ok(IsapSolver::new().solve_with_cut(&mut network, self.source, self.sink))
    }
}

impl BoundedInstance {
    /// Bound ordering is not checked here: `lower > upper` is an
    /// infeasible instance, not a malformed one
    pub fn validate(&self) -> Result<(), FlowError> {
        check_terminals(self.source, self.sink, self.node_count)?;
        for edge in &self.edges {
            check_node(edge.from, self.node_count)?;
            check_node(edge.to, self.node_count)?;
            if edge.lower < 0 {
                return Err(FlowError::NegativeCapacity {
                    from: edge.from,
                    to: edge.to,
                    capacity: edge.lower,
                });
            }
        }
        Ok(())
    }

    pub fn build_network(&self) -> Result<BoundedFlowNetwork, FlowError> {
        self.validate()?;
        Ok(BoundedFlowNetwork::from_edges(self.node_count, self.source, self.sink, &self.edges)
            .with_config(self.config))
    }
}

impl Instance {
    pub fn from_json_str(text: &str) -> Result<Self, FlowError> {
        let instance: Self = serde_json::from_str(text)?;
        instance.validate()?;
        Ok(instance)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FlowError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), FlowError> {
        match self {
            Instance::MaxFlow(instance) => instance.validate(),
            Instance::Bounded(instance) => instance.validate(),
        }
    }
}
