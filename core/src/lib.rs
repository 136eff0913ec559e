//! GAPFLOW core
//!
//! Integer maximum flow with the Improved Shortest Augmenting Path
//! algorithm and gap heuristic, plus the reductions that consume it:
//! feasibility (and extreme flow values) under lower/upper edge bounds,
//! and maximum-weight closure.
//!
//! ```
//! use gapflow_core::ResidualNetwork;
//!
//! let mut network = ResidualNetwork::new(4);
//! network.add_edge(0, 1, 10);
//! network.add_edge(0, 2, 2);
//! network.add_edge(1, 2, 6);
//! network.add_edge(1, 3, 8);
//! network.add_edge(2, 3, 10);
//! assert_eq!(network.isap(0, 3), 12);
//! assert_eq!(network.isap(0, 3), 0);
//! ```
//!
//! All computation is single-threaded and deterministic for a fixed edge
//! insertion order. A network must not be shared across concurrent runs.

pub mod algorithm;
pub mod data_structures;
pub mod validation;

pub use crate::algorithm::{
    has_feasible_flow, max_weight_closure, BoundedEdge, BoundedFlowNetwork, BoundedInstance, BoundedSolution, Capacity,
    Closure, FlowConfig, FlowError, FlowInstance, Instance, IsapSolver, IsapStats, MaxFlowResult, NodeId,
};
pub use crate::data_structures::{EdgeHandle, ResidualNetwork};
