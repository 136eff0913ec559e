//! Shared vocabulary for the flow algorithms
//!
//! Numeric aliases used throughout the engine, the error type for the
//! checked entry points, and the configuration that carries the
//! "effectively unbounded" capacity sentinel.
//!
//! The engine itself never returns errors: out-of-range nodes and negative
//! capacities are caller preconditions. `FlowError` only covers surfaces
//! that validate their input before handing it to the engine (instances,
//! loaders).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Node identifier, an index in `[0, n)`
pub type NodeId = usize;

/// Capacity and flow values. Signed so that reverse edges can carry
/// negative flow.
pub type Capacity = i64;

/// Distance label of a node (shortest residual distance to the sink)
pub type Level = usize;

/// Conventional sentinel for "effectively unbounded" capacity
pub const DEFAULT_UNBOUNDED_CAPACITY: Capacity = 1_000_000_000;

/// Errors raised by the checked entry points
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Node {node} out of range for network of {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    #[error("Negative capacity {capacity} on edge {from} -> {to}")]
    NegativeCapacity {
        from: NodeId,
        to: NodeId,
        capacity: Capacity,
    },

    #[error("Source and sink are the same node: {0}")]
    SourceEqualsSink(NodeId),

    #[error("Failed to read instance: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse instance: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration shared by the reductions built on top of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Capacity standing in for "unbounded". Must dominate any feasible
    /// flow value of the instance, and stay far enough from
    /// `Capacity::MAX` that adding real capacities to it cannot overflow.
    pub unbounded_capacity: Capacity,
}

impl FlowConfig {
    /// Create a configuration with an explicit sentinel
    pub fn new(unbounded_capacity: Capacity) -> Self {
        Self { unbounded_capacity }
    }

    /// Sentinel sized to strictly exceed `total`, the aggregate of all real
    /// capacities of an instance
    pub fn sized_for(total: Capacity) -> Self {
        Self {
            unbounded_capacity: total.saturating_add(1).max(1),
        }
    }

    /// Whether the sentinel dominates `total`
    pub fn dominates(&self, total: Capacity) -> bool {
        self.unbounded_capacity > total
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            unbounded_capacity: DEFAULT_UNBOUNDED_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sentinel() {
        let config = FlowConfig::default();
        assert_eq!(config.unbounded_capacity, 1_000_000_000);
        assert!(config.dominates(999_999_999));
        assert!(!config.dominates(1_000_000_000));
    }

    #[test]
    fn test_sized_for() {
        assert_eq!(FlowConfig::sized_for(41).unbounded_capacity, 42);
        assert_eq!(FlowConfig::sized_for(0).unbounded_capacity, 1);
        assert_eq!(
            FlowConfig::sized_for(Capacity::MAX).unbounded_capacity,
            Capacity::MAX
        );
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: FlowConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, FlowConfig::default());

        let config: FlowConfig = serde_json::from_str(r#"{"unbounded_capacity": 77}"#).unwrap();
        assert_eq!(config.unbounded_capacity, 77);
    }

    #[test]
    fn test_error_display() {
        let err = FlowError::NodeOutOfRange { node: 7, node_count: 4 };
        assert_eq!(err.to_string(), "Node 7 out of range for network of 4 nodes");

        let err = FlowError::SourceEqualsSink(2);
        assert_eq!(err.to_string(), "Source and sink are the same node: 2");
    }
}
