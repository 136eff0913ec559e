//! Residual network with paired forward/reverse edges
//!
//! Each node owns its outgoing adjacency list. Adding an edge `u -> v`
//! appends a forward record to `u`'s list and a zero-capacity reverse
//! record to `v`'s list; each record stores the index of its partner in
//! the partner owner's list, so the pairing is positional and survives any
//! reallocation of the adjacency vectors.
//!
//! Flow is always mutated on both records of a pair together, which keeps
//! `flow(e) == -flow(rev(e))` without storing it explicitly.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Capacity, NodeId};

/// One record of an edge pair in the residual network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResidualEdge {
    /// Head of the edge
    to: NodeId,
    /// Capacity; zero for reverse records
    capacity: Capacity,
    /// Current flow; negative on reverse records carrying cancellable flow
    flow: Capacity,
    /// Position of the paired record in `to`'s adjacency list
    reverse: usize,
}

impl ResidualEdge {
    #[inline]
    pub fn to(&self) -> NodeId {
        self.to
    }

    #[inline]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    #[inline]
    pub fn flow(&self) -> Capacity {
        self.flow
    }

    /// Index of the paired record in the head's adjacency list
    #[inline]
    pub fn reverse(&self) -> usize {
        self.reverse
    }

    /// Remaining pushable capacity
    #[inline]
    pub fn residual(&self) -> Capacity {
        self.capacity - self.flow
    }
}

/// Stable reference to the forward record of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeHandle {
    /// Tail node owning the record
    pub node: NodeId,
    /// Position in the tail's adjacency list
    pub index: usize,
}

/// Residual network over nodes `0..n`
///
/// Serializable for reports only. Networks are built through `add_edge`,
/// which is what keeps the positional pairing consistent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResidualNetwork {
    adjacency: Vec<Vec<ResidualEdge>>,
}

impl ResidualNetwork {
    /// Create an edgeless network with `node_count` nodes
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edge records, forward and reverse
    pub fn record_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Add edge `from -> to` with capacity `capacity` together with its
    /// zero-capacity reverse record.
    ///
    /// Parallel edges and self-loops are allowed. Node indices must be in
    /// range and the capacity nonnegative; neither is checked in release
    /// builds.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: Capacity) -> EdgeHandle {
        debug_assert!(capacity >= 0, "negative capacity {} on {} -> {}", capacity, from, to);

        let forward_index = self.adjacency[from].len();
        // A self-loop's reverse record lands right after the forward one
        let reverse_index = if from == to {
            forward_index + 1
        } else {
            self.adjacency[to].len()
        };

        self.adjacency[from].push(ResidualEdge {
            to,
            capacity,
            flow: 0,
            reverse: reverse_index,
        });
        self.adjacency[to].push(ResidualEdge {
            to: from,
            capacity: 0,
            flow: 0,
            reverse: forward_index,
        });

        EdgeHandle {
            node: from,
            index: forward_index,
        }
    }

    /// Outgoing records of `node`, in insertion order
    #[inline]
    pub fn edges_from(&self, node: NodeId) -> &[ResidualEdge] {
        &self.adjacency[node]
    }

    #[inline]
    pub fn edge(&self, handle: EdgeHandle) -> &ResidualEdge {
        &self.adjacency[handle.node][handle.index]
    }

    /// Residual capacity of the record at `index` in `node`'s list
    #[inline]
    pub fn residual(&self, node: NodeId, index: usize) -> Capacity {
        self.adjacency[node][index].residual()
    }

    /// Push `amount` along the record at `index` in `node`'s list and
    /// cancel the same amount on its pair.
    #[inline]
    pub fn push(&mut self, node: NodeId, index: usize, amount: Capacity) {
        let (to, reverse) = {
            let edge = &mut self.adjacency[node][index];
            edge.flow += amount;
            (edge.to, edge.reverse)
        };
        self.adjacency[to][reverse].flow -= amount;
    }

    /// Remove an edge pair from play by zeroing capacity and flow on both
    /// records. Positions are kept so other handles stay valid.
    pub fn disable_edge(&mut self, handle: EdgeHandle) {
        let (to, reverse) = {
            let edge = &mut self.adjacency[handle.node][handle.index];
            edge.capacity = 0;
            edge.flow = 0;
            (edge.to, edge.reverse)
        };
        let pair = &mut self.adjacency[to][reverse];
        pair.capacity = 0;
        pair.flow = 0;
    }

    /// Iterate `(tail, record)` over every record with positive capacity,
    /// i.e. the edges of the original network
    pub fn forward_edges(&self) -> impl Iterator<Item = (NodeId, &ResidualEdge)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(node, edges)| edges.iter().map(move |edge| (node, edge)))
            .filter(|(_, edge)| edge.capacity > 0)
    }

    /// Nodes reachable from `source` through records with positive residual
    /// capacity. After a completed max-flow run this is the source side of
    /// a minimum cut.
    pub fn source_side(&self, source: NodeId) -> Vec<bool> {
        let mut reached = vec![false; self.node_count()];
        let mut queue = VecDeque::new();
        reached[source] = true;
        queue.push_back(source);

        while let Some(node) = queue.pop_front() {
            for edge in &self.adjacency[node] {
                if edge.residual() > 0 && !reached[edge.to] {
                    reached[edge.to] = true;
                    queue.push_back(edge.to);
                }
            }
        }

        reached
    }

    /// Total capacity of the original edges leaving `side`
    pub fn cut_capacity(&self, side: &[bool]) -> Capacity {
        self.forward_edges()
            .filter(|(tail, edge)| side[*tail] && !side[edge.to])
            .map(|(_, edge)| edge.capacity)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_pairs_records() {
        let mut network = ResidualNetwork::new(3);
        let first = network.add_edge(0, 1, 10);
        let second = network.add_edge(1, 2, 5);

        assert_eq!(network.node_count(), 3);
        assert_eq!(network.record_count(), 4);
        assert_eq!(first, EdgeHandle { node: 0, index: 0 });
        assert_eq!(second, EdgeHandle { node: 1, index: 1 });

        let forward = network.edge(first);
        assert_eq!(forward.to(), 1);
        assert_eq!(forward.capacity(), 10);
        assert_eq!(forward.flow(), 0);

        let reverse = &network.edges_from(1)[forward.reverse()];
        assert_eq!(reverse.to(), 0);
        assert_eq!(reverse.capacity(), 0);
        assert_eq!(reverse.reverse(), first.index);
    }

    #[test]
    fn test_push_keeps_pair_antisymmetric() {
        let mut network = ResidualNetwork::new(2);
        let handle = network.add_edge(0, 1, 7);
        network.push(handle.node, handle.index, 4);

        let forward = network.edge(handle);
        let reverse = &network.edges_from(1)[forward.reverse()];
        assert_eq!(forward.flow(), 4);
        assert_eq!(forward.residual(), 3);
        assert_eq!(reverse.flow(), -4);
        assert_eq!(reverse.residual(), 4);
    }

    #[test]
    fn test_parallel_edges_and_self_loop() {
        let mut network = ResidualNetwork::new(2);
        network.add_edge(0, 1, 3);
        network.add_edge(0, 1, 4);
        let looped = network.add_edge(1, 1, 2);

        assert_eq!(network.edges_from(0).len(), 2);
        let reverse_index = network.edge(looped).reverse();
        assert_eq!(network.edge(looped).to(), 1);
        let reverse = &network.edges_from(1)[reverse_index];
        assert_eq!(reverse.capacity(), 0);
        assert_eq!(reverse.reverse(), looped.index);

        network.push(1, looped.index, 2);
        assert_eq!(network.edge(looped).flow(), 2);
        assert_eq!(network.edges_from(1)[reverse_index].flow(), -2);
    }

    #[test]
    fn test_serializes_paired_records() {
        let mut network = ResidualNetwork::new(2);
        let handle = network.add_edge(0, 1, 3);
        network.push(handle.node, handle.index, 2);

        let value = serde_json::to_value(&network).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "adjacency": [
                    [{"to": 1, "capacity": 3, "flow": 2, "reverse": 0}],
                    [{"to": 0, "capacity": 0, "flow": -2, "reverse": 0}]
                ]
            })
        );
    }

    #[test]
    fn test_disable_edge() {
        let mut network = ResidualNetwork::new(2);
        let handle = network.add_edge(0, 1, 9);
        network.push(0, handle.index, 5);
        network.disable_edge(handle);

        assert_eq!(network.edge(handle).capacity(), 0);
        assert_eq!(network.edge(handle).flow(), 0);
        assert_eq!(network.edges_from(1)[0].residual(), 0);
        assert_eq!(network.forward_edges().count(), 0);
    }

    #[test]
    fn test_source_side_and_cut() {
        let mut network = ResidualNetwork::new(3);
        let a = network.add_edge(0, 1, 4);
        network.add_edge(1, 2, 2);
        network.push(a.node, a.index, 4);

        let side = network.source_side(0);
        assert_eq!(side, vec![true, false, false]);
        assert_eq!(network.cut_capacity(&side), 4);
    }
}
