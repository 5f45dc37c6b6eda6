//! Flow network with residual-edge bookkeeping
//!
//! Edges live in a single growable arena and are always created in pairs:
//! the forward edge at an even index `2k` and its zero-capacity reverse at
//! `2k + 1`. Each vertex keeps an ordered list of the arena indices of the
//! edges leaving it, so parallel edges between the same ordered pair stay
//! independent.
//!
//! The reverse edge carries the negated flow of its partner. Its residual
//! capacity `0 - flow` therefore equals the flow already pushed forward,
//! which is what lets a later augmenting path cancel earlier flow.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Serialize, Deserialize};

use crate::algorithm::traits::NodeId;
use crate::validation::correctness::FlowViolation;

/// Flow capacity type
pub type Capacity = i64;

/// Flow value type; negative on reverse edges
pub type Flow = i64;

/// Index of an edge in the network's edge arena
pub type EdgeId = usize;

/// Flow network errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),
    #[error("Flow verification failed: {0}")]
    VerificationFailed(#[from] FlowViolation),
}

/// Flow edge representation with residual capacity tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Source vertex
    pub from: NodeId,
    /// Target vertex
    pub to: NodeId,
    /// Original edge capacity, zero for reverse edges
    pub capacity: Capacity,
    /// Current flow through edge
    pub flow: Flow,
    /// Arena index of the paired edge
    pub reverse_edge_index: EdgeId,
}

impl FlowEdge {
    fn new(from: NodeId, to: NodeId, capacity: Capacity, reverse_edge_index: EdgeId) -> Self {
        Self {
            from,
            to,
            capacity,
            flow: 0,
            reverse_edge_index,
        }
    }

    /// Get residual capacity for forward direction
    #[inline]
    pub fn residual_capacity(&self) -> Capacity {
        self.capacity - self.flow
    }
}

/// Flow network representation with residual graph
///
/// Networks are only built through [`FlowNetwork::new`] and
/// [`FlowNetwork::add_edge`] (or a validated
/// [`GraphDescription`](crate::io::GraphDescription)); serialized networks
/// are output only and cannot be read back:
///
/// ```compile_fail
/// let net: maxflow_core::FlowNetwork =
///     serde_json::from_str(r#"{"vertex_count":2,"adjacency":[[0],[1]],"edges":[]}"#).unwrap();
/// ```
///
/// Flow changes only through the solver:
///
/// ```compile_fail
/// let mut net = maxflow_core::FlowNetwork::from_edges(2, vec![(0, 1, 3)]).unwrap();
/// net.push_flow(0, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowNetwork {
    /// Number of vertices in network
    vertex_count: usize,
    /// Adjacency list of edge indices per vertex
    adjacency: Vec<Vec<EdgeId>>,
    /// All edges in the network, forward/reverse pairs
    edges: Vec<FlowEdge>,
}

impl FlowNetwork {
    /// Create a network with `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> Result<Self, FlowError> {
        if vertex_count == 0 {
            return Err(FlowError::InvalidArgument(
                "vertex count must be positive".to_string(),
            ));
        }

        Ok(Self {
            vertex_count,
            adjacency: vec![Vec::new(); vertex_count],
            edges: Vec::new(),
        })
    }

    /// Build a network from `(from, to, capacity)` triples.
    ///
    /// Fails on the first invalid triple; no network is produced in that case.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self, FlowError>
    where
        I: IntoIterator<Item = (NodeId, NodeId, Capacity)>,
    {
        let mut network = Self::new(vertex_count)?;
        for (from, to, capacity) in edges {
            network.add_edge(from, to, capacity)?;
        }
        Ok(network)
    }

    /// Add edge `from -> to` together with its zero-capacity reverse.
    ///
    /// Returns the arena index of the forward edge. On error the network is
    /// left unchanged.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        capacity: Capacity,
    ) -> Result<EdgeId, FlowError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if capacity < 0 {
            return Err(FlowError::InvalidArgument(format!(
                "capacity of edge {} -> {} is negative: {}",
                from, to, capacity
            )));
        }

        self.edges
            .try_reserve(2)
            .and_then(|_| self.adjacency[from].try_reserve(1))
            .and_then(|_| self.adjacency[to].try_reserve(1))
            .map_err(|e| FlowError::ResourceExhausted(format!("edge storage: {}", e)))?;

        let forward_edge_index = self.edges.len();
        let reverse_edge_index = forward_edge_index + 1;

        self.edges
            .push(FlowEdge::new(from, to, capacity, reverse_edge_index));
        self.edges
            .push(FlowEdge::new(to, from, 0, forward_edge_index));

        self.adjacency[from].push(forward_edge_index);
        self.adjacency[to].push(reverse_edge_index);

        Ok(forward_edge_index)
    }

    /// Fails with `InvalidArgument` unless `vertex < vertex_count`
    pub fn check_vertex(&self, vertex: NodeId) -> Result<(), FlowError> {
        if vertex < self.vertex_count {
            Ok(())
        } else {
            Err(FlowError::InvalidArgument(format!(
                "vertex {} out of range for network with {} vertices",
                vertex, self.vertex_count
            )))
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges added by the caller (reverse edges not counted)
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Panics if `id` is not an edge of this network
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &FlowEdge {
        &self.edges[id]
    }

    /// All edges, forward and reverse, in arena order
    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    /// Caller-added edges with their arena indices
    pub fn forward_edges(&self) -> impl Iterator<Item = (EdgeId, &FlowEdge)> + '_ {
        self.edges.iter().enumerate().step_by(2)
    }

    #[inline]
    pub fn is_forward(id: EdgeId) -> bool {
        id % 2 == 0
    }

    /// Edge indices leaving `vertex`, in insertion order
    #[inline]
    pub fn adjacent(&self, vertex: NodeId) -> &[EdgeId] {
        &self.adjacency[vertex]
    }

    #[inline]
    pub fn flow(&self, id: EdgeId) -> Flow {
        self.edges[id].flow
    }

    #[inline]
    pub fn residual_capacity(&self, id: EdgeId) -> Capacity {
        self.edges[id].residual_capacity()
    }

    /// Push `delta` units along `id` and pull the same amount back along its
    /// reverse edge. Callers keep `delta` within the residual capacity.
    pub(crate) fn push_flow(&mut self, id: EdgeId, delta: Flow) {
        debug_assert!(delta <= self.residual_capacity(id), "push exceeds residual capacity");

        let reverse_index = self.edges[id].reverse_edge_index;
        self.edges[id].flow += delta;
        self.edges[reverse_index].flow -= delta;
    }

    /// Zero the flow on every edge
    pub fn reset_flow(&mut self) {
        for edge in &mut self.edges {
            edge.flow = 0;
        }
    }

    /// Forward flow leaving `vertex` minus forward flow entering it
    pub fn net_outflow(&self, vertex: NodeId) -> Flow {
        self.forward_edges()
            .map(|(_, edge)| {
                let mut net = 0;
                if edge.from == vertex {
                    net += edge.flow;
                }
                if edge.to == vertex {
                    net -= edge.flow;
                }
                net
            })
            .sum()
    }

    /// Vertices reachable from `source` over edges with positive residual
    /// capacity
    pub fn residual_reachable(&self, source: NodeId) -> Result<Vec<bool>, FlowError> {
        self.check_vertex(source)?;
        Ok(self.reachable_from(source))
    }

    /// `residual_reachable` for a source already known to be in range
    pub(crate) fn reachable_from(&self, source: NodeId) -> Vec<bool> {
        let mut visited = vec![false; self.vertex_count];
        let mut stack = vec![source];
        visited[source] = true;

        while let Some(vertex) = stack.pop() {
            for &edge_index in &self.adjacency[vertex] {
                let edge = &self.edges[edge_index];
                if !visited[edge.to] && edge.residual_capacity() > 0 {
                    visited[edge.to] = true;
                    stack.push(edge.to);
                }
            }
        }

        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_network_creation() {
        let mut network = FlowNetwork::new(4).unwrap();
        network.add_edge(0, 1, 10).unwrap();
        network.add_edge(1, 2, 5).unwrap();
        network.add_edge(2, 3, 8).unwrap();

        assert_eq!(network.vertex_count(), 4);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.edges().len(), 6); // 3 forward + 3 reverse edges
    }

    #[test]
    fn test_zero_vertices_rejected() {
        assert!(matches!(FlowNetwork::new(0), Err(FlowError::InvalidArgument(_))));
    }

    #[test]
    fn test_reverse_edge_linkage() {
        let mut network = FlowNetwork::new(2).unwrap();
        let forward = network.add_edge(0, 1, 7).unwrap();

        let edge = network.edge(forward);
        assert_eq!((edge.from, edge.to, edge.capacity, edge.flow), (0, 1, 7, 0));

        let reverse = network.edge(edge.reverse_edge_index);
        assert_eq!((reverse.from, reverse.to, reverse.capacity), (1, 0, 0));
        assert_eq!(reverse.reverse_edge_index, forward);

        assert_eq!(network.adjacent(0), &[forward]);
        assert_eq!(network.adjacent(1), &[edge.reverse_edge_index]);
    }

    #[test]
    fn test_invalid_edges_leave_network_unchanged() {
        let mut network = FlowNetwork::new(3).unwrap();
        network.add_edge(0, 1, 4).unwrap();
        let before = network.clone();

        assert!(matches!(network.add_edge(0, 3, 1), Err(FlowError::InvalidArgument(_))));
        assert!(matches!(network.add_edge(5, 1, 1), Err(FlowError::InvalidArgument(_))));
        assert!(matches!(network.add_edge(1, 2, -1), Err(FlowError::InvalidArgument(_))));
        assert_eq!(network, before);
    }

    #[test]
    fn test_from_edges_fails_fast() {
        let result = FlowNetwork::from_edges(3, vec![(0, 1, 1), (1, 9, 1), (1, 2, 1)]);
        assert!(matches!(result, Err(FlowError::InvalidArgument(_))));
    }

    #[test]
    fn test_multi_edges_are_independent() {
        let mut network = FlowNetwork::new(2).unwrap();
        let first = network.add_edge(0, 1, 3).unwrap();
        let second = network.add_edge(0, 1, 4).unwrap();

        assert_ne!(first, second);
        assert_eq!(network.edge_count(), 2);
        assert_eq!(network.adjacent(0), &[first, second]);
        assert_eq!(network.edge(first).capacity, 3);
        assert_eq!(network.edge(second).capacity, 4);
    }

    #[test]
    fn test_self_loop_permitted() {
        let mut network = FlowNetwork::new(1).unwrap();
        let edge = network.add_edge(0, 0, 2).unwrap();
        assert_eq!(network.adjacent(0).len(), 2);
        assert_eq!(network.edge(edge).to, 0);
    }

    #[test]
    fn test_push_flow_updates_residuals() {
        let mut network = FlowNetwork::new(2).unwrap();
        let forward = network.add_edge(0, 1, 10).unwrap();
        let reverse = network.edge(forward).reverse_edge_index;

        network.push_flow(forward, 4);
        assert_eq!(network.flow(forward), 4);
        assert_eq!(network.flow(reverse), -4);
        assert_eq!(network.residual_capacity(forward), 6);
        assert_eq!(network.residual_capacity(reverse), 4);

        // Cancelling along the reverse edge restores the forward residual
        network.push_flow(reverse, 3);
        assert_eq!(network.flow(forward), 1);
        assert_eq!(network.residual_capacity(forward), 9);
        assert_eq!(network.residual_capacity(reverse), 1);

        network.reset_flow();
        assert!(network.edges().iter().all(|e| e.flow == 0));
    }

    #[test]
    fn test_net_outflow_and_reachability() {
        let mut network = FlowNetwork::from_edges(3, vec![(0, 1, 5), (1, 2, 5)]).unwrap();
        network.push_flow(0, 5);
        network.push_flow(2, 3);

        assert_eq!(network.net_outflow(0), 5);
        assert_eq!(network.net_outflow(1), -2);
        assert_eq!(network.net_outflow(2), -3);

        let reachable = network.residual_reachable(0).unwrap();
        assert_eq!(reachable, vec![true, false, false]);
    }

    #[test]
    fn test_reachability_rejects_unknown_source() {
        let network = FlowNetwork::from_edges(3, vec![(0, 1, 5)]).unwrap();
        assert!(matches!(network.residual_reachable(3), Err(FlowError::InvalidArgument(_))));
        assert!(matches!(network.residual_reachable(usize::MAX), Err(FlowError::InvalidArgument(_))));
    }

    #[test]
    fn test_serialized_network_keeps_structure() {
        let network = FlowNetwork::from_edges(2, vec![(0, 1, 3)]).unwrap();
        let json = serde_json::to_value(&network).unwrap();

        assert_eq!(json["vertex_count"], 2);
        assert_eq!(json["edges"][0]["capacity"], 3);
        assert_eq!(json["edges"][1]["reverse_edge_index"], 0);
    }

    #[test]
    fn test_solver_flows_stay_within_capacity() {
        let mut network =
            FlowNetwork::from_edges(4, vec![(0, 1, 3), (1, 3, 10), (0, 2, 10), (2, 3, 1)]).unwrap();
        let value = crate::MaxFlowSolver::new().max_flow(&mut network, 0, 3).unwrap();

        assert_eq!(value, 4);
        assert!(crate::validation::check_capacity(&network).is_ok());
        for (_, edge) in network.forward_edges() {
            assert!(0 <= edge.flow && edge.flow <= edge.capacity);
        }
    }
}
