//! Flow Correctness Verification
//!
//! Checks a computed flow against the defining properties of a maximum
//! flow: capacity respect, skew symmetry of reverse edges, conservation at
//! inner vertices, agreement of the reported value with the source's net
//! outflow, and optimality through the max-flow/min-cut theorem.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::algorithm::traits::NodeId;
use crate::data_structures::flow_network::{Capacity, EdgeId, Flow, FlowNetwork};

/// A broken flow invariant
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FlowViolation {
    #[error("terminal {vertex} out of range for network with {vertex_count} vertices")]
    TerminalOutOfRange { vertex: NodeId, vertex_count: usize },

    #[error("edge {edge} carries {flow} outside [0, {capacity}]")]
    CapacityExceeded { edge: EdgeId, flow: Flow, capacity: Capacity },

    #[error("reverse of edge {edge} carries {reverse_flow}, expected {expected}")]
    ReverseMismatch { edge: EdgeId, reverse_flow: Flow, expected: Flow },

    #[error("vertex {vertex} has net outflow {net_outflow}")]
    ConservationBroken { vertex: NodeId, net_outflow: Flow },

    #[error("reported flow {reported} differs from source outflow {actual}")]
    ValueMismatch { reported: Flow, actual: Flow },

    #[error("sink still reachable in the residual graph")]
    AugmentingPathRemains,

    #[error("cut capacity {cut_capacity} differs from flow value {flow}")]
    CutMismatch { cut_capacity: Capacity, flow: Flow },
}

/// `0 <= flow <= capacity` on forward edges and `flow(reverse) == -flow`
pub fn check_capacity(network: &FlowNetwork) -> Result<(), FlowViolation> {
    for (index, edge) in network.forward_edges() {
        if edge.flow < 0 || edge.flow > edge.capacity {
            return Err(FlowViolation::CapacityExceeded {
                edge: index,
                flow: edge.flow,
                capacity: edge.capacity,
            });
        }

        let reverse_flow = network.flow(edge.reverse_edge_index);
        if reverse_flow != -edge.flow {
            return Err(FlowViolation::ReverseMismatch {
                edge: index,
                reverse_flow,
                expected: -edge.flow,
            });
        }
    }
    Ok(())
}

/// Inflow equals outflow at every vertex other than the terminals
pub fn check_conservation(network: &FlowNetwork, source: NodeId, sink: NodeId) -> Result<(), FlowViolation> {
    let mut net_outflow = vec![0 as Flow; network.vertex_count()];
    for (_, edge) in network.forward_edges() {
        net_outflow[edge.from] += edge.flow;
        net_outflow[edge.to] -= edge.flow;
    }

    match net_outflow
        .iter()
        .enumerate()
        .find(|&(vertex, &net)| vertex != source && vertex != sink && net != 0)
    {
        Some((vertex, &net)) => Err(FlowViolation::ConservationBroken {
            vertex,
            net_outflow: net,
        }),
        None => Ok(()),
    }
}

/// Full maximum-flow certificate for `value` from `source` to `sink`
pub fn verify_max_flow(
    network: &FlowNetwork,
    source: NodeId,
    sink: NodeId,
    value: Flow,
) -> Result<(), FlowViolation> {
    for vertex in [source, sink] {
        if vertex >= network.vertex_count() {
            return Err(FlowViolation::TerminalOutOfRange {
                vertex,
                vertex_count: network.vertex_count(),
            });
        }
    }

    check_capacity(network)?;
    check_conservation(network, source, sink)?;

    let actual = network.net_outflow(source);
    if actual != value {
        return Err(FlowViolation::ValueMismatch { reported: value, actual });
    }

    let reachable = network.reachable_from(source);
    if reachable[sink] {
        return Err(FlowViolation::AugmentingPathRemains);
    }

    let cut_capacity: Capacity = network
        .forward_edges()
        .filter(|(_, edge)| reachable[edge.from] && !reachable[edge.to])
        .map(|(_, edge)| edge.capacity)
        .sum();
    if cut_capacity != value {
        return Err(FlowViolation::CutMismatch { cut_capacity, flow: value });
    }

    Ok(())
}
