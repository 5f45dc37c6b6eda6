//! Parallel Batch Solving
//!
//! Independent flow problems share no mutable state, so a batch of graph
//! descriptions is solved on the rayon thread pool with one network per
//! description. Each individual solve stays single-threaded; results come
//! back in input order.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{info, warn};
use rayon::prelude::*;
use serde::{Serialize, Serializer, Deserialize};

use crate::algorithm::graph::max_flow::{MaxFlowResult, MaxFlowSolver};
use crate::algorithm::traits::NodeId;
use crate::data_structures::flow_network::{Flow, FlowError, FlowNetwork};
use crate::io::GraphDescription;

/// Source and sink selection for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Terminals {
    /// Vertex 0 to vertex `V - 1`
    #[default]
    FirstLast,
    /// Fixed vertices for every graph
    Explicit { source: NodeId, sink: NodeId },
}

impl Terminals {
    /// Resolve the terminals for a graph with `vertex_count` vertices
    pub fn resolve(self, vertex_count: usize) -> (NodeId, NodeId) {
        match self {
            Terminals::FirstLast => (0, vertex_count.saturating_sub(1)),
            Terminals::Explicit { source, sink } => (source, sink),
        }
    }
}

/// Outcome of solving one description of a batch
#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    /// Position of the description in the batch
    pub index: usize,
    pub vertex_count: usize,
    pub edge_count: usize,
    /// Solver result, or the error that stopped the graph from being solved
    #[serde(serialize_with = "serialize_outcome")]
    pub outcome: Result<MaxFlowResult, FlowError>,
    /// Final network with per-edge flows
    #[serde(skip)]
    pub network: Option<FlowNetwork>,
}

impl GraphReport {
    pub fn max_flow(&self) -> Option<Flow> {
        self.outcome.as_ref().ok().map(|result| result.max_flow)
    }
}

/// Serializes as `{"Ok": result}` or `{"Err": "<error message>"}`
fn serialize_outcome<S>(outcome: &Result<MaxFlowResult, FlowError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match outcome {
        Ok(result) => serializer.serialize_newtype_variant("Outcome", 0, "Ok", result),
        Err(e) => serializer.serialize_newtype_variant("Outcome", 1, "Err", &e.to_string()),
    }
}

fn solve_one(
    solver: &MaxFlowSolver,
    index: usize,
    description: &GraphDescription,
    terminals: Terminals,
) -> GraphReport {
    let (source, sink) = terminals.resolve(description.vertex_count);

    let solved = description.build_network().and_then(|mut network| {
        let result = solver.solve(&mut network, source, sink)?;
        Ok::<_, FlowError>((result, network))
    });

    let (outcome, network) = match solved {
        Ok((result, network)) => (Ok(result), Some(network)),
        Err(e) => {
            warn!("graph {}: {}", index + 1, e);
            (Err(e), None)
        }
    };

    GraphReport {
        index,
        vertex_count: description.vertex_count,
        edge_count: description.edges.len(),
        outcome,
        network,
    }
}

/// Solve every description in parallel, returning reports in input order
pub fn solve_all(
    solver: &MaxFlowSolver,
    descriptions: &[GraphDescription],
    terminals: Terminals,
) -> Vec<GraphReport> {
    let reports: Vec<GraphReport> = descriptions
        .par_iter()
        .enumerate()
        .map(|(index, description)| solve_one(solver, index, description, terminals))
        .collect();

    let failed = reports.iter().filter(|report| report.outcome.is_err()).count();
    info!("solved {} graphs ({} failed)", reports.len(), failed);

    reports
}
