//! Maximum flow engine
//!
//! Computes maximum flows in directed networks with non-negative integer
//! capacities by repeated breadth-first shortest augmenting paths
//! (Edmonds-Karp). After a solve the network's per-edge flows hold a valid
//! maximum flow, from which a minimum cut or a path decomposition can be
//! read.
//!
//! ```
//! use maxflow_core::{FlowNetwork, MaxFlowSolver};
//!
//! let mut network = FlowNetwork::from_edges(
//!     4,
//!     vec![(0, 1, 1000), (0, 2, 1000), (1, 3, 1000), (2, 3, 1000)],
//! ).unwrap();
//! let value = MaxFlowSolver::new().max_flow(&mut network, 0, 3).unwrap();
//! assert_eq!(value, 2000);
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod io;
pub mod optimization;
pub mod validation;

pub use crate::algorithm::graph::max_flow::{
    decompose_flow, min_cut, MaxFlowResult, MaxFlowSolver, MinCut, SolverConfig,
};
pub use crate::algorithm::traits::{Algorithm, AlgorithmError, NodeId};
pub use crate::data_structures::flow_network::{Capacity, EdgeId, Flow, FlowEdge, FlowError, FlowNetwork};
pub use crate::io::{GraphDescription, ImportError};
pub use crate::optimization::parallel::{solve_all, GraphReport, Terminals};
