//! Graph algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;

pub use self::max_flow::{
    augment, decompose_flow, find_augmenting_path, min_cut, AugmentingPath, FlowPath,
    MaxFlowResult, MaxFlowSolver, MinCut, ParentMap, SolverConfig,
};
