//! Core algorithm trait definitions for the flow engine
//!
//! This module establishes the shared vocabulary for algorithm
//! implementations: vertex identifiers, string-typed parameters with
//! validation, complexity descriptors and execution metrics.
//!
//! # Key Design Principles
//! - Parameters are exposed uniformly as strings and validated on assignment
//! - Metrics are collected by a lightweight profiler owned by each run
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::Debug;
use std::time::{Duration, Instant};
use serde::{Serialize, Deserialize};

/// Vertex identifier, an index in `[0, V)`
pub type NodeId = usize;

/// Algorithm parameter with strongly typed values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub description: String,
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Boolean,
}

/// Error types for algorithm configuration
#[derive(Debug, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl AlgorithmError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Parses a boolean parameter value
pub(crate) fn parse_bool_parameter(name: &str, value: &str) -> Result<bool, AlgorithmError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AlgorithmError::invalid_parameter(
            name,
            format!("expected `true` or `false`, got `{}`", value),
        )),
    }
}

/// Algorithm complexity information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
}

/// Algorithm execution metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmMetrics {
    /// Main-loop iterations that changed the solution
    pub steps_executed: usize,
    /// Search passes over the graph
    pub searches: usize,
    /// Vertices dequeued across all searches
    pub nodes_explored: usize,
    pub execution_time: Duration,
}

/// Main algorithm trait
///
/// # Invariants
/// - Deterministic behavior for given inputs
/// - Parameters round-trip through `set_parameter` / `get_parameter`
pub trait Algorithm: Debug + Send + Sync {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., max_flow)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description with complexity guarantees
    fn description(&self) -> String;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns supported parameters with their current values
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;
}

/// Performance profiling for a single algorithm run
#[derive(Debug)]
pub struct AlgorithmProfiler {
    metrics: AlgorithmMetrics,
    start_time: Option<Instant>,
}

impl AlgorithmProfiler {
    pub fn new() -> Self {
        Self {
            metrics: AlgorithmMetrics::default(),
            start_time: None,
        }
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.metrics.execution_time = start.elapsed();
        }
    }

    pub fn record_search(&mut self, nodes_explored: usize) {
        self.metrics.searches += 1;
        self.metrics.nodes_explored += nodes_explored;
    }

    pub fn record_step(&mut self) {
        self.metrics.steps_executed += 1;
    }

    pub fn get_metrics(&self) -> AlgorithmMetrics {
        self.metrics.clone()
    }
}

impl Default for AlgorithmProfiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_parameter_parsing() {
        assert!(parse_bool_parameter("verify_result", "true").unwrap());
        assert!(!parse_bool_parameter("verify_result", "false").unwrap());

        let err = parse_bool_parameter("verify_result", "maybe").unwrap_err();
        assert!(err.to_string().contains("verify_result"));
    }

    #[test]
    fn test_profiler_accumulates() {
        let mut profiler = AlgorithmProfiler::new();
        profiler.start();
        profiler.record_search(4);
        profiler.record_step();
        profiler.record_search(3);
        profiler.stop();

        let metrics = profiler.get_metrics();
        assert_eq!(metrics.searches, 2);
        assert_eq!(metrics.nodes_explored, 7);
        assert_eq!(metrics.steps_executed, 1);
    }
}
