//! # Graph descriptions
//!
//! Reading flow problems from text. A description is a vertex count `V` and
//! an edge count `E` followed by `E` triples `u v capacity`, all
//! whitespace-separated integers. Several descriptions may follow each other
//! in one input; reading stops when no further `V E` header can be read.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::algorithm::traits::NodeId;
use crate::data_structures::flow_network::{Capacity, FlowError, FlowNetwork};

/// Errors produced while importing graph descriptions
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("token {position} (`{token}`) is not a valid {expected}")]
    Parse { position: usize, token: String, expected: &'static str },
    #[error("input ended while reading {expected}")]
    UnexpectedEof { expected: String },
}

/// A single `from -> to` edge with its capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Capacity,
}

/// A flow problem before it is turned into a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub vertex_count: usize,
    pub edges: Vec<EdgeSpec>,
}

impl GraphDescription {
    pub fn new(vertex_count: usize, edges: Vec<EdgeSpec>) -> Self {
        Self { vertex_count, edges }
    }

    /// Build the flow network, validating every edge.
    pub fn build_network(&self) -> Result<FlowNetwork, FlowError> {
        FlowNetwork::from_edges(
            self.vertex_count,
            self.edges.iter().map(|edge| (edge.from, edge.to, edge.capacity)),
        )
    }
}

/// Whitespace tokenizer that remembers token positions for error messages
struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self { inner: input.split_whitespace(), position: 0 }
    }

    fn next_token(&mut self) -> Option<(usize, &'a str)> {
        let token = self.inner.next()?;
        self.position += 1;
        Some((self.position, token))
    }

    fn parse<T: std::str::FromStr>(
        position: usize,
        token: &str,
        expected: &'static str,
    ) -> Result<T, ImportError> {
        token.parse().map_err(|_| ImportError::Parse {
            position,
            token: token.to_string(),
            expected,
        })
    }

    fn expect<T: std::str::FromStr>(
        &mut self,
        expected: &'static str,
        context: impl FnOnce() -> String,
    ) -> Result<T, ImportError> {
        match self.next_token() {
            Some((position, token)) => Self::parse(position, token, expected),
            None => Err(ImportError::UnexpectedEof { expected: context() }),
        }
    }
}

/// Parse every graph description in `input`.
///
/// An input that ends before a complete `V E` header ends the sequence
/// without error; a truncated edge list is an error.
pub fn parse_descriptions(input: &str) -> Result<Vec<GraphDescription>, ImportError> {
    let mut tokens = Tokens::new(input);
    let mut descriptions = Vec::new();

    loop {
        let Some((position, token)) = tokens.next_token() else {
            break;
        };
        let vertex_count: usize = Tokens::parse(position, token, "vertex count")?;

        let Some((position, token)) = tokens.next_token() else {
            break;
        };
        let edge_count: usize = Tokens::parse(position, token, "edge count")?;

        let graph = descriptions.len() + 1;
        let mut edges = Vec::with_capacity(edge_count.min(1 << 16));
        for index in 0..edge_count {
            let context = || format!("edge {} of {} in graph {}", index + 1, edge_count, graph);
            let from = tokens.expect("vertex index", context)?;
            let to = tokens.expect("vertex index", context)?;
            let capacity = tokens.expect("capacity", context)?;
            edges.push(EdgeSpec { from, to, capacity });
        }

        descriptions.push(GraphDescription::new(vertex_count, edges));
    }

    Ok(descriptions)
}

/// Read and parse every graph description in the file at `path`
pub fn read_descriptions(path: &Path) -> Result<Vec<GraphDescription>, ImportError> {
    let input = fs::read_to_string(path)?;
    parse_descriptions(&input)
}
