//! Error types for the bipartitioner.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid optimizer parameters, detected before any island is built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("population size must be an even number, got {0}")]
    OddPopulationSize(usize),

    #[error("population size must be at least {min}, got {actual}")]
    PopulationTooSmall { min: usize, actual: usize },

    #[error("cannot migrate {num_to_migrate} individuals, at most half of the population ({max}) may migrate")]
    TooManyMigrants { num_to_migrate: usize, max: usize },

    #[error("at least one island is required")]
    NoIslands,

    #[error("island {island} holds {actual} individuals, expected {expected} like island 0")]
    UnequalPopulations { island: usize, expected: usize, actual: usize },

    #[error("{0} must be at least 1")]
    ZeroPeriod(&'static str),

    #[error("{name} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
}

/// Malformed graph handed to the optimizer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph has no nodes")]
    NoNodes,

    #[error("node at position {position} has id {id}, node ids must be dense and ordered")]
    NodeIdOutOfOrder { position: usize, id: usize },

    #[error("edge {edge} references node {node}, but the graph has only {node_count} nodes")]
    EdgeOutOfRange { edge: usize, node: usize, node_count: usize },
}

/// Failure while reading a `.edgelist` graph description.
#[derive(Debug, Error)]
pub enum EdgeListError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported graph file {0}, expected an .edgelist file")]
    UnsupportedFormat(PathBuf),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("header declares {declared} {what}, but {found} were found")]
    CountMismatch { what: &'static str, declared: usize, found: usize },

    #[error("header declares {declared} nodes, at most {max} are supported")]
    TooManyNodes { declared: usize, max: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Failure talking to a fitness accelerator device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AcceleratorError {
    #[error("accelerator device is not available")]
    Unavailable,

    #[error("accelerator rejected inputs ({p1:#x}, {p2:#x})")]
    WriteFailed { p1: u32, p2: u32 },

    #[error("accelerator output could not be read")]
    ReadFailed,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    EdgeList(#[from] EdgeListError),

    #[error(transparent)]
    Accelerator(#[from] AcceleratorError),
}

pub type Result<T> = std::result::Result<T, Error>;
