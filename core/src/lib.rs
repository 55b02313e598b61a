//! Island-model genetic algorithm for balanced graph bipartitioning.

pub mod accelerator;
pub mod archipelago;
mod chromosome;
pub mod config;
pub mod crossover;
pub mod diversity;
pub mod edgelist;
pub mod error;
pub mod fitness;
mod genetic_algorithm;
mod graph;
pub mod island;
pub mod mutation;
pub mod population;
pub mod ranking;
pub mod selection;

pub use crate::archipelago::Archipelago;
pub use crate::chromosome::{Chromosome, Gene, WORD_BITS};
pub use crate::config::GeneticAlgorithmParameters;
pub use crate::crossover::Crossover;
pub use crate::diversity::diversity;
pub use crate::edgelist::{parse_edgelist, read_edgelist};
pub use crate::error::{ConfigError, EdgeListError, Error, GraphError, Result};
pub use crate::fitness::{fitness, FitnessEvaluator, PartitionStats, SoftwareEvaluator};
pub use crate::genetic_algorithm::{bipartition_ga, GenerationInfo, PhaseTimings, Solution};
pub use crate::graph::{Edge, Graph, Node, fill_graph_randomly, is_connected};
pub use crate::island::OperatorTimings;
pub use crate::population::Individual;
pub use crate::selection::Selection;
