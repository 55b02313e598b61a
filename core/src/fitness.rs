use crate::chromosome::{Chromosome, Gene};
use crate::graph::Graph;

/// Scores a partition; lower is better.
pub trait FitnessEvaluator: Send + Sync {
    fn evaluate(&self, graph: &Graph, chromosome: &Chromosome) -> u64;
}

impl<F> FitnessEvaluator for F
    where
        F: Fn(&Graph, &Chromosome) -> u64 + Send + Sync
{
    #[inline]
    fn evaluate(&self, graph: &Graph, chromosome: &Chromosome) -> u64 {
        self(graph, chromosome)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwareEvaluator;

impl FitnessEvaluator for SoftwareEvaluator {
    #[inline]
    fn evaluate(&self, graph: &Graph, chromosome: &Chromosome) -> u64 {
        fitness(graph, chromosome)
    }
}

/// Cut cost plus balance penalty of `chromosome` on `graph`.
pub fn fitness(graph: &Graph, chromosome: &Chromosome) -> u64 {
    cut_cost(graph, chromosome) + balance_penalty(graph, chromosome)
}

pub fn cut_cost(graph: &Graph, chromosome: &Chromosome) -> u64 {
    graph.iter_cut(chromosome)
        .map(|e| e.weight as u64)
        .sum()
}

pub fn balance_penalty(graph: &Graph, chromosome: &Chromosome) -> u64 {
    let (w0, w1) = partition_weights(graph, chromosome);
    w0.abs_diff(w1)
}

fn partition_weights(graph: &Graph, chromosome: &Chromosome) -> (u64, u64) {
    graph.nodes()
        .iter()
        .fold((0, 0), |(w0, w1), node| match chromosome.get(node.id) {
            Gene::Zero => (w0 + node.weight as u64, w1),
            Gene::One => (w0, w1 + node.weight as u64),
        })
}

/// Breakdown of a partition, as reported for the final solution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PartitionStats {
    pub nodes: (usize, usize),
    pub weights: (u64, u64),
    pub cut_cost: u64,
    pub balance_penalty: u64,
}

impl PartitionStats {
    pub fn of(graph: &Graph, chromosome: &Chromosome) -> PartitionStats {
        let weights = partition_weights(graph, chromosome);
        PartitionStats {
            nodes: chromosome.count_genes_by_value(),
            weights,
            cut_cost: cut_cost(graph, chromosome),
            balance_penalty: weights.0.abs_diff(weights.1),
        }
    }

    #[inline]
    pub fn fitness(&self) -> u64 {
        self.cut_cost + self.balance_penalty
    }
}
