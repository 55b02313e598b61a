use rand::Rng;
use rayon::prelude::*;

use crate::chromosome::Chromosome;
use crate::fitness::FitnessEvaluator;
use crate::graph::Graph;

/// Candidate partition with its cached fitness.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Individual {
    pub chromosome: Chromosome,
    pub fitness: u64,
}

impl Individual {
    pub fn evaluated(
        chromosome: Chromosome,
        graph: &Graph,
        evaluator: &impl FitnessEvaluator,
    ) -> Individual {
        let fitness = evaluator.evaluate(graph, &chromosome);
        Individual { chromosome, fitness }
    }
}

pub type Population = Vec<Individual>;

/// Random genomes for `population_size` individuals, scored in parallel.
pub fn initial_population(
    graph: &Graph,
    population_size: usize,
    evaluator: &impl FitnessEvaluator,
    rng: &mut impl Rng,
) -> Population {
    let mut population: Population = (0..population_size)
        .map(|_| Individual {
            chromosome: Chromosome::random(graph.vertices(), rng),
            fitness: 0,
        })
        .collect();

    population.par_iter_mut().for_each(|individual| {
        individual.fitness = evaluator.evaluate(graph, &individual.chromosome);
    });

    population
}

/// Index of the fittest individual, the first one on ties.
pub fn best_index(population: &[Individual]) -> Option<usize> {
    population
        .iter()
        .enumerate()
        .min_by_key(|(i, individual)| (individual.fitness, *i))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::{fitness, SoftwareEvaluator};
    use crate::graph::Edge;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn initial_population_is_scored() {
        let edges = vec![Edge { n1: 0, n2: 1, weight: 2 }, Edge { n1: 1, n2: 2, weight: 5 }];
        let graph = Graph::with_unit_nodes(3, edges).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let population = initial_population(&graph, 8, &SoftwareEvaluator, &mut rng);

        assert_eq!(population.len(), 8);
        for individual in &population {
            assert_eq!(individual.chromosome.len(), 3);
            assert_eq!(individual.fitness, fitness(&graph, &individual.chromosome));
        }
    }

    #[test]
    fn best_index_prefers_first_on_ties() {
        let ch = Chromosome::with_length(1);
        let population: Population = [4, 2, 2, 7]
            .iter()
            .map(|&fitness| Individual { chromosome: ch.clone(), fitness })
            .collect();
        assert_eq!(best_index(&population), Some(1));
    }
}
