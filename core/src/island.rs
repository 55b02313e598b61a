use std::ops::AddAssign;
use std::time::{Duration, Instant};

use rand::{SeedableRng, rngs::StdRng};

use crate::config::GeneticAlgorithmParameters;
use crate::fitness::FitnessEvaluator;
use crate::graph::Graph;
use crate::mutation::bit_flip_mutation;
use crate::population::{best_index, initial_population, Individual, Population};

/// Time an island spent in each genetic operator, summed over generations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OperatorTimings {
    pub selection: Duration,
    pub crossover: Duration,
    pub mutation: Duration,
    pub fitness: Duration,
}

impl OperatorTimings {
    pub fn total(&self) -> Duration {
        self.selection + self.crossover + self.mutation + self.fitness
    }
}

impl AddAssign for OperatorTimings {
    fn add_assign(&mut self, other: OperatorTimings) {
        self.selection += other.selection;
        self.crossover += other.crossover;
        self.mutation += other.mutation;
        self.fitness += other.fitness;
    }
}

/// Independently evolving sub-population with its own random stream.
pub struct Island {
    pub index: usize,
    pub population: Population,
    pub generation: usize,
    pub timings: OperatorTimings,
    rng: StdRng,
}

impl Island {
    pub fn new(
        index: usize,
        graph: &Graph,
        population_size: usize,
        evaluator: &impl FitnessEvaluator,
        seed: u64,
    ) -> Island {
        let mut rng = StdRng::seed_from_u64(seed);
        let population = initial_population(graph, population_size, evaluator, &mut rng);
        Island {
            index,
            population,
            generation: 0,
            timings: OperatorTimings::default(),
            rng,
        }
    }

    pub fn with_population(index: usize, population: Population, seed: u64) -> Island {
        Island {
            index,
            population,
            generation: 0,
            timings: OperatorTimings::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Select, cross, mutate and evaluate children two at a time, then
    /// replace the whole population with them.
    pub fn evolve_one_generation(
        &mut self,
        graph: &Graph,
        params: &GeneticAlgorithmParameters,
        evaluator: &impl FitnessEvaluator,
    ) {
        let size = self.population.len();
        debug_assert!(size % 2 == 0, "population size must be even");

        let fitness: Vec<u64> = self.population.iter().map(|i| i.fitness).collect();
        let selector = params.selection.selector(&fitness);

        let mut offspring = Vec::with_capacity(size);
        while offspring.len() < size {
            let start = Instant::now();
            let (p1, p2) = selector.select_parents(&mut self.rng);
            let selected = Instant::now();

            let (mut ch1, mut ch2) = params.crossover.crossover(
                &self.population[p1].chromosome,
                &self.population[p2].chromosome,
                &mut self.rng,
            );
            let crossed = Instant::now();

            bit_flip_mutation(&mut ch1, params.mutation_probability, &mut self.rng);
            bit_flip_mutation(&mut ch2, params.mutation_probability, &mut self.rng);
            let mutated = Instant::now();

            offspring.push(Individual::evaluated(ch1, graph, evaluator));
            offspring.push(Individual::evaluated(ch2, graph, evaluator));

            self.timings.selection += selected - start;
            self.timings.crossover += crossed - selected;
            self.timings.mutation += mutated - crossed;
            self.timings.fitness += mutated.elapsed();
        }

        self.population = offspring;
        self.generation += 1;
    }

    pub fn best(&self) -> Option<&Individual> {
        best_index(&self.population).map(|i| &self.population[i])
    }
}
