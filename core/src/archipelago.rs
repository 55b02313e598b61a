use noisy_float::prelude::*;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::config::{GeneticAlgorithmParameters, MIN_POPULATION_SIZE};
use crate::diversity::diversity;
use crate::error::ConfigError;
use crate::fitness::FitnessEvaluator;
use crate::graph::Graph;
use crate::island::{Island, OperatorTimings};
use crate::population::Individual;
use crate::ranking::rank_by_fitness;

/// Fixed set of islands evolving in lock-step, with periodic migration of
/// each island's best individuals onto another island's worst slots.
pub struct Archipelago {
    islands: Vec<Island>,
    num_to_migrate: usize,
    migration_count: usize,
    rankings: Vec<Vec<usize>>,
}

impl Archipelago {
    /// Builds `num_islands` random islands. Each island's generator is seeded
    /// with one `u64` drawn from `rng`, in island order.
    pub fn new(
        params: &GeneticAlgorithmParameters,
        graph: &Graph,
        evaluator: &impl FitnessEvaluator,
        rng: &mut impl Rng,
    ) -> Result<Archipelago, ConfigError> {
        params.validate()?;

        let seeds: Vec<u64> = (0..params.num_islands).map(|_| rng.gen()).collect();
        let islands = seeds
            .into_iter()
            .enumerate()
            .map(|(index, seed)| Island::new(index, graph, params.population_size, evaluator, seed))
            .collect();

        Archipelago::from_islands(islands, params.num_to_migrate)
    }

    pub fn from_islands(islands: Vec<Island>, num_to_migrate: usize) -> Result<Archipelago, ConfigError> {
        let population_size = match islands.first() {
            Some(island) => island.population.len(),
            None => return Err(ConfigError::NoIslands),
        };

        for (position, island) in islands.iter().enumerate() {
            let size = island.population.len();
            if size != population_size {
                return Err(ConfigError::UnequalPopulations {
                    island: position,
                    expected: population_size,
                    actual: size,
                });
            }
            if size % 2 != 0 {
                return Err(ConfigError::OddPopulationSize(size));
            }
            if size < MIN_POPULATION_SIZE {
                return Err(ConfigError::PopulationTooSmall { min: MIN_POPULATION_SIZE, actual: size });
            }
            if num_to_migrate > size / 2 {
                return Err(ConfigError::TooManyMigrants { num_to_migrate, max: size / 2 });
            }
        }

        Ok(Archipelago {
            rankings: islands.iter().map(|_| Vec::with_capacity(population_size)).collect(),
            islands,
            num_to_migrate,
            migration_count: 1,
        })
    }

    #[inline]
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// Offset used by the next migration event.
    #[inline]
    pub fn migration_count(&self) -> usize {
        self.migration_count
    }

    /// Runs one generation on every island; returns once all have finished.
    pub fn evolve(
        &mut self,
        graph: &Graph,
        params: &GeneticAlgorithmParameters,
        evaluator: &impl FitnessEvaluator,
    ) {
        self.islands
            .par_iter_mut()
            .for_each(|island| island.evolve_one_generation(graph, params, evaluator));
    }

    /// Copies the best `num_to_migrate` individuals of island `i` over the
    /// worst ones of island `(i + offset) % islands`, for every island.
    #[instrument(level = "debug", skip(self), fields(offset = tracing::field::Empty))]
    pub fn migrate(&mut self) {
        let num_islands = self.islands.len();
        if self.migration_count % num_islands == 0 {
            self.migration_count = 1;
        }
        tracing::Span::current().record("offset", self.migration_count);

        // Every ranking is taken before the first copy.
        for (island, ranking) in self.islands.iter().zip(self.rankings.iter_mut()) {
            ranking.clear();
            ranking.extend(0..island.population.len());
            rank_by_fitness(&island.population, ranking);
        }

        for source in 0..num_islands {
            let target = (source + self.migration_count) % num_islands;
            let target_size = self.islands[target].population.len();

            for rank in 0..self.num_to_migrate {
                let migrant = self.islands[source].population[self.rankings[source][rank]].clone();
                let slot = self.rankings[target][target_size - 1 - rank];
                debug!(source, target, rank, fitness = migrant.fitness, "migrating individual");
                self.islands[target].population[slot] = migrant;
            }
        }

        self.migration_count += 1;
    }

    /// Diversity of every island, in island order.
    pub fn diversity(&self, node_count: usize) -> Vec<N64> {
        self.islands
            .par_iter()
            .map(|island| diversity(&island.population, node_count))
            .collect()
    }

    /// Fittest individual across all islands, the first in island then
    /// population order on ties.
    pub fn best(&self) -> (usize, &Individual) {
        let mut best = (0, &self.islands[0].population[0]);
        for (position, island) in self.islands.iter().enumerate() {
            if let Some(candidate) = island.best() {
                if candidate.fitness < best.1.fitness {
                    best = (position, candidate);
                }
            }
        }
        best
    }

    /// Operator time summed over every island.
    pub fn operator_timings(&self) -> OperatorTimings {
        let mut total = OperatorTimings::default();
        for island in &self.islands {
            total += island.timings;
        }
        total
    }

    pub fn mean_fitness(&self) -> f64 {
        let (total, count) = self.islands
            .iter()
            .flat_map(|island| island.population.iter())
            .fold((0u64, 0usize), |(total, count), i| (total + i.fitness, count + 1));
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }
}
