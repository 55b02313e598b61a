use std::time::{Duration, Instant};

use noisy_float::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, instrument, trace};

use crate::archipelago::Archipelago;
use crate::chromosome::Chromosome;
use crate::config::GeneticAlgorithmParameters;
use crate::error::Result;
use crate::fitness::{FitnessEvaluator, PartitionStats};
use crate::graph::Graph;
use crate::island::OperatorTimings;

/// Snapshot handed to the progress callback after every generation.
#[derive(Debug)]
pub struct GenerationInfo<'a> {
    /// Generations completed so far, counting this one.
    pub generation: usize,
    pub best_fitness: u64,
    pub best_island: usize,
    pub mean_fitness: f64,
    /// Per-island diversity, present on diversity report generations.
    pub diversity: Option<&'a [N64]>,
    pub migrated: bool,
}

/// Wall-clock time spent in each phase of a run.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhaseTimings {
    pub initialization: Duration,
    pub breeding: Duration,
    pub diversity: Duration,
    pub migration: Duration,
    pub total: Duration,
    /// Per-operator time summed across islands, so it may exceed `breeding`
    /// when islands run in parallel.
    pub operators: OperatorTimings,
}

impl PhaseTimings {
    /// Share of the total spent in `phase`, in percent.
    pub fn percent(&self, phase: Duration) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        phase.as_secs_f64() / self.total.as_secs_f64() * 100.0
    }
}

/// Best partition found by a run.
#[derive(Clone, Debug)]
pub struct Solution {
    pub island: usize,
    pub fitness: u64,
    pub stats: PartitionStats,
    pub chromosome: Chromosome,
    pub generations: usize,
    pub seed: u64,
    pub timings: PhaseTimings,
}

fn timed<T>(slot: &mut Duration, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let value = f();
    *slot += start.elapsed();
    value
}

/// Runs the island-model GA on `graph`.
///
/// `callback` sees every completed generation and may return `true` to stop
/// the run early. Generation `g > 0` first reports diversity when
/// `g % diversity_period == 0`, then migrates when `g % migration_period == 0`,
/// then breeds every island.
#[instrument(level = "info", skip_all, fields(vertices = graph.vertices(), edges = graph.edges()))]
pub fn bipartition_ga(
    params: &GeneticAlgorithmParameters,
    graph: &Graph,
    evaluator: &impl FitnessEvaluator,
    mut callback: impl FnMut(&GenerationInfo) -> bool,
) -> Result<Solution> {
    params.validate()?;

    let seed = params.random_seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(
        seed,
        islands = params.num_islands,
        population_size = params.population_size,
        generations = params.num_generations,
        "starting genetic algorithm"
    );

    let started = Instant::now();
    let mut timings = PhaseTimings::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut archipelago = timed(&mut timings.initialization, || {
        Archipelago::new(params, graph, evaluator, &mut rng)
    })?;

    let mut generations = 0;
    for generation in 0..params.num_generations {
        let diversity = if generation > 0 && generation % params.diversity_period == 0 {
            let diversity = timed(&mut timings.diversity, || archipelago.diversity(graph.vertices()));
            debug!(generation, ?diversity, "diversity report");
            Some(diversity)
        } else {
            None
        };

        let migrated = generation > 0 && generation % params.migration_period == 0;
        if migrated {
            timed(&mut timings.migration, || archipelago.migrate());
        }

        timed(&mut timings.breeding, || archipelago.evolve(graph, params, evaluator));
        generations = generation + 1;

        let (best_island, best) = archipelago.best();
        let info = GenerationInfo {
            generation: generations,
            best_fitness: best.fitness,
            best_island,
            mean_fitness: archipelago.mean_fitness(),
            diversity: diversity.as_deref(),
            migrated,
        };
        trace!(generation = info.generation, best = info.best_fitness, mean = info.mean_fitness);

        if callback(&info) {
            debug!(generation = generations, "stopped by callback");
            break;
        }
    }

    let (island, best) = archipelago.best();
    timings.operators = archipelago.operator_timings();
    timings.total = started.elapsed();
    info!(fitness = best.fitness, island, generations, "genetic algorithm finished");

    Ok(Solution {
        island,
        fitness: best.fitness,
        stats: PartitionStats::of(graph, &best.chromosome),
        chromosome: best.chromosome.clone(),
        generations,
        seed,
        timings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use crate::fitness::SoftwareEvaluator;
    use crate::graph::Edge;

    fn path(n: usize) -> Graph {
        let edges = (1..n).map(|i| Edge { n1: i - 1, n2: i, weight: 1 }).collect();
        Graph::with_unit_nodes(n, edges).unwrap()
    }

    fn params() -> GeneticAlgorithmParameters {
        GeneticAlgorithmParameters {
            population_size: 10,
            num_islands: 3,
            num_generations: 12,
            migration_period: 4,
            num_to_migrate: 2,
            diversity_period: 5,
            random_seed: Some(17),
            ..Default::default()
        }
    }

    #[test]
    fn reports_every_generation() {
        let graph = path(12);
        let mut seen = Vec::new();
        let solution = bipartition_ga(&params(), &graph, &SoftwareEvaluator, |info| {
            seen.push((info.generation, info.migrated, info.diversity.map(|d| d.len())));
            false
        }).unwrap();

        assert_eq!(solution.generations, 12);
        assert_eq!(seen.len(), 12);
        assert_eq!(seen[0], (1, false, None));
        assert_eq!(seen[4], (5, true, None));
        assert_eq!(seen[5], (6, false, Some(3)));
        assert_eq!(seen[8], (9, true, None));
        assert_eq!(seen[10], (11, false, Some(3)));
    }

    #[test]
    fn callback_can_stop_the_run() {
        let graph = path(6);
        let solution = bipartition_ga(&params(), &graph, &SoftwareEvaluator, |info| {
            info.generation == 3
        }).unwrap();
        assert_eq!(solution.generations, 3);
    }

    #[test]
    fn solution_stats_agree_with_fitness() {
        let graph = path(9);
        let solution = bipartition_ga(&params(), &graph, &SoftwareEvaluator, |_| false).unwrap();
        assert_eq!(solution.stats.fitness(), solution.fitness);
        assert_eq!(solution.stats.nodes.0 + solution.stats.nodes.1, 9);
        assert_eq!(solution.seed, 17);
    }

    #[test]
    fn operator_timings_cover_every_island() {
        let graph = path(10);
        let solution = bipartition_ga(&params(), &graph, &SoftwareEvaluator, |_| false).unwrap();
        let operators = solution.timings.operators;
        assert!(operators.fitness > Duration::ZERO);
        assert!(operators.total() >= operators.fitness);
        assert!(solution.timings.total >= solution.timings.breeding);
    }

    #[test]
    fn invalid_parameters_fail_before_running() {
        let graph = path(4);
        let params = GeneticAlgorithmParameters { population_size: 7, ..params() };
        let mut called = false;
        let result = bipartition_ga(&params, &graph, &SoftwareEvaluator, |_| {
            called = true;
            false
        });
        assert!(matches!(result, Err(Error::Config(ConfigError::OddPopulationSize(7)))));
        assert!(!called);
    }
}
