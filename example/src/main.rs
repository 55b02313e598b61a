use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use evo_partition::{
    bipartition_ga, fill_graph_randomly, read_edgelist, Crossover, GeneticAlgorithmParameters,
    Graph, Selection, SoftwareEvaluator,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CrossoverKind {
    Uniform,
    SinglePoint,
    TwoPoint,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SelectionKind {
    Tournament,
    Roulette,
}

#[derive(Parser, Debug)]
#[command(name = "gaa")]
#[command(about = "Balanced graph bipartitioning with an island-model genetic algorithm")]
struct Args {
    /// Graph to partition, in .edgelist format
    graph: Option<PathBuf>,

    /// Generate a random connected graph with this many vertices instead
    #[arg(long, conflicts_with = "graph")]
    random: Option<usize>,

    /// Initial edge probability for --random
    #[arg(long, default_value_t = 0.05)]
    edge_probability: f32,

    /// JSON file with optimizer parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    population_size: Option<usize>,

    #[arg(long)]
    islands: Option<usize>,

    #[arg(long)]
    generations: Option<usize>,

    #[arg(long)]
    migration_period: Option<usize>,

    #[arg(long)]
    num_to_migrate: Option<usize>,

    #[arg(long)]
    diversity_period: Option<usize>,

    #[arg(long, value_enum)]
    crossover: Option<CrossoverKind>,

    /// Bit swap probability for uniform crossover, crossover probability otherwise
    #[arg(long)]
    crossover_probability: Option<f64>,

    #[arg(long)]
    mutation_probability: Option<f64>,

    #[arg(long, value_enum)]
    selection: Option<SelectionKind>,

    #[arg(long)]
    tournament_probability: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn parameters(&self) -> Result<GeneticAlgorithmParameters> {
        let mut params = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => GeneticAlgorithmParameters::default(),
        };

        macro_rules! overlay {
            ($($flag:ident => $field:ident),*) => {
                $(if let Some(value) = self.$flag {
                    params.$field = value;
                })*
            };
        }
        overlay!(
            population_size => population_size,
            islands => num_islands,
            generations => num_generations,
            migration_period => migration_period,
            num_to_migrate => num_to_migrate,
            diversity_period => diversity_period,
            mutation_probability => mutation_probability
        );

        let crossover_probability = self.crossover_probability
            .unwrap_or_else(|| params.crossover.probability());
        params.crossover = match self.crossover {
            Some(CrossoverKind::Uniform) => Crossover::Uniform { bit_swap_probability: crossover_probability },
            Some(CrossoverKind::SinglePoint) => Crossover::SinglePoint { probability: crossover_probability },
            Some(CrossoverKind::TwoPoint) => Crossover::TwoPoint { probability: crossover_probability },
            None => match params.crossover {
                Crossover::Uniform { .. } => Crossover::Uniform { bit_swap_probability: crossover_probability },
                Crossover::SinglePoint { .. } => Crossover::SinglePoint { probability: crossover_probability },
                Crossover::TwoPoint { .. } => Crossover::TwoPoint { probability: crossover_probability },
            },
        };

        let tournament_probability = match params.selection {
            Selection::Tournament { probability } => probability,
            Selection::RouletteWheel => 0.75,
        };
        let tournament_probability = self.tournament_probability.unwrap_or(tournament_probability);
        params.selection = match self.selection {
            Some(SelectionKind::Roulette) => Selection::RouletteWheel,
            Some(SelectionKind::Tournament) => Selection::Tournament { probability: tournament_probability },
            None => match params.selection {
                Selection::Tournament { .. } => Selection::Tournament { probability: tournament_probability },
                Selection::RouletteWheel => Selection::RouletteWheel,
            },
        };

        if self.seed.is_some() {
            params.random_seed = self.seed;
        }

        params.validate()?;
        Ok(params)
    }

    fn graph(&self) -> Result<Graph> {
        match (&self.graph, self.random) {
            (Some(path), _) => read_edgelist(path)
                .with_context(|| format!("loading graph {}", path.display())),
            (None, Some(vertices)) => {
                let mut graph = Graph::with_unit_nodes(vertices, vec![])?;
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let probability = fill_graph_randomly(&mut graph, self.edge_probability, &mut rng);
                tracing::info!(vertices, probability, edges = graph.edges(), "generated random graph");
                Ok(graph)
            }
            (None, None) => bail!("either a graph file or --random <VERTICES> is required"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let params = args.parameters()?;
    let graph = args.graph()?;

    println!("Number of nodes: {}", graph.vertices());
    println!("Number of edges: {}", graph.edges());
    println!("Graph density:   {:.4}", graph.density());
    println!("Starting GA for {} generations...", params.num_generations);

    let solution = bipartition_ga(&params, &graph, &SoftwareEvaluator, |info| {
        if let Some(diversity) = info.diversity {
            let values: Vec<String> = diversity.iter().map(|d| format!("{:.2}", d.raw())).collect();
            println!(
                "{} generations complete... best {} diversity on each island: {}",
                info.generation - 1,
                info.best_fitness,
                values.join(", "),
            );
        }
        false
    })?;

    println!("{} generations complete.", solution.generations);
    println!("Most fit individual was found on island {} (seed {}):", solution.island, solution.seed);
    println!("\tFitness = {}", solution.fitness);
    println!("\tNumber of nodes in partition 0: {}", solution.stats.nodes.0);
    println!("\t                             1: {}", solution.stats.nodes.1);
    println!("\tTotal external cost: {}", solution.stats.cut_cost);
    println!("\tBalance penalty: {}", solution.stats.balance_penalty);

    let t = &solution.timings;
    println!("Timing info:");
    println!("\tTotal elapsed time:           {:8.2} sec", t.total.as_secs_f64());
    for (name, phase) in &[
        ("initialization", t.initialization),
        ("breeding", t.breeding),
        ("diversity", t.diversity),
        ("migration", t.migration),
    ] {
        println!(
            "\tTime spent in {:<15} {:8.2} sec ({:4.1}%)",
            format!("{}:", name),
            phase.as_secs_f64(),
            t.percent(*phase),
        );
    }

    let ops = &t.operators;
    println!("Operator time summed over islands:");
    for (name, op) in &[
        ("selection", ops.selection),
        ("crossover", ops.crossover),
        ("mutation", ops.mutation),
        ("fitness", ops.fitness),
    ] {
        println!("\t{:<15} {:8.2} sec", format!("{}:", name), op.as_secs_f64());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(flags: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gaa").chain(flags.iter().copied())).unwrap()
    }

    fn config_file(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("gaa_{}_{}.json", std::process::id(), name));
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn defaults_without_config_or_flags() {
        let params = args(&["--random", "10"]).parameters().unwrap();
        assert_eq!(params, GeneticAlgorithmParameters::default());
    }

    #[test]
    fn flags_override_the_config_file() {
        let path = config_file(
            "override",
            r#"{"population_size": 20, "num_islands": 2,
                "crossover": {"kind": "single_point", "probability": 0.6},
                "selection": {"kind": "tournament", "probability": 0.9},
                "random_seed": 3}"#,
        );
        let config = path.to_string_lossy().into_owned();
        let params = args(&["--config", &config, "--islands", "5", "--seed", "8"])
            .parameters()
            .unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(params.population_size, 20);
        assert_eq!(params.num_islands, 5);
        assert_eq!(params.random_seed, Some(8));
        assert_eq!(params.crossover, Crossover::SinglePoint { probability: 0.6 });
        assert_eq!(params.selection, Selection::Tournament { probability: 0.9 });
    }

    #[test]
    fn crossover_flags_keep_what_they_do_not_name() {
        let path = config_file(
            "crossover",
            r#"{"crossover": {"kind": "two_point", "probability": 0.4}}"#,
        );
        let config = path.to_string_lossy().into_owned();

        let probability_only = args(&["--config", &config, "--crossover-probability", "0.8"])
            .parameters()
            .unwrap();
        assert_eq!(probability_only.crossover, Crossover::TwoPoint { probability: 0.8 });

        let kind_only = args(&["--config", &config, "--crossover", "uniform"])
            .parameters()
            .unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(kind_only.crossover, Crossover::Uniform { bit_swap_probability: 0.4 });
    }

    #[test]
    fn roulette_flag_replaces_tournament_and_back() {
        let roulette = args(&["--random", "10", "--selection", "roulette"]).parameters().unwrap();
        assert_eq!(roulette.selection, Selection::RouletteWheel);

        let path = config_file("roulette", r#"{"selection": {"kind": "roulette_wheel"}}"#);
        let config = path.to_string_lossy().into_owned();
        let tournament = args(&["--config", &config, "--selection", "tournament"])
            .parameters()
            .unwrap();
        let untouched = args(&["--config", &config, "--tournament-probability", "0.6"])
            .parameters()
            .unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(tournament.selection, Selection::Tournament { probability: 0.75 });
        assert_eq!(untouched.selection, Selection::RouletteWheel);
    }

    #[test]
    fn merged_parameters_are_validated() {
        let err = args(&["--random", "10", "--population-size", "7"]).parameters().unwrap_err();
        assert!(err.to_string().contains("even"));
    }
}
