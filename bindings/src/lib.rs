//! C ABI over the bipartitioner. Every function returns 0 on success and
//! otherwise the position of the first argument that was rejected.

use evo_partition::{
    bipartition_ga, fill_graph_randomly, Edge, GeneticAlgorithmParameters, Graph, Node,
};
use rand::thread_rng;

/// Builds a graph from `number_of_vertices` node weights and
/// `number_of_edges` `(n1, n2, weight)` triples.
///
/// # Safety
/// `node_weights` must point to `number_of_vertices` values, `edges` to
/// `3 * number_of_edges` values and `instance` must be writable.
#[no_mangle]
pub unsafe extern "C" fn create_graph_instance(
    number_of_vertices: u32,
    node_weights: *const u32,
    number_of_edges: u32,
    edges: *const u32,
    instance: *mut *mut Graph,
) -> u32 {
    if number_of_vertices < 1 {
        return 1;
    }

    if node_weights.is_null() {
        return 2;
    }

    if number_of_edges > 0 && edges.is_null() {
        return 4;
    }

    if instance.is_null() {
        return 5;
    }

    let weights = std::slice::from_raw_parts(node_weights, number_of_vertices as usize);
    let nodes = weights
        .iter()
        .enumerate()
        .map(|(id, &weight)| Node { id, weight })
        .collect();

    let edges = if number_of_edges == 0 {
        Vec::new()
    } else {
        std::slice::from_raw_parts(edges, 3 * number_of_edges as usize)
            .chunks_exact(3)
            .map(|e| Edge { n1: e[0] as usize, n2: e[1] as usize, weight: e[2] })
            .collect()
    };

    let graph = match Graph::new(nodes, edges) {
        Ok(graph) => graph,
        Err(_) => return 4,
    };

    *instance = Box::into_raw(Box::new(graph));
    0
}

/// # Safety
/// `instance` must come from [`create_graph_instance`] and not be used again.
#[no_mangle]
pub unsafe extern "C" fn destroy_graph_instance(
    instance: *mut Graph,
) -> u32 {
    if instance.is_null() {
        return 1;
    }

    drop(Box::from_raw(instance));
    0
}

/// # Safety
/// `instance` must be a live graph and `density` writable.
#[no_mangle]
pub unsafe extern "C" fn get_graph_density(
    instance: *const Graph,
    density: *mut f32,
) -> u32 {
    if instance.is_null() {
        return 1;
    }

    if density.is_null() {
        return 2;
    }

    *density = (*instance).density();
    0
}

/// Replaces the graph's edges with a random connected set. `probability`
/// holds the initial edge probability and receives the one that succeeded.
///
/// # Safety
/// `instance` must be a live graph and `probability` readable and writable.
#[no_mangle]
pub unsafe extern "C" fn randomize_graph(
    instance: *mut Graph,
    probability: *mut f32,
) -> u32 {
    if instance.is_null() {
        return 1;
    }

    if probability.is_null() {
        return 2;
    }

    *probability = fill_graph_randomly(&mut *instance, *probability, &mut thread_rng());
    0
}

/// Runs the optimizer with default parameters apart from the ones given.
/// `callback` receives the generation number and best fitness after every
/// generation. `partition` (optional) receives one byte per vertex.
///
/// # Safety
/// `instance` must be a live graph, `fitness` writable and `partition`
/// either null or writable for as many bytes as the graph has vertices.
#[no_mangle]
pub unsafe extern "C" fn optimize_ga(
    instance: *const Graph,
    population_size: u32,
    number_of_islands: u32,
    mutation_probability: f32,
    crossover_probability: f32,
    iterations: u32,
    seed: u64,
    callback: Option<extern "C" fn(usize, u64)>,
    fitness: *mut u64,
    partition: *mut u8,
) -> u32 {
    if instance.is_null() {
        return 1;
    }

    if population_size == 0 || population_size % 2 != 0 {
        return 2;
    }

    if number_of_islands == 0 {
        return 3;
    }

    if !(0.0..=1.0).contains(&mutation_probability) {
        return 4;
    }

    if !(0.0..=1.0).contains(&crossover_probability) {
        return 5;
    }

    if iterations == 0 {
        return 6;
    }

    if fitness.is_null() {
        return 9;
    }

    let defaults = GeneticAlgorithmParameters::default();
    let params = GeneticAlgorithmParameters {
        population_size: population_size as usize,
        num_islands: number_of_islands as usize,
        num_generations: iterations as usize,
        num_to_migrate: defaults.num_to_migrate.min(population_size as usize / 2),
        mutation_probability: mutation_probability as f64,
        crossover: evo_partition::Crossover::Uniform {
            bit_swap_probability: crossover_probability as f64,
        },
        random_seed: Some(seed),
        ..defaults
    };

    let graph = &*instance;
    let result = bipartition_ga(&params, graph, &evo_partition::SoftwareEvaluator, |info| {
        if let Some(callback) = callback {
            callback(info.generation, info.best_fitness);
        }
        false
    });

    let solution = match result {
        Ok(solution) => solution,
        Err(_) => return 2,
    };

    *fitness = solution.fitness;
    if !partition.is_null() {
        let out = std::slice::from_raw_parts_mut(partition, graph.vertices());
        for (slot, gene) in out.iter_mut().zip(solution.chromosome.iter()) {
            *slot = gene as u8;
        }
    }
    0
}
