use crate::population::Individual;

/// Runs of at most this many indices are insertion sorted.
pub const INSERTION_SORT_THRESHOLD: usize = 7;

/// Fresh ranking of `population`, fittest first.
pub fn ranking(population: &[Individual]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..population.len()).collect();
    rank_by_fitness(population, &mut indices);
    indices
}

/// Stable sort of `indices` by ascending fitness of the individuals they
/// point at; equal fitness keeps the incoming index order.
pub fn rank_by_fitness(population: &[Individual], indices: &mut [usize]) {
    let mut scratch = Vec::with_capacity(indices.len());
    merge_sort(population, indices, &mut scratch);
}

fn merge_sort(population: &[Individual], indices: &mut [usize], scratch: &mut Vec<usize>) {
    if indices.len() <= INSERTION_SORT_THRESHOLD {
        insertion_sort(population, indices);
        return;
    }

    let mid = indices.len() / 2;
    let (left, right) = indices.split_at_mut(mid);
    merge_sort(population, left, scratch);
    merge_sort(population, right, scratch);
    merge(population, indices, mid, scratch);
}

fn merge(population: &[Individual], indices: &mut [usize], mid: usize, scratch: &mut Vec<usize>) {
    scratch.clear();
    scratch.extend_from_slice(indices);
    let (left, right) = scratch.split_at(mid);

    let (mut i, mut j) = (0, 0);
    for slot in indices.iter_mut() {
        // `<=` keeps the left run first on ties.
        let take_left = j == right.len()
            || (i < left.len() && population[left[i]].fitness <= population[right[j]].fitness);
        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}

fn insertion_sort(population: &[Individual], indices: &mut [usize]) {
    for i in 1..indices.len() {
        let current = indices[i];
        let key = population[current].fitness;
        let mut j = i;
        while j > 0 && population[indices[j - 1]].fitness > key {
            indices[j] = indices[j - 1];
            j -= 1;
        }
        indices[j] = current;
    }
}
