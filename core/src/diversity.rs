use noisy_float::prelude::*;

use crate::population::Individual;

/// Mean normalised Hamming distance over all ordered pairs of distinct
/// individuals. Only observed, never fed back into evolution.
pub fn diversity(population: &[Individual], node_count: usize) -> N64 {
    let size = population.len();
    if size < 2 || node_count == 0 {
        return n64(0.0);
    }

    let mut total = 0usize;
    for (i, a) in population.iter().enumerate() {
        for b in &population[i + 1..] {
            total += a.chromosome.hamming_distance(&b.chromosome);
        }
    }

    // Each unordered pair stands for two ordered ones.
    let pairs = (size * (size - 1)) as f64;
    n64(2.0 * total as f64 / node_count as f64 / pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Chromosome;

    fn individual(ch: Chromosome) -> Individual {
        Individual { chromosome: ch, fitness: 0 }
    }

    #[test]
    fn identical_population_has_no_diversity() {
        let ch = Chromosome::with_length(10);
        let population = vec![individual(ch.clone()), individual(ch.clone()), individual(ch)];
        assert_eq!(diversity(&population, 10), n64(0.0));
    }

    #[test]
    fn complementary_pair_is_fully_diverse() {
        let ch = Chromosome::with_length(10);
        let population = vec![individual(ch.complement()), individual(ch)];
        assert_eq!(diversity(&population, 10), n64(1.0));
    }

    #[test]
    fn averages_over_ordered_pairs() {
        let zeros = Chromosome::with_length(4);
        let ones = zeros.complement();
        let population = vec![
            individual(zeros.clone()),
            individual(zeros),
            individual(ones),
        ];
        // Four of the six ordered pairs differ in every locus.
        let expected = 4.0 / 6.0;
        assert!((diversity(&population, 4).raw() - expected).abs() < 1e-12);
    }

    #[test]
    fn lone_individual_reports_zero() {
        let population = vec![individual(Chromosome::with_length(3))];
        assert_eq!(diversity(&population, 3), n64(0.0));
    }
}
