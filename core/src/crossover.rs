use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chromosome::Chromosome;

/// Recombination strategy, chosen once per run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Crossover {
    /// Parameterized uniform crossover: every locus swaps its source with
    /// `bit_swap_probability`. No whole-chromosome gate.
    Uniform { bit_swap_probability: f64 },
    /// With `probability`, exchange the tail starting at a random point.
    SinglePoint { probability: f64 },
    /// With `probability`, exchange the loci strictly between two random
    /// points.
    TwoPoint { probability: f64 },
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::Uniform { bit_swap_probability: 0.5 }
    }
}

impl Crossover {
    pub fn probability(&self) -> f64 {
        match *self {
            Crossover::Uniform { bit_swap_probability } => bit_swap_probability,
            Crossover::SinglePoint { probability } | Crossover::TwoPoint { probability } => probability,
        }
    }

    pub fn crossover(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut impl Rng,
    ) -> (Chromosome, Chromosome) {
        match *self {
            Crossover::Uniform { bit_swap_probability } => {
                uniform_crossover(parent1, parent2, bit_swap_probability, rng)
            }
            Crossover::SinglePoint { probability } => {
                onepoint_crossover(parent1, parent2, probability, rng)
            }
            Crossover::TwoPoint { probability } => {
                twopoint_crossover(parent1, parent2, probability, rng)
            }
        }
    }
}

pub fn uniform_crossover(
    parent1: &Chromosome,
    parent2: &Chromosome,
    bit_swap_probability: f64,
    rng: &mut impl Rng,
) -> (Chromosome, Chromosome) {
    let mut ch1 = parent1.clone();
    let mut ch2 = parent2.clone();
    for locus in 0..parent1.len() {
        if rng.gen::<f64>() < bit_swap_probability {
            swap_gene(&mut ch1, &mut ch2, locus);
        }
    }
    (ch1, ch2)
}

pub fn onepoint_crossover(
    parent1: &Chromosome,
    parent2: &Chromosome,
    probability: f64,
    rng: &mut impl Rng,
) -> (Chromosome, Chromosome) {
    let mut ch1 = parent1.clone();
    let mut ch2 = parent2.clone();
    let len = parent1.len();
    if rng.gen::<f64>() < probability && len >= 2 {
        // Point 0 would just swap the parents.
        let point = rng.gen_range(1..len);
        for locus in point..len {
            swap_gene(&mut ch1, &mut ch2, locus);
        }
    }
    (ch1, ch2)
}

pub fn twopoint_crossover(
    parent1: &Chromosome,
    parent2: &Chromosome,
    probability: f64,
    rng: &mut impl Rng,
) -> (Chromosome, Chromosome) {
    let mut ch1 = parent1.clone();
    let mut ch2 = parent2.clone();
    let len = parent1.len();
    if rng.gen::<f64>() < probability && len >= 2 {
        let gene1 = rng.gen_range(1..len);
        let gene2 = rng.gen_range(1..len);
        let (low, high) = (gene1.min(gene2), gene1.max(gene2));
        for locus in low + 1..high {
            swap_gene(&mut ch1, &mut ch2, locus);
        }
    }
    (ch1, ch2)
}

#[inline]
fn swap_gene(ch1: &mut Chromosome, ch2: &mut Chromosome, locus: usize) {
    let gene = ch1.get(locus);
    ch1.set(locus, ch2.get(locus));
    ch2.set(locus, gene);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Gene;
    use rand::{SeedableRng, rngs::StdRng};

    fn parents(len: usize) -> (Chromosome, Chromosome) {
        let zeros = Chromosome::with_length(len);
        let ones = zeros.complement();
        (zeros, ones)
    }

    #[test]
    fn uniform_with_zero_probability_copies() {
        let (p1, p2) = parents(50);
        let (c1, c2) = uniform_crossover(&p1, &p2, 0.0, &mut StdRng::seed_from_u64(1));
        assert_eq!((c1, c2), (p1, p2));
    }

    #[test]
    fn uniform_with_certain_swap_exchanges_parents() {
        let (p1, p2) = parents(50);
        let (c1, c2) = uniform_crossover(&p1, &p2, 1.0, &mut StdRng::seed_from_u64(1));
        assert_eq!((c1, c2), (p2, p1));
    }

    #[test]
    fn uniform_children_are_complementary_for_complementary_parents() {
        let (p1, p2) = parents(70);
        let (c1, c2) = uniform_crossover(&p1, &p2, 0.5, &mut StdRng::seed_from_u64(4));
        assert_eq!(c1.complement(), c2);
        assert_ne!(c1, p1);
    }

    #[test]
    fn single_point_exchanges_a_tail() {
        let (p1, p2) = parents(33);
        let (c1, c2) = onepoint_crossover(&p1, &p2, 1.0, &mut StdRng::seed_from_u64(2));
        let point = (0..33).position(|i| c1.get(i) == Gene::One).unwrap();
        assert!(point >= 1);
        assert!((point..33).all(|i| c1.get(i) == Gene::One && c2.get(i) == Gene::Zero));
        assert!((0..point).all(|i| c2.get(i) == Gene::One));
    }

    #[test]
    fn two_point_keeps_the_endpoints() {
        let (p1, p2) = parents(40);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            let (c1, _) = twopoint_crossover(&p1, &p2, 1.0, &mut rng);
            assert_eq!(c1.get(0), Gene::Zero);
            assert_eq!(c1.get(39), Gene::Zero);
        }
    }

    #[test]
    fn failed_coin_flip_copies_parents() {
        let (p1, p2) = parents(20);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(onepoint_crossover(&p1, &p2, 0.0, &mut rng), (p1.clone(), p2.clone()));
        assert_eq!(twopoint_crossover(&p1, &p2, 0.0, &mut rng), (p1, p2));
    }

    #[test]
    fn single_gene_chromosomes_are_copied() {
        let (p1, p2) = parents(1);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(onepoint_crossover(&p1, &p2, 1.0, &mut rng), (p1, p2));
    }
}
