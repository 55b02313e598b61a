use rand::Rng;

use crate::chromosome::Chromosome;

/// Flips every gene independently with `probability`.
pub fn bit_flip_mutation(ch: &mut Chromosome, probability: f64, rng: &mut impl Rng) {
    for gene in 0..ch.len() {
        if rng.gen::<f64>() < probability {
            ch.toggle(gene);
        }
    }
}
