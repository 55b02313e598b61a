use noisy_float::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Parent selection strategy, chosen once per run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// Binary tournament: the fitter of two distinct individuals wins with
    /// `probability`, otherwise the less fit one does.
    Tournament { probability: f64 },
    /// Fitness-proportionate selection on `1 / max(fitness, 1)`.
    RouletteWheel,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament { probability: 0.75 }
    }
}

impl Selection {
    /// Binds the strategy to one generation's fitness values.
    pub fn selector<'f>(&self, fitness: &'f [u64]) -> Selector<'f> {
        match *self {
            Selection::Tournament { probability } => Selector::Tournament { fitness, probability },
            Selection::RouletteWheel => Selector::RouletteWheel(RouletteWheel::new(fitness)),
        }
    }
}

pub enum Selector<'f> {
    Tournament { fitness: &'f [u64], probability: f64 },
    RouletteWheel(RouletteWheel),
}

impl Selector<'_> {
    pub fn select_parent(&self, rng: &mut impl Rng) -> usize {
        match self {
            Selector::Tournament { fitness, probability } => {
                tournament_selection(fitness, *probability, rng)
            }
            Selector::RouletteWheel(wheel) => wheel.spin(rng),
        }
    }

    /// Two distinct parents; the second draw repeats until it differs.
    pub fn select_parents(&self, rng: &mut impl Rng) -> (usize, usize) {
        let first = self.select_parent(rng);
        loop {
            let second = self.select_parent(rng);
            if second != first {
                return (first, second);
            }
        }
    }
}

/// Needs at least two individuals.
pub fn tournament_selection(fitness: &[u64], probability: f64, rng: &mut impl Rng) -> usize {
    debug_assert!(fitness.len() >= 2);
    let a = rng.gen_range(0..fitness.len());
    let mut b = rng.gen_range(0..fitness.len() - 1);
    if b >= a {
        b += 1;
    }

    let (fitter, weaker) = if fitness[b] < fitness[a] { (b, a) } else { (a, b) };
    if rng.gen::<f64>() < probability {
        fitter
    } else {
        weaker
    }
}

/// Cumulative inverse-fitness weights of one population.
pub struct RouletteWheel {
    cumulative: Vec<N64>,
}

impl RouletteWheel {
    pub fn new(fitness: &[u64]) -> Self {
        let mut total = n64(0.0);
        let cumulative = fitness
            .iter()
            .map(|&f| {
                total += n64(1.0 / f.max(1) as f64);
                total
            })
            .collect();
        Self { cumulative }
    }

    pub fn total(&self) -> N64 {
        self.cumulative.last().copied().unwrap_or_else(|| n64(0.0))
    }

    pub fn spin(&self, rng: &mut impl Rng) -> usize {
        let target = self.total() * n64(rng.gen::<f64>());
        self.cumulative
            .iter()
            .position(|&c| c >= target)
            .unwrap_or(self.cumulative.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn certain_tournament_never_returns_the_worst() {
        let fitness = [1, 2, 3, 100];
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            assert_ne!(tournament_selection(&fitness, 1.0, &mut rng), 3);
        }
    }

    #[test]
    fn reversed_tournament_never_returns_the_best() {
        let fitness = [1, 2, 3, 100];
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            assert_ne!(tournament_selection(&fitness, 0.0, &mut rng), 0);
        }
    }

    #[test]
    fn parents_are_distinct() {
        let fitness = [4, 4, 4, 4];
        let mut rng = StdRng::seed_from_u64(9);
        for selection in &[Selection::default(), Selection::RouletteWheel] {
            let selector = selection.selector(&fitness);
            for _ in 0..200 {
                let (a, b) = selector.select_parents(&mut rng);
                assert_ne!(a, b);
                assert!(a < 4 && b < 4);
            }
        }
    }

    #[test]
    fn roulette_clamps_zero_fitness() {
        let wheel = RouletteWheel::new(&[0, 1, 2]);
        assert_eq!(wheel.total(), n64(2.5));
    }

    #[test]
    fn roulette_favours_low_fitness() {
        let fitness = [1, 1000];
        let wheel = RouletteWheel::new(&fitness);
        let mut rng = StdRng::seed_from_u64(1);
        let first = (0..1000).filter(|_| wheel.spin(&mut rng) == 0).count();
        assert!(first > 950);
    }

    #[test]
    fn selection_round_trips_through_json() {
        let json = serde_json::to_string(&Selection::default()).unwrap();
        assert_eq!(json, r#"{"kind":"tournament","probability":0.75}"#);
        let back: Selection = serde_json::from_str(r#"{"kind":"roulette_wheel"}"#).unwrap();
        assert_eq!(back, Selection::RouletteWheel);
    }
}
