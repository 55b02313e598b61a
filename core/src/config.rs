use serde::{Deserialize, Serialize};

use crate::crossover::Crossover;
use crate::error::ConfigError;
use crate::selection::Selection;

/// Smallest population for which distinct parents can always be drawn.
pub const MIN_POPULATION_SIZE: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticAlgorithmParameters {
    /// Individuals per island; must be even.
    pub population_size: usize,
    pub num_islands: usize,
    pub num_generations: usize,
    pub migration_period: usize,
    /// At most `population_size / 2`.
    pub num_to_migrate: usize,
    pub diversity_period: usize,
    pub crossover: Crossover,
    pub mutation_probability: f64,
    pub selection: Selection,
    /// Drawn from entropy when absent.
    pub random_seed: Option<u64>,
}

impl Default for GeneticAlgorithmParameters {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_islands: 4,
            num_generations: 100,
            migration_period: 10,
            num_to_migrate: 5,
            diversity_period: 10,
            crossover: Crossover::default(),
            mutation_probability: 0.001,
            selection: Selection::default(),
            random_seed: None,
        }
    }
}

impl GeneticAlgorithmParameters {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size % 2 != 0 {
            return Err(ConfigError::OddPopulationSize(self.population_size));
        }

        if self.population_size < MIN_POPULATION_SIZE {
            return Err(ConfigError::PopulationTooSmall {
                min: MIN_POPULATION_SIZE,
                actual: self.population_size,
            });
        }

        let max = self.population_size / 2;
        if self.num_to_migrate > max {
            return Err(ConfigError::TooManyMigrants { num_to_migrate: self.num_to_migrate, max });
        }

        if self.num_islands == 0 {
            return Err(ConfigError::NoIslands);
        }

        if self.migration_period == 0 {
            return Err(ConfigError::ZeroPeriod("migration period"));
        }

        if self.diversity_period == 0 {
            return Err(ConfigError::ZeroPeriod("diversity period"));
        }

        check_probability("mutation probability", self.mutation_probability)?;
        check_probability(
            match self.crossover {
                Crossover::Uniform { .. } => "uniform crossover bit swap probability",
                _ => "crossover probability",
            },
            self.crossover.probability(),
        )?;
        if let Selection::Tournament { probability } = self.selection {
            check_probability("tournament selection probability", probability)?;
        }

        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GeneticAlgorithmParameters::default().validate(), Ok(()));
    }

    #[test]
    fn odd_population_is_rejected() {
        let params = GeneticAlgorithmParameters { population_size: 11, ..Default::default() };
        assert_eq!(params.validate(), Err(ConfigError::OddPopulationSize(11)));
    }

    #[test]
    fn tiny_population_is_rejected() {
        let params = GeneticAlgorithmParameters {
            population_size: 2,
            num_to_migrate: 1,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::PopulationTooSmall { min: 4, actual: 2 }));
    }

    #[test]
    fn migrating_more_than_half_is_rejected() {
        let params = GeneticAlgorithmParameters {
            population_size: 10,
            num_to_migrate: 6,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::TooManyMigrants { num_to_migrate: 6, max: 5 })
        );
    }

    #[test]
    fn probabilities_must_be_in_range() {
        let params = GeneticAlgorithmParameters { mutation_probability: 1.5, ..Default::default() };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::ProbabilityOutOfRange { name: "mutation probability", .. })
        ));

        let params = GeneticAlgorithmParameters {
            selection: Selection::Tournament { probability: f64::NAN },
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn zero_periods_are_rejected() {
        let params = GeneticAlgorithmParameters { migration_period: 0, ..Default::default() };
        assert_eq!(params.validate(), Err(ConfigError::ZeroPeriod("migration period")));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params: GeneticAlgorithmParameters = serde_json::from_str(
            r#"{"population_size": 20, "crossover": {"kind": "two_point", "probability": 0.7}}"#,
        ).unwrap();
        assert_eq!(params.population_size, 20);
        assert_eq!(params.crossover, Crossover::TwoPoint { probability: 0.7 });
        assert_eq!(params.num_islands, 4);
    }
}
