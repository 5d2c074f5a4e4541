//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! A config is immutable for the duration of a run.

use super::selection::Selection;
use crate::error::ConfigError;

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, selection strategy, operator rates,
/// termination conditions, and parallelism.
///
/// # Defaults
///
/// ```
/// use u_knapsack::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_knapsack::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Rank)
///     .with_crossover_rate(0.9)
///     .with_mutation_rate(0.02)
///     .with_stagnation_limit(50);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Larger populations increase diversity but slow down each generation.
    pub population_size: usize,

    /// Maximum number of evaluated generations.
    ///
    /// The counter advances once per evaluation, so a budget of 1 evaluates
    /// the initial population and stops without breeding a successor.
    pub max_generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Probability that a breeding step selects two parents and applies
    /// crossover (0.0–1.0). Otherwise one selected individual is copied.
    pub crossover_rate: f64,

    /// Per-gene bit-flip probability (0.0–1.0).
    pub mutation_rate: f64,

    /// Consecutive generations without strict improvement of the best-ever
    /// fitness before stopping.
    ///
    /// `None` disables stagnation-based termination.
    pub stagnation_limit: Option<usize>,

    /// Number of top individuals copied unchanged into the next population.
    ///
    /// Elites skip mutation. 0 disables elitism; the best-ever record is
    /// kept regardless.
    pub elite_count: usize,

    /// Whether to evaluate individuals in parallel.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            selection: Selection::default(),
            crossover_rate: 0.8,
            mutation_rate: 0.01,
            stagnation_limit: Some(100),
            elite_count: 0,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = Some(limit);
        self
    }

    /// Disables stagnation-based termination.
    pub fn without_stagnation_limit(mut self) -> Self {
        self.stagnation_limit = None;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick comparisons: 50 individuals, 200 generations,
    /// stagnation limit 30.
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 200,
            stagnation_limit: Some(30),
            ..Self::default()
        }
    }

    /// The default parameters: 100 individuals, 1000 generations,
    /// stagnation limit 100.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for solution quality: 200 individuals, 3000 generations,
    /// stagnation limit 300, one elite.
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            max_generations: 3000,
            stagnation_limit: Some(300),
            elite_count: 1,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        for (name, value) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }
        if let Selection::Tournament(size) = self.selection {
            if size == 0 || size > self.population_size {
                return Err(ConfigError::TournamentSize {
                    size,
                    population_size: self.population_size,
                });
            }
        }
        if self.stagnation_limit == Some(0) {
            return Err(ConfigError::ZeroStagnationLimit);
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::EliteCount {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        Ok(())
    }
}
