//! Configuration errors.
//!
//! Every variant names the invariant that failed. These are reported before
//! any generational loop starts; nothing inside a run is recoverable.

/// An invalid problem or run configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("catalog must contain at least one item")]
    EmptyCatalog,

    #[error("genome length must be at least 2 for two-point crossover, got {len}")]
    GenomeTooShort { len: usize },

    #[error("population_size must be at least 1")]
    ZeroPopulation,

    #[error("max_generations must be at least 1")]
    ZeroGenerations,

    #[error("{name} must lie in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },

    #[error("tournament size must be in 1..={population_size}, got {size}")]
    TournamentSize { size: usize, population_size: usize },

    #[error("stagnation_limit must be positive when set")]
    ZeroStagnationLimit,

    #[error("elite_count ({elite_count}) must be below population_size ({population_size})")]
    EliteCount {
        elite_count: usize,
        population_size: usize,
    },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidCapacity { name: &'static str, value: f64 },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidPenalty { name: &'static str, value: f64 },

    #[error("item {index} has a negative or non-finite attribute")]
    InvalidItem { index: usize },
}
