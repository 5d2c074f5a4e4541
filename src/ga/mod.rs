//! Genetic Algorithm for the bi-constrained 0/1 knapsack.
//!
//! Candidates are bit-vectors over the catalog. Each generation is
//! evaluated, the best-ever record is updated, and a replacement population
//! is bred by selection, two-point crossover and bit-flip mutation.
//!
//! # Key Types
//!
//! - [`Individual`]: genome plus cached fitness
//! - [`KnapsackProblem`]: fitness evaluator with a [`ConstraintPolicy`]
//! - [`Selection`]: tournament, roulette, or rank selection
//! - [`GaConfig`]: run parameters (population size, rates, stopping rules)
//! - [`Engine`]: the generational state machine, steppable phase by phase
//! - [`GaRunner`] / [`GaResult`]: seeded run to completion
//!
//! # Submodules
//!
//! - [`operators`]: two-point crossover and bit-flip mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution Programs*

mod config;
pub mod operators;
mod problem;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use problem::{ConstraintPolicy, KnapsackProblem};
pub use runner::{Engine, GaResult, GaRunner, GenerationStats, Phase, StopReason};
pub use selection::Selection;
pub use types::Individual;
