//! Bi-constrained 0/1 knapsack optimization.
//!
//! Chooses a subset of items (containers) to load under simultaneous weight
//! and volume limits, maximizing total value. The crate provides:
//!
//! - **Genetic Algorithm (GA)**: bit-vector population with tournament,
//!   roulette, or rank selection, two-point crossover, bit-flip mutation,
//!   best-ever tracking, and stagnation-based early stopping.
//! - **Baselines**: value-density greedy packing and single-bit-flip hill
//!   climbing, for comparing solution quality and runtime against the GA.
//! - **Decoding**: projection of a genome onto the loaded items and totals.
//! - **Experiments**: repeated-run consistency statistics and side-by-side
//!   comparison of all three algorithms.
//!
//! # Architecture
//!
//! All stochastic operations take an explicit `&mut impl Rng`; runners seed
//! it from their config so a seed reproduces a run. The catalog and
//! capacity are read-only for the duration of a run.
//!
//! # Example
//!
//! ```
//! use u_knapsack::catalog::{Capacity, Catalog};
//! use u_knapsack::decode::decode;
//! use u_knapsack::ga::{GaConfig, GaRunner, KnapsackProblem, Selection};
//!
//! let problem = KnapsackProblem::new(Catalog::reference(), Capacity::new(1000.0, 3000.0))?;
//! let config = GaConfig::fast().with_selection(Selection::Rank).with_seed(7);
//! let result = GaRunner::run(&problem, &config)?;
//! let plan = decode(result.best.genome(), problem.catalog());
//! assert!(plan.totals.fits(problem.capacity()));
//! # Ok::<(), u_knapsack::ConfigError>(())
//! ```

pub mod baseline;
pub mod catalog;
pub mod decode;
mod error;
pub mod experiment;
pub mod ga;
pub mod random;

pub use error::ConfigError;
