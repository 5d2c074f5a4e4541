//! Deterministic and single-trajectory baselines.
//!
//! Both produce a [`LoadPlan`](crate::decode::LoadPlan) so they can be
//! compared directly with a decoded GA result.
//!
//! - [`ratio_greedy`]: sort by value density, pack while feasible
//! - [`hill_climb`]: single-bit-flip local search with strict acceptance

mod greedy;
mod local_search;

pub use greedy::ratio_greedy;
pub use local_search::{hill_climb, hill_climb_with_rng, LocalSearchConfig, LocalSearchResult};
