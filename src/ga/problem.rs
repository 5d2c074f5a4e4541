//! Fitness evaluation under weight and volume limits.
//!
//! [`KnapsackProblem`] binds a catalog to its capacity and a
//! [`ConstraintPolicy`]. The policy is fixed per problem instance, never
//! chosen per call.

use super::types::Individual;
use crate::catalog::{Capacity, Catalog, Totals};
use crate::error::ConfigError;

/// How an over-capacity genome is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintPolicy {
    /// Any violation scores 0.
    #[default]
    HardReject,

    /// `value - weight_penalty * excess_weight - volume_penalty * excess_volume`,
    /// floored at 0.
    ///
    /// Near-feasible genomes keep some selection pressure toward the
    /// feasible region.
    SoftPenalty {
        weight_penalty: f64,
        volume_penalty: f64,
    },
}

impl ConstraintPolicy {
    /// Scores aggregate totals against `capacity`.
    pub fn score(&self, totals: &Totals, capacity: &Capacity) -> f64 {
        match *self {
            ConstraintPolicy::HardReject => {
                if totals.fits(capacity) {
                    totals.value
                } else {
                    0.0
                }
            }
            ConstraintPolicy::SoftPenalty {
                weight_penalty,
                volume_penalty,
            } => {
                let excess_weight = (totals.weight - capacity.max_weight).max(0.0);
                let excess_volume = (totals.volume - capacity.max_volume).max(0.0);
                let score = totals.value
                    - weight_penalty * excess_weight
                    - volume_penalty * excess_volume;
                score.max(0.0)
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let ConstraintPolicy::SoftPenalty {
            weight_penalty,
            volume_penalty,
        } = *self
        {
            for (name, value) in [
                ("weight_penalty", weight_penalty),
                ("volume_penalty", volume_penalty),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidPenalty { name, value });
                }
            }
        }
        Ok(())
    }
}

/// A bi-constrained 0/1 knapsack instance.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ProblemParts"))]
pub struct KnapsackProblem {
    catalog: Catalog,
    capacity: Capacity,
    policy: ConstraintPolicy,
}

/// Unchecked wire form of [`KnapsackProblem`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ProblemParts {
    catalog: Catalog,
    capacity: Capacity,
    #[serde(default)]
    policy: ConstraintPolicy,
}

#[cfg(feature = "serde")]
impl TryFrom<ProblemParts> for KnapsackProblem {
    type Error = ConfigError;

    fn try_from(raw: ProblemParts) -> Result<Self, Self::Error> {
        Self::with_policy(raw.catalog, raw.capacity, raw.policy)
    }
}

impl KnapsackProblem {
    /// Creates a problem using the hard-reject policy.
    pub fn new(catalog: Catalog, capacity: Capacity) -> Result<Self, ConfigError> {
        Self::with_policy(catalog, capacity, ConstraintPolicy::HardReject)
    }

    pub fn with_policy(
        catalog: Catalog,
        capacity: Capacity,
        policy: ConstraintPolicy,
    ) -> Result<Self, ConfigError> {
        capacity.validate()?;
        policy.validate()?;
        Ok(Self {
            catalog,
            capacity,
            policy,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn capacity(&self) -> &Capacity {
        &self.capacity
    }

    pub fn policy(&self) -> ConstraintPolicy {
        self.policy
    }

    /// Genome length for this instance.
    pub fn genome_len(&self) -> usize {
        self.catalog.len()
    }

    /// Scores a genome.
    ///
    /// # Panics
    /// Panics if `genome.len()` differs from the catalog length.
    pub fn evaluate(&self, genome: &[bool]) -> f64 {
        let totals = self.catalog.totals(genome);
        self.policy.score(&totals, &self.capacity)
    }

    /// Scores an individual and caches the result on it.
    pub fn evaluate_individual(&self, individual: &mut Individual) -> f64 {
        let fitness = self.evaluate(individual.genome());
        individual.set_fitness(fitness);
        fitness
    }

    /// Returns `true` if the genome respects both limits.
    pub fn is_feasible(&self, genome: &[bool]) -> bool {
        self.catalog.totals(genome).fits(&self.capacity)
    }
}
