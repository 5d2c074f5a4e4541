//! Candidate solution type.
//!
//! An [`Individual`] is a bit-vector over the catalog plus a cached fitness.
//! The fitness is only valid between an evaluation and the next change to
//! the genome.

use super::operators::bit_flip_mutation;
use rand::Rng;

/// A candidate loading plan: gene `i` set means item `i` is loaded.
///
/// Fitness is higher-is-better and always non-negative.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    genome: Vec<bool>,
    fitness: Option<f64>,
}

impl Individual {
    /// Wraps a genome. The individual starts unevaluated.
    pub fn new(genome: Vec<bool>) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }

    /// Creates an individual with `len` uniformly random genes.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self::new((0..len).map(|_| rng.random_bool(0.5)).collect())
    }

    pub fn genome(&self) -> &[bool] {
        &self.genome
    }

    pub fn len(&self) -> usize {
        self.genome.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genome.is_empty()
    }

    /// Number of loaded items.
    pub fn count_ones(&self) -> usize {
        self.genome.iter().filter(|&&bit| bit).count()
    }

    /// Returns `true` once a fitness has been stored and not invalidated.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Returns the cached fitness, if current.
    pub fn try_fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Returns the cached fitness.
    ///
    /// # Panics
    /// Panics if the individual has not been evaluated since its genome last
    /// changed.
    pub fn fitness(&self) -> f64 {
        match self.fitness {
            Some(f) => f,
            None => panic!("fitness read before evaluation"),
        }
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Flips each gene independently with probability `rate` and drops the
    /// cached fitness.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) {
        bit_flip_mutation(&mut self.genome, rate, rng);
        self.fitness = None;
    }

    pub fn into_genome(self) -> Vec<bool> {
        self.genome
    }
}

impl From<Vec<bool>> for Individual {
    fn from(genome: Vec<bool>) -> Self {
        Self::new(genome)
    }
}
