//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. Different strategies provide different selection pressure.
//!
//! All strategies read an already-evaluated population and return the index
//! of one of its members. Fitness is maximized and never negative.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use rand::seq::index;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_knapsack::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Roulette wheel (fitness-proportionate)
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: draw `k` distinct individuals, keep the fittest.
    ///
    /// Ties go to the first contestant drawn.
    /// - k=2: light pressure (good for diversity)
    /// - k=3-5: moderate pressure (typical default)
    /// - k=population size: always returns the best individual
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// When every fitness is zero the wheel has no area and the choice
    /// falls back to a uniform random index.
    ///
    /// **Warning**: Susceptible to super-individual dominance when
    /// fitness variance is high.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,

    /// Rank-based selection.
    ///
    /// Individuals are sorted ascending by fitness and given ranks `1..=n`
    /// (worst = 1, best = n); the wheel is then spun over ranks instead of
    /// raw fitness. Equal fitnesses keep their population order.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per selection (sort), O(n) scan
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty, if any member is unevaluated, or if
    /// a tournament size exceeds the population.
    pub fn select<R: Rng>(&self, population: &[Individual], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }

    /// Human-readable strategy name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Selection::Tournament(_) => "tournament",
            Selection::Roulette => "roulette",
            Selection::Rank => "rank",
        }
    }
}

/// Tournament selection: sample k distinct members, return the fittest.
fn tournament<R: Rng>(population: &[Individual], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let k = k.max(1);
    assert!(k <= n, "tournament size {k} exceeds population size {n}");

    let contestants = index::sample(rng, n, k);
    let mut best_idx = contestants.index(0);
    for idx in contestants.iter().skip(1) {
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection over raw fitness.
fn roulette<R: Rng>(population: &[Individual], rng: &mut R) -> usize {
    let weights: Vec<f64> = population.iter().map(Individual::fitness).collect();
    spin(&weights, rng)
}

/// Rank-based selection: proportionate over ranks `1..=n`.
fn rank<R: Rng>(population: &[Individual], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    // Stable sort, ascending (worst first)
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| population[a].fitness().total_cmp(&population[b].fitness()));

    let ranks: Vec<f64> = (1..=n).map(|r| r as f64).collect();
    order[spin(&ranks, rng)]
}

/// Spins a wheel whose slots are `weights` and returns the winning slot.
///
/// Draws a point in `[0, total)` and returns the first slot whose running
/// sum exceeds it; zero-weight slots therefore never win while any weight is
/// positive. A zero total selects uniformly.
fn spin<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let n = weights.len();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..n);
    }

    let point = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > point {
            return i;
        }
    }

    // floating-point fallback: last slot with positive weight
    weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(n - 1)
}
