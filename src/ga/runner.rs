//! GA evolutionary loop execution.
//!
//! [`Engine`] is the generational state machine:
//!
//! ```text
//! new (initializing) -> Evaluating -> Terminated
//!                          ^   |
//!                          |   v
//!                   SelectingAndVarying
//! ```
//!
//! [`GaRunner`] builds an engine from a seed and drives it to termination.

use super::config::GaConfig;
use super::operators::two_point_crossover;
use super::problem::KnapsackProblem;
use super::types::Individual;
use crate::error::ConfigError;
use crate::random::rng_from_seed;
use rand::Rng;
use tracing::{debug, info, instrument};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// `max_generations` generations were evaluated.
    GenerationBudget,
    /// The best-ever fitness did not strictly improve for
    /// `stagnation_limit` consecutive generations.
    Stagnation,
}

/// Current phase of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The current population awaits fitness evaluation.
    Evaluating,
    /// The current population is evaluated; the next one is to be bred.
    SelectingAndVarying,
    /// The run is over.
    Terminated(StopReason),
}

/// Statistics recorded after each evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Best-ever fitness after this generation.
    pub best_fitness: f64,
    /// Best fitness within this generation's population.
    pub generation_best: f64,
    /// Mean fitness of this generation's population.
    pub mean_fitness: f64,
    /// Generations since the last strict improvement.
    pub stagnation: usize,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// The best individual found during the entire run.
    pub best: Individual,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Total number of evaluated generations.
    pub generations: usize,

    /// Which stopping rule ended the run.
    pub stop_reason: StopReason,

    /// Per-generation statistics, one entry per evaluated generation.
    pub history: Vec<GenerationStats>,
}

impl GaResult {
    /// Whether the run was terminated due to stagnation.
    pub fn stagnated(&self) -> bool {
        self.stop_reason == StopReason::Stagnation
    }
}

/// Generational GA engine over a [`KnapsackProblem`].
///
/// The engine owns the population and the random source. Each call to
/// [`step`](Self::step) performs one phase; [`run`](Self::run) steps until
/// termination.
pub struct Engine<'p, R: Rng> {
    problem: &'p KnapsackProblem,
    config: GaConfig,
    rng: R,
    population: Vec<Individual>,
    best: Option<Individual>,
    generation: usize,
    stagnation: usize,
    phase: Phase,
    history: Vec<GenerationStats>,
}

impl<'p, R: Rng> Engine<'p, R> {
    /// Validates the configuration and builds a random initial population.
    pub fn new(
        problem: &'p KnapsackProblem,
        config: &GaConfig,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let genome_len = problem.genome_len();
        if genome_len == 0 {
            return Err(ConfigError::EmptyCatalog);
        }
        if genome_len < 2 {
            return Err(ConfigError::GenomeTooShort { len: genome_len });
        }

        let population = (0..config.population_size)
            .map(|_| Individual::random(genome_len, &mut rng))
            .collect();

        Ok(Self {
            problem,
            config: config.clone(),
            rng,
            population,
            best: None,
            generation: 0,
            stagnation: 0,
            phase: Phase::Evaluating,
            history: Vec::new(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of generations evaluated so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Generations since the last strict improvement.
    pub fn stagnation(&self) -> usize {
        self.stagnation
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Best individual seen so far, if any generation has been evaluated.
    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Performs the current phase and returns the phase that follows.
    ///
    /// Stepping a terminated engine is a no-op.
    pub fn step(&mut self) -> Phase {
        match self.phase {
            Phase::Evaluating => self.evaluate(),
            Phase::SelectingAndVarying => self.breed(),
            Phase::Terminated(_) => {}
        }
        self.phase
    }

    /// Steps until termination and returns the best-ever record.
    pub fn run(mut self) -> GaResult {
        info!(
            items = self.problem.genome_len(),
            population = self.config.population_size,
            max_generations = self.config.max_generations,
            selection = self.config.selection.name(),
            "starting GA run"
        );

        let reason = loop {
            if let Phase::Terminated(reason) = self.step() {
                break reason;
            }
        };

        let best = self
            .best
            .expect("a terminated engine has evaluated at least one generation");
        let best_fitness = best.fitness();
        info!(
            generations = self.generation,
            best_fitness,
            ?reason,
            "GA run finished"
        );

        GaResult {
            best,
            best_fitness,
            generations: self.generation,
            stop_reason: reason,
            history: self.history,
        }
    }

    /// EVALUATING: score every stale individual, update best-ever and the
    /// stagnation counter, then decide whether to stop.
    fn evaluate(&mut self) {
        evaluate_population(self.problem, &mut self.population, self.config.parallel);
        self.generation += 1;

        let gen_best = find_best(&self.population);
        let improved = match &self.best {
            Some(best) => gen_best.fitness() > best.fitness(),
            None => true,
        };
        if improved {
            // Copy, never alias: the population is mutated next phase
            self.best = Some(gen_best.clone());
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }

        let generation_best = gen_best.fitness();
        let mean_fitness = self.population.iter().map(Individual::fitness).sum::<f64>()
            / self.population.len() as f64;
        let best_fitness = self.best.as_ref().map_or(generation_best, Individual::fitness);

        debug!(
            generation = self.generation,
            best_fitness,
            generation_best,
            mean_fitness,
            stagnation = self.stagnation,
            "generation evaluated"
        );
        self.history.push(GenerationStats {
            generation: self.generation,
            best_fitness,
            generation_best,
            mean_fitness,
            stagnation: self.stagnation,
        });

        self.phase = if self
            .config
            .stagnation_limit
            .is_some_and(|limit| self.stagnation >= limit)
        {
            Phase::Terminated(StopReason::Stagnation)
        } else if self.generation >= self.config.max_generations {
            Phase::Terminated(StopReason::GenerationBudget)
        } else {
            Phase::SelectingAndVarying
        };
    }

    /// SELECTING_AND_VARYING: breed a full replacement population.
    ///
    /// The population is truncated to exactly `population_size`: when the
    /// last slot is filled by a crossover, the second child is dropped.
    fn breed(&mut self) {
        let size = self.config.population_size;
        let mut next: Vec<Individual> = Vec::with_capacity(size);

        if self.config.elite_count > 0 {
            let mut order: Vec<usize> = (0..self.population.len()).collect();
            order.sort_by(|&a, &b| {
                self.population[b]
                    .fitness()
                    .total_cmp(&self.population[a].fitness())
            });
            next.extend(
                order
                    .iter()
                    .take(self.config.elite_count)
                    .map(|&i| self.population[i].clone()),
            );
        }
        let elite_end = next.len();

        while next.len() < size {
            if self.rng.random::<f64>() < self.config.crossover_rate {
                let p1 = self.config.selection.select(&self.population, &mut self.rng);
                let p2 = self.config.selection.select(&self.population, &mut self.rng);
                let (c1, c2) = two_point_crossover(
                    self.population[p1].genome(),
                    self.population[p2].genome(),
                    &mut self.rng,
                );
                next.push(Individual::new(c1));
                if next.len() < size {
                    next.push(Individual::new(c2));
                }
            } else {
                let idx = self.config.selection.select(&self.population, &mut self.rng);
                next.push(self.population[idx].clone());
            }
        }

        for individual in &mut next[elite_end..] {
            individual.mutate(self.config.mutation_rate, &mut self.rng);
        }

        self.population = next;
        self.phase = Phase::Evaluating;
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_knapsack::catalog::{Capacity, Catalog};
/// use u_knapsack::ga::{GaConfig, GaRunner, KnapsackProblem};
///
/// let problem = KnapsackProblem::new(Catalog::reference(), Capacity::new(1000.0, 3000.0)).unwrap();
/// let config = GaConfig::fast().with_seed(42);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert!(problem.is_feasible(result.best.genome()));
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with an RNG seeded from `config.seed`.
    #[instrument(skip_all, fields(seed = ?config.seed))]
    pub fn run(problem: &KnapsackProblem, config: &GaConfig) -> Result<GaResult, ConfigError> {
        Self::run_with_rng(problem, config, rng_from_seed(config.seed))
    }

    /// Runs the GA with a caller-supplied random source.
    pub fn run_with_rng<R: Rng>(
        problem: &KnapsackProblem,
        config: &GaConfig,
        rng: R,
    ) -> Result<GaResult, ConfigError> {
        Ok(Engine::new(problem, config, rng)?.run())
    }
}

/// Evaluate every individual whose fitness is stale.
#[cfg(feature = "parallel")]
fn evaluate_population(problem: &KnapsackProblem, population: &mut [Individual], parallel: bool) {
    use rayon::prelude::*;

    if parallel {
        population
            .par_iter_mut()
            .filter(|ind| !ind.is_evaluated())
            .for_each(|ind| {
                problem.evaluate_individual(ind);
            });
    } else {
        evaluate_sequential(problem, population);
    }
}

/// Evaluate every individual whose fitness is stale.
#[cfg(not(feature = "parallel"))]
fn evaluate_population(problem: &KnapsackProblem, population: &mut [Individual], _parallel: bool) {
    evaluate_sequential(problem, population);
}

fn evaluate_sequential(problem: &KnapsackProblem, population: &mut [Individual]) {
    for ind in population.iter_mut().filter(|ind| !ind.is_evaluated()) {
        problem.evaluate_individual(ind);
    }
}

/// Find the individual with the highest fitness; ties go to the first.
fn find_best(population: &[Individual]) -> &Individual {
    population
        .iter()
        .reduce(|best, ind| if ind.fitness() > best.fitness() { ind } else { best })
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================
