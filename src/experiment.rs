//! Experiment helpers: repeated GA runs and baseline comparison.
//!
//! These sit on top of the engine and baselines and only aggregate their
//! outputs. Nothing here renders charts or prints.

use crate::baseline::{hill_climb, ratio_greedy, LocalSearchConfig};
use crate::decode::{decode, LoadPlan};
use crate::error::ConfigError;
use crate::ga::{GaConfig, GaRunner, KnapsackProblem};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

/// Consistency statistics over repeated runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Total loaded value of each run, in run order.
    pub values: Vec<f64>,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Runs whose best genome broke a capacity limit. Each counts as a
    /// loaded value of 0.
    pub infeasible_runs: usize,
}

impl RunSummary {
    /// Summarizes `values`. Returns `None` for an empty slice.
    pub fn from_values(values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            values,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            infeasible_runs: 0,
        })
    }
}

/// Runs the GA `runs` times and summarizes the loaded value of each best
/// solution.
///
/// A best genome that exceeds either limit loads nothing and is recorded as
/// 0; this can happen under the soft-penalty policy, or under hard reject
/// when no feasible genome was ever seen. With `config.seed = Some(s)`, run `i` uses seed `s + i`; otherwise each
/// run is seeded randomly. Returns `Ok(None)` when `runs` is 0.
#[instrument(skip_all, fields(runs = runs))]
pub fn run_repeated(
    problem: &KnapsackProblem,
    config: &GaConfig,
    runs: usize,
) -> Result<Option<RunSummary>, ConfigError> {
    let mut values = Vec::with_capacity(runs);
    let mut infeasible_runs = 0;
    for i in 0..runs {
        let mut run_config = config.clone();
        run_config.seed = config.seed.map(|s| s.wrapping_add(i as u64));
        let result = GaRunner::run(problem, &run_config)?;
        let plan = decode(result.best.genome(), problem.catalog());
        if plan.totals.fits(problem.capacity()) {
            values.push(plan.totals.value);
        } else {
            infeasible_runs += 1;
            values.push(0.0);
        }
    }

    let summary = RunSummary::from_values(values).map(|s| RunSummary {
        infeasible_runs,
        ..s
    });
    if let Some(s) = &summary {
        info!(
            mean = s.mean,
            std_dev = s.std_dev,
            min = s.min,
            max = s.max,
            infeasible_runs = s.infeasible_runs,
            "repeated runs done"
        );
    }
    Ok(summary)
}

/// One algorithm's answer and how long it took.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmOutcome {
    pub name: &'static str,
    pub plan: LoadPlan,
    /// Whether `plan` respects both capacity limits.
    pub feasible: bool,
    pub elapsed: Duration,
}

/// Side-by-side results of the greedy heuristic, local search and the GA on
/// one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub greedy: AlgorithmOutcome,
    pub local_search: AlgorithmOutcome,
    pub ga: AlgorithmOutcome,
}

impl Comparison {
    pub fn outcomes(&self) -> [&AlgorithmOutcome; 3] {
        [&self.greedy, &self.local_search, &self.ga]
    }

    /// Percent by which the GA's loaded value exceeds `baseline`'s.
    ///
    /// `None` when the baseline loaded no value or either plan is
    /// infeasible.
    pub fn value_improvement(&self, baseline: &AlgorithmOutcome) -> Option<f64> {
        self.comparable(baseline)?;
        relative_gain(self.ga.plan.totals.value, baseline.plan.totals.value)
    }

    /// Percent by which the GA's loaded item count exceeds `baseline`'s.
    ///
    /// `None` when the baseline loaded nothing or either plan is infeasible.
    pub fn count_improvement(&self, baseline: &AlgorithmOutcome) -> Option<f64> {
        self.comparable(baseline)?;
        relative_gain(self.ga.plan.count() as f64, baseline.plan.count() as f64)
    }

    fn comparable(&self, baseline: &AlgorithmOutcome) -> Option<()> {
        (self.ga.feasible && baseline.feasible).then_some(())
    }
}

fn relative_gain(ours: f64, theirs: f64) -> Option<f64> {
    (theirs > 0.0).then(|| (ours / theirs - 1.0) * 100.0)
}

/// Runs all three algorithms on `problem`.
#[instrument(skip_all, fields(items = problem.genome_len()))]
pub fn compare(
    problem: &KnapsackProblem,
    ga_config: &GaConfig,
    ls_config: &LocalSearchConfig,
) -> Result<Comparison, ConfigError> {
    let capacity = problem.capacity();
    let outcome = |name, plan: LoadPlan, elapsed| AlgorithmOutcome {
        name,
        feasible: plan.totals.fits(capacity),
        plan,
        elapsed,
    };

    let start = Instant::now();
    let plan = ratio_greedy(problem.catalog(), capacity);
    let greedy = outcome("greedy", plan, start.elapsed());

    let start = Instant::now();
    let plan = hill_climb(problem, ls_config).plan;
    let local_search = outcome("local_search", plan, start.elapsed());

    let start = Instant::now();
    let result = GaRunner::run(problem, ga_config)?;
    let elapsed = start.elapsed();
    let ga = outcome("ga", decode(result.best.genome(), problem.catalog()), elapsed);

    let comparison = Comparison {
        greedy,
        local_search,
        ga,
    };
    for outcome in comparison.outcomes() {
        info!(
            algorithm = outcome.name,
            value = outcome.plan.totals.value,
            weight = outcome.plan.totals.weight,
            volume = outcome.plan.totals.volume,
            loaded = outcome.plan.count(),
            feasible = outcome.feasible,
            elapsed_us = outcome.elapsed.as_micros() as u64,
            "algorithm finished"
        );
    }
    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Capacity, Catalog};
    use crate::ga::ConstraintPolicy;

    fn reference_problem() -> KnapsackProblem {
        KnapsackProblem::new(Catalog::reference(), Capacity::new(1000.0, 3000.0)).unwrap()
    }

    #[test]
    fn test_summary_statistics() {
        let s = RunSummary::from_values(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn test_summary_empty() {
        assert!(RunSummary::from_values(vec![]).is_none());
    }

    #[test]
    fn test_run_repeated() {
        let problem = reference_problem();
        let config = GaConfig::fast().with_seed(10);
        let summary = run_repeated(&problem, &config, 3).unwrap().unwrap();
        assert_eq!(summary.values.len(), 3);
        assert!(summary.min <= summary.mean && summary.mean <= summary.max);
        assert!(summary.min > 0.0);
        assert_eq!(summary.infeasible_runs, 0);

        let again = run_repeated(&problem, &config, 3).unwrap().unwrap();
        assert_eq!(summary, again);
    }

    #[test]
    fn test_run_repeated_zero_runs() {
        let problem = reference_problem();
        assert!(run_repeated(&problem, &GaConfig::fast(), 0).unwrap().is_none());
    }

    #[test]
    fn test_run_repeated_propagates_config_error() {
        let problem = reference_problem();
        let config = GaConfig::fast().with_max_generations(0);
        assert_eq!(
            run_repeated(&problem, &config, 2).unwrap_err(),
            ConfigError::ZeroGenerations
        );
    }

    #[test]
    fn test_compare() {
        let problem = reference_problem();
        let comparison = compare(
            &problem,
            &GaConfig::fast().with_seed(1),
            &LocalSearchConfig::default().with_seed(1),
        )
        .unwrap();

        for outcome in [&comparison.greedy, &comparison.ga] {
            assert!(outcome.feasible, "{}", outcome.name);
            assert!(outcome.plan.totals.fits(problem.capacity()), "{}", outcome.name);
        }
        assert_eq!(
            comparison.local_search.feasible,
            comparison.local_search.plan.totals.fits(problem.capacity())
        );
        let names: Vec<&str> = comparison.outcomes().iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["greedy", "local_search", "ga"]);
        assert!(comparison.value_improvement(&comparison.greedy).is_some());
    }

    /// Cheap penalties on tight limits: overloading pays off.
    fn overloaded_problem() -> KnapsackProblem {
        KnapsackProblem::with_policy(
            Catalog::reference(),
            Capacity::new(300.0, 600.0),
            ConstraintPolicy::SoftPenalty {
                weight_penalty: 0.5,
                volume_penalty: 0.5,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_compare_flags_infeasible_ga_plan() {
        let problem = overloaded_problem();
        let comparison = compare(
            &problem,
            &GaConfig::fast().with_seed(1),
            &LocalSearchConfig::default().with_seed(1),
        )
        .unwrap();

        assert!(comparison.greedy.feasible);
        assert!(!comparison.ga.feasible);
        assert!(!comparison.ga.plan.totals.fits(problem.capacity()));
        assert_eq!(comparison.value_improvement(&comparison.greedy), None);
        assert_eq!(comparison.count_improvement(&comparison.greedy), None);
    }

    #[test]
    fn test_run_repeated_counts_infeasible_runs() {
        let problem = overloaded_problem();
        let config = GaConfig::fast().with_seed(1);
        let summary = run_repeated(&problem, &config, 2).unwrap().unwrap();
        assert_eq!(summary.infeasible_runs, 2);
        assert_eq!(summary.values, vec![0.0, 0.0]);
        assert_eq!(summary.max, 0.0);
    }

    #[test]
    fn test_relative_gain() {
        assert_eq!(relative_gain(150.0, 100.0), Some(50.0));
        assert_eq!(relative_gain(1.0, 0.0), None);
    }
}
