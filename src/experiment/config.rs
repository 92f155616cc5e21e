//! Experiment batch configuration.

use std::path::PathBuf;

use crate::algorithm::{EnsembleFactory, EnsemblePolicy};
use crate::domain::ProblemKind;
use crate::hyper::{HyperConfig, RunMode};
use crate::output::OutputCategory;

/// What a batch evaluates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TestMode {
    /// One ensemble, built by `policy`, numbered `id`.
    Ensemble { id: usize, policy: EnsemblePolicy },
    /// Every catalog algorithm in `[start, end)` as its own ensemble.
    Algorithms {
        start: Option<usize>,
        end: Option<usize>,
    },
    /// A single fitness sweep over the whole catalog on one instance.
    Fitness { instance: usize },
}

impl TestMode {
    /// Label column style of the rows this mode produces.
    pub fn run_mode(&self) -> RunMode {
        match self {
            TestMode::Algorithms { .. } => RunMode::Algorithm,
            TestMode::Ensemble { .. } | TestMode::Fitness { .. } => RunMode::Ensemble,
        }
    }

    pub fn output_category(&self) -> OutputCategory {
        match self {
            TestMode::Ensemble { policy, .. } => match policy {
                EnsemblePolicy::Default => OutputCategory::Ensemble,
                EnsemblePolicy::Elite => OutputCategory::EliteEnsemble,
                EnsemblePolicy::Random => OutputCategory::RandomEnsemble,
            },
            TestMode::Algorithms { .. } => OutputCategory::Algorithm,
            TestMode::Fitness { .. } => OutputCategory::Fitness,
        }
    }
}

/// Everything one batch needs.
///
/// # Examples
///
/// ```
/// use u_hyperheur::domain::ProblemKind;
/// use u_hyperheur::experiment::{RunConfig, TestMode};
///
/// let config = RunConfig::new(ProblemKind::Sat, TestMode::Algorithms { start: Some(2), end: Some(4) })
///     .with_repetitions(3)
///     .with_output_dir("results");
/// assert!(config.validate().is_ok());
/// assert_eq!(config.base_seed, 1000);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunConfig {
    pub problem: ProblemKind,
    pub mode: TestMode,

    /// Seeded runs per instance.
    pub repetitions: usize,

    /// First problem and algorithm seed of every instance.
    pub base_seed: u64,

    /// Root of the `Ensembles/`, `Algorithms/`, ... result directories.
    pub output_dir: PathBuf,

    /// Only run the first `n` instances of the domain.
    pub instances: Option<usize>,

    /// Algorithms per default or random ensemble.
    pub ensemble_size: usize,

    /// Seed of the random ensemble policy.
    pub ensemble_seed: u64,

    pub hyper: HyperConfig,
}

impl RunConfig {
    pub fn new(problem: ProblemKind, mode: TestMode) -> Self {
        Self {
            problem,
            mode,
            repetitions: 50,
            base_seed: 1000,
            output_dir: PathBuf::from("Data"),
            instances: None,
            ensemble_size: EnsembleFactory::DEFAULT_ENSEMBLE_SIZE,
            ensemble_seed: 0,
            hyper: HyperConfig::default(),
        }
    }

    pub fn with_repetitions(mut self, n: usize) -> Self {
        self.repetitions = n;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_instances(mut self, n: Option<usize>) -> Self {
        self.instances = n;
        self
    }

    pub fn with_ensemble_size(mut self, n: usize) -> Self {
        self.ensemble_size = n;
        self
    }

    pub fn with_ensemble_seed(mut self, seed: u64) -> Self {
        self.ensemble_seed = seed;
        self
    }

    pub fn with_hyper(mut self, hyper: HyperConfig) -> Self {
        self.hyper = hyper;
        self
    }

    /// Number of instances the batch covers.
    pub fn instance_count(&self) -> usize {
        let available = self.problem.instance_count();
        self.instances.map_or(available, |n| n.min(available))
    }

    /// Number of algorithms in the catalog the batch draws from.
    pub fn catalog_size(&self) -> usize {
        let span = self
            .problem
            .heuristic_count()
            .saturating_sub(self.hyper.search.heuristic_offset);
        span.saturating_pow(3)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.repetitions == 0 {
            return Err("repetitions must be at least 1".into());
        }
        if self.ensemble_size == 0 {
            return Err("ensemble_size must be at least 1".into());
        }
        if self.instances == Some(0) {
            return Err("instances must be at least 1".into());
        }
        match self.mode {
            TestMode::Ensemble {
                policy: EnsemblePolicy::Default | EnsemblePolicy::Random,
                ..
            } if self.ensemble_size > self.catalog_size() => {
                return Err(format!(
                    "ensemble_size ({}) exceeds the {} algorithms in the catalog",
                    self.ensemble_size,
                    self.catalog_size()
                ));
            }
            TestMode::Algorithms {
                start: Some(start),
                end: Some(end),
            } if start > end => {
                return Err(format!("start ({start}) must not exceed end ({end})"));
            }
            TestMode::Fitness { instance } if instance >= self.problem.instance_count() => {
                return Err(format!(
                    "instance {instance} out of range: {} has {} instances",
                    self.problem,
                    self.problem.instance_count()
                ));
            }
            _ => {}
        }
        self.hyper.validate()
    }
}
