//! One hyper-heuristic run.

use std::time::Duration;

use tracing::{debug, debug_span};

use super::config::{HyperConfig, RunMode};
use crate::algorithm::{Ensemble, EnsemblePolicy};
use crate::domain::ProblemDomain;
use crate::error::{Error, Result};
use crate::output::RunRow;
use crate::search::{AlgorithmCycler, CycleConfig, CycleMode, TimeBudget};

/// Runs one ensemble on one problem instance under a time budget.
///
/// The ensemble's algorithms are cycled in order, each restarted from the
/// same initial solution, until the time limit (or attempt limit) is
/// reached.
///
/// # Examples
///
/// ```
/// use u_hyperheur::algorithm::{EnsembleFactory, EnsemblePolicy};
/// use u_hyperheur::domain::ProblemKind;
/// use u_hyperheur::hyper::{HyperConfig, HyperRunner, RunMode};
///
/// let kind = ProblemKind::BinPacking;
/// let mut factory = EnsembleFactory::new(kind.heuristic_count() - 1, 0);
/// let ensemble = factory.generate_default_ensemble();
///
/// let mut runner = HyperRunner::new(ensemble, 1000, 1000, 0, 0, RunMode::Ensemble, EnsemblePolicy::Default)
///     .with_config(HyperConfig::default().with_max_attempts(Some(8)));
/// runner.load_problem_domain(kind.build(1000));
/// let row = runner.run().unwrap();
/// assert_eq!(row.runs, 8);
/// assert!(row.fitness <= row.starting_fitness);
/// ```
pub struct HyperRunner {
    ensemble: Ensemble,
    algorithm_seed: u64,
    problem_seed: u64,
    instance: usize,
    repetition: usize,
    mode: RunMode,
    policy: EnsemblePolicy,
    config: HyperConfig,
    domain: Option<Box<dyn ProblemDomain>>,
}

impl HyperRunner {
    /// `problem_seed` is the seed the domain was built with. The cycler
    /// draws no random numbers of its own, so `algorithm_seed` is only
    /// recorded in the result row.
    pub fn new(
        ensemble: Ensemble,
        algorithm_seed: u64,
        problem_seed: u64,
        instance: usize,
        repetition: usize,
        mode: RunMode,
        policy: EnsemblePolicy,
    ) -> Self {
        Self {
            ensemble,
            algorithm_seed,
            problem_seed,
            instance,
            repetition,
            mode,
            policy,
            config: HyperConfig::default(),
            domain: None,
        }
    }

    pub fn with_config(mut self, config: HyperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_time_limit(&mut self, limit: Duration) {
        self.config.time_limit = limit;
    }

    /// Hands the runner the domain it will search. The runner loads its
    /// instance into it when run.
    pub fn load_problem_domain(&mut self, domain: Box<dyn ProblemDomain>) {
        self.domain = Some(domain);
    }

    pub fn ensemble(&self) -> &Ensemble {
        &self.ensemble
    }

    /// Executes the run and returns its result row.
    pub fn run(&mut self) -> Result<RunRow> {
        self.config.validate().map_err(Error::Config)?;
        let domain = self.domain.as_mut().ok_or(Error::DomainNotLoaded)?;

        let span = debug_span!(
            "run",
            domain = domain.name(),
            ensemble = self.ensemble.id(),
            policy = self.policy.name(),
            instance = self.instance,
            repetition = self.repetition
        );
        let _guard = span.enter();

        domain.load_instance(self.instance)?;
        let cycler = AlgorithmCycler::new(
            self.config.search.clone(),
            CycleConfig::default()
                .with_mode(CycleMode::Repeat)
                .with_record_partial(self.config.record_partial)
                .with_max_attempts(self.config.max_attempts),
        );
        let budget = TimeBudget::new(self.config.time_limit);
        let outcome = cycler.run(&mut **domain, self.ensemble.algorithms(), &budget);

        let runs = if self.config.record_partial {
            outcome.rows.len()
        } else {
            outcome.attempts
        };
        debug!(
            status = ?outcome.status,
            runs,
            fitness = outcome.best_fitness,
            elapsed_ms = budget.elapsed().as_millis() as u64,
            "run finished"
        );

        Ok(RunRow {
            iteration: self.repetition,
            problem_instance: self.instance,
            problem_seed: self.problem_seed,
            algorithm_seed: self.algorithm_seed,
            starting_fitness: outcome.starting_fitness,
            ensemble_number: self.ensemble.id(),
            fitness: outcome.best_fitness,
            runs,
            label: self.label(),
        })
    }

    fn label(&self) -> String {
        match self.mode {
            RunMode::Ensemble => self.ensemble.label(),
            RunMode::Algorithm => self
                .ensemble
                .algorithms()
                .iter()
                .map(|algorithm| algorithm.label())
                .collect::<Vec<_>>()
                .join(";"),
        }
    }
}
