//! Batch execution: ensembles × instances × repetitions.

use std::path::PathBuf;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::{RunConfig, TestMode};
use crate::algorithm::{Algorithm, Ensemble, EnsembleFactory, EnsemblePolicy, ALGORITHM_LENGTH};
use crate::error::{Error, Result};
use crate::hyper::{HyperRunner, RunMode};
use crate::output::{output_path, ResultWriter, RunRow};
use crate::search::FitnessSweep;

/// What a finished batch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// The result file.
    pub output: PathBuf,
    /// Ensembles evaluated.
    pub ensembles: usize,
    /// Rows written (runs, or sweep attempts).
    pub completed_runs: usize,
    /// Runs skipped because they failed.
    pub failed_runs: usize,
}

/// One hyper-heuristic run waiting to execute.
struct Job {
    repetition: usize,
    seed: u64,
    ensemble: Ensemble,
}

/// Runs one configured batch and writes its result file.
///
/// # Examples
///
/// ```no_run
/// use u_hyperheur::algorithm::EnsemblePolicy;
/// use u_hyperheur::domain::ProblemKind;
/// use u_hyperheur::experiment::{Orchestrator, RunConfig, TestMode};
///
/// let config = RunConfig::new(
///     ProblemKind::BinPacking,
///     TestMode::Ensemble { id: 0, policy: EnsemblePolicy::Default },
/// );
/// let summary = Orchestrator::new(config).run().unwrap();
/// println!("results in {}", summary.output.display());
/// ```
pub struct Orchestrator {
    config: RunConfig,
}

impl Orchestrator {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs the batch.
    ///
    /// Failing to create the result file aborts the batch. A single failed
    /// run is logged, counted and skipped.
    pub fn run(&self) -> Result<BatchSummary> {
        self.config.validate().map_err(Error::Config)?;
        let mut factory = self.factory();
        match self.config.mode {
            TestMode::Fitness { instance } => self.run_fitness(instance),
            TestMode::Ensemble { id, policy } => {
                let elite = self.config.problem.elite_algorithms();
                let ensemble = build_ensemble(&mut factory, policy, id, elite);
                self.run_ensembles(factory, vec![ensemble], id, policy)
            }
            TestMode::Algorithms { start, end } => {
                let ensembles = algorithm_ensembles(factory.all_algorithms(), start, end);
                let repetitions = self.config.repetitions;
                self.run_ensembles(factory, ensembles, repetitions, EnsemblePolicy::Default)
            }
        }
    }

    fn factory(&self) -> EnsembleFactory {
        let span = self
            .config
            .problem
            .heuristic_count()
            .saturating_sub(self.config.hyper.search.heuristic_offset);
        EnsembleFactory::new(span, self.config.ensemble_seed)
            .with_ensemble_size(self.config.ensemble_size)
    }

    /// `number` is the file-name number: the ensemble id or the
    /// repetition count.
    fn run_ensembles(
        &self,
        mut factory: EnsembleFactory,
        ensembles: Vec<Ensemble>,
        number: usize,
        policy: EnsemblePolicy,
    ) -> Result<BatchSummary> {
        let config = &self.config;
        let mode = config.mode.run_mode();

        let path = output_path(
            &config.output_dir,
            config.problem,
            config.mode.output_category(),
            number,
        )?;
        let writer = ResultWriter::create(&path)?;
        writer.write_header(RunRow::header(mode.label_header()))?;
        info!(
            problem = %config.problem,
            ensembles = ensembles.len(),
            instances = config.instance_count(),
            repetitions = config.repetitions,
            output = %path.display(),
            "starting batch"
        );

        let mut summary = BatchSummary {
            output: path,
            ensembles: ensembles.len(),
            completed_runs: 0,
            failed_runs: 0,
        };
        for mut ensemble in ensembles {
            info!(ensemble = ensemble.id(), algorithms = %ensemble.label(), "evaluating ensemble");
            for instance in 0..config.instance_count() {
                let jobs = plan_jobs(&mut factory, &mut ensemble, policy, config);
                for (repetition, result) in self.execute(jobs, instance, mode, policy) {
                    match result.and_then(|row| writer.append(&row)) {
                        Ok(()) => summary.completed_runs += 1,
                        Err(e) => {
                            warn!(instance, repetition, error = %e, "run skipped");
                            summary.failed_runs += 1;
                        }
                    }
                }
                debug!(ensemble = ensemble.id(), instance, "instance finished");
            }
        }

        info!(
            completed = summary.completed_runs,
            failed = summary.failed_runs,
            "batch finished"
        );
        Ok(summary)
    }

    /// Runs the jobs of one instance; results come back in job order.
    fn execute(
        &self,
        jobs: Vec<Job>,
        instance: usize,
        mode: RunMode,
        policy: EnsemblePolicy,
    ) -> Vec<(usize, Result<RunRow>)> {
        let run = |job: Job| {
            let repetition = job.repetition;
            (repetition, self.run_one(job, instance, mode, policy))
        };

        #[cfg(feature = "parallel")]
        {
            jobs.into_par_iter().map(run).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            jobs.into_iter().map(run).collect()
        }
    }

    fn run_one(&self, job: Job, instance: usize, mode: RunMode, policy: EnsemblePolicy) -> Result<RunRow> {
        let mut runner = HyperRunner::new(
            job.ensemble,
            job.seed,
            job.seed,
            instance,
            job.repetition,
            mode,
            policy,
        )
        .with_config(self.config.hyper.clone());
        runner.load_problem_domain(self.config.problem.build(job.seed));
        runner.run()
    }

    fn run_fitness(&self, instance: usize) -> Result<BatchSummary> {
        let config = &self.config;
        let mut domain = config.problem.build(config.base_seed);
        domain.load_instance(instance)?;

        let path = output_path(
            &config.output_dir,
            config.problem,
            config.mode.output_category(),
            instance,
        )?;
        let writer = ResultWriter::create(&path)?;
        let outcome = FitnessSweep::new(config.hyper.search.clone())
            .with_time_limit(config.hyper.time_limit)
            .with_record_partial(config.hyper.record_partial)
            .run(domain.as_mut(), &writer)?;

        Ok(BatchSummary {
            output: path,
            ensembles: 0,
            completed_runs: outcome.rows.len(),
            failed_runs: 0,
        })
    }
}

/// Calls `policy` `id + 1` times and keeps the last ensemble, so the
/// result carries the requested id.
pub fn build_ensemble(
    factory: &mut EnsembleFactory,
    policy: EnsemblePolicy,
    id: usize,
    elite: &[[usize; ALGORITHM_LENGTH]],
) -> Ensemble {
    let mut ensemble = factory.generate(policy, elite);
    for _ in 0..id {
        ensemble = factory.generate(policy, elite);
    }
    ensemble
}

/// One single-algorithm ensemble per catalog index in `[start, end)`,
/// clamped to the catalog.
pub fn algorithm_ensembles(
    catalog: &[Algorithm],
    start: Option<usize>,
    end: Option<usize>,
) -> Vec<Ensemble> {
    let end = end.unwrap_or(catalog.len()).min(catalog.len());
    let start = start.unwrap_or(0).min(end);
    catalog[start..end]
        .iter()
        .map(|algorithm| Ensemble::with_algorithms(algorithm.index(), vec![*algorithm]))
        .collect()
}

/// Seeds restart at the base seed for every instance and advance by one
/// per repetition. A random ensemble is redrawn, keeping its id, after
/// every repetition.
fn plan_jobs(
    factory: &mut EnsembleFactory,
    ensemble: &mut Ensemble,
    policy: EnsemblePolicy,
    config: &RunConfig,
) -> Vec<Job> {
    let mut jobs = Vec::with_capacity(config.repetitions);
    for repetition in 0..config.repetitions {
        jobs.push(Job {
            repetition,
            seed: config.base_seed + repetition as u64,
            ensemble: ensemble.clone(),
        });
        if policy == EnsemblePolicy::Random {
            *ensemble = factory.generate_random_ensemble_with_id(ensemble.id());
        }
    }
    jobs
}
