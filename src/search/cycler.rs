//! Cycling a list of algorithms over one loaded instance.

use tracing::debug;

use super::budget::TimeBudget;
use super::config::{CycleConfig, CycleMode, SearchConfig};
use super::sequence::SequenceSearch;
use super::types::{BEST_SLOT, SLOT_COUNT, WORKING_SLOT};
use crate::algorithm::Algorithm;
use crate::domain::ProblemDomain;
use crate::output::AttemptRow;

/// Why a cycle stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CycleStatus {
    /// Every algorithm was abandoned once (sweep mode), or the list was empty.
    Exhausted,
    /// The configured attempt limit was reached.
    AttemptLimit,
    /// The time budget ran out.
    TimedOut,
}

/// Outcome of [`AlgorithmCycler::run`].
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    /// One row per abandoned attempt, in completion order.
    pub rows: Vec<AttemptRow>,
    pub status: CycleStatus,
    /// Objective value of the initial solution.
    pub starting_fitness: f64,
    /// Best objective value the domain saw over the whole cycle.
    pub best_fitness: f64,
    /// Completed attempts.
    pub attempts: usize,
}

/// Runs [`SequenceSearch`] attempts back to back.
///
/// Every attempt starts from the initial solution held in the best slot,
/// so attempts are independent of one another and comparable.
///
/// # Examples
///
/// ```
/// use u_hyperheur::algorithm::AlgorithmSpace;
/// use u_hyperheur::domain::{ProblemDomain, ProblemKind};
/// use u_hyperheur::search::{AlgorithmCycler, CycleConfig, CycleStatus, SearchConfig, TimeBudget};
///
/// let mut domain = ProblemKind::Sat.build(1000);
/// domain.load_instance(0).unwrap();
///
/// let algorithms = AlgorithmSpace::enumerate(2);
/// let cycler = AlgorithmCycler::new(SearchConfig::default(), CycleConfig::default());
/// let outcome = cycler.run(domain.as_mut(), &algorithms, &TimeBudget::unlimited());
/// assert_eq!(outcome.status, CycleStatus::Exhausted);
/// assert_eq!(outcome.rows.len(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AlgorithmCycler {
    search: SearchConfig,
    cycle: CycleConfig,
}

impl AlgorithmCycler {
    pub fn new(search: SearchConfig, cycle: CycleConfig) -> Self {
        search.validate().expect("invalid SearchConfig");
        Self { search, cycle }
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    pub fn cycle_config(&self) -> &CycleConfig {
        &self.cycle
    }

    /// Initialises a solution and runs the algorithms against it until the
    /// list is exhausted, the attempt limit is hit, or the budget runs out.
    ///
    /// The budget is polled before every pass; an expired budget yields an
    /// outcome with no rows and no heuristic applied.
    pub fn run<D: ProblemDomain + ?Sized>(
        &self,
        domain: &mut D,
        algorithms: &[Algorithm],
        budget: &TimeBudget,
    ) -> CycleOutcome {
        domain.set_memory_size(SLOT_COUNT);
        domain.initialise_solution(BEST_SLOT);
        let starting_fitness = domain.function_value(BEST_SLOT);

        let mut rows = Vec::new();
        let mut attempts = 0;
        let status = self.cycle_through(
            domain,
            algorithms,
            budget,
            starting_fitness,
            &mut rows,
            &mut attempts,
        );
        debug!(?status, attempts, rows = rows.len(), "cycle finished");

        CycleOutcome {
            rows,
            status,
            starting_fitness,
            best_fitness: domain.best_solution_value(),
            attempts,
        }
    }

    fn cycle_through<D: ProblemDomain + ?Sized>(
        &self,
        domain: &mut D,
        algorithms: &[Algorithm],
        budget: &TimeBudget,
        starting_fitness: f64,
        rows: &mut Vec<AttemptRow>,
        attempts: &mut usize,
    ) -> CycleStatus {
        if algorithms.is_empty() {
            return CycleStatus::Exhausted;
        }

        let mut cursor = 0;
        loop {
            if self.cycle.max_attempts.is_some_and(|max| *attempts >= max) {
                return CycleStatus::AttemptLimit;
            }

            let algorithm = &algorithms[cursor];
            domain.copy_solution(BEST_SLOT, WORKING_SLOT);
            let mut search = SequenceSearch::new(algorithm, starting_fitness, &self.search);

            loop {
                if budget.has_expired() {
                    if self.cycle.record_partial && search.state().applications > 0 {
                        rows.push(attempt_row(algorithm, &search));
                    }
                    return CycleStatus::TimedOut;
                }
                if !search.iterate(domain) {
                    break;
                }
            }

            let row = attempt_row(algorithm, &search);
            debug!(
                algorithm = %algorithm,
                fitness = row.fitness,
                iterations = row.iterations,
                "algorithm abandoned"
            );
            rows.push(row);
            *attempts += 1;

            cursor += 1;
            if cursor == algorithms.len() {
                match self.cycle.mode {
                    CycleMode::Sweep => return CycleStatus::Exhausted,
                    CycleMode::Repeat => cursor = 0,
                }
            }
        }
    }
}

fn attempt_row(algorithm: &Algorithm, search: &SequenceSearch<'_>) -> AttemptRow {
    let result = search.snapshot();
    AttemptRow {
        starting_fitness: result.starting_fitness,
        algorithm_index: algorithm.index(),
        fitness: result.current_best,
        iterations: result.iterations,
    }
}
