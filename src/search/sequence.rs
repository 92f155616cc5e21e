//! Plateau-driven local search for a single algorithm.
//!
//! # Algorithm
//!
//! 1. The working slot starts as a copy of the best-known slot
//! 2. Apply the next heuristic of the algorithm to the working slot,
//!    writing the candidate slot
//! 3. If the candidate beats the attempt's best (`delta > 0`), copy it
//!    into the working slot and reset the non-improvement counter;
//!    otherwise increment the counter
//! 4. After every full pass over the algorithm, abandon it once the
//!    counter has reached the stagnation threshold
//!
//! The first application of an attempt sets the baseline: it is copied
//! into the working slot and becomes the current best, but there is no
//! earlier value for it to improve on, so it counts as non-improving.

use tracing::trace;

use super::config::SearchConfig;
use super::types::{
    AttemptResult, SearchState, SearchStatus, CANDIDATE_SLOT, WORKING_SLOT,
};
use crate::algorithm::Algorithm;
use crate::domain::ProblemDomain;

/// One attempt of one algorithm against a loaded domain.
///
/// # Examples
///
/// ```
/// use u_hyperheur::algorithm::Algorithm;
/// use u_hyperheur::domain::{ProblemDomain, ProblemKind};
/// use u_hyperheur::search::{SearchConfig, SequenceSearch, BEST_SLOT, SLOT_COUNT, WORKING_SLOT};
///
/// let mut domain = ProblemKind::FlowShop.build(1000);
/// domain.load_instance(0).unwrap();
/// domain.set_memory_size(SLOT_COUNT);
/// domain.initialise_solution(BEST_SLOT);
/// domain.copy_solution(BEST_SLOT, WORKING_SLOT);
///
/// let algorithm = Algorithm::new(0, [0, 1, 2]);
/// let config = SearchConfig::default();
/// let mut search = SequenceSearch::new(&algorithm, domain.best_solution_value(), &config);
/// while search.iterate(domain.as_mut()) {}
/// assert!(search.result().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct SequenceSearch<'a> {
    algorithm: &'a Algorithm,
    threshold: usize,
    starting_fitness: f64,
    state: SearchState,
    status: SearchStatus,
}

impl<'a> SequenceSearch<'a> {
    /// Starts a fresh attempt. The caller has already reset the working slot.
    pub fn new(algorithm: &'a Algorithm, starting_fitness: f64, config: &SearchConfig) -> Self {
        config.validate().expect("invalid SearchConfig");
        Self {
            algorithm,
            threshold: config.stagnation_threshold,
            starting_fitness,
            state: SearchState::default(),
            status: SearchStatus::Running,
        }
    }

    pub fn algorithm(&self) -> &'a Algorithm {
        self.algorithm
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Applies one heuristic. Returns whether the attempt is still running.
    pub fn step<D: ProblemDomain + ?Sized>(&mut self, domain: &mut D) -> bool {
        if self.status == SearchStatus::Abandoned {
            return false;
        }

        let heuristics = self.algorithm.heuristics();
        let heuristic = heuristics[self.state.position];
        let value = domain.apply_heuristic(heuristic, WORKING_SLOT, CANDIDATE_SLOT);
        self.state.applications += 1;

        let baseline = self.state.current_best == f64::INFINITY;
        let delta = self.state.current_best - value;
        if delta > 0.0 {
            domain.copy_solution(CANDIDATE_SLOT, WORKING_SLOT);
            self.state.current_best = value;
            self.state.non_improving = if baseline { 1 } else { 0 };
        } else {
            self.state.non_improving += 1;
        }
        trace!(
            algorithm = self.algorithm.index(),
            heuristic,
            value,
            non_improving = self.state.non_improving,
            "applied heuristic"
        );

        self.state.position += 1;
        if self.state.position == heuristics.len() {
            self.state.position = 0;
            self.state.iterations += 1;
            if self.state.non_improving >= self.threshold {
                self.status = SearchStatus::Abandoned;
            }
        }
        self.status == SearchStatus::Running
    }

    /// Applies heuristics up to the end of the current pass.
    /// Returns whether the attempt is still running.
    pub fn iterate<D: ProblemDomain + ?Sized>(&mut self, domain: &mut D) -> bool {
        loop {
            let running = self.step(domain);
            if !running || self.state.position == 0 {
                return running;
            }
        }
    }

    /// The attempt's outcome, once abandoned.
    pub fn result(&self) -> Option<AttemptResult> {
        match self.status {
            SearchStatus::Abandoned => Some(self.snapshot()),
            SearchStatus::Running => None,
        }
    }

    /// The attempt's progress so far, whatever its status.
    pub fn snapshot(&self) -> AttemptResult {
        AttemptResult {
            starting_fitness: self.starting_fitness,
            current_best: self.state.current_best,
            iterations: self.state.iterations,
            applications: self.state.applications,
        }
    }
}
