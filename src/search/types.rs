//! Search state and attempt results.

/// Solution slot holding the best-known (initial) solution of a session.
pub const BEST_SLOT: usize = 0;
/// Solution slot the current algorithm works on.
pub const WORKING_SLOT: usize = 1;
/// Scratch slot every heuristic application writes to.
pub const CANDIDATE_SLOT: usize = 2;
/// Memory size requested from the domain.
pub const SLOT_COUNT: usize = 3;

/// Lifecycle of one algorithm attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Running,
    Abandoned,
}

/// Mutable state of one algorithm attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// Best objective value accepted during this attempt.
    pub current_best: f64,
    /// Consecutive applications without improvement.
    pub non_improving: usize,
    /// Heuristic applications so far.
    pub applications: usize,
    /// Completed passes over the algorithm.
    pub iterations: usize,
    /// Index of the next heuristic within the algorithm.
    pub position: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            current_best: f64::INFINITY,
            non_improving: 0,
            applications: 0,
            iterations: 0,
            position: 0,
        }
    }
}

/// Outcome of an abandoned (or interrupted) attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttemptResult {
    pub starting_fitness: f64,
    pub current_best: f64,
    pub iterations: usize,
    pub applications: usize,
}
