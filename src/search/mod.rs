//! Plateau-driven search engine.
//!
//! A [`SequenceSearch`] runs one algorithm (a fixed heuristic triple) as an
//! iterated local search until it stagnates. An [`AlgorithmCycler`] chains
//! attempts over a list of algorithms, restarting each one from the same
//! initial solution, under a [`TimeBudget`].
//!
//! # Solution slots
//!
//! | Slot | Role |
//! |------|------|
//! | [`BEST_SLOT`] | initial solution, never touched by the search |
//! | [`WORKING_SLOT`] | solution the current attempt improves |
//! | [`CANDIDATE_SLOT`] | output of every heuristic application |

mod budget;
mod config;
mod cycler;
mod sequence;
mod sweep;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use budget::TimeBudget;
pub use config::{CycleConfig, CycleMode, SearchConfig};
pub use cycler::{AlgorithmCycler, CycleOutcome, CycleStatus};
pub use sequence::SequenceSearch;
pub use sweep::FitnessSweep;
pub use types::{
    AttemptResult, SearchState, SearchStatus, BEST_SLOT, CANDIDATE_SLOT, SLOT_COUNT, WORKING_SLOT,
};
