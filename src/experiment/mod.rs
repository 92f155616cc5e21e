//! Experiment batches and the command-line front end.
//!
//! A [`RunConfig`] names a problem domain and a [`TestMode`]:
//!
//! - **Ensemble** (`-e`): one ensemble built by the default, elite or random
//!   policy, run `repetitions` times on every instance
//! - **Algorithms** (`-a`): each catalog algorithm as its own ensemble
//! - **Fitness** (`-f`): one sweep over the whole catalog on one instance
//!
//! The [`Orchestrator`] executes the batch and writes one CSV file.

mod cli;
mod config;
mod orchestrator;

pub use cli::Cli;
pub use config::{RunConfig, TestMode};
pub use orchestrator::{algorithm_ensembles, build_ensemble, BatchSummary, Orchestrator};
