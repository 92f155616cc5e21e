//! Hyper-heuristic driver.
//!
//! A [`HyperRunner`] evaluates one ensemble on one problem instance: it
//! loads the instance, cycles the ensemble's algorithms under a time
//! budget, and reports a single [`RunRow`](crate::output::RunRow).

mod config;
mod runner;

pub use config::{HyperConfig, RunMode};
pub use runner::HyperRunner;
