//! Algorithm catalog and ensembles.
//!
//! An *algorithm* is an ordered triple of low-level heuristic ids. The
//! [`AlgorithmSpace`] enumerates every triple for a heuristic count, and
//! an [`Ensemble`] groups catalog entries that are evaluated together.
//! [`EnsembleFactory`] implements the default, elite and random
//! construction policies.

mod ensemble;
mod factory;
mod space;

pub use ensemble::Ensemble;
pub use factory::{EnsembleFactory, EnsemblePolicy};
pub use space::{Algorithm, AlgorithmSpace, ALGORITHM_LENGTH};
