//! Benchmark low-level heuristic combinations across problem domains.
//!
//! An *algorithm* is an ordered triple of problem-specific low-level
//! heuristics. Each algorithm runs as a plateau-driven iterated local
//! search: its heuristics are applied in turn, improvements are kept, and
//! the algorithm is abandoned once a full pass ends with too many
//! non-improving applications in a row.
//!
//! - **Algorithm catalog** ([`algorithm`]): enumeration of every triple for
//!   a heuristic count, plus default, elite and random ensembles.
//! - **Problem domains** ([`domain`]): bin packing, 3-SAT, permutation flow
//!   shop and personnel scheduling behind one slot-based trait.
//! - **Search engine** ([`search`]): the per-algorithm local search, the
//!   cycler that chains attempts under a time budget, and a fitness sweep.
//! - **Hyper-heuristic driver** ([`hyper`]): one ensemble on one instance.
//! - **Experiments** ([`experiment`]): batches over instances and seeded
//!   repetitions, and the `diverse-heuristics` command line.
//! - **Output** ([`output`]): CSV result rows and file layout.
//!
//! # Example
//!
//! ```
//! use u_hyperheur::algorithm::AlgorithmSpace;
//! use u_hyperheur::domain::{ProblemDomain, ProblemKind};
//! use u_hyperheur::search::{AlgorithmCycler, TimeBudget};
//!
//! let kind = ProblemKind::FlowShop;
//! let mut domain = kind.build(1000);
//! domain.load_instance(0).unwrap();
//!
//! let catalog = AlgorithmSpace::for_domain(kind.heuristic_count(), 1);
//! let outcome = AlgorithmCycler::default().run(domain.as_mut(), &catalog, &TimeBudget::unlimited());
//! assert_eq!(outcome.rows.len(), catalog.len());
//! ```

pub mod algorithm;
pub mod domain;
mod error;
pub mod experiment;
pub mod hyper;
pub mod logging;
pub mod output;
pub mod search;

pub use error::{Error, Result};
