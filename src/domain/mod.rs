//! Problem domains.
//!
//! The search engine talks to problems only through the slot-based
//! [`ProblemDomain`] trait. Four bundled domains implement it via
//! [`SlotDomain`], and [`ProblemKind`] is the closed set used to pick one
//! from configuration.
//!
//! Every bundled domain exposes four heuristics in the same layout:
//!
//! | id | role |
//! |----|------|
//! | 0  | local search (never worsens) |
//! | 1  | small random mutation |
//! | 2  | second mutation (swap / shift / walk) |
//! | 3  | ruin-and-recreate |

mod bin_packing;
mod flow_shop;
mod personnel;
mod sat;
mod slots;
mod types;

use std::fmt;

pub use bin_packing::{BinPacking, Packing};
pub use flow_shop::FlowShop;
pub use personnel::{PersonnelScheduling, Roster};
pub use sat::{Literal, Sat};
pub use slots::SlotDomain;
pub use types::{DomainError, ProblemDomain, ProblemModel};

use crate::algorithm::ALGORITHM_LENGTH;

/// The bundled problem domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ProblemKind {
    BinPacking,
    Sat,
    FlowShop,
    PersonnelScheduling,
}

impl ProblemKind {
    pub const ALL: [ProblemKind; 4] = [
        ProblemKind::BinPacking,
        ProblemKind::Sat,
        ProblemKind::FlowShop,
        ProblemKind::PersonnelScheduling,
    ];

    /// Parses a command-line flag such as `--bin`.
    pub fn from_flag(flag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.flag() == flag)
    }

    pub fn flag(self) -> &'static str {
        match self {
            ProblemKind::BinPacking => "--bin",
            ProblemKind::Sat => "--sat",
            ProblemKind::FlowShop => "--flo",
            ProblemKind::PersonnelScheduling => "--per",
        }
    }

    /// Short token used in output file names.
    pub fn token(self) -> &'static str {
        &self.flag()[2..]
    }

    /// Builds a fresh domain whose heuristics draw from `seed`.
    pub fn build(self, seed: u64) -> Box<dyn ProblemDomain> {
        match self {
            ProblemKind::BinPacking => Box::new(SlotDomain::<BinPacking>::new(seed)),
            ProblemKind::Sat => Box::new(SlotDomain::<Sat>::new(seed)),
            ProblemKind::FlowShop => Box::new(SlotDomain::<FlowShop>::new(seed)),
            ProblemKind::PersonnelScheduling => {
                Box::new(SlotDomain::<PersonnelScheduling>::new(seed))
            }
        }
    }

    pub fn heuristic_count(self) -> usize {
        match self {
            ProblemKind::BinPacking => BinPacking::HEURISTIC_COUNT,
            ProblemKind::Sat => Sat::HEURISTIC_COUNT,
            ProblemKind::FlowShop => FlowShop::HEURISTIC_COUNT,
            ProblemKind::PersonnelScheduling => PersonnelScheduling::HEURISTIC_COUNT,
        }
    }

    pub fn instance_count(self) -> usize {
        match self {
            ProblemKind::BinPacking => BinPacking::instance_count(),
            ProblemKind::Sat => Sat::instance_count(),
            ProblemKind::FlowShop => FlowShop::instance_count(),
            ProblemKind::PersonnelScheduling => PersonnelScheduling::instance_count(),
        }
    }

    /// Hand-picked heuristic triples that perform well on this domain.
    pub fn elite_algorithms(self) -> &'static [[usize; ALGORITHM_LENGTH]] {
        match self {
            ProblemKind::BinPacking => &[[0, 1, 0], [0, 2, 0], [1, 2, 0], [2, 0, 0], [0, 0, 1]],
            ProblemKind::Sat => &[[0, 0, 2], [0, 2, 0], [2, 0, 0], [0, 1, 0]],
            ProblemKind::FlowShop => &[[0, 1, 0], [0, 2, 0], [2, 0, 0], [1, 0, 2]],
            ProblemKind::PersonnelScheduling => &[[0, 0, 1], [0, 2, 0], [1, 0, 0], [0, 0, 2]],
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProblemKind::BinPacking => BinPacking::NAME,
            ProblemKind::Sat => Sat::NAME,
            ProblemKind::FlowShop => FlowShop::NAME,
            ProblemKind::PersonnelScheduling => PersonnelScheduling::NAME,
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_round_trip() {
        for kind in ProblemKind::ALL {
            assert_eq!(ProblemKind::from_flag(kind.flag()), Some(kind));
        }
        assert_eq!(ProblemKind::from_flag("--vrp"), None);
        assert_eq!(ProblemKind::Sat.token(), "sat");
    }

    #[test]
    fn test_built_domains_match_kind() {
        for kind in ProblemKind::ALL {
            let mut domain = kind.build(1000);
            assert_eq!(domain.name(), kind.to_string());
            assert_eq!(domain.heuristic_count(), kind.heuristic_count());
            assert_eq!(domain.instance_count(), kind.instance_count());

            domain.load_instance(0).unwrap();
            domain.set_memory_size(3);
            domain.initialise_solution(0);
            for h in 0..domain.heuristic_count() {
                let value = domain.apply_heuristic(h, 0, 2);
                assert!(value.is_finite(), "{kind}: heuristic {h} returned {value}");
            }
            assert!(domain.best_solution_value() <= domain.function_value(0));
        }
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        for kind in ProblemKind::ALL {
            let trace = |seed: u64| {
                let mut domain = kind.build(seed);
                domain.load_instance(1).unwrap();
                domain.set_memory_size(3);
                domain.initialise_solution(0);
                domain.copy_solution(0, 1);
                (0..12)
                    .map(|step| domain.apply_heuristic(step % 4, 1, 2))
                    .collect::<Vec<f64>>()
            };
            assert_eq!(trace(1000), trace(1000), "{kind} not reproducible");
        }
    }

    #[test]
    fn test_elite_algorithms_within_default_catalog() {
        for kind in ProblemKind::ALL {
            let span = kind.heuristic_count() - 1;
            assert!(kind
                .elite_algorithms()
                .iter()
                .flatten()
                .all(|&h| h < span));
        }
    }
}
