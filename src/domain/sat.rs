//! Boolean satisfiability (MAX-SAT over random 3-SAT formulas).
//!
//! The objective is the number of unsatisfied clauses.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::ProblemModel;

const INSTANCE_COUNT: usize = 5;
const INSTANCE_SEED: u64 = 0x5A_0000;
/// Clause-to-variable ratio near the 3-SAT phase transition.
const CLAUSE_RATIO: f64 = 4.26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub variable: usize,
    pub negated: bool,
}

impl Literal {
    fn holds(&self, assignment: &[bool]) -> bool {
        assignment[self.variable] != self.negated
    }
}

/// A CNF formula with three literals per clause.
#[derive(Debug, Clone)]
pub struct Sat {
    variables: usize,
    clauses: Vec<[Literal; 3]>,
}

impl Sat {
    pub fn new(variables: usize, clauses: Vec<[Literal; 3]>) -> Self {
        assert!(
            clauses.iter().flatten().all(|lit| lit.variable < variables),
            "literal refers to unknown variable"
        );
        Self { variables, clauses }
    }

    pub fn variable_count(&self) -> usize {
        self.variables
    }

    fn unsatisfied(&self, assignment: &[bool]) -> Vec<usize> {
        self.clauses
            .iter()
            .enumerate()
            .filter(|(_, clause)| !clause.iter().any(|lit| lit.holds(assignment)))
            .map(|(i, _)| i)
            .collect()
    }

    fn broken(&self, assignment: &[bool]) -> usize {
        self.clauses
            .iter()
            .filter(|clause| !clause.iter().any(|lit| lit.holds(assignment)))
            .count()
    }

    fn random_unsatisfied<R: Rng>(&self, assignment: &[bool], rng: &mut R) -> Option<usize> {
        let open = self.unsatisfied(assignment);
        if open.is_empty() {
            None
        } else {
            Some(open[rng.random_range(0..open.len())])
        }
    }

    /// GSAT-style move: in a random unsatisfied clause, flip the variable
    /// that leaves the fewest clauses broken, unless every flip is worse.
    fn greedy_flip<R: Rng>(&self, assignment: &[bool], rng: &mut R) -> Vec<bool> {
        let mut next = assignment.to_vec();
        let Some(clause) = self.random_unsatisfied(assignment, rng) else {
            return next;
        };
        let current = self.broken(assignment);
        let best = self.clauses[clause]
            .iter()
            .map(|lit| {
                let mut trial = next.clone();
                trial[lit.variable] = !trial[lit.variable];
                (self.broken(&trial), lit.variable)
            })
            .min();
        if let Some((broken, variable)) = best {
            if broken <= current {
                next[variable] = !next[variable];
            }
        }
        next
    }

    fn flip_random<R: Rng>(&self, assignment: &[bool], rng: &mut R) -> Vec<bool> {
        let mut next = assignment.to_vec();
        if self.variables > 0 {
            let variable = rng.random_range(0..self.variables);
            next[variable] = !next[variable];
        }
        next
    }

    /// WalkSAT random walk: flip a random variable of a random broken clause.
    fn walk<R: Rng>(&self, assignment: &[bool], rng: &mut R) -> Vec<bool> {
        match self.random_unsatisfied(assignment, rng) {
            Some(clause) => {
                let mut next = assignment.to_vec();
                let lit = self.clauses[clause][rng.random_range(0..3)];
                next[lit.variable] = !next[lit.variable];
                next
            }
            None => self.flip_random(assignment, rng),
        }
    }

    /// Re-randomises a tenth of the variables.
    fn ruin<R: Rng>(&self, assignment: &[bool], rng: &mut R) -> Vec<bool> {
        let mut next = assignment.to_vec();
        if self.variables == 0 {
            return next;
        }
        for _ in 0..(self.variables / 10).max(1) {
            let variable = rng.random_range(0..self.variables);
            next[variable] = rng.random_bool(0.5);
        }
        next
    }
}

impl ProblemModel for Sat {
    type Solution = Vec<bool>;
    const NAME: &'static str = "SAT";
    const HEURISTIC_COUNT: usize = 4;

    fn instance_count() -> usize {
        INSTANCE_COUNT
    }

    fn load(index: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(INSTANCE_SEED + index as u64);
        let variables = 50 + 25 * index;
        let clause_count = (variables as f64 * CLAUSE_RATIO).round() as usize;
        let clauses = (0..clause_count)
            .map(|_| {
                let picked = rand::seq::index::sample(&mut rng, variables, 3);
                let mut clause = [Literal {
                    variable: 0,
                    negated: false,
                }; 3];
                for (slot, variable) in clause.iter_mut().zip(picked) {
                    *slot = Literal {
                        variable,
                        negated: rng.random_bool(0.5),
                    };
                }
                clause
            })
            .collect();
        Self::new(variables, clauses)
    }

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
        (0..self.variables).map(|_| rng.random_bool(0.5)).collect()
    }

    fn cost(&self, assignment: &Vec<bool>) -> f64 {
        self.broken(assignment) as f64
    }

    fn apply_heuristic<R: Rng>(
        &self,
        heuristic: usize,
        assignment: &Vec<bool>,
        rng: &mut R,
    ) -> Vec<bool> {
        match heuristic {
            0 => self.greedy_flip(assignment, rng),
            1 => self.flip_random(assignment, rng),
            2 => self.walk(assignment, rng),
            3 => self.ruin(assignment, rng),
            _ => unreachable!("SAT has {} heuristics", Self::HEURISTIC_COUNT),
        }
    }
}
