//! Core traits for problem domains.

use rand::Rng;
use thiserror::Error;

/// Slot-based problem contract consumed by the search engine.
///
/// A domain stores candidate solutions in numbered memory slots. Heuristics
/// read one slot and write another, returning the objective value of the
/// written solution. All domains minimise.
///
/// Misuse (unknown heuristic id, empty source slot, slot outside memory,
/// use before [`load_instance`](ProblemDomain::load_instance)) panics.
pub trait ProblemDomain: Send {
    /// Human-readable domain name.
    fn name(&self) -> &'static str;

    /// Number of low-level heuristics this domain implements.
    fn heuristic_count(&self) -> usize;

    /// Number of bundled instances.
    fn instance_count(&self) -> usize;

    /// Loads instance `index` and clears all memory slots.
    fn load_instance(&mut self, index: usize) -> Result<(), DomainError>;

    /// Resizes solution memory to `size` slots.
    fn set_memory_size(&mut self, size: usize);

    /// Writes a fresh initial solution into `slot`.
    fn initialise_solution(&mut self, slot: usize);

    /// Copies the solution in `src` over `dst`.
    fn copy_solution(&mut self, src: usize, dst: usize);

    /// Applies heuristic `heuristic` to the solution in `src`, writes the
    /// result into `dst` and returns its objective value.
    fn apply_heuristic(&mut self, heuristic: usize, src: usize, dst: usize) -> f64;

    /// Objective value of the solution in `slot`.
    fn function_value(&self, slot: usize) -> f64;

    /// Best objective value evaluated since the instance was loaded.
    fn best_solution_value(&self) -> f64;
}

/// Recoverable domain errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("instance {index} out of range ({count} instances available)")]
    InstanceOutOfRange { index: usize, count: usize },
}

/// A concrete combinatorial problem with a fixed set of heuristics.
///
/// Implementors describe the solution representation, objective and
/// heuristics; [`SlotDomain`](super::SlotDomain) adds slot storage, seeded
/// randomness and best-value tracking on top.
///
/// # Minimization
///
/// `cost` is minimised. Heuristics may return a worse solution.
pub trait ProblemModel: Sized + Send {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Domain name.
    const NAME: &'static str;

    /// Number of heuristics understood by `apply_heuristic`.
    const HEURISTIC_COUNT: usize;

    /// Number of bundled instances.
    fn instance_count() -> usize;

    /// Builds bundled instance `index` (deterministic for each index).
    ///
    /// Callers guarantee `index < instance_count()`.
    fn load(index: usize) -> Self;

    /// Creates an initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Applies heuristic `heuristic` to `solution`, returning the result.
    fn apply_heuristic<R: Rng>(
        &self,
        heuristic: usize,
        solution: &Self::Solution,
        rng: &mut R,
    ) -> Self::Solution;
}
