//! Slot memory shared by every bundled domain.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::types::{DomainError, ProblemDomain, ProblemModel};

const DEFAULT_MEMORY_SIZE: usize = 2;

#[derive(Debug, Clone)]
struct Stored<S> {
    solution: S,
    value: f64,
}

/// Adapts a [`ProblemModel`] to the slot-based [`ProblemDomain`] contract.
///
/// All randomness used by initialisation and heuristics comes from one
/// `StdRng` seeded at construction, so identical seeds and call sequences
/// reproduce identical objective values.
pub struct SlotDomain<M: ProblemModel> {
    rng: StdRng,
    model: Option<M>,
    memory: Vec<Option<Stored<M::Solution>>>,
    best_value: f64,
}

impl<M: ProblemModel> SlotDomain<M> {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            model: None,
            memory: vec![None; DEFAULT_MEMORY_SIZE],
            best_value: f64::INFINITY,
        }
    }

    /// Solution stored in `slot`, if any.
    pub fn solution(&self, slot: usize) -> Option<&M::Solution> {
        self.memory.get(slot)?.as_ref().map(|s| &s.solution)
    }

    fn stored(&self, slot: usize) -> &Stored<M::Solution> {
        self.memory
            .get(slot)
            .unwrap_or_else(|| panic!("slot {slot} outside memory of size {}", self.memory.len()))
            .as_ref()
            .unwrap_or_else(|| panic!("slot {slot} holds no solution"))
    }

    fn store(&mut self, slot: usize, solution: M::Solution, value: f64) {
        let size = self.memory.len();
        let cell = self
            .memory
            .get_mut(slot)
            .unwrap_or_else(|| panic!("slot {slot} outside memory of size {size}"));
        *cell = Some(Stored { solution, value });
        if value < self.best_value {
            self.best_value = value;
        }
    }
}

impl<M: ProblemModel> ProblemDomain for SlotDomain<M> {
    fn name(&self) -> &'static str {
        M::NAME
    }

    fn heuristic_count(&self) -> usize {
        M::HEURISTIC_COUNT
    }

    fn instance_count(&self) -> usize {
        M::instance_count()
    }

    fn load_instance(&mut self, index: usize) -> Result<(), DomainError> {
        let count = M::instance_count();
        if index >= count {
            return Err(DomainError::InstanceOutOfRange { index, count });
        }
        self.model = Some(M::load(index));
        self.memory.iter_mut().for_each(|slot| *slot = None);
        self.best_value = f64::INFINITY;
        Ok(())
    }

    fn set_memory_size(&mut self, size: usize) {
        self.memory.resize(size, None);
    }

    fn initialise_solution(&mut self, slot: usize) {
        let model = self
            .model
            .as_ref()
            .expect("no instance loaded; call load_instance first");
        let solution = model.initial_solution(&mut self.rng);
        let value = model.cost(&solution);
        self.store(slot, solution, value);
    }

    fn copy_solution(&mut self, src: usize, dst: usize) {
        let stored = self.stored(src).clone();
        self.store(dst, stored.solution, stored.value);
    }

    fn apply_heuristic(&mut self, heuristic: usize, src: usize, dst: usize) -> f64 {
        assert!(
            heuristic < M::HEURISTIC_COUNT,
            "heuristic {heuristic} unknown to {} ({} heuristics)",
            M::NAME,
            M::HEURISTIC_COUNT
        );
        let model = self
            .model
            .as_ref()
            .expect("no instance loaded; call load_instance first");
        let source = &self
            .memory
            .get(src)
            .and_then(|slot| slot.as_ref())
            .unwrap_or_else(|| panic!("slot {src} holds no solution"))
            .solution;
        let solution = model.apply_heuristic(heuristic, source, &mut self.rng);
        let value = model.cost(&solution);
        self.store(dst, solution, value);
        value
    }

    fn function_value(&self, slot: usize) -> f64 {
        self.stored(slot).value
    }

    fn best_solution_value(&self) -> f64 {
        self.best_value
    }
}
