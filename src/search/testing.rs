//! Scripted domain for engine tests.

use crate::domain::{DomainError, ProblemDomain};

/// Returns a scripted objective sequence, cycling when exhausted, and
/// records every call the engine makes.
pub(crate) struct ScriptedDomain {
    heuristics: usize,
    initial: f64,
    script: Vec<f64>,
    cursor: usize,
    descend: bool,
    slots: Vec<Option<f64>>,
    best: f64,
    pub applied: Vec<usize>,
    pub copies: Vec<(usize, usize)>,
}

impl ScriptedDomain {
    pub fn new(heuristics: usize, initial: f64, script: Vec<f64>) -> Self {
        Self {
            heuristics,
            initial,
            script,
            cursor: 0,
            descend: false,
            slots: vec![None; 2],
            best: f64::INFINITY,
            applied: Vec::new(),
            copies: Vec::new(),
        }
    }

    /// Constant objective: nothing ever improves.
    pub fn flat(heuristics: usize, value: f64) -> Self {
        Self::new(heuristics, value, vec![value])
    }

    /// Plays `prefix` once, then descends from `initial` by one per
    /// application, so the last attempt never stagnates.
    pub fn descending(heuristics: usize, initial: f64, prefix: Vec<f64>) -> Self {
        Self {
            descend: true,
            ..Self::new(heuristics, initial, prefix)
        }
    }

    fn put(&mut self, slot: usize, value: f64) {
        self.slots[slot] = Some(value);
        self.best = self.best.min(value);
    }
}

impl ProblemDomain for ScriptedDomain {
    fn name(&self) -> &'static str {
        "Scripted"
    }

    fn heuristic_count(&self) -> usize {
        self.heuristics
    }

    fn instance_count(&self) -> usize {
        1
    }

    fn load_instance(&mut self, index: usize) -> Result<(), DomainError> {
        if index == 0 {
            Ok(())
        } else {
            Err(DomainError::InstanceOutOfRange { index, count: 1 })
        }
    }

    fn set_memory_size(&mut self, size: usize) {
        self.slots.resize(size, None);
    }

    fn initialise_solution(&mut self, slot: usize) {
        self.put(slot, self.initial);
    }

    fn copy_solution(&mut self, src: usize, dst: usize) {
        self.copies.push((src, dst));
        let value = self.slots[src].expect("copy from empty slot");
        self.put(dst, value);
    }

    fn apply_heuristic(&mut self, heuristic: usize, src: usize, dst: usize) -> f64 {
        assert!(heuristic < self.heuristics);
        assert!(self.slots[src].is_some(), "apply from empty slot");
        self.applied.push(heuristic);
        let value = if self.descend && self.cursor >= self.script.len() {
            self.initial - (self.cursor - self.script.len() + 1) as f64
        } else {
            self.script[self.cursor % self.script.len()]
        };
        self.cursor += 1;
        self.put(dst, value);
        value
    }

    fn function_value(&self, slot: usize) -> f64 {
        self.slots[slot].expect("empty slot")
    }

    fn best_solution_value(&self) -> f64 {
        self.best
    }
}
