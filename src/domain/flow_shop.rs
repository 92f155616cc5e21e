//! Permutation flow shop scheduling.
//!
//! Every job visits every machine in the same order; a solution is the job
//! sequence and the objective is the makespan.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::types::ProblemModel;

const INSTANCE_COUNT: usize = 5;
const INSTANCE_SEED: u64 = 0xF1_0000;

/// A flow shop instance: `times[job][machine]` processing times.
#[derive(Debug, Clone)]
pub struct FlowShop {
    machines: usize,
    times: Vec<Vec<u32>>,
}

impl FlowShop {
    pub fn new(times: Vec<Vec<u32>>) -> Self {
        let machines = times.first().map_or(0, Vec::len);
        assert!(
            times.iter().all(|row| row.len() == machines),
            "every job needs a time on every machine"
        );
        Self { machines, times }
    }

    pub fn job_count(&self) -> usize {
        self.times.len()
    }

    /// Completion time of the last job on the last machine.
    pub fn makespan(&self, sequence: &[usize]) -> u32 {
        let mut completion = vec![0u32; self.machines];
        for &job in sequence {
            let mut previous = 0;
            for (machine, done) in completion.iter_mut().enumerate() {
                *done = (*done).max(previous) + self.times[job][machine];
                previous = *done;
            }
        }
        completion.last().copied().unwrap_or(0)
    }

    /// Inserts `job` at the position giving the lowest makespan.
    fn insert_best(&self, sequence: &mut Vec<usize>, job: usize) {
        let mut best_position = 0;
        let mut best_span = u32::MAX;
        for position in 0..=sequence.len() {
            sequence.insert(position, job);
            let span = self.makespan(sequence);
            sequence.remove(position);
            if span < best_span {
                best_span = span;
                best_position = position;
            }
        }
        sequence.insert(best_position, job);
    }

    fn reinsert_random_job<R: Rng>(&self, sequence: &[usize], rng: &mut R) -> Vec<usize> {
        let mut next = sequence.to_vec();
        if next.len() < 2 {
            return next;
        }
        let job = next.remove(rng.random_range(0..next.len()));
        self.insert_best(&mut next, job);
        next
    }

    fn swap_jobs<R: Rng>(&self, sequence: &[usize], rng: &mut R) -> Vec<usize> {
        let mut next = sequence.to_vec();
        if next.len() >= 2 {
            let a = rng.random_range(0..next.len());
            let b = rng.random_range(0..next.len());
            next.swap(a, b);
        }
        next
    }

    fn shift_job<R: Rng>(&self, sequence: &[usize], rng: &mut R) -> Vec<usize> {
        let mut next = sequence.to_vec();
        if next.len() >= 2 {
            let job = next.remove(rng.random_range(0..next.len()));
            next.insert(rng.random_range(0..=next.len()), job);
        }
        next
    }

    /// Removes up to four random jobs and reinserts each at its best position.
    fn ruin_recreate<R: Rng>(&self, sequence: &[usize], rng: &mut R) -> Vec<usize> {
        let mut next = sequence.to_vec();
        let mut removed = Vec::new();
        for _ in 0..next.len().min(4) {
            removed.push(next.remove(rng.random_range(0..next.len())));
        }
        for job in removed {
            self.insert_best(&mut next, job);
        }
        next
    }
}

impl ProblemModel for FlowShop {
    type Solution = Vec<usize>;
    const NAME: &'static str = "Flow Shop";
    const HEURISTIC_COUNT: usize = 4;

    fn instance_count() -> usize {
        INSTANCE_COUNT
    }

    fn load(index: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(INSTANCE_SEED + index as u64);
        let jobs = 20 + 10 * index;
        let machines = 5 + index;
        let times = (0..jobs)
            .map(|_| (0..machines).map(|_| rng.random_range(1..=99)).collect())
            .collect();
        Self::new(times)
    }

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut sequence: Vec<usize> = (0..self.times.len()).collect();
        sequence.shuffle(rng);
        sequence
    }

    fn cost(&self, sequence: &Vec<usize>) -> f64 {
        self.makespan(sequence) as f64
    }

    fn apply_heuristic<R: Rng>(
        &self,
        heuristic: usize,
        sequence: &Vec<usize>,
        rng: &mut R,
    ) -> Vec<usize> {
        match heuristic {
            0 => self.reinsert_random_job(sequence, rng),
            1 => self.swap_jobs(sequence, rng),
            2 => self.shift_job(sequence, rng),
            3 => self.ruin_recreate(sequence, rng),
            _ => unreachable!("flow shop has {} heuristics", Self::HEURISTIC_COUNT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_makespan_two_jobs_two_machines() {
        // job 0: (3, 2), job 1: (1, 4)
        let shop = FlowShop::new(vec![vec![3, 2], vec![1, 4]]);
        assert_eq!(shop.makespan(&[0, 1]), 9);
        assert_eq!(shop.makespan(&[1, 0]), 7);
    }

    #[test]
    fn test_insert_best_finds_optimal_position() {
        let shop = FlowShop::new(vec![vec![3, 2], vec![1, 4]]);
        let mut sequence = vec![0];
        shop.insert_best(&mut sequence, 1);
        assert_eq!(sequence, vec![1, 0]);
    }

    #[test]
    fn test_heuristics_keep_permutation() {
        let shop = FlowShop::load(0);
        let mut rng = StdRng::seed_from_u64(4);
        let mut sequence = shop.initial_solution(&mut rng);
        for round in 0..60 {
            sequence = shop.apply_heuristic(round % 4, &sequence, &mut rng);
            let mut sorted = sequence.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..shop.job_count()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_reinsert_never_worsens() {
        let shop = FlowShop::load(1);
        let mut rng = StdRng::seed_from_u64(8);
        let sequence = shop.initial_solution(&mut rng);
        let next = shop.apply_heuristic(0, &sequence, &mut rng);
        // The removed job's old position is among the candidates.
        assert!(shop.cost(&next) <= shop.cost(&sequence));
    }
}
