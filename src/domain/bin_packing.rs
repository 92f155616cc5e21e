//! One-dimensional bin packing.
//!
//! Items with integer sizes are packed into bins of a fixed capacity.
//! The objective rewards well-filled bins: `1 - mean(fill²)` where `fill`
//! is each bin's load divided by capacity. Fewer, fuller bins score lower.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::types::ProblemModel;

const INSTANCE_COUNT: usize = 5;
const INSTANCE_SEED: u64 = 0xB1_0000;

/// Bins as lists of item indices. Every bin is non-empty and within capacity.
pub type Packing = Vec<Vec<usize>>;

/// A bin packing instance.
#[derive(Debug, Clone)]
pub struct BinPacking {
    capacity: u32,
    sizes: Vec<u32>,
}

impl BinPacking {
    /// Creates an instance. Every size must fit into an empty bin.
    pub fn new(capacity: u32, sizes: Vec<u32>) -> Self {
        assert!(
            sizes.iter().all(|&s| s <= capacity),
            "every item must fit into an empty bin"
        );
        Self { capacity, sizes }
    }

    pub fn item_count(&self) -> usize {
        self.sizes.len()
    }

    fn load_of(&self, bin: &[usize]) -> u32 {
        bin.iter().map(|&item| self.sizes[item]).sum()
    }

    fn fits(&self, bin: &[usize], item: usize) -> bool {
        self.load_of(bin) + self.sizes[item] <= self.capacity
    }

    /// Puts `item` into the fullest bin that still has room, or a new bin.
    fn insert_best_fit(&self, bins: &mut Packing, item: usize) {
        let target = bins
            .iter()
            .enumerate()
            .filter(|(_, bin)| self.fits(bin, item))
            .max_by_key(|(_, bin)| self.load_of(bin))
            .map(|(i, _)| i);
        match target {
            Some(i) => bins[i].push(item),
            None => bins.push(vec![item]),
        }
    }

    /// Empties the least-filled bin into the others by best fit.
    fn repack_emptiest(&self, packing: &Packing) -> Packing {
        let mut bins = packing.clone();
        let Some(emptiest) = (0..bins.len()).min_by_key(|&i| self.load_of(&bins[i])) else {
            return bins;
        };
        let items = bins.swap_remove(emptiest);
        for item in items {
            self.insert_best_fit(&mut bins, item);
        }
        bins
    }

    /// Moves one random item to a random other bin that has room.
    fn move_item<R: Rng>(&self, packing: &Packing, rng: &mut R) -> Packing {
        let mut bins = packing.clone();
        if bins.len() < 2 {
            return bins;
        }
        let from = rng.random_range(0..bins.len());
        let pos = rng.random_range(0..bins[from].len());
        let item = bins[from][pos];
        let targets: Vec<usize> = (0..bins.len())
            .filter(|&b| b != from && self.fits(&bins[b], item))
            .collect();
        if let Some(&to) = targets.get(rng.random_range(0..targets.len().max(1))) {
            bins[from].swap_remove(pos);
            bins[to].push(item);
            bins.retain(|bin| !bin.is_empty());
        }
        bins
    }

    /// Swaps two items between random bins when both still fit.
    fn swap_items<R: Rng>(&self, packing: &Packing, rng: &mut R) -> Packing {
        let mut bins = packing.clone();
        if bins.len() < 2 {
            return bins;
        }
        let a = rng.random_range(0..bins.len());
        let b = (a + rng.random_range(1..bins.len())) % bins.len();
        let pa = rng.random_range(0..bins[a].len());
        let pb = rng.random_range(0..bins[b].len());
        let (ia, ib) = (bins[a][pa], bins[b][pb]);

        let load_a = self.load_of(&bins[a]) - self.sizes[ia] + self.sizes[ib];
        let load_b = self.load_of(&bins[b]) - self.sizes[ib] + self.sizes[ia];
        if load_a <= self.capacity && load_b <= self.capacity {
            bins[a][pa] = ib;
            bins[b][pb] = ia;
        }
        bins
    }

    /// Destroys a fifth of the bins and reinserts their items, largest first.
    fn ruin_recreate<R: Rng>(&self, packing: &Packing, rng: &mut R) -> Packing {
        let mut bins = packing.clone();
        bins.shuffle(rng);
        let ruined = (bins.len() / 5).max(1).min(bins.len());
        let mut items: Vec<usize> = bins.drain(..ruined).flatten().collect();
        items.sort_by_key(|&item| std::cmp::Reverse(self.sizes[item]));
        for item in items {
            self.insert_best_fit(&mut bins, item);
        }
        bins
    }
}

impl ProblemModel for BinPacking {
    type Solution = Packing;
    const NAME: &'static str = "Bin Packing";
    const HEURISTIC_COUNT: usize = 4;

    fn instance_count() -> usize {
        INSTANCE_COUNT
    }

    fn load(index: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(INSTANCE_SEED + index as u64);
        let items = 40 + 20 * index;
        let capacity = 150;
        let sizes = (0..items).map(|_| rng.random_range(20..=100)).collect();
        Self::new(capacity, sizes)
    }

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Packing {
        let mut order: Vec<usize> = (0..self.sizes.len()).collect();
        order.shuffle(rng);
        let mut bins: Packing = Vec::new();
        for item in order {
            match bins.iter_mut().find(|bin| self.fits(bin, item)) {
                Some(bin) => bin.push(item),
                None => bins.push(vec![item]),
            }
        }
        bins
    }

    fn cost(&self, packing: &Packing) -> f64 {
        if packing.is_empty() {
            return 1.0;
        }
        let capacity = self.capacity as f64;
        let filled: f64 = packing
            .iter()
            .map(|bin| (self.load_of(bin) as f64 / capacity).powi(2))
            .sum();
        1.0 - filled / packing.len() as f64
    }

    fn apply_heuristic<R: Rng>(&self, heuristic: usize, packing: &Packing, rng: &mut R) -> Packing {
        match heuristic {
            0 => self.repack_emptiest(packing),
            1 => self.move_item(packing, rng),
            2 => self.swap_items(packing, rng),
            3 => self.ruin_recreate(packing, rng),
            _ => unreachable!("bin packing has {} heuristics", Self::HEURISTIC_COUNT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(problem: &BinPacking, packing: &Packing) {
        let mut seen: Vec<usize> = packing.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..problem.item_count()).collect::<Vec<_>>());
        for bin in packing {
            assert!(!bin.is_empty(), "empty bin left in packing");
            assert!(problem.load_of(bin) <= problem.capacity, "bin over capacity");
        }
    }

    #[test]
    fn test_cost_of_perfect_packing_is_zero() {
        let problem = BinPacking::new(10, vec![5, 5, 10]);
        let packing = vec![vec![0, 1], vec![2]];
        assert!(problem.cost(&packing).abs() < 1e-12);
    }

    #[test]
    fn test_cost_penalises_half_empty_bins() {
        let problem = BinPacking::new(10, vec![5, 5]);
        let split = vec![vec![0], vec![1]];
        let merged = vec![vec![0, 1]];
        assert!(problem.cost(&merged) < problem.cost(&split));
    }

    #[test]
    fn test_every_heuristic_keeps_packing_valid() {
        let problem = BinPacking::load(0);
        let mut rng = StdRng::seed_from_u64(11);
        let mut packing = problem.initial_solution(&mut rng);
        assert_valid(&problem, &packing);

        for round in 0..200 {
            packing = problem.apply_heuristic(round % 4, &packing, &mut rng);
            assert_valid(&problem, &packing);
        }
    }

    #[test]
    fn test_repack_emptiest_never_adds_bins() {
        let problem = BinPacking::load(1);
        let mut rng = StdRng::seed_from_u64(5);
        let packing = problem.initial_solution(&mut rng);
        let repacked = problem.apply_heuristic(0, &packing, &mut rng);
        assert!(repacked.len() <= packing.len());
    }

    #[test]
    fn test_instances_are_deterministic() {
        let a = BinPacking::load(2);
        let b = BinPacking::load(2);
        assert_eq!(a.sizes, b.sizes);
        assert_eq!(a.item_count(), 80);
    }
}
