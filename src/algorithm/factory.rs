//! Ensemble construction policies.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::ensemble::Ensemble;
use super::space::{Algorithm, AlgorithmSpace, ALGORITHM_LENGTH};

/// How an experiment builds its ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EnsemblePolicy {
    /// Consecutive catalog blocks.
    #[default]
    Default,
    /// The domain's curated triples.
    Elite,
    /// Seeded random draws, regenerated after every repetition.
    Random,
}

impl EnsemblePolicy {
    pub fn name(self) -> &'static str {
        match self {
            EnsemblePolicy::Default => "default",
            EnsemblePolicy::Elite => "elite",
            EnsemblePolicy::Random => "random",
        }
    }
}

/// Builds ensembles from the algorithm catalog of one problem domain.
///
/// Every `generate_*` call hands out the next ensemble id, so calling a
/// policy `n + 1` times yields the ensemble numbered `n`.
///
/// # Examples
///
/// ```
/// use u_hyperheur::algorithm::EnsembleFactory;
///
/// let mut factory = EnsembleFactory::new(3, 0).with_ensemble_size(2);
/// let first = factory.generate_default_ensemble();
/// let second = factory.generate_default_ensemble();
/// assert_eq!((first.id(), second.id()), (0, 1));
/// assert_eq!(second.label(), "2;3");
/// ```
#[derive(Debug, Clone)]
pub struct EnsembleFactory {
    span: usize,
    catalog: Vec<Algorithm>,
    ensemble_size: usize,
    next_id: usize,
    rng: StdRng,
}

impl EnsembleFactory {
    /// Default number of algorithms per generated ensemble.
    pub const DEFAULT_ENSEMBLE_SIZE: usize = 4;

    /// Creates a factory over the catalog of triples in `[0, span)`.
    pub fn new(span: usize, seed: u64) -> Self {
        Self {
            span,
            catalog: AlgorithmSpace::enumerate(span),
            ensemble_size: Self::DEFAULT_ENSEMBLE_SIZE,
            next_id: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sets how many algorithms default and random ensembles hold.
    pub fn with_ensemble_size(mut self, size: usize) -> Self {
        self.ensemble_size = size.max(1);
        self
    }

    /// The full catalog.
    pub fn all_algorithms(&self) -> &[Algorithm] {
        &self.catalog
    }

    /// Next consecutive block of the catalog, wrapping at the end. The block
    /// never holds more algorithms than the catalog.
    pub fn generate_default_ensemble(&mut self) -> Ensemble {
        let id = self.take_id();
        let mut ensemble = Ensemble::new(id);
        if self.catalog.is_empty() {
            return ensemble;
        }
        let len = self.catalog.len();
        let size = self.ensemble_size.min(len);
        let start = (id % len) * size % len;
        for offset in 0..size {
            ensemble.append_algorithm(self.catalog[(start + offset) % len]);
        }
        ensemble
    }

    /// The curated triples for a domain that exist in this catalog.
    pub fn generate_elite_ensemble(&mut self, elite: &[[usize; ALGORITHM_LENGTH]]) -> Ensemble {
        let id = self.take_id();
        let algorithms = elite
            .iter()
            .filter_map(|triple| AlgorithmSpace::index_of(self.span, triple))
            .map(|index| self.catalog[index])
            .collect();
        Ensemble::with_algorithms(id, algorithms)
    }

    /// Distinct catalog algorithms drawn at random, under the next id.
    pub fn generate_random_ensemble(&mut self) -> Ensemble {
        let id = self.take_id();
        self.generate_random_ensemble_with_id(id)
    }

    /// Distinct catalog algorithms drawn at random, under a fixed id.
    ///
    /// Does not advance the id sequence.
    pub fn generate_random_ensemble_with_id(&mut self, id: usize) -> Ensemble {
        let amount = self.ensemble_size.min(self.catalog.len());
        let algorithms = rand::seq::index::sample(&mut self.rng, self.catalog.len(), amount)
            .into_iter()
            .map(|index| self.catalog[index])
            .collect();
        Ensemble::with_algorithms(id, algorithms)
    }

    /// Generates the next ensemble with `policy`; `elite` is only read by
    /// [`EnsemblePolicy::Elite`].
    pub fn generate(
        &mut self,
        policy: EnsemblePolicy,
        elite: &[[usize; ALGORITHM_LENGTH]],
    ) -> Ensemble {
        match policy {
            EnsemblePolicy::Default => self.generate_default_ensemble(),
            EnsemblePolicy::Elite => self.generate_elite_ensemble(elite),
            EnsemblePolicy::Random => self.generate_random_ensemble(),
        }
    }

    fn take_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_ensembles_walk_catalog() {
        let mut factory = EnsembleFactory::new(2, 0).with_ensemble_size(3);
        let e0 = factory.generate_default_ensemble();
        let e1 = factory.generate_default_ensemble();
        let e2 = factory.generate_default_ensemble();

        assert_eq!(e0.label(), "0;1;2");
        assert_eq!(e1.label(), "3;4;5");
        // 8 algorithms: third block wraps.
        assert_eq!(e2.label(), "6;7;0");
        assert_eq!(e2.id(), 2);
    }

    #[test]
    fn test_elite_skips_triples_outside_catalog() {
        let mut factory = EnsembleFactory::new(3, 0);
        let ensemble = factory.generate_elite_ensemble(&[[0, 1, 2], [3, 0, 0], [2, 2, 2]]);

        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.algorithms()[0].heuristics(), &[0, 1, 2]);
        assert_eq!(ensemble.algorithms()[1].index(), 26);
    }

    #[test]
    fn test_random_ensemble_is_seeded_and_distinct() {
        let mut a = EnsembleFactory::new(3, 42).with_ensemble_size(5);
        let mut b = EnsembleFactory::new(3, 42).with_ensemble_size(5);

        let ea = a.generate_random_ensemble();
        let eb = b.generate_random_ensemble();
        assert_eq!(ea, eb);

        let unique: HashSet<usize> = ea.algorithms().iter().map(|alg| alg.index()).collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn test_random_with_id_keeps_sequence() {
        let mut factory = EnsembleFactory::new(3, 1);
        let fixed = factory.generate_random_ensemble_with_id(9);
        let next = factory.generate_random_ensemble();
        assert_eq!(fixed.id(), 9);
        assert_eq!(next.id(), 0);
    }

    #[test]
    fn test_generate_dispatches_on_policy() {
        let mut factory = EnsembleFactory::new(3, 0).with_ensemble_size(2);
        let first = factory.generate(EnsemblePolicy::Default, &[]);
        let elite = factory.generate(EnsemblePolicy::Elite, &[[1, 1, 1]]);
        let random = factory.generate(EnsemblePolicy::Random, &[]);

        assert_eq!(first.label(), "0;1");
        assert_eq!((elite.id(), elite.label().as_str()), (1, "13"));
        assert_eq!((random.id(), random.len()), (2, 2));
    }

    #[test]
    fn test_default_ensemble_is_capped_at_catalog() {
        let mut factory = EnsembleFactory::new(1, 0).with_ensemble_size(5);
        assert_eq!(factory.generate_default_ensemble().label(), "0");

        let mut factory = EnsembleFactory::new(3, 0).with_ensemble_size(1 << 62);
        for _ in 0..4 {
            factory.generate_default_ensemble();
        }
        let ensemble = factory.generate_default_ensemble();
        assert_eq!(ensemble.id(), 4);
        assert_eq!(ensemble.len(), 27);
        let unique: HashSet<usize> = ensemble.algorithms().iter().map(|alg| alg.index()).collect();
        assert_eq!(unique.len(), 27);
    }

    #[test]
    fn test_empty_catalog() {
        let mut factory = EnsembleFactory::new(0, 0);
        assert!(factory.generate_default_ensemble().is_empty());
        assert!(factory.generate_random_ensemble().is_empty());
        assert!(factory.all_algorithms().is_empty());
    }
}
