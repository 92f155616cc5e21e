//! Enumeration of the heuristic-triple catalog.

use std::fmt;

/// Number of low-level heuristics composed into one algorithm.
pub const ALGORITHM_LENGTH: usize = 3;

/// A fixed-length ordered composition of low-level heuristic ids.
///
/// The `index` is the algorithm's position in the enumeration order of
/// [`AlgorithmSpace`] and is what result rows record as its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Algorithm {
    index: usize,
    heuristics: [usize; ALGORITHM_LENGTH],
}

impl Algorithm {
    /// Creates an algorithm with an explicit catalog index.
    pub fn new(index: usize, heuristics: [usize; ALGORITHM_LENGTH]) -> Self {
        Self { index, heuristics }
    }

    /// Position of this algorithm in its catalog.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The heuristic ids, in application order.
    pub fn heuristics(&self) -> &[usize; ALGORITHM_LENGTH] {
        &self.heuristics
    }

    /// Heuristic ids joined with `-`, e.g. `0-2-1`.
    pub fn label(&self) -> String {
        self.heuristics
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({})", self.index, self.label())
    }
}

/// The full catalog of heuristic triples for a heuristic count.
///
/// Algorithms are generated in ascending lexicographic order over
/// `(i, j, k) ∈ [0, h)³`, so the catalog has exactly `h³` entries and the
/// same `h` always yields the same indexed sequence.
///
/// # Examples
///
/// ```
/// use u_hyperheur::algorithm::AlgorithmSpace;
///
/// let space = AlgorithmSpace::enumerate(2);
/// assert_eq!(space.len(), 8);
/// assert_eq!(space[0].heuristics(), &[0, 0, 0]);
/// assert_eq!(space[7].heuristics(), &[1, 1, 1]);
/// ```
pub struct AlgorithmSpace;

impl AlgorithmSpace {
    /// Enumerates every triple over `[0, h)`.
    pub fn enumerate(h: usize) -> Vec<Algorithm> {
        let mut algorithms = Vec::with_capacity(h.pow(ALGORITHM_LENGTH as u32));
        for i in 0..h {
            for j in 0..h {
                for k in 0..h {
                    algorithms.push(Algorithm::new(algorithms.len(), [i, j, k]));
                }
            }
        }
        algorithms
    }

    /// Enumerates the catalog for a domain exposing `heuristic_count`
    /// heuristics, leaving out the top `offset` heuristic ids.
    pub fn for_domain(heuristic_count: usize, offset: usize) -> Vec<Algorithm> {
        Self::enumerate(heuristic_count.saturating_sub(offset))
    }

    /// Catalog index of `triple` in the space enumerated for `h`, or `None`
    /// if any id is outside `[0, h)`.
    pub fn index_of(h: usize, triple: &[usize; ALGORITHM_LENGTH]) -> Option<usize> {
        if triple.iter().any(|&id| id >= h) {
            return None;
        }
        Some(triple.iter().fold(0, |acc, &id| acc * h + id))
    }
}
