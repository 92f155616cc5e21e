//! Ensembles: ordered algorithm collections evaluated as one unit.

use super::space::Algorithm;

/// A numbered collection of algorithms.
///
/// Algorithms run in the order they were appended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ensemble {
    id: usize,
    algorithms: Vec<Algorithm>,
}

impl Ensemble {
    /// Creates an empty ensemble.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            algorithms: Vec::new(),
        }
    }

    /// Creates an ensemble holding `algorithms` in the given order.
    pub fn with_algorithms(id: usize, algorithms: Vec<Algorithm>) -> Self {
        Self { id, algorithms }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Appends an algorithm at the end of the execution order.
    pub fn append_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithms.push(algorithm);
    }

    /// Catalog indices joined with `;`, e.g. `3;9;14`.
    pub fn label(&self) -> String {
        self.algorithms
            .iter()
            .map(|a| a.index().to_string())
            .collect::<Vec<_>>()
            .join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut ensemble = Ensemble::new(7);
        ensemble.append_algorithm(Algorithm::new(9, [1, 0, 0]));
        ensemble.append_algorithm(Algorithm::new(2, [0, 0, 2]));

        assert_eq!(ensemble.id(), 7);
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.algorithms()[0].index(), 9);
        assert_eq!(ensemble.label(), "9;2");
    }

    #[test]
    fn test_empty_label() {
        let ensemble = Ensemble::new(0);
        assert!(ensemble.is_empty());
        assert_eq!(ensemble.label(), "");
    }
}
