//! Search engine configuration.

/// Parameters of one plateau-driven algorithm attempt.
///
/// # Examples
///
/// ```
/// use u_hyperheur::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_stagnation_threshold(5)
///     .with_heuristic_offset(0);
/// assert_eq!(config.stagnation_threshold, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchConfig {
    /// Consecutive non-improving applications that, when reached at the
    /// end of a pass, abandon the algorithm.
    pub stagnation_threshold: usize,

    /// Number of top heuristic ids left out of the algorithm catalog.
    ///
    /// With the default of 1, a domain with `n` heuristics yields a
    /// catalog over `[0, n - 1)`.
    pub heuristic_offset: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            stagnation_threshold: 3,
            heuristic_offset: 1,
        }
    }
}

impl SearchConfig {
    pub fn with_stagnation_threshold(mut self, n: usize) -> Self {
        self.stagnation_threshold = n;
        self
    }

    pub fn with_heuristic_offset(mut self, n: usize) -> Self {
        self.heuristic_offset = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.stagnation_threshold == 0 {
            return Err("stagnation_threshold must be at least 1".into());
        }
        Ok(())
    }
}

/// What the cycler does after the last algorithm of its list is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CycleMode {
    /// Stop: every algorithm has been tried once.
    #[default]
    Sweep,
    /// Wrap to the first algorithm and keep going until the budget ends.
    Repeat,
}

/// Configuration for [`AlgorithmCycler`](super::AlgorithmCycler).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CycleConfig {
    pub mode: CycleMode,

    /// Record a row for the attempt interrupted by the time budget.
    pub record_partial: bool,

    /// Stop after this many completed attempts (`None` = unbounded).
    pub max_attempts: Option<usize>,
}

impl CycleConfig {
    pub fn with_mode(mut self, mode: CycleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_record_partial(mut self, record: bool) -> Self {
        self.record_partial = record;
        self
    }

    pub fn with_max_attempts(mut self, max: Option<usize>) -> Self {
        self.max_attempts = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.stagnation_threshold, 3);
        assert_eq!(config.heuristic_offset, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = SearchConfig::default().with_stagnation_threshold(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cycle_config_builder() {
        let config = CycleConfig::default()
            .with_mode(CycleMode::Repeat)
            .with_record_partial(true)
            .with_max_attempts(Some(4));
        assert_eq!(config.mode, CycleMode::Repeat);
        assert!(config.record_partial);
        assert_eq!(config.max_attempts, Some(4));
        assert_eq!(CycleConfig::default().mode, CycleMode::Sweep);
    }
}
