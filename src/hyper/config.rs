//! Hyper-heuristic run configuration.

use std::time::Duration;

use crate::search::SearchConfig;

/// Which kind of batch a run belongs to; decides the label column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RunMode {
    /// An ensemble of several algorithms; rows carry the ensemble label.
    Ensemble,
    /// A single-algorithm ensemble; rows carry its heuristic triple.
    Algorithm,
}

impl RunMode {
    /// Header of the last CSV column.
    pub fn label_header(self) -> &'static str {
        match self {
            RunMode::Ensemble => "algorithms",
            RunMode::Algorithm => "heuristics",
        }
    }
}

/// Configuration shared by every [`HyperRunner`](super::HyperRunner) of a batch.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_hyperheur::hyper::HyperConfig;
///
/// let config = HyperConfig::default()
///     .with_time_limit(Duration::from_secs(2))
///     .with_max_attempts(Some(100));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HyperConfig {
    /// Wall-clock budget of one run.
    pub time_limit: Duration,

    /// Stop a run after this many completed algorithm attempts.
    pub max_attempts: Option<usize>,

    /// Count the attempt interrupted by the time limit.
    pub record_partial: bool,

    pub search: SearchConfig,
}

impl Default for HyperConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(15 * 60),
            max_attempts: None,
            record_partial: false,
            search: SearchConfig::default(),
        }
    }
}

impl HyperConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_max_attempts(mut self, max: Option<usize>) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_record_partial(mut self, record: bool) -> Self {
        self.record_partial = record;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == Some(0) {
            return Err("max_attempts must be at least 1".into());
        }
        self.search.validate()
    }
}
