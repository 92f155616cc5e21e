//! One time-budgeted pass over the whole algorithm space.

use std::io::Write;
use std::time::Duration;

use tracing::info;

use super::budget::TimeBudget;
use super::config::{CycleConfig, CycleMode, SearchConfig};
use super::cycler::{AlgorithmCycler, CycleOutcome};
use crate::algorithm::AlgorithmSpace;
use crate::domain::ProblemDomain;
use crate::error::Result;
use crate::output::{AttemptRow, ResultWriter};

/// Tries every algorithm of a domain's catalog once on the loaded
/// instance and writes one [`AttemptRow`] per abandoned algorithm.
///
/// # Examples
///
/// ```
/// use u_hyperheur::domain::{ProblemDomain, ProblemKind};
/// use u_hyperheur::output::ResultWriter;
/// use u_hyperheur::search::{FitnessSweep, SearchConfig};
///
/// let mut domain = ProblemKind::PersonnelScheduling.build(1000);
/// domain.load_instance(0).unwrap();
///
/// let writer = ResultWriter::in_memory();
/// let outcome = FitnessSweep::new(SearchConfig::default())
///     .run(domain.as_mut(), &writer)
///     .unwrap();
/// let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// assert_eq!(text.lines().count(), outcome.rows.len() + 1);
/// ```
#[derive(Debug, Clone)]
pub struct FitnessSweep {
    search: SearchConfig,
    time_limit: Option<Duration>,
    record_partial: bool,
}

impl FitnessSweep {
    pub fn new(search: SearchConfig) -> Self {
        Self {
            search,
            time_limit: None,
            record_partial: false,
        }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_record_partial(mut self, record: bool) -> Self {
        self.record_partial = record;
        self
    }

    /// Runs the sweep and writes the header followed by every recorded row.
    ///
    /// Rows are written once the session ends, whether it exhausted the
    /// catalog or ran out of time.
    pub fn run<D, W>(&self, domain: &mut D, writer: &ResultWriter<W>) -> Result<CycleOutcome>
    where
        D: ProblemDomain + ?Sized,
        W: Write,
    {
        let algorithms =
            AlgorithmSpace::for_domain(domain.heuristic_count(), self.search.heuristic_offset);
        let budget = match self.time_limit {
            Some(limit) => TimeBudget::new(limit),
            None => TimeBudget::unlimited(),
        };
        let cycler = AlgorithmCycler::new(
            self.search.clone(),
            CycleConfig::default()
                .with_mode(CycleMode::Sweep)
                .with_record_partial(self.record_partial),
        );

        info!(
            domain = domain.name(),
            algorithms = algorithms.len(),
            "starting fitness sweep"
        );
        let outcome = cycler.run(domain, &algorithms, &budget);

        writer.write_header(AttemptRow::HEADER)?;
        writer.append_all(&outcome.rows)?;
        info!(
            status = ?outcome.status,
            rows = outcome.rows.len(),
            best = outcome.best_fitness,
            "fitness sweep finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::testing::ScriptedDomain;
    use crate::search::CycleStatus;

    #[test]
    fn test_sweep_writes_header_and_rows() {
        let mut domain = ScriptedDomain::flat(3, 4.0);
        let writer = ResultWriter::in_memory();
        let outcome = FitnessSweep::new(SearchConfig::default())
            .run(&mut domain, &writer)
            .unwrap();

        assert_eq!(outcome.status, CycleStatus::Exhausted);
        // offset 1 leaves two heuristics: 2^3 algorithms
        assert_eq!(outcome.rows.len(), 8);

        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "starting fitness,algorithm number,fitness,number of iterations"
        );
        assert_eq!(lines[1], "4,0,4,1");
        assert_eq!(lines[8], "4,7,4,1");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_sweep_timeout_still_writes_header() {
        let mut domain = ScriptedDomain::flat(3, 4.0);
        let writer = ResultWriter::in_memory();
        let outcome = FitnessSweep::new(SearchConfig::default())
            .with_time_limit(Duration::ZERO)
            .run(&mut domain, &writer)
            .unwrap();

        assert_eq!(outcome.status, CycleStatus::TimedOut);
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_sweep_honours_offset() {
        let mut domain = ScriptedDomain::flat(3, 1.0);
        let writer = ResultWriter::in_memory();
        let outcome = FitnessSweep::new(SearchConfig::default().with_heuristic_offset(0))
            .run(&mut domain, &writer)
            .unwrap();
        assert_eq!(outcome.rows.len(), 27);
    }
}
