//! Command-line interface of the `diverse-heuristics` binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser};

use super::config::{RunConfig, TestMode};
use crate::algorithm::EnsemblePolicy;
use crate::domain::ProblemKind;
use crate::hyper::HyperConfig;
use crate::search::SearchConfig;

/// Benchmark heuristic-triple algorithms and ensembles on a problem domain.
#[derive(Parser, Debug)]
#[command(name = "diverse-heuristics", version)]
#[command(group(ArgGroup::new("problem").required(true).args(["bin", "sat", "flo", "per"])))]
#[command(group(ArgGroup::new("mode").required(true).args(["ensemble", "algorithms", "fitness"])))]
pub struct Cli {
    /// Bin packing
    #[arg(long)]
    pub bin: bool,

    /// Boolean satisfiability
    #[arg(long)]
    pub sat: bool,

    /// Permutation flow shop
    #[arg(long)]
    pub flo: bool,

    /// Personnel scheduling
    #[arg(long)]
    pub per: bool,

    /// Evaluate the ensemble with this id
    #[arg(short = 'e', value_name = "ENSEMBLE_ID")]
    pub ensemble: Option<usize>,

    /// Evaluate every algorithm separately, this many runs per instance
    #[arg(short = 'a', value_name = "ITERATIONS", value_parser = clap::value_parser!(u32).range(1..))]
    pub algorithms: Option<u32>,

    /// Sweep the whole algorithm space once on this instance
    #[arg(short = 'f', value_name = "INSTANCE")]
    pub fitness: Option<usize>,

    /// Use the domain's elite ensemble (with -e)
    #[arg(long, requires = "ensemble", conflicts_with = "random")]
    pub elite: bool,

    /// Use a random ensemble, redrawn after every run (with -e)
    #[arg(long, requires = "ensemble")]
    pub random: bool,

    /// First catalog index to evaluate (with -a)
    #[arg(long, requires = "algorithms")]
    pub start: Option<usize>,

    /// Catalog index to stop before (with -a)
    #[arg(long, requires = "algorithms")]
    pub end: Option<usize>,

    /// Runs per instance in ensemble mode
    #[arg(long, default_value_t = 50)]
    pub repetitions: usize,

    /// Time limit of one run, in seconds
    #[arg(long, default_value_t = 900)]
    pub time_limit: u64,

    /// Stop a run after this many algorithm attempts
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Count the attempt interrupted by the time limit
    #[arg(long)]
    pub record_partial: bool,

    /// Only run the first N instances
    #[arg(long, value_name = "N")]
    pub instances: Option<usize>,

    /// Root directory for result files
    #[arg(long, default_value = "Data")]
    pub output_dir: PathBuf,

    /// Number of top heuristic ids left out of the catalog
    #[arg(long, default_value_t = 1)]
    pub heuristic_offset: usize,

    /// Algorithms per default or random ensemble
    #[arg(long, default_value_t = 4)]
    pub ensemble_size: usize,

    /// Seed of the random ensemble policy
    #[arg(long, default_value_t = 0)]
    pub ensemble_seed: u64,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn problem(&self) -> Option<ProblemKind> {
        [
            (self.bin, ProblemKind::BinPacking),
            (self.sat, ProblemKind::Sat),
            (self.flo, ProblemKind::FlowShop),
            (self.per, ProblemKind::PersonnelScheduling),
        ]
        .into_iter()
        .find_map(|(set, kind)| set.then_some(kind))
    }

    pub fn test_mode(&self) -> Option<TestMode> {
        if let Some(id) = self.ensemble {
            let policy = if self.elite {
                EnsemblePolicy::Elite
            } else if self.random {
                EnsemblePolicy::Random
            } else {
                EnsemblePolicy::Default
            };
            return Some(TestMode::Ensemble { id, policy });
        }
        if self.algorithms.is_some() {
            return Some(TestMode::Algorithms {
                start: self.start,
                end: self.end,
            });
        }
        self.fitness.map(|instance| TestMode::Fitness { instance })
    }

    /// Maps the parsed arguments onto a validated [`RunConfig`].
    pub fn into_config(self) -> Result<RunConfig, String> {
        let problem = self.problem().ok_or("one problem flag is required")?;
        let mode = self
            .test_mode()
            .ok_or("one of -e, -a or -f is required")?;
        let repetitions = match self.algorithms {
            Some(iterations) => iterations as usize,
            None => self.repetitions,
        };

        let search = SearchConfig::default().with_heuristic_offset(self.heuristic_offset);
        let hyper = HyperConfig::default()
            .with_time_limit(Duration::from_secs(self.time_limit))
            .with_max_attempts(self.max_attempts)
            .with_record_partial(self.record_partial)
            .with_search(search);

        let config = RunConfig::new(problem, mode)
            .with_repetitions(repetitions)
            .with_output_dir(self.output_dir)
            .with_instances(self.instances)
            .with_ensemble_size(self.ensemble_size)
            .with_ensemble_seed(self.ensemble_seed)
            .with_hyper(hyper);
        config.validate()?;
        Ok(config)
    }
}
