//! End-to-end batches through the public API.

use std::fs;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use u_hyperheur::algorithm::EnsemblePolicy;
use u_hyperheur::domain::ProblemKind;
use u_hyperheur::experiment::{Cli, Orchestrator, RunConfig, TestMode};
use u_hyperheur::hyper::HyperConfig;

fn bounded(config: RunConfig, dir: &Path) -> RunConfig {
    config
        .with_output_dir(dir)
        .with_instances(Some(2))
        .with_repetitions(2)
        .with_hyper(
            HyperConfig::default()
                .with_time_limit(Duration::from_secs(60))
                .with_max_attempts(Some(3)),
        )
}

fn rows(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn algorithm_range_from_command_line() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "diverse-heuristics",
        "--flo",
        "-a",
        "2",
        "--start",
        "2",
        "--end",
        "4",
        "--instances",
        "1",
        "--max-attempts",
        "2",
        "--output-dir",
        out.as_str(),
    ])
    .unwrap();
    let summary = Orchestrator::new(cli.into_config().unwrap()).run().unwrap();

    assert_eq!(summary.ensembles, 2);
    assert_eq!(summary.completed_runs, 4);
    let name = summary.output.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("floAlgorithm2Data"), "{name}");
    assert!(summary.output.starts_with(dir.path().join("Algorithms")));

    let lines = rows(&summary.output);
    assert_eq!(
        lines[0],
        "iteration,problem instance,problem seed,algorithm seed,starting fitness,\
         ensemble number,fitness,number of runs,heuristics"
    );
    let ensemble_numbers: Vec<&str> = lines[1..]
        .iter()
        .map(|line| line.split(',').nth(5).unwrap())
        .collect();
    assert_eq!(ensemble_numbers, vec!["2", "2", "3", "3"]);
    assert!(lines[1].ends_with(",0-0-2"));
    assert!(lines[3].ends_with(",0-1-0"));
}

#[test]
fn elite_batch_covers_instances_and_repetitions() {
    let dir = tempfile::tempdir().unwrap();
    let config = bounded(
        RunConfig::new(
            ProblemKind::PersonnelScheduling,
            TestMode::Ensemble {
                id: 0,
                policy: EnsemblePolicy::Elite,
            },
        ),
        dir.path(),
    );
    let summary = Orchestrator::new(config).run().unwrap();

    assert_eq!(summary.completed_runs, 4);
    assert!(summary.output.starts_with(dir.path().join("EliteEnsembles")));
    let lines = rows(&summary.output);
    let keys: Vec<(String, String, String)> = lines[1..]
        .iter()
        .map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            (fields[0].into(), fields[1].into(), fields[2].into())
        })
        .collect();
    assert_eq!(
        keys,
        vec![
            ("0".into(), "0".into(), "1000".into()),
            ("1".into(), "0".into(), "1001".into()),
            ("0".into(), "1".into(), "1000".into()),
            ("1".into(), "1".into(), "1001".into()),
        ]
    );
    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(',').collect();
        let starting: f64 = fields[4].parse().unwrap();
        let best: f64 = fields[6].parse().unwrap();
        assert!(best <= starting);
        assert_eq!(fields[7], "3");
    }
}

#[test]
fn identical_configuration_gives_identical_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = bounded(
        RunConfig::new(
            ProblemKind::Sat,
            TestMode::Ensemble {
                id: 1,
                policy: EnsemblePolicy::Random,
            },
        ),
        dir.path(),
    )
    .with_ensemble_seed(7);

    let first = Orchestrator::new(config.clone()).run().unwrap();
    let second = Orchestrator::new(config).run().unwrap();
    assert_ne!(first.output, second.output);
    assert_eq!(rows(&first.output), rows(&second.output));
    assert!(first.output.starts_with(dir.path().join("RandomEnsembles")));
}

#[test]
fn unwritable_output_directory_aborts_batch() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let config = bounded(
        RunConfig::new(
            ProblemKind::BinPacking,
            TestMode::Ensemble {
                id: 0,
                policy: EnsemblePolicy::Default,
            },
        ),
        &blocker,
    );
    assert!(Orchestrator::new(config).run().is_err());
}
