//! Output directory layout and file naming.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::ProblemKind;
use crate::error::{Error, Result};

/// What a result file holds; selects its directory and file-name infix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OutputCategory {
    Ensemble,
    EliteEnsemble,
    RandomEnsemble,
    Algorithm,
    Fitness,
}

impl OutputCategory {
    pub fn name(self) -> &'static str {
        match self {
            OutputCategory::Ensemble => "Ensemble",
            OutputCategory::EliteEnsemble => "EliteEnsemble",
            OutputCategory::RandomEnsemble => "RandomEnsemble",
            OutputCategory::Algorithm => "Algorithm",
            OutputCategory::Fitness => "Fitness",
        }
    }

    pub fn directory(self) -> &'static str {
        match self {
            OutputCategory::Ensemble => "Ensembles",
            OutputCategory::EliteEnsemble => "EliteEnsembles",
            OutputCategory::RandomEnsemble => "RandomEnsembles",
            OutputCategory::Algorithm => "Algorithms",
            OutputCategory::Fitness => "Fitness",
        }
    }
}

/// `<problem><Category><number>Data<suffix>.csv`, e.g. `binAlgorithm50Data1718.csv`.
pub fn file_name(problem: ProblemKind, category: OutputCategory, number: usize, suffix: u128) -> String {
    format!(
        "{}{}{}Data{}.csv",
        problem.token(),
        category.name(),
        number,
        suffix
    )
}

/// Creates the category directory under `base` and returns an unused
/// result-file path in it.
///
/// The suffix starts at the current time in nanoseconds since the Unix
/// epoch and is bumped until no file of that name exists.
pub fn output_path(
    base: &Path,
    problem: ProblemKind,
    category: OutputCategory,
    number: usize,
) -> Result<PathBuf> {
    let dir = base.join(category.directory());
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        tracing::info!(dir = %dir.display(), "created data directory");
    }

    let mut suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    loop {
        let path = dir.join(file_name(problem, category, number, suffix));
        if !path.exists() {
            return Ok(path);
        }
        suffix += 1;
    }
}
