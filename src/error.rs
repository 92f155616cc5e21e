//! Crate error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;

/// Errors surfaced by experiment runs and result persistence.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("problem domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("no problem domain loaded")]
    DomainNotLoaded,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
