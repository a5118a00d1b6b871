use crate::artifacts::compare::mismatch::AggregateMismatch;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("No test cases found in '{}'", .dir.display())]
    NoCaseFound { dir: PathBuf },

    #[error("The case '{case_name}' is not a supported command case")]
    NotCommandCase { case_name: String },

    #[error(transparent)]
    Mismatch(#[from] AggregateMismatch),

    #[error("invalid case filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("failed to prepare case folders: {0:#}")]
    Setup(#[from] anyhow::Error),

    #[error("comparison task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl BaselineError {
    pub fn no_case_found(dir: impl Into<PathBuf>) -> Self {
        BaselineError::NoCaseFound { dir: dir.into() }
    }

    pub fn as_mismatch(&self) -> Option<&AggregateMismatch> {
        match self {
            BaselineError::Mismatch(mismatch) => Some(mismatch),
            _ => None,
        }
    }
}
