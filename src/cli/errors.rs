use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No identifiers found in source list {}", .path.display())]
    EmptySourceList { path: PathBuf },

    #[error("Input directory does not exist: {}", .path.display())]
    MissingInputDir { path: PathBuf },

    #[error(transparent)]
    Inkprep(#[from] inkprep::Error),
}
