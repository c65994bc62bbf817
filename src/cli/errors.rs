use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{errors} of {total} input file(s) failed")]
    BatchFailed { errors: usize, total: usize },

    #[error("Output directory is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error(transparent)]
    Voxpro(#[from] voxpro::Error),
}
