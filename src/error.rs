use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong around the filter: input validation, GPX
/// parsing/writing and the statistics report. The filter itself never fails.
#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("File must have .gpx extension: {}", .0.display())]
    WrongExtension(PathBuf),

    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Cannot read file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid speed threshold: {0}")]
    InvalidThreshold(String),

    #[error("GPX error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to write statistics report: {0}")]
    Report(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, CleanerError>;
