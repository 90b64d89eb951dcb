use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Pipeline(#[from] bandstack::Error),

    #[error("{count} unreadable raster(s) in {dir}")]
    Unreadable { dir: String, count: usize },

    #[error("Cannot write report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
