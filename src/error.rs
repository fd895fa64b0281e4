use std::path::PathBuf;

use parser_dump::UnknownDumpKind;

/// Failures outside the parsers: reading dump files and rendering reports
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Failed to read dump file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Input directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    UnknownKind(#[from] UnknownDumpKind),
    #[error("Invalid dump argument {0:?}, expected KIND=PATH")]
    InvalidDumpArg(String),
    #[error("Failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
