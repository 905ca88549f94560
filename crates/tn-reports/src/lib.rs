//! tn-reports: history of route and spanning tree queries.

pub mod log;
pub mod render;
pub mod types;

pub use log::ReportLog;
pub use types::{ReportEntry, ReportKind};

use std::path::PathBuf;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Encode(#[from] serde_json::Error),
}
