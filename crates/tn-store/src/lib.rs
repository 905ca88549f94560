//! tn-store: semicolon-delimited flat files for stations, routes and closures.
//!
//! Readers are lenient: blank lines and `#` comments are ignored, and lines
//! that do not parse are skipped and counted instead of failing the load.
//! Only I/O problems are errors.

pub mod files;
pub mod records;

pub use files::{DataFiles, LoadSummary};
pub use records::{
    ClosureRecord, Parsed, RouteRecord, read_closures, read_routes, read_stations,
    write_closures, write_routes, write_stations,
};

use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
