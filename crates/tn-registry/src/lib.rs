//! tn-registry: ordered station registry.
//!
//! A binary search tree keyed by station id that owns the canonical station
//! records used for listing and for exporting tree traversals.

pub mod tree;

pub use tree::{StationRegistry, TraversalOrder};

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("Unknown traversal order: {0} (expected in, pre or post)")]
    UnknownOrder(String),

    #[error("Failed to write traversals to {path}: {source}")]
    Export {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
