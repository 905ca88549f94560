//! Error types for the tn-app service layer.

use std::path::PathBuf;

use tn_core::StationId;

/// Application error type wrapping the backend crates' errors behind one
/// interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Station {0} already exists")]
    DuplicateStation(StationId),

    #[error("Station {0} not found")]
    StationNotFound(StationId),

    #[error("No route between {from} and {to}")]
    RouteNotFound { from: StationId, to: StationId },

    #[error("Stations {from} and {to} are already connected")]
    DuplicateRoute { from: StationId, to: StationId },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Report error: {0}")]
    Reports(String),

    #[error("Registry error: {0}")]
    Registry(String),
}

/// Result type for tn-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<tn_core::TnError> for AppError {
    fn from(err: tn_core::TnError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<tn_graph::GraphError> for AppError {
    fn from(err: tn_graph::GraphError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<tn_registry::RegistryError> for AppError {
    fn from(err: tn_registry::RegistryError) -> Self {
        match err {
            tn_registry::RegistryError::UnknownOrder(_) => AppError::InvalidInput(err.to_string()),
            other => AppError::Registry(other.to_string()),
        }
    }
}

impl From<tn_store::StoreError> for AppError {
    fn from(err: tn_store::StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}

impl From<tn_reports::ReportError> for AppError {
    fn from(err: tn_reports::ReportError) -> Self {
        AppError::Reports(err.to_string())
    }
}
