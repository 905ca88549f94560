//! Shared application service layer for transitnet.
//!
//! Wraps the graph, the station registry and the report log in one
//! [`Network`] service, and provides configuration and logging setup for the
//! command-line front end.

pub mod config;
pub mod error;
pub mod logging;
pub mod network;

// Re-export key types for convenience
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use logging::init_tracing;
pub use network::{MstOutcome, Network, RouteOutcome};
