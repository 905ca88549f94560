//! Graph-specific error types.

use tn_core::StationId;

/// Problems reported by the graph crate.
///
/// The query engines never fail; these cover name parsing and the
/// consistency findings of [`crate::validate::check_consistency`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Edge {from} -> {to} refers to unknown station {missing}")]
    DanglingEdge {
        from: StationId,
        to: StationId,
        missing: StationId,
    },

    #[error("Edge {from} -> {to} has no reverse edge")]
    MissingMirror { from: StationId, to: StationId },

    #[error("Edge {from} -> {to} disagrees with its reverse edge on {what}")]
    MirrorMismatch {
        from: StationId,
        to: StationId,
        what: &'static str,
    },
}
