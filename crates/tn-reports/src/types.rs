//! Report data types.

use serde::{Deserialize, Serialize};
use tn_core::{Real, StationId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Route,
    Mst,
}

/// One recorded query.
///
/// Route entries carry the endpoints and the station path. Spanning tree
/// entries leave the endpoints empty and store their edges flattened as
/// `[from, to, from, to, ...]` in `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub id: String,
    /// RFC 3339, local time.
    pub timestamp: String,
    pub algorithm: String,
    pub kind: ReportKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<StationId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub origin_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<StationId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub destination_name: String,
    #[serde(default)]
    pub path: Vec<StationId>,
    #[serde(default)]
    pub path_names: Vec<String>,
    pub total_cost: Real,
}

impl ReportEntry {
    fn stamped(algorithm: impl Into<String>, kind: ReportKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Local::now().to_rfc3339(),
            algorithm: algorithm.into(),
            kind,
            origin: None,
            origin_name: String::new(),
            destination: None,
            destination_name: String::new(),
            path: Vec::new(),
            path_names: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// A route query. `path_names` is parallel to `path`.
    pub fn route(
        algorithm: impl Into<String>,
        origin: (StationId, &str),
        destination: (StationId, &str),
        path: Vec<StationId>,
        path_names: Vec<String>,
        total_cost: Real,
    ) -> Self {
        Self {
            origin: Some(origin.0),
            origin_name: origin.1.to_string(),
            destination: Some(destination.0),
            destination_name: destination.1.to_string(),
            path,
            path_names,
            total_cost,
            ..Self::stamped(algorithm, ReportKind::Route)
        }
    }

    /// A spanning tree query, `name_of` supplying a display name per station.
    pub fn spanning_tree(
        algorithm: impl Into<String>,
        edges: &[(StationId, StationId)],
        name_of: impl Fn(StationId) -> String,
        total_cost: Real,
    ) -> Self {
        let path: Vec<StationId> = edges.iter().flat_map(|&(a, b)| [a, b]).collect();
        let path_names = path.iter().map(|&id| name_of(id)).collect();
        Self {
            path,
            path_names,
            total_cost,
            ..Self::stamped(algorithm, ReportKind::Mst)
        }
    }

    /// Spanning tree edges, re-paired from the flattened path.
    pub fn edge_pairs(&self) -> Vec<(StationId, StationId)> {
        self.path
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Name recorded for the `i`-th path element, if any.
    pub fn name_at(&self, i: usize) -> Option<&str> {
        self.path_names
            .get(i)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}
