//! Dense indexing for matrix-based algorithms.
//!
//! Provides a bijection between station ids and contiguous indices (0..N),
//! taken as a snapshot of the stations present when it is built.

use tn_core::StationId;

use crate::graph::Graph;

/// Index map providing contiguous indices for the stations of a graph.
///
/// Indices follow ascending station id, so index order matches the order of
/// every other station enumeration in the crate.
#[derive(Debug, Clone, Default)]
pub struct IndexMap {
    /// Sorted station ids (index -> StationId).
    station_ids: Vec<StationId>,
}

impl IndexMap {
    /// Build an index map from the current stations of a graph.
    pub fn from_graph(graph: &Graph) -> Self {
        // Already sorted: the station map is ordered by id.
        Self {
            station_ids: graph.station_ids().collect(),
        }
    }

    /// Number of stations in the index.
    pub fn len(&self) -> usize {
        self.station_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.station_ids.is_empty()
    }

    /// Contiguous index for a station id, `None` if it was not indexed.
    pub fn index_of(&self, id: StationId) -> Option<usize> {
        self.station_ids.binary_search(&id).ok()
    }

    /// Station id for a contiguous index (panics if out of bounds).
    pub fn station_id(&self, i: usize) -> StationId {
        self.station_ids[i]
    }

    /// All indexed station ids in index order.
    pub fn station_ids(&self) -> &[StationId] {
        &self.station_ids
    }
}
