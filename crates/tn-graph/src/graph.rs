//! Core graph data structures.

use std::collections::BTreeMap;

use tn_core::{Real, StationId};

/// A stop in the transport network.
///
/// `Station::default()` (id 0, empty name) is the "not found" value returned
/// by [`Graph::station_or_default`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A directed, weighted connection between two stations.
///
/// A bidirectional connection is stored as two `Edge` records, one in each
/// endpoint's adjacency list, each with its own `closed` flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: StationId,
    pub to: StationId,
    /// Distance in km.
    pub weight: Real,
    pub closed: bool,
}

impl Edge {
    pub fn new(from: StationId, to: StationId, weight: Real) -> Self {
        Self {
            from,
            to,
            weight,
            closed: false,
        }
    }

    /// Edges that queries may use.
    pub fn is_open(&self) -> bool {
        !self.closed
    }
}

/// The transport network: stations plus per-station outgoing edge lists.
///
/// Both maps are ordered by station id, and each adjacency list keeps
/// insertion order. Every query engine depends on that ordering for its
/// tie-breaks, so results are reproducible for a given sequence of mutations.
///
/// Edge endpoints are not validated against `stations`; adjacency entries are
/// created lazily and the engines skip or tolerate dangling endpoints.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    stations: BTreeMap<StationId, Station>,
    adjacency: BTreeMap<StationId, Vec<Edge>>,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a station, making sure it has an adjacency entry.
    pub fn add_station(&mut self, station: Station) {
        self.adjacency.entry(station.id).or_default();
        self.stations.insert(station.id, station);
    }

    /// Remove a station, its outgoing edges, and every edge pointing at it.
    ///
    /// Returns `false` if the id was unknown.
    pub fn remove_station(&mut self, id: StationId) -> bool {
        let removed = self.stations.remove(&id).is_some();
        self.adjacency.remove(&id);
        for edges in self.adjacency.values_mut() {
            edges.retain(|e| e.to != id);
        }
        removed
    }

    /// Append `from -> to`, plus `to -> from` when `bidirectional`.
    ///
    /// No duplicate detection: adding the same pair twice creates parallel
    /// edges.
    pub fn add_edge(&mut self, from: StationId, to: StationId, weight: Real, bidirectional: bool) {
        self.adjacency.entry(to).or_default();
        self.adjacency
            .entry(from)
            .or_default()
            .push(Edge::new(from, to, weight));
        if bidirectional {
            self.adjacency
                .entry(to)
                .or_default()
                .push(Edge::new(to, from, weight));
        }
    }

    /// Remove the first `from -> to` edge (and the first `to -> from` when
    /// `bidirectional`). Missing edges are ignored.
    pub fn remove_edge(&mut self, from: StationId, to: StationId, bidirectional: bool) {
        Self::remove_first(self.adjacency.get_mut(&from), to);
        if bidirectional {
            Self::remove_first(self.adjacency.get_mut(&to), from);
        }
    }

    /// Set the `closed` flag on the first `from -> to` edge (and the first
    /// `to -> from` when `bidirectional`). Missing edges are ignored.
    pub fn mark_edge_closed(
        &mut self,
        from: StationId,
        to: StationId,
        closed: bool,
        bidirectional: bool,
    ) {
        if let Some(edge) = self.first_edge_mut(from, to) {
            edge.closed = closed;
        }
        if bidirectional {
            if let Some(edge) = self.first_edge_mut(to, from) {
                edge.closed = closed;
            }
        }
    }

    fn remove_first(edges: Option<&mut Vec<Edge>>, to: StationId) {
        if let Some(edges) = edges {
            if let Some(pos) = edges.iter().position(|e| e.to == to) {
                edges.remove(pos);
            }
        }
    }

    fn first_edge_mut(&mut self, from: StationId, to: StationId) -> Option<&mut Edge> {
        self.adjacency
            .get_mut(&from)?
            .iter_mut()
            .find(|e| e.to == to)
    }

    pub fn has_station(&self, id: StationId) -> bool {
        self.stations.contains_key(&id)
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Copy of the station, or `Station::default()` for an unknown id.
    ///
    /// Check [`Graph::has_station`] first when id 0 is a real station.
    pub fn station_or_default(&self, id: StationId) -> Station {
        self.stations.get(&id).cloned().unwrap_or_default()
    }

    /// Display name, `None` for unknown ids.
    pub fn station_name(&self, id: StationId) -> Option<&str> {
        self.stations.get(&id).map(|s| s.name.as_str())
    }

    /// All stations, sorted by id.
    pub fn stations(&self) -> Vec<Station> {
        self.stations.values().cloned().collect()
    }

    /// Station ids, sorted.
    pub fn station_ids(&self) -> impl Iterator<Item = StationId> + '_ {
        self.stations.keys().copied()
    }

    /// Copy of the outgoing edges of `id` in insertion order.
    pub fn edges_from(&self, id: StationId) -> Vec<Edge> {
        self.adjacency.get(&id).cloned().unwrap_or_default()
    }

    /// Borrowing view of the outgoing edges, used by the engines.
    pub(crate) fn neighbors(&self, id: StationId) -> &[Edge] {
        self.adjacency.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Every directed edge: adjacency lists in id order, each in insertion order.
    pub fn all_edges(&self) -> Vec<Edge> {
        self.adjacency.values().flatten().copied().collect()
    }

    /// Closed flag of the first `from -> to` edge; `false` if there is none.
    pub fn is_edge_closed(&self, from: StationId, to: StationId) -> bool {
        self.neighbors(from)
            .iter()
            .find(|e| e.to == to)
            .is_some_and(|e| e.closed)
    }

    /// Whether any `from -> to` edge exists, open or closed.
    pub fn has_edge(&self, from: StationId, to: StationId) -> bool {
        self.neighbors(from).iter().any(|e| e.to == to)
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of undirected connections (directed edges / 2).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty() && self.adjacency.is_empty()
    }

    /// Drop all stations and edges.
    pub fn clear(&mut self) {
        self.stations.clear();
        self.adjacency.clear();
    }

    /// Sum of hop weights along `path`, using the first open edge of each hop.
    ///
    /// Returns `None` if some hop has no open edge. An empty or single-stop
    /// path costs 0.
    pub fn path_cost(&self, path: &[StationId]) -> Option<Real> {
        path.windows(2).try_fold(0.0, |acc, hop| {
            self.neighbors(hop[0])
                .iter()
                .find(|e| e.to == hop[1] && e.is_open())
                .map(|e| acc + e.weight)
        })
    }
}
