//! Minimum spanning trees: Kruskal (union-find) and Prim (linear scan).
//!
//! Both treat every open directed edge as a candidate, so the two halves of a
//! bidirectional connection are offered twice; the second offer is rejected
//! because its endpoints are already joined. On a disconnected network the
//! result is a forest (Kruskal) or the tree of the first station's component
//! (Prim).

use std::collections::{BTreeMap, HashMap, HashSet};

use tn_core::{Real, StationId, UNREACHABLE};

use crate::graph::Graph;

/// Result of a spanning tree query: accepted `(from, to)` pairs plus the sum
/// of their weights.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpanningTree {
    pub edges: Vec<(StationId, StationId)>,
    pub total_cost: Real,
}

impl SpanningTree {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of accepted edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }
}

/// Disjoint sets over station ids.
///
/// `find` compresses paths by pointing each visited node at its grandparent;
/// there is no union by rank.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: HashMap<StationId, StationId>,
}

impl UnionFind {
    /// Every id starts in its own set.
    pub fn new(ids: impl IntoIterator<Item = StationId>) -> Self {
        Self {
            parent: ids.into_iter().map(|id| (id, id)).collect(),
        }
    }

    pub fn contains(&self, id: StationId) -> bool {
        self.parent.contains_key(&id)
    }

    /// Root of the set containing `id`, `None` for ids that were never added.
    pub fn find(&mut self, id: StationId) -> Option<StationId> {
        let mut current = id;
        loop {
            let parent = *self.parent.get(&current)?;
            if parent == current {
                return Some(current);
            }
            let grandparent = self.parent[&parent];
            self.parent.insert(current, grandparent);
            current = grandparent;
        }
    }

    /// Attach the root of `x` under the root of `y`.
    ///
    /// Returns `false` when both are already in the same set or either id is
    /// unknown.
    pub fn union(&mut self, x: StationId, y: StationId) -> bool {
        let (Some(root_x), Some(root_y)) = (self.find(x), self.find(y)) else {
            return false;
        };
        if root_x == root_y {
            return false;
        }
        self.parent.insert(root_x, root_y);
        true
    }
}

/// Kruskal's algorithm.
///
/// All directed edges are stably sorted by weight, so equal weights keep the
/// order of [`Graph::all_edges`]. Closed edges and edges touching unknown
/// stations are skipped.
pub fn kruskal_mst(graph: &Graph) -> SpanningTree {
    let mut edges = graph.all_edges();
    edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let mut sets = UnionFind::new(graph.station_ids());
    let mut tree = SpanningTree::default();

    for edge in edges.iter().filter(|e| e.is_open()) {
        if sets.union(edge.from, edge.to) {
            tree.edges.push((edge.from, edge.to));
            tree.total_cost += edge.weight;
        }
    }

    tracing::debug!(
        edges = tree.len(),
        total_cost = tree.total_cost,
        stations = graph.station_count(),
        "kruskal: done"
    );
    tree
}

/// Prim's algorithm, started from the lowest station id.
///
/// The next station is picked by a linear scan over the per-station cheapest
/// connecting weight (ties go to the lowest id), O(V²) overall.
pub fn prim_mst(graph: &Graph) -> SpanningTree {
    let Some(start) = graph.station_ids().next() else {
        return SpanningTree::default();
    };

    let mut key: BTreeMap<StationId, Real> =
        graph.station_ids().map(|id| (id, UNREACHABLE)).collect();
    let mut parent: HashMap<StationId, StationId> = HashMap::new();
    let mut included: HashSet<StationId> = HashSet::new();
    let mut tree = SpanningTree::default();
    key.insert(start, 0.0);

    loop {
        let mut next: Option<(StationId, Real)> = None;
        for (&id, &k) in &key {
            if included.contains(&id) {
                continue;
            }
            if next.is_none_or(|(_, best)| k < best) {
                next = Some((id, k));
            }
        }
        let Some((current, weight)) = next else {
            break;
        };
        if weight == UNREACHABLE {
            break;
        }
        included.insert(current);
        if let Some(&from) = parent.get(&current) {
            tree.edges.push((from, current));
            tree.total_cost += weight;
        }

        for edge in graph.neighbors(current) {
            if edge.closed || included.contains(&edge.to) {
                continue;
            }
            let Some(best) = key.get_mut(&edge.to) else {
                continue;
            };
            if edge.weight < *best {
                *best = edge.weight;
                parent.insert(edge.to, current);
            }
        }
    }

    tracing::debug!(
        %start,
        edges = tree.len(),
        total_cost = tree.total_cost,
        "prim: done"
    );
    tree
}
