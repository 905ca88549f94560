//! Weighted shortest paths: Dijkstra (single pair) and Floyd–Warshall
//! (all pairs, answered for one pair).

use std::collections::{BTreeMap, HashMap, HashSet};

use nalgebra::DMatrix;
use tn_core::{Real, StationId, UNREACHABLE};

use crate::graph::Graph;
use crate::indexing::IndexMap;
use crate::traversal::walk_back;

/// Result of a weighted path query.
///
/// An empty `path` (with cost 0) means "no answer": either an endpoint is
/// unknown or the destination cannot be reached over open edges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    pub path: Vec<StationId>,
    pub cost: Real,
}

impl Route {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Dijkstra's algorithm with linear-scan selection.
///
/// O(V²) per query. Ties between equal tentative distances go to the lowest
/// station id. The search stops as soon as the destination is settled.
pub fn dijkstra(graph: &Graph, origin: StationId, destination: StationId) -> Route {
    if !graph.has_station(origin) || !graph.has_station(destination) {
        return Route::not_found();
    }

    let mut dist: BTreeMap<StationId, Real> =
        graph.station_ids().map(|id| (id, UNREACHABLE)).collect();
    let mut prev: HashMap<StationId, StationId> = HashMap::new();
    let mut settled: HashSet<StationId> = HashSet::new();
    dist.insert(origin, 0.0);

    loop {
        let mut next: Option<(StationId, Real)> = None;
        for (&id, &d) in &dist {
            if settled.contains(&id) {
                continue;
            }
            if next.is_none_or(|(_, best)| d < best) {
                next = Some((id, d));
            }
        }
        let Some((current, current_dist)) = next else {
            break;
        };
        if current_dist == UNREACHABLE {
            break;
        }
        settled.insert(current);
        if current == destination {
            break;
        }

        for edge in graph.neighbors(current) {
            if edge.closed {
                continue;
            }
            // Edges towards unregistered ids are ignored.
            let Some(known) = dist.get_mut(&edge.to) else {
                continue;
            };
            let candidate = current_dist + edge.weight;
            if candidate < *known {
                *known = candidate;
                prev.insert(edge.to, current);
            }
        }
    }

    let cost = dist.get(&destination).copied().unwrap_or(UNREACHABLE);
    if !settled.contains(&destination) || cost == UNREACHABLE {
        tracing::debug!(%origin, %destination, "dijkstra: destination unreachable");
        return Route::not_found();
    }

    let path = walk_back(destination, |id| {
        if id == origin {
            None
        } else {
            prev.get(&id).copied()
        }
    });
    tracing::debug!(%origin, %destination, cost, stops = path.len(), "dijkstra: path found");
    Route { path, cost }
}

/// All-pairs distance and next-hop tables for one snapshot of the graph.
struct AllPairs {
    index: IndexMap,
    dist: DMatrix<Real>,
    next: Vec<Option<usize>>,
}

impl AllPairs {
    fn build(graph: &Graph) -> Self {
        let index = IndexMap::from_graph(graph);
        let n = index.len();
        let mut dist = DMatrix::from_element(n, n, UNREACHABLE);
        let mut next = vec![None; n * n];

        for i in 0..n {
            dist[(i, i)] = 0.0;
            next[i * n + i] = Some(i);
        }

        for edge in graph.all_edges() {
            if edge.closed {
                continue;
            }
            let (Some(i), Some(j)) = (index.index_of(edge.from), index.index_of(edge.to)) else {
                continue;
            };
            // Parallel edges: keep the lightest.
            if edge.weight < dist[(i, j)] {
                dist[(i, j)] = edge.weight;
                next[i * n + j] = Some(j);
            }
        }

        for k in 0..n {
            for i in 0..n {
                let d_ik = dist[(i, k)];
                if d_ik == UNREACHABLE {
                    continue;
                }
                for j in 0..n {
                    let through_k = d_ik + dist[(k, j)];
                    if through_k < dist[(i, j)] {
                        dist[(i, j)] = through_k;
                        next[i * n + j] = next[i * n + k];
                    }
                }
            }
        }

        Self { index, dist, next }
    }

    fn next_hop(&self, i: usize, j: usize) -> Option<usize> {
        self.next[i * self.index.len() + j]
    }

    fn route(&self, origin: usize, destination: usize) -> Option<Route> {
        self.next_hop(origin, destination)?;

        let mut path = vec![self.index.station_id(origin)];
        let mut current = origin;
        while current != destination {
            current = self.next_hop(current, destination)?;
            path.push(self.index.station_id(current));
        }
        Some(Route {
            path,
            cost: self.dist[(origin, destination)],
        })
    }
}

/// Floyd–Warshall, recomputed from scratch on every call.
///
/// Builds dense N×N distance and next-hop tables over the current stations
/// and answers for one pair. O(V³) time and O(V²) memory per call, which
/// limits it to small and medium networks.
pub fn floyd_warshall(graph: &Graph, origin: StationId, destination: StationId) -> Route {
    if !graph.has_station(origin) || !graph.has_station(destination) {
        return Route::not_found();
    }

    let tables = AllPairs::build(graph);
    let (Some(i), Some(j)) = (
        tables.index.index_of(origin),
        tables.index.index_of(destination),
    ) else {
        return Route::not_found();
    };

    match tables.route(i, j) {
        Some(route) => {
            tracing::debug!(
                %origin,
                %destination,
                cost = route.cost,
                stations = tables.index.len(),
                "floyd-warshall: path found"
            );
            route
        }
        None => {
            tracing::debug!(%origin, %destination, "floyd-warshall: destination unreachable");
            Route::not_found()
        }
    }
}
