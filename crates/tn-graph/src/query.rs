//! Algorithm selection and dispatch.

use core::fmt;
use core::str::FromStr;

use tn_core::StationId;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::shortest::{Route, dijkstra, floyd_warshall};
use crate::spanning::{SpanningTree, kruskal_mst, prim_mst};
use crate::traversal::{bfs, dfs};

/// Path-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    Bfs,
    Dfs,
    #[default]
    Dijkstra,
    FloydWarshall,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::FloydWarshall,
    ];

    /// Display name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::FloydWarshall => "Floyd-Warshall",
        }
    }

    /// Whether the algorithm minimizes total weight.
    pub fn is_weighted(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::FloydWarshall)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "floyd-warshall" | "floyd" | "fw" => Ok(Algorithm::FloydWarshall),
            _ => Err(GraphError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Spanning tree algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MstAlgorithm {
    #[default]
    Kruskal,
    Prim,
}

impl MstAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            MstAlgorithm::Kruskal => "Kruskal MST",
            MstAlgorithm::Prim => "Prim MST",
        }
    }
}

impl fmt::Display for MstAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MstAlgorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kruskal" => Ok(MstAlgorithm::Kruskal),
            "prim" => Ok(MstAlgorithm::Prim),
            _ => Err(GraphError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Run a path query.
///
/// BFS and DFS ignore weights while searching; their cost is the sum of the
/// hop weights along the returned path.
pub fn find_route(
    graph: &Graph,
    algorithm: Algorithm,
    origin: StationId,
    destination: StationId,
) -> Route {
    match algorithm {
        Algorithm::Dijkstra => dijkstra(graph, origin, destination),
        Algorithm::FloydWarshall => floyd_warshall(graph, origin, destination),
        Algorithm::Bfs | Algorithm::Dfs => {
            let path = if algorithm == Algorithm::Bfs {
                bfs(graph, origin, destination)
            } else {
                dfs(graph, origin, destination)
            };
            let cost = graph.path_cost(&path).unwrap_or_default();
            Route { path, cost }
        }
    }
}

/// Run a spanning tree query.
pub fn spanning_tree(graph: &Graph, algorithm: MstAlgorithm) -> SpanningTree {
    match algorithm {
        MstAlgorithm::Kruskal => kruskal_mst(graph),
        MstAlgorithm::Prim => prim_mst(graph),
    }
}
