//! tn-graph: transport network graph store and query engines.
//!
//! Provides:
//! - Graph store (Station, Edge, Graph) with edge closures
//! - Reachability (BFS, DFS)
//! - Shortest paths (Dijkstra, Floyd–Warshall)
//! - Minimum spanning trees (Kruskal, Prim)
//! - Dense indexing and consistency checks
//!
//! # Example
//!
//! ```
//! use tn_core::StationId;
//! use tn_graph::{Graph, Station, dijkstra};
//!
//! let (a, b, c) = (StationId::new(1), StationId::new(2), StationId::new(3));
//! let mut graph = Graph::new();
//! graph.add_station(Station::new(a, "A"));
//! graph.add_station(Station::new(b, "B"));
//! graph.add_station(Station::new(c, "C"));
//! graph.add_edge(a, b, 4.0, true);
//! graph.add_edge(b, c, 3.0, true);
//! graph.add_edge(a, c, 10.0, true);
//!
//! let route = dijkstra(&graph, a, c);
//! assert_eq!(route.path, vec![a, b, c]);
//! assert_eq!(route.cost, 7.0);
//! ```

pub mod error;
pub mod graph;
pub mod indexing;
pub mod query;
pub mod shortest;
pub mod spanning;
pub mod traversal;
pub mod validate;

// Re-exports for ergonomics
pub use error::GraphError;
pub use graph::{Edge, Graph, Station};
pub use indexing::IndexMap;
pub use query::{Algorithm, MstAlgorithm, find_route, spanning_tree};
pub use shortest::{Route, dijkstra, floyd_warshall};
pub use spanning::{SpanningTree, UnionFind, kruskal_mst, prim_mst};
pub use traversal::{bfs, dfs};
pub use validate::check_consistency;
