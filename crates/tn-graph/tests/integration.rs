//! Integration tests for tn-graph.

use std::collections::BTreeSet;

use tn_core::StationId;
use tn_graph::{
    Algorithm, Graph, MstAlgorithm, Station, bfs, check_consistency, dfs, dijkstra, find_route,
    floyd_warshall, kruskal_mst, prim_mst, spanning_tree,
};

fn id(raw: i64) -> StationId {
    StationId::new(raw)
}

fn ids(raw: &[i64]) -> Vec<StationId> {
    raw.iter().copied().map(id).collect()
}

/// Stations {1:A, 2:B, 3:C}; A–B=4, B–C=3, A–C=10.
fn abc_network() -> Graph {
    let mut graph = Graph::new();
    graph.add_station(Station::new(id(1), "A"));
    graph.add_station(Station::new(id(2), "B"));
    graph.add_station(Station::new(id(3), "C"));
    graph.add_edge(id(1), id(2), 4.0, true);
    graph.add_edge(id(2), id(3), 3.0, true);
    graph.add_edge(id(1), id(3), 10.0, true);
    graph
}

fn undirected(tree: &tn_graph::SpanningTree) -> BTreeSet<(StationId, StationId)> {
    tree.edges
        .iter()
        .map(|&(a, b)| (a.min(b), a.max(b)))
        .collect()
}

#[test]
fn abc_scenario() {
    let mut graph = abc_network();

    let route = dijkstra(&graph, id(1), id(3));
    assert_eq!(route.path, ids(&[1, 2, 3]));
    assert_eq!(route.cost, 7.0);

    let expected: BTreeSet<_> = [(id(1), id(2)), (id(2), id(3))].into_iter().collect();
    let kruskal = kruskal_mst(&graph);
    let prim = prim_mst(&graph);
    assert_eq!(undirected(&kruskal), expected);
    assert_eq!(undirected(&prim), expected);
    assert_eq!(kruskal.total_cost, 7.0);
    assert_eq!(prim.total_cost, 7.0);

    assert_eq!(bfs(&graph, id(1), id(3)), ids(&[1, 3]));

    graph.mark_edge_closed(id(1), id(2), true, true);
    let route = dijkstra(&graph, id(1), id(3));
    assert_eq!(route.path, ids(&[1, 3]));
    assert_eq!(route.cost, 10.0);
}

#[test]
fn bidirectional_edges_are_symmetric() {
    let graph = abc_network();
    let from_a = graph.edges_from(id(1));
    let from_b = graph.edges_from(id(2));

    let ab = from_a.iter().find(|e| e.to == id(2)).unwrap();
    let ba = from_b.iter().find(|e| e.to == id(1)).unwrap();
    assert_eq!((ab.from, ab.to, ab.weight, ab.closed), (id(1), id(2), 4.0, false));
    assert_eq!((ba.from, ba.to, ba.weight, ba.closed), (id(2), id(1), 4.0, false));
    assert!(check_consistency(&graph).is_empty());
}

#[test]
fn closure_propagates_both_ways() {
    let mut graph = abc_network();
    graph.mark_edge_closed(id(2), id(3), true, true);
    assert!(graph.is_edge_closed(id(2), id(3)));
    assert!(graph.is_edge_closed(id(3), id(2)));

    graph.mark_edge_closed(id(2), id(3), false, true);
    assert!(!graph.is_edge_closed(id(2), id(3)));
    assert!(!graph.is_edge_closed(id(3), id(2)));
}

#[test]
fn closed_edges_stay_in_the_store() {
    let mut graph = abc_network();
    graph.mark_edge_closed(id(1), id(3), true, true);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.all_edges().len(), 6);
    assert_eq!(graph.all_edges().iter().filter(|e| e.closed).count(), 2);
}

#[test]
fn closed_edge_is_never_traversed() {
    let mut graph = abc_network();
    graph.mark_edge_closed(id(1), id(3), true, true);
    for algorithm in Algorithm::ALL {
        let route = find_route(&graph, algorithm, id(1), id(3));
        assert_eq!(route.path, ids(&[1, 2, 3]), "{algorithm}");
        assert_eq!(route.cost, 7.0, "{algorithm}");
    }
}

#[test]
fn removing_missing_edge_is_a_no_op() {
    let mut graph = abc_network();
    let before = graph.all_edges();
    graph.remove_edge(id(1), id(99), true);
    graph.remove_edge(id(42), id(43), true);
    graph.remove_edge(id(3), id(3), false);
    assert_eq!(graph.all_edges(), before);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn remove_edge_disconnects() {
    let mut graph = abc_network();
    graph.remove_edge(id(1), id(3), true);
    graph.remove_edge(id(2), id(3), true);
    assert!(dijkstra(&graph, id(1), id(3)).path.is_empty());
    assert!(floyd_warshall(&graph, id(1), id(3)).path.is_empty());
    assert!(dfs(&graph, id(1), id(3)).is_empty());
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn edge_order_follows_insertion() {
    let graph = abc_network();
    let to: Vec<_> = graph.edges_from(id(1)).iter().map(|e| e.to).collect();
    assert_eq!(to, ids(&[2, 3]));
    let all: Vec<_> = graph.all_edges().iter().map(|e| (e.from, e.to)).collect();
    assert_eq!(
        all,
        vec![
            (id(1), id(2)),
            (id(1), id(3)),
            (id(2), id(1)),
            (id(2), id(3)),
            (id(3), id(2)),
            (id(3), id(1)),
        ]
    );
}

#[test]
fn stations_are_listed_by_id() {
    let mut graph = Graph::new();
    for raw in [5, 1, 3] {
        graph.add_station(Station::new(id(raw), format!("S{raw}")));
    }
    let listed: Vec<_> = graph.stations().iter().map(|s| s.id).collect();
    assert_eq!(listed, ids(&[1, 3, 5]));
}

#[test]
fn grid_network_mst_and_paths() {
    // 4x4 grid, horizontal edges weigh 1, vertical edges weigh 2.
    let mut graph = Graph::new();
    let at = |r: i64, c: i64| id(r * 4 + c);
    for r in 0..4 {
        for c in 0..4 {
            graph.add_station(Station::new(at(r, c), format!("R{r}C{c}")));
        }
    }
    for r in 0..4 {
        for c in 0..4 {
            if c + 1 < 4 {
                graph.add_edge(at(r, c), at(r, c + 1), 1.0, true);
            }
            if r + 1 < 4 {
                graph.add_edge(at(r, c), at(r + 1, c), 2.0, true);
            }
        }
    }

    let route = dijkstra(&graph, at(0, 0), at(3, 3));
    assert_eq!(route.cost, 9.0);
    assert_eq!(route.path.len(), 7);
    assert_eq!(floyd_warshall(&graph, at(0, 0), at(3, 3)).cost, 9.0);
    assert_eq!(bfs(&graph, at(0, 0), at(3, 3)).len(), 7);

    // 12 horizontal edges at 1, plus 3 vertical edges at 2.
    for alg in [MstAlgorithm::Kruskal, MstAlgorithm::Prim] {
        let tree = spanning_tree(&graph, alg);
        assert_eq!(tree.len(), 15, "{alg}");
        assert_eq!(tree.total_cost, 18.0, "{alg}");
    }
}
