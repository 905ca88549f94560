//! Service-level tests: persistence through the data directory and the
//! registry/graph sync contract.

use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;
use tn_app::{AppConfig, AppError, Network};
use tn_core::StationId;
use tn_graph::{Algorithm, MstAlgorithm};
use tn_registry::TraversalOrder;

fn id(raw: i64) -> StationId {
    StationId::new(raw)
}

fn scratch_config(name: &str) -> (AppConfig, PathBuf) {
    let dir = std::env::temp_dir().join(format!("tn-app-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let config = AppConfig {
        data_dir: dir.clone(),
        ..AppConfig::default()
    };
    (config, dir)
}

fn sample() -> Network {
    let mut net = Network::new();
    for (raw, name) in [(10, "Central"), (5, "Norte"), (20, "Sur"), (15, "Este")] {
        net.add_station(id(raw), name).unwrap();
    }
    net.connect(id(10), id(5), 4.0).unwrap();
    net.connect(id(5), id(20), 3.0).unwrap();
    net.connect(id(10), id(20), 10.0).unwrap();
    net.connect(id(20), id(15), 1.5).unwrap();
    net.close(id(5), id(20)).unwrap();
    net
}

#[test]
fn save_then_load_restores_network_and_reports() {
    let (config, dir) = scratch_config("roundtrip");
    let mut net = sample();
    let route = net.find_route(Algorithm::Dijkstra, id(10), id(15)).unwrap();
    assert_eq!(route.cost, 11.5);
    net.spanning_tree(MstAlgorithm::Kruskal).unwrap();
    net.save(&config).unwrap();

    let stations = fs::read_to_string(dir.join("estaciones.txt")).unwrap();
    assert!(stations.contains("5;Norte\n10;Central\n15;Este\n20;Sur\n"));

    let mut loaded = Network::new();
    let summary = loaded.load(&config).unwrap();
    assert_eq!(summary.stations, 4);
    assert_eq!(summary.routes, 4);
    assert_eq!(summary.closures, 1);
    assert_eq!(summary.skipped, 0);

    assert_eq!(loaded.stations(), net.stations());
    assert!(loaded.graph().is_edge_closed(id(20), id(5)));
    assert_eq!(loaded.reports().entries(), net.reports().entries());

    let again = loaded
        .find_route(Algorithm::Dijkstra, id(10), id(15))
        .unwrap();
    assert_eq!(again.path, route.path);
    assert_eq!(loaded.reports().len(), 3);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_skips_bad_references() {
    let (config, dir) = scratch_config("bad-refs");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("estaciones.txt"), "1;A\n2;B\n2;B again\nx;broken\n").unwrap();
    fs::write(dir.join("rutas.txt"), "1;2;5\n1;9;2\n").unwrap();
    fs::write(dir.join("cierres.txt"), "2;1\n1;3\n").unwrap();

    let mut net = Network::new();
    let summary = net.load(&config).unwrap();
    assert_eq!(summary.stations, 2);
    assert_eq!(summary.routes, 1);
    assert_eq!(summary.closures, 1);
    // Broken line, duplicate id, dangling route, closure of a missing route.
    assert_eq!(summary.skipped, 4);
    assert_eq!(net.graph().station_name(id(2)), Some("B"));
    assert!(net.graph().is_edge_closed(id(1), id(2)));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn closed_pair_survives_save_and_load() {
    let (config, dir) = scratch_config("closed-pair");
    let mut net = Network::new();
    net.add_station(id(1), "A").unwrap();
    net.add_station(id(2), "B").unwrap();
    net.connect(id(1), id(2), 4.0).unwrap();
    assert!(matches!(
        net.connect(id(1), id(2), 5.0),
        Err(AppError::DuplicateRoute { .. })
    ));
    net.close(id(1), id(2)).unwrap();
    let before = net.find_route(Algorithm::Dijkstra, id(1), id(2)).unwrap();
    net.save(&config).unwrap();

    let mut loaded = Network::new();
    loaded.load(&config).unwrap();
    let after = loaded.find_route(Algorithm::Dijkstra, id(1), id(2)).unwrap();
    assert_eq!(after.found(), before.found());
    assert_eq!(loaded.edges(), net.edges());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_keeps_first_route_of_a_repeated_pair() {
    let (config, dir) = scratch_config("repeated-pair");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("estaciones.txt"), "1;A
2;B
").unwrap();
    fs::write(dir.join("rutas.txt"), "1;2;4
2;1;5
1;2;6
2;2;1
").unwrap();

    let mut net = Network::new();
    let summary = net.load(&config).unwrap();
    assert_eq!(summary.routes, 1);
    assert_eq!(summary.skipped, 3);
    assert_eq!(net.graph().edge_count(), 1);
    assert_eq!(net.graph().edges_from(id(1))[0].weight, 4.0);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unreadable_report_does_not_block_load() {
    let (config, dir) = scratch_config("bad-report");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("estaciones.txt"), "1;A\n2;B\n").unwrap();
    fs::write(dir.join("reportes.jsonl"), "{not json\n").unwrap();

    let mut net = Network::new();
    let summary = net.load(&config).unwrap();
    assert_eq!(summary.stations, 2);
    assert_eq!(summary.skipped, 1);
    assert!(net.reports().is_empty());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_replaces_previous_state() {
    let (config, dir) = scratch_config("replace");
    let mut net = sample();
    net.load(&config).unwrap();
    assert!(net.stations().is_empty());
    assert!(net.graph().is_empty());
    assert!(net.reports().is_empty());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn traversal_export_and_report_text() {
    let (_, dir) = scratch_config("exports");
    let mut net = sample();
    net.find_route(Algorithm::Bfs, id(5), id(15)).unwrap();

    assert_eq!(
        net.traverse(TraversalOrder::PreOrder),
        vec![id(10), id(5), id(20), id(15)]
    );
    let path = dir.join("recorridos.txt");
    net.registry().export_traversals(&path).unwrap_err();
    fs::create_dir_all(&dir).unwrap();
    net.registry().export_traversals(&path).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("Post-Order: 5, 15, 20, 10"));

    let text = net.reports().render_text();
    assert!(text.contains("Algorithm: BFS"));
    assert!(text.contains("Route: 5 (Norte) → 10 (Central) → 20 (Sur) → 15 (Este)"));
    assert!(text.contains("Total cost: 15.50 km"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn disconnect_requires_existing_route() {
    let mut net = sample();
    net.disconnect(id(10), id(20)).unwrap();
    assert!(!net.graph().has_edge(id(20), id(10)));
    assert!(matches!(
        net.disconnect(id(10), id(20)),
        Err(AppError::RouteNotFound { .. })
    ));
}

#[derive(Debug, Clone)]
enum Op {
    Add(i64),
    Remove(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(0i64..12).prop_map(Op::Add), (0i64..12).prop_map(Op::Remove)]
}

proptest! {
    #[test]
    fn registry_and_graph_stay_in_sync(ops in prop::collection::vec(op(), 0..40)) {
        let mut net = Network::new();
        for op in ops {
            match op {
                Op::Add(raw) => {
                    let _ = net.add_station(id(raw), &format!("S{raw}"));
                }
                Op::Remove(raw) => {
                    let _ = net.remove_station(id(raw));
                }
            }
            prop_assert_eq!(net.registry().stations(), net.graph().stations());
            prop_assert_eq!(net.registry().len(), net.graph().station_count());
        }
    }
}
