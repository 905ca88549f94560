//! Unweighted reachability: breadth-first and depth-first search.
//!
//! Both searches ignore weights and skip closed edges. Neighbours are taken
//! in adjacency insertion order.

use std::collections::{HashMap, HashSet, VecDeque};

use tn_core::StationId;

use crate::graph::Graph;

/// Predecessor pointers; the origin maps to `None`.
pub(crate) type Parents = HashMap<StationId, Option<StationId>>;

/// Walk predecessor pointers back from `destination` and return the path
/// origin-first.
pub(crate) fn walk_back(
    destination: StationId,
    mut predecessor: impl FnMut(StationId) -> Option<StationId>,
) -> Vec<StationId> {
    let mut path = vec![destination];
    let mut current = destination;
    while let Some(prev) = predecessor(current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

fn reconstruct(parents: &Parents, destination: StationId) -> Vec<StationId> {
    walk_back(destination, |id| parents.get(&id).copied().flatten())
}

/// Breadth-first search from `origin` to `destination`.
///
/// Returns the path with the fewest hops over open edges, or an empty path if
/// either station is unknown or the destination is unreachable.
pub fn bfs(graph: &Graph, origin: StationId, destination: StationId) -> Vec<StationId> {
    if !graph.has_station(origin) || !graph.has_station(destination) {
        return Vec::new();
    }

    let mut visited: HashSet<StationId> = HashSet::from([origin]);
    let mut parents: Parents = HashMap::from([(origin, None)]);
    let mut queue = VecDeque::from([origin]);

    while let Some(current) = queue.pop_front() {
        if current == destination {
            break;
        }
        for edge in graph.neighbors(current) {
            if edge.closed || !visited.insert(edge.to) {
                continue;
            }
            parents.insert(edge.to, Some(current));
            queue.push_back(edge.to);
        }
    }

    if !visited.contains(&destination) {
        tracing::debug!(%origin, %destination, "bfs: destination unreachable");
        return Vec::new();
    }
    let path = reconstruct(&parents, destination);
    tracing::debug!(%origin, %destination, hops = path.len() - 1, "bfs: path found");
    path
}

/// Iterative depth-first search from `origin` to `destination`.
///
/// Stations are marked visited when popped, so a station can sit on the stack
/// more than once; only its first discovering predecessor is kept. Because of
/// the stack, the last edge of an adjacency list is explored first. The
/// returned path is valid but not minimal in hops or weight.
pub fn dfs(graph: &Graph, origin: StationId, destination: StationId) -> Vec<StationId> {
    if !graph.has_station(origin) || !graph.has_station(destination) {
        return Vec::new();
    }

    let mut visited: HashSet<StationId> = HashSet::new();
    let mut parents: Parents = HashMap::from([(origin, None)]);
    let mut stack = vec![origin];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        if current == destination {
            break;
        }
        for edge in graph.neighbors(current) {
            if edge.closed || visited.contains(&edge.to) {
                continue;
            }
            parents.entry(edge.to).or_insert(Some(current));
            stack.push(edge.to);
        }
    }

    if !visited.contains(&destination) {
        tracing::debug!(%origin, %destination, "dfs: destination unreachable");
        return Vec::new();
    }
    let path = reconstruct(&parents, destination);
    tracing::debug!(%origin, %destination, hops = path.len() - 1, "dfs: path found");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Station;

    fn id(raw: i64) -> StationId {
        StationId::new(raw)
    }

    fn graph(stations: &[i64], edges: &[(i64, i64, f64)]) -> Graph {
        let mut graph = Graph::new();
        for &raw in stations {
            graph.add_station(Station::new(id(raw), format!("S{raw}")));
        }
        for &(from, to, w) in edges {
            graph.add_edge(id(from), id(to), w, true);
        }
        graph
    }

    fn ids(raw: &[i64]) -> Vec<StationId> {
        raw.iter().copied().map(id).collect()
    }

    #[test]
    fn bfs_prefers_fewest_hops() {
        let g = graph(&[1, 2, 3], &[(1, 2, 4.0), (2, 3, 3.0), (1, 3, 10.0)]);
        assert_eq!(bfs(&g, id(1), id(3)), ids(&[1, 3]));
    }

    #[test]
    fn bfs_skips_closed_edges() {
        let mut g = graph(&[1, 2, 3], &[(1, 2, 4.0), (2, 3, 3.0), (1, 3, 10.0)]);
        g.mark_edge_closed(id(1), id(3), true, true);
        assert_eq!(bfs(&g, id(1), id(3)), ids(&[1, 2, 3]));
    }

    #[test]
    fn bfs_unknown_station_is_empty() {
        let g = graph(&[1, 2], &[(1, 2, 1.0)]);
        assert!(bfs(&g, id(1), id(9)).is_empty());
        assert!(bfs(&g, id(9), id(1)).is_empty());
    }

    #[test]
    fn bfs_same_origin_and_destination() {
        let g = graph(&[1, 2], &[(1, 2, 1.0)]);
        assert_eq!(bfs(&g, id(1), id(1)), ids(&[1]));
    }

    #[test]
    fn bfs_disconnected_is_empty() {
        let g = graph(&[1, 2, 3], &[(1, 2, 1.0)]);
        assert!(bfs(&g, id(1), id(3)).is_empty());
    }

    #[test]
    fn dfs_explores_last_edge_first() {
        // 1 -> [2, 3]; both reach 4. The stack pops 3 first.
        let g = graph(
            &[1, 2, 3, 4],
            &[(1, 2, 1.0), (1, 3, 1.0), (2, 4, 1.0), (3, 4, 1.0)],
        );
        assert_eq!(dfs(&g, id(1), id(4)), ids(&[1, 3, 4]));
    }

    #[test]
    fn dfs_keeps_first_discovered_parent() {
        // 4 is first discovered from 1, then pushed again from 3. The parent
        // recorded for 4 stays 1 even though 3 pushes it last.
        let g = graph(
            &[1, 2, 3, 4],
            &[(1, 4, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)],
        );
        // Stack after 1: [4, 2]; 2 -> push 3 (and 1 is visited); 3 -> push 4.
        assert_eq!(dfs(&g, id(1), id(4)), ids(&[1, 4]));
    }

    #[test]
    fn dfs_skips_closed_edges() {
        let mut g = graph(&[1, 2, 3], &[(1, 2, 1.0), (2, 3, 1.0)]);
        g.mark_edge_closed(id(2), id(3), true, true);
        assert!(dfs(&g, id(1), id(3)).is_empty());
        g.mark_edge_closed(id(2), id(3), false, true);
        assert_eq!(dfs(&g, id(1), id(3)), ids(&[1, 2, 3]));
    }

    #[test]
    fn dfs_unknown_station_is_empty() {
        let g = graph(&[1], &[]);
        assert!(dfs(&g, id(1), id(2)).is_empty());
    }

    #[test]
    fn walk_back_reverses() {
        let parents: Parents =
            HashMap::from([(id(1), None), (id(2), Some(id(1))), (id(3), Some(id(2)))]);
        assert_eq!(reconstruct(&parents, id(3)), ids(&[1, 2, 3]));
    }
}
