//! Graph consistency checks.

use std::collections::BTreeMap;

use tn_core::StationId;

use crate::error::GraphError;
use crate::graph::{Edge, Graph};

/// Report edges that break the store's invariants.
///
/// - every endpoint should be a registered station;
/// - the n-th `a -> b` edge and the n-th `b -> a` edge are mirrors and must
///   agree on weight and closed flag.
///
/// One-way edges show up as `MissingMirror`, which is only a problem for
/// networks that are meant to be fully bidirectional. Self-loops are not
/// paired.
pub fn check_consistency(graph: &Graph) -> Vec<GraphError> {
    let mut issues = Vec::new();
    let mut pairs: BTreeMap<(StationId, StationId), (Vec<Edge>, Vec<Edge>)> = BTreeMap::new();

    for edge in graph.all_edges() {
        if !graph.has_station(edge.from) {
            issues.push(GraphError::DanglingEdge {
                from: edge.from,
                to: edge.to,
                missing: edge.from,
            });
        } else if !graph.has_station(edge.to) {
            issues.push(GraphError::DanglingEdge {
                from: edge.from,
                to: edge.to,
                missing: edge.to,
            });
        }

        if edge.from == edge.to {
            continue;
        }
        let key = (edge.from.min(edge.to), edge.from.max(edge.to));
        let (forward, reverse) = pairs.entry(key).or_default();
        if edge.from == key.0 {
            forward.push(edge);
        } else {
            reverse.push(edge);
        }
    }

    for (forward, reverse) in pairs.values() {
        for i in 0..forward.len().max(reverse.len()) {
            match (forward.get(i), reverse.get(i)) {
                (Some(f), Some(r)) => {
                    if f.weight != r.weight {
                        issues.push(GraphError::MirrorMismatch {
                            from: f.from,
                            to: f.to,
                            what: "weight",
                        });
                    }
                    if f.closed != r.closed {
                        issues.push(GraphError::MirrorMismatch {
                            from: f.from,
                            to: f.to,
                            what: "closed",
                        });
                    }
                }
                (Some(e), None) | (None, Some(e)) => {
                    issues.push(GraphError::MissingMirror {
                        from: e.from,
                        to: e.to,
                    });
                }
                (None, None) => {}
            }
        }
    }

    issues
}
