//! Plain-text rendering of the report log.

use std::fmt::Write as _;

use crate::types::{ReportEntry, ReportKind};

pub const HEADING: &str = "=== ROUTE QUERY REPORTS ===";
const RULE: &str = "----------------------------------------";

/// Render every entry, numbered from 1.
pub fn render_entries(entries: &[ReportEntry]) -> String {
    let mut out = format!("{HEADING}\n\n");
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "Report #{}", i + 1);
        render_entry(&mut out, entry);
        let _ = write!(out, "\n{RULE}\n\n");
    }
    out
}

fn render_entry(out: &mut String, entry: &ReportEntry) {
    let _ = writeln!(out, "Date and time: {}", display_time(&entry.timestamp));
    let _ = writeln!(out, "Algorithm: {}", entry.algorithm);

    match entry.kind {
        ReportKind::Mst => {
            let _ = writeln!(out, "Type: Minimum Spanning Tree (MST)");
            let _ = writeln!(out, "Edges: {}", entry.path.len() / 2);
            let _ = writeln!(out, "MST edges:");
            for (i, (from, to)) in entry.edge_pairs().into_iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  • {} ↔ {}",
                    labelled(from, entry.name_at(2 * i)),
                    labelled(to, entry.name_at(2 * i + 1))
                );
            }
            let _ = writeln!(out, "MST total cost: {:.2} km", entry.total_cost);
        }
        ReportKind::Route => {
            let _ = writeln!(
                out,
                "Origin: {} - {}",
                endpoint(entry.origin),
                entry.origin_name
            );
            let _ = writeln!(
                out,
                "Destination: {} - {}",
                endpoint(entry.destination),
                entry.destination_name
            );
            if entry.has_path() {
                let stops: Vec<String> = entry
                    .path
                    .iter()
                    .enumerate()
                    .map(|(i, &id)| labelled(id, entry.name_at(i)))
                    .collect();
                let _ = writeln!(out, "Route: {}", stops.join(" → "));
                let _ = writeln!(out, "Total cost: {:.2} km", entry.total_cost);
            } else {
                let _ = writeln!(out, "Route: no path found");
                let _ = writeln!(out, "Total cost: N/A");
            }
        }
    }
}

fn labelled(id: impl std::fmt::Display, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{id} ({name})"),
        None => id.to_string(),
    }
}

fn endpoint(id: Option<tn_core::StationId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "?".to_string())
}

/// `YYYY-MM-DD HH:MM:SS`, or the raw string when it is not RFC 3339.
fn display_time(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}
