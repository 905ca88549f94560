//! Line formats and readers/writers for the three network files.
//!
//! ```text
//! estaciones.txt   id;name
//! rutas.txt        from;to;weight   (one line per two-way connection)
//! cierres.txt      from;to          (one line per closed connection)
//! ```

use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tn_core::{Real, StationId, ensure_weight};
use tn_graph::{Edge, Station};

use crate::{StoreError, StoreResult};

/// A two-way connection as stored in the routes file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRecord {
    pub from: StationId,
    pub to: StationId,
    pub weight: Real,
}

/// A closed connection as stored in the closures file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureRecord {
    pub from: StationId,
    pub to: StationId,
}

/// Records read from one file plus the number of lines that did not parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

pub fn read_stations(path: &Path) -> StoreResult<Parsed<Station>> {
    read_records(path, |fields| {
        let [id, name, ..] = fields else {
            return None;
        };
        let id: StationId = id.parse().ok()?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Station::new(id, name))
    })
}

pub fn read_routes(path: &Path) -> StoreResult<Parsed<RouteRecord>> {
    read_records(path, |fields| {
        let [from, to, weight, ..] = fields else {
            return None;
        };
        let weight: Real = weight.trim().parse().ok()?;
        Some(RouteRecord {
            from: from.parse().ok()?,
            to: to.parse().ok()?,
            weight: ensure_weight(weight, "route weight").ok()?,
        })
    })
}

pub fn read_closures(path: &Path) -> StoreResult<Parsed<ClosureRecord>> {
    read_records(path, |fields| {
        let [from, to, ..] = fields else {
            return None;
        };
        Some(ClosureRecord {
            from: from.parse().ok()?,
            to: to.parse().ok()?,
        })
    })
}

/// Shared line loop. A missing file reads as empty.
fn read_records<T>(
    path: &Path,
    parse: impl Fn(&[&str]) -> Option<T>,
) -> StoreResult<Parsed<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "file missing, nothing to load");
            return Ok(Parsed::default());
        }
        Err(err) => return Err(StoreError::io(path, err)),
    };

    let mut parsed = Parsed::default();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(';').collect();
        match parse(&fields) {
            Some(record) => parsed.records.push(record),
            None => {
                tracing::warn!(
                    path = %path.display(),
                    line = number + 1,
                    content = line,
                    "skipping malformed line"
                );
                parsed.skipped += 1;
            }
        }
    }
    Ok(parsed)
}

pub fn write_stations(path: &Path, stations: &[Station]) -> StoreResult<()> {
    let mut out = header("Estaciones", "ID;Nombre");
    for station in stations {
        let _ = writeln!(out, "{};{}", station.id, station.name);
    }
    write_file(path, &out)
}

/// Write one line per unordered station pair, in edge order.
pub fn write_routes(path: &Path, edges: &[Edge]) -> StoreResult<()> {
    let mut out = header("Rutas", "ID_origen;ID_destino;peso");
    for edge in once_per_pair(edges.iter()) {
        let _ = writeln!(out, "{};{};{}", edge.from, edge.to, edge.weight);
    }
    write_file(path, &out)
}

/// Write one line per unordered pair that has a closed edge.
pub fn write_closures(path: &Path, edges: &[Edge]) -> StoreResult<()> {
    let mut out = header("Rutas cerradas", "ID_origen;ID_destino");
    for edge in once_per_pair(edges.iter().filter(|e| e.closed)) {
        let _ = writeln!(out, "{};{}", edge.from, edge.to);
    }
    write_file(path, &out)
}

fn header(title: &str, format: &str) -> String {
    format!("# {title}\n# Formato: {format}\n\n")
}

fn once_per_pair<'a>(edges: impl Iterator<Item = &'a Edge>) -> impl Iterator<Item = &'a Edge> {
    let mut written: HashSet<(StationId, StationId)> = HashSet::new();
    edges.filter(move |edge| written.insert((edge.from.min(edge.to), edge.from.max(edge.to))))
}

fn write_file(path: &Path, content: &str) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }
    }
    fs::write(path, content).map_err(|err| StoreError::io(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: i64) -> StationId {
        StationId::new(raw)
    }

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("tn-store-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn stations_skip_comments_blanks_and_garbage() {
        let dir = scratch("stations");
        let path = dir.join("estaciones.txt");
        fs::write(
            &path,
            "# Estaciones\n\n1;Central\n  2 ; Norte  \nabc;Bad\n3\n4;\n5;Sur;extra\n",
        )
        .unwrap();

        let parsed = read_stations(&path).unwrap();
        assert_eq!(
            parsed.records,
            vec![
                Station::new(id(1), "Central"),
                Station::new(id(2), "Norte"),
                Station::new(id(5), "Sur"),
            ]
        );
        assert_eq!(parsed.skipped, 3);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn routes_reject_bad_weights() {
        let dir = scratch("routes");
        let path = dir.join("rutas.txt");
        fs::write(&path, "1;2;4.5\n2;3;-1\n3;4;inf\n4;5;x\n5;6;0\n").unwrap();

        let parsed = read_routes(&path).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].weight, 4.5);
        assert_eq!(parsed.records[1].weight, 0.0);
        assert_eq!(parsed.skipped, 3);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = scratch("missing");
        let parsed = read_closures(&dir.join("cierres.txt")).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 0);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn routes_written_once_per_pair() {
        let dir = scratch("dedupe");
        let path = dir.join("rutas.txt");
        let edges = vec![
            Edge::new(id(1), id(2), 4.0),
            Edge::new(id(1), id(3), 10.0),
            Edge::new(id(2), id(1), 4.0),
            Edge::new(id(3), id(1), 10.0),
        ];
        write_routes(&path, &edges).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Rutas\n# Formato: ID_origen;ID_destino;peso\n\n"));
        let lines: Vec<&str> = text.lines().skip(3).collect();
        assert_eq!(lines, vec!["1;2;4", "1;3;10"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn closures_only_list_closed_pairs() {
        let dir = scratch("closures");
        let path = dir.join("cierres.txt");
        let mut closed = Edge::new(id(2), id(3), 3.0);
        closed.closed = true;
        let mut mirror = Edge::new(id(3), id(2), 3.0);
        mirror.closed = true;
        let edges = vec![Edge::new(id(1), id(2), 4.0), closed, mirror];
        write_closures(&path, &edges).unwrap();

        let parsed = read_closures(&path).unwrap();
        assert_eq!(
            parsed.records,
            vec![ClosureRecord {
                from: id(2),
                to: id(3)
            }]
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = scratch("nested");
        let path = dir.join("a").join("b").join("estaciones.txt");
        write_stations(&path, &[Station::new(id(7), "Siete")]).unwrap();
        let parsed = read_stations(&path).unwrap();
        assert_eq!(parsed.records, vec![Station::new(id(7), "Siete")]);
        fs::remove_dir_all(&dir).unwrap();
    }
}
