//! Data directory layout.

use std::path::{Path, PathBuf};

pub const STATIONS_FILE: &str = "estaciones.txt";
pub const ROUTES_FILE: &str = "rutas.txt";
pub const CLOSURES_FILE: &str = "cierres.txt";

/// Paths of the three network files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub stations: PathBuf,
    pub routes: PathBuf,
    pub closures: PathBuf,
}

impl DataFiles {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::with_names(dir, STATIONS_FILE, ROUTES_FILE, CLOSURES_FILE)
    }

    pub fn with_names(dir: &Path, stations: &str, routes: &str, closures: &str) -> Self {
        Self {
            stations: dir.join(stations),
            routes: dir.join(routes),
            closures: dir.join(closures),
        }
    }
}

/// Counts from one load of the data directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub stations: usize,
    pub routes: usize,
    pub closures: usize,
    /// Malformed lines across all files.
    pub skipped: usize,
}

impl LoadSummary {
    pub fn is_empty(&self) -> bool {
        self.stations == 0 && self.routes == 0 && self.closures == 0
    }
}

impl std::fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} stations, {} routes, {} closures",
            self.stations, self.routes, self.closures
        )?;
        if self.skipped > 0 {
            write!(f, " ({} malformed lines skipped)", self.skipped)?;
        }
        Ok(())
    }
}
