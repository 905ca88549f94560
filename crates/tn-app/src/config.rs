//! Application configuration (YAML).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tn_graph::{Algorithm, MstAlgorithm};
use tn_store::DataFiles;
use tn_store::files::{CLOSURES_FILE, ROUTES_FILE, STATIONS_FILE};

use crate::error::{AppError, AppResult};

pub const REPORTS_FILE: &str = "reportes.jsonl";

/// Where the network lives on disk and which algorithms to use when the
/// caller does not pick one. Every field is optional in the YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub stations_file: String,
    pub routes_file: String,
    pub closures_file: String,
    pub reports_file: String,
    pub route_algorithm: String,
    pub mst_algorithm: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            stations_file: STATIONS_FILE.to_string(),
            routes_file: ROUTES_FILE.to_string(),
            closures_file: CLOSURES_FILE.to_string(),
            reports_file: REPORTS_FILE.to_string(),
            route_algorithm: Algorithm::default().name().to_ascii_lowercase(),
            mst_algorithm: "kruskal".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig =
            serde_yaml::from_str(&content).map_err(|e| AppError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> AppResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| AppError::InvalidInput(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content).map_err(|e| AppError::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Both algorithm names must parse.
    pub fn validate(&self) -> AppResult<()> {
        self.route_algorithm()?;
        self.mst_algorithm()?;
        Ok(())
    }

    pub fn route_algorithm(&self) -> AppResult<Algorithm> {
        Ok(self.route_algorithm.parse()?)
    }

    pub fn mst_algorithm(&self) -> AppResult<MstAlgorithm> {
        Ok(self.mst_algorithm.parse()?)
    }

    pub fn data_files(&self) -> DataFiles {
        DataFiles::with_names(
            &self.data_dir,
            &self.stations_file,
            &self.routes_file,
            &self.closures_file,
        )
    }

    pub fn reports_path(&self) -> PathBuf {
        self.data_dir.join(&self.reports_file)
    }
}
