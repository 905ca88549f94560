//! In-memory report log with JSON-lines persistence.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::render::render_entries;
use crate::types::ReportEntry;
use crate::{ReportError, ReportResult};

/// Query history, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ReportLog {
    entries: Vec<ReportEntry>,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn render_text(&self) -> String {
        render_entries(&self.entries)
    }

    /// One JSON object per line.
    pub fn save_jsonl(&self, path: &Path) -> ReportResult<()> {
        let mut content = String::new();
        for entry in &self.entries {
            content.push_str(&serde_json::to_string(entry)?);
            content.push('\n');
        }
        write_file(path, &content)?;
        tracing::info!(path = %path.display(), reports = self.len(), "saved reports");
        Ok(())
    }

    /// Read a log written by [`ReportLog::save_jsonl`]. A missing file is an
    /// empty log. Lines that do not decode are logged and skipped; their count
    /// is returned next to the log.
    pub fn load_jsonl(path: &Path) -> ReportResult<(Self, usize)> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok((Self::new(), 0)),
            Err(source) => {
                return Err(ReportError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut entries = Vec::new();
        let mut skipped = 0;
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        line = number + 1,
                        error = %err,
                        "skipping unreadable report"
                    );
                    skipped += 1;
                }
            }
        }
        tracing::debug!(path = %path.display(), reports = entries.len(), skipped, "loaded reports");
        Ok((Self { entries }, skipped))
    }

    /// Write [`ReportLog::render_text`] to `path`.
    pub fn export_text(&self, path: &Path) -> ReportResult<()> {
        write_file(path, &self.render_text())?;
        tracing::info!(path = %path.display(), reports = self.len(), "exported report text");
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> ReportResult<()> {
    let io = |source: std::io::Error| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io)?;
        }
    }
    fs::write(path, content).map_err(io)
}
