pub mod json;
pub mod junit;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::SourcesConfig;
use crate::error::{IngestError, Result};
use crate::models::{FieldDefaults, ResultTable};

pub use json::JsonAdapter;
pub use junit::JunitAdapter;

/// Trait for format-specific report adapters.
pub trait SourceAdapter {
    /// Short identifier used in logs ("json", "junit").
    fn name(&self) -> &str;

    /// Convert one report file into rows. A missing file yields an empty
    /// table; unreadable or malformed content is an error.
    fn parse(&self, path: &Path) -> Result<ResultTable>;
}

/// The closed set of supported report formats.
#[derive(Debug, Clone)]
pub enum SourceFormat {
    Json(JsonAdapter),
    Junit(JunitAdapter),
}

impl SourceAdapter for SourceFormat {
    fn name(&self) -> &str {
        match self {
            SourceFormat::Json(a) => a.name(),
            SourceFormat::Junit(a) => a.name(),
        }
    }

    fn parse(&self, path: &Path) -> Result<ResultTable> {
        match self {
            SourceFormat::Json(a) => a.parse(path),
            SourceFormat::Junit(a) => a.parse(path),
        }
    }
}

/// One priority level: a format plus the file patterns it reads.
/// Every file a tier matches is parsed and row-stacked.
#[derive(Debug, Clone)]
pub struct SourceTier {
    pub format: SourceFormat,
    /// Glob patterns relative to the data directory.
    pub patterns: Vec<String>,
}

impl SourceTier {
    pub fn new(format: SourceFormat, patterns: Vec<String>) -> Self {
        Self { format, patterns }
    }

    /// Files in `dir` matching this tier, sorted and de-duplicated.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let base = glob::Pattern::escape(&dir.to_string_lossy());
        let mut files = Vec::new();
        for pattern in &self.patterns {
            let full = format!("{}/{}", base, pattern);
            let entries = glob::glob(&full).map_err(|source| IngestError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            for entry in entries.flatten() {
                if entry.is_file() && !files.contains(&entry) {
                    files.push(entry);
                }
            }
        }
        files.sort();
        Ok(files)
    }

    pub fn load(&self, dir: &Path) -> Result<ResultTable> {
        let mut tables = Vec::new();
        for path in self.discover(dir)? {
            tables.push(self.format.parse(&path)?);
        }
        Ok(ResultTable::concat(tables))
    }
}

/// Builds the unified table from the first tier that yields rows.
///
/// Tiers are never combined: the same run is often reported in more than
/// one format, and stacking them would count every test twice.
#[derive(Debug, Clone)]
pub struct SourceAggregator {
    data_dir: PathBuf,
    tiers: Vec<SourceTier>,
}

impl SourceAggregator {
    pub fn new(data_dir: impl Into<PathBuf>, tiers: Vec<SourceTier>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tiers,
        }
    }

    /// JSON bundle first, JUnit XML as fallback.
    pub fn from_config(data_dir: impl Into<PathBuf>, config: &SourcesConfig) -> Self {
        let json = JsonAdapter::new(FieldDefaults::json(
            config.suite_label.clone(),
            config.json_browser.clone(),
        ));
        let junit = JunitAdapter::new(FieldDefaults::junit(config.suite_label.clone()));
        Self::new(
            data_dir,
            vec![
                SourceTier::new(SourceFormat::Json(json), config.json.clone()),
                SourceTier::new(SourceFormat::Junit(junit), config.junit.clone()),
            ],
        )
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn tiers(&self) -> &[SourceTier] {
        &self.tiers
    }

    /// Load the unified table. Tiers are tried in order; an empty table
    /// means no tier produced any rows.
    pub fn load(&self) -> Result<ResultTable> {
        for tier in &self.tiers {
            let table = tier.load(&self.data_dir)?;
            if !table.is_empty() {
                info!(
                    source = tier.format.name(),
                    rows = table.len(),
                    "using source tier"
                );
                return Ok(table);
            }
            debug!(source = tier.format.name(), "source tier empty, falling back");
        }
        info!(dir = %self.data_dir.display(), "no test results found");
        Ok(ResultTable::empty())
    }
}

/// Read a file to a string, treating "not found" as absence.
pub(crate) fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(IngestError::io(path, e)),
    }
}
