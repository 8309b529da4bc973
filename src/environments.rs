use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info};

use crate::config::EnvironmentsConfig;
use crate::error::{IngestError, Result};
use crate::models::ResultDocument;
use crate::sources::json::read_document;

/// Environment name -> that environment's raw result bundle.
pub type EnvironmentResultSet = BTreeMap<String, ResultDocument>;

/// Maps a file name to the environment it reports on, if any.
pub trait EnvironmentNaming: Send + Sync {
    fn environment_name(&self, file_name: &str) -> Option<String>;
}

/// `<prefix><env><suffix>`, e.g. `test-results-qa.json`.
#[derive(Debug, Clone)]
pub struct AffixNaming {
    prefix: String,
    suffix: String,
}

impl AffixNaming {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

impl Default for AffixNaming {
    fn default() -> Self {
        Self::new("test-results-", ".json")
    }
}

impl EnvironmentNaming for AffixNaming {
    fn environment_name(&self, file_name: &str) -> Option<String> {
        let env = file_name
            .strip_prefix(&self.prefix)?
            .strip_suffix(&self.suffix)?;
        (!env.is_empty()).then(|| env.to_string())
    }
}

/// Regex with a named `env` capture group.
#[derive(Debug, Clone)]
pub struct RegexNaming {
    regex: Regex,
}

impl RegexNaming {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| IngestError::Naming {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }
}

impl EnvironmentNaming for RegexNaming {
    fn environment_name(&self, file_name: &str) -> Option<String> {
        let env = self.regex.captures(file_name)?.name("env")?.as_str();
        (!env.is_empty()).then(|| env.to_string())
    }
}

/// Discovers per-environment result files in a directory and keeps each
/// one as its own dataset. Nothing here is merged into the unified table.
pub struct EnvironmentLoader {
    data_dir: PathBuf,
    naming: Box<dyn EnvironmentNaming>,
}

impl EnvironmentLoader {
    pub fn new(data_dir: impl Into<PathBuf>, naming: Box<dyn EnvironmentNaming>) -> Self {
        Self {
            data_dir: data_dir.into(),
            naming,
        }
    }

    pub fn from_config(data_dir: impl Into<PathBuf>, config: &EnvironmentsConfig) -> Result<Self> {
        let naming: Box<dyn EnvironmentNaming> = match config.pattern {
            Some(ref pattern) => Box::new(RegexNaming::new(pattern)?),
            None => Box::new(AffixNaming::new(&config.prefix, &config.suffix)),
        };
        Ok(Self::new(data_dir, naming))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Parse every matching file. A missing directory or no matches is an
    /// empty set, not an error.
    pub fn load(&self) -> Result<EnvironmentResultSet> {
        let mut set = EnvironmentResultSet::new();
        for (env, path) in self.discover()? {
            let Some(doc) = read_document(&path)? else {
                continue;
            };
            debug!(env = %env, path = %path.display(), "loaded environment results");
            set.insert(env, doc);
        }
        if !set.is_empty() {
            info!(count = set.len(), "environment datasets loaded");
        }
        Ok(set)
    }

    /// Matching files, sorted by file name.
    pub fn discover(&self) -> Result<Vec<(String, PathBuf)>> {
        let entries = match std::fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(IngestError::io(&self.data_dir, e)),
        };

        let mut found = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if let Some(env) = self.naming.environment_name(file_name) {
                found.push((env, path));
            }
        }
        found.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(found)
    }
}
