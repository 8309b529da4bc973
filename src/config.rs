use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

pub const CONFIG_FILE: &str = "qa-lens.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub environments: EnvironmentsConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Where the unified table comes from. Each list is one priority tier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Glob patterns (relative to the data directory) of JSON result bundles.
    pub json: Vec<String>,
    /// Glob patterns of JUnit XML reports, read only when no JSON rows exist.
    pub junit: Vec<String>,
    /// Value of the `suite` column for every row.
    pub suite_label: String,
    /// Browser label for JSON rows, which carry none of their own.
    pub json_browser: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            json: vec!["test-results.json".into()],
            junit: vec!["junit-report.xml".into()],
            suite_label: "Playwright".into(),
            json_browser: "chromium".into(),
        }
    }
}

/// How per-environment files are recognized.
///
/// Example: `test-results-qa.json` with the default prefix/suffix yields "qa".
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnvironmentsConfig {
    pub prefix: String,
    pub suffix: String,
    /// Regex with a named `env` group. Replaces prefix/suffix when set.
    /// Example: "^results_(?P<env>[a-z]+)\\.json$"
    pub pattern: Option<String>,
}

impl Default for EnvironmentsConfig {
    fn default() -> Self {
        Self {
            prefix: "test-results-".into(),
            suffix: ".json".into(),
            pattern: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub file: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            file: "test-analysis-complete.json".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 60 }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load `qa-lens.toml` from `dir`, falling back to defaults if absent or invalid.
    pub fn load(dir: &Path) -> Self {
        Self::load_file(&dir.join(CONFIG_FILE))
    }

    pub fn load_file(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }
}
