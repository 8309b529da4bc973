use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::analysis::AnalysisReport;
use crate::config::Config;
use crate::environments::{EnvironmentLoader, EnvironmentResultSet};
use crate::error::Result;
use crate::models::{ResultDocument, ResultTable};
use crate::sources::SourceAggregator;
use crate::sources::json::read_document;

/// Everything one load of a data directory produces.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub data_dir: PathBuf,
    /// Rows from whichever source tier won.
    pub table: ResultTable,
    /// The primary JSON bundle as written, for its self-reported summary.
    pub latest: Option<ResultDocument>,
    pub environments: EnvironmentResultSet,
    pub analysis: Option<AnalysisReport>,
    pub loaded_at: DateTime<Local>,
}

impl Dataset {
    /// Read every source under `data_dir`. Files are read in a fixed order:
    /// source tiers, the primary bundle, environments, then the analysis.
    pub fn load(data_dir: &Path, config: &Config) -> Result<Self> {
        let table = SourceAggregator::from_config(data_dir, &config.sources).load()?;

        let latest = match config.sources.json.first() {
            Some(primary) if !is_glob(primary) => read_document(&data_dir.join(primary))?,
            _ => None,
        };

        let environments =
            EnvironmentLoader::from_config(data_dir, &config.environments)?.load()?;
        let analysis = AnalysisReport::load(&data_dir.join(&config.analysis.file))?;

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            table,
            latest,
            environments,
            analysis,
            loaded_at: Local::now(),
        })
    }

    /// Nothing at all was found. Distinct from a load error.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty() && self.latest.is_none() && self.environments.is_empty()
    }

    /// The bundle to show as "latest run": the selected environment's when
    /// one is chosen and known, otherwise the primary bundle.
    pub fn active_document(&self, environment: Option<&str>) -> Option<&ResultDocument> {
        environment
            .and_then(|env| self.environments.get(env))
            .or(self.latest.as_ref())
    }

    pub fn environment_names(&self) -> Vec<&str> {
        self.environments.keys().map(String::as_str).collect()
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
