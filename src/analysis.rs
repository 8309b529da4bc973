use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};
use crate::sources::read_if_exists;

/// `test-analysis-complete.json`: a static-analysis report of the suite.
///
/// Sections are opaque and passed through as-is. Accessors only read; no
/// score or coverage value is validated or recomputed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub structure: Value,
    #[serde(default)]
    pub coverage: Value,
    #[serde(default)]
    pub scores: Value,
    #[serde(default)]
    pub distribution: Value,
    #[serde(default)]
    pub issues: Value,
    #[serde(default)]
    pub recommendations: Value,
    #[serde(default)]
    pub configuration: Value,
    #[serde(default)]
    pub last_run: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Issue<'a> {
    pub severity: &'a str,
    pub category: &'a str,
    pub description: &'a str,
    pub impact: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation<'a> {
    pub priority: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub estimated_effort: &'a str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LastRun {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub execution_time: f64,
}

impl AnalysisReport {
    /// Read the report; `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let Some(content) = read_if_exists(path)? else {
            return Ok(None);
        };
        let report = serde_json::from_str(&content).map_err(|e| IngestError::json(path, e))?;
        Ok(Some(report))
    }

    pub fn project_name(&self) -> Option<&str> {
        self.metadata.get("projectName")?.as_str()
    }

    pub fn generated_at(&self) -> Option<&str> {
        self.metadata.get("generatedAt")?.as_str()
    }

    pub fn total_test_cases(&self) -> Option<u64> {
        self.structure.get("totalTestCases")?.as_u64()
    }

    pub fn total_test_files(&self) -> Option<u64> {
        self.structure.get("totalTestFiles")?.as_u64()
    }

    pub fn total_page_objects(&self) -> Option<u64> {
        self.structure.get("totalPageObjects")?.as_u64()
    }

    pub fn coverage_percentage(&self) -> Option<f64> {
        self.coverage.get("coveragePercentage")?.as_f64()
    }

    /// `(covered, total)` module counts when both are reported.
    pub fn covered_modules(&self) -> Option<(u64, u64)> {
        let covered = self.coverage.get("coveredModules")?.as_u64()?;
        let total = self.coverage.get("totalModules")?.as_u64()?;
        Some((covered, total))
    }

    pub fn overall_score(&self) -> Option<f64> {
        self.scores.get("overall")?.as_f64()
    }

    /// Every numeric score except `overall`, sorted by category.
    pub fn category_scores(&self) -> Vec<(&str, f64)> {
        self.scores
            .as_object()
            .map(|scores| {
                scores
                    .iter()
                    .filter(|(k, _)| k.as_str() != "overall")
                    .filter_map(|(k, v)| Some((k.as_str(), v.as_f64()?)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `distribution.byType`, largest count first.
    pub fn tests_by_type(&self) -> Vec<(&str, u64)> {
        let mut types: Vec<(&str, u64)> = self
            .distribution
            .get("byType")
            .and_then(Value::as_object)
            .map(|by_type| {
                by_type
                    .iter()
                    .filter_map(|(k, v)| Some((k.as_str(), v.as_u64()?)))
                    .collect()
            })
            .unwrap_or_default();
        types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        types
    }

    pub fn issues(&self) -> Vec<Issue<'_>> {
        array_of(&self.issues)
            .map(|issue| Issue {
                severity: str_field(issue, "severity"),
                category: str_field(issue, "category"),
                description: str_field(issue, "description"),
                impact: str_field(issue, "impact"),
            })
            .collect()
    }

    pub fn issues_with_severity(&self, severity: &str) -> Vec<Issue<'_>> {
        self.issues()
            .into_iter()
            .filter(|i| i.severity == severity)
            .collect()
    }

    pub fn recommendations(&self) -> Vec<Recommendation<'_>> {
        array_of(&self.recommendations)
            .map(|rec| Recommendation {
                priority: str_field(rec, "priority"),
                title: str_field(rec, "title"),
                description: str_field(rec, "description"),
                estimated_effort: str_field(rec, "estimatedEffort"),
            })
            .collect()
    }

    pub fn framework(&self) -> Option<&str> {
        self.configuration.get("framework")?.as_str()
    }

    pub fn browsers(&self) -> Vec<&str> {
        self.configuration
            .get("browsers")
            .map(|b| array_of(b).filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn project_names(&self) -> Vec<&str> {
        self.configuration
            .get("projectNames")
            .map(|p| array_of(p).filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// The analysis' own last-run numbers, present only when it saw tests.
    pub fn last_run(&self) -> Option<LastRun> {
        let total = self.last_run.get("total")?.as_u64()?;
        if total == 0 {
            return None;
        }
        let count = |key: &str| self.last_run.get(key).and_then(Value::as_u64).unwrap_or(0);
        Some(LastRun {
            total,
            passed: count("passed"),
            failed: count("failed"),
            execution_time: self
                .last_run
                .get("executionTime")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        })
    }
}

fn array_of(value: &Value) -> impl Iterator<Item = &Value> {
    value.as_array().into_iter().flatten()
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}
