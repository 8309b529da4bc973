use serde::{Deserialize, Serialize};

use super::status::TestStatus;

/// One executed test case, normalized across source formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResultRow {
    /// Tool that produced the report (e.g. "Playwright").
    pub suite: String,
    pub name: String,
    /// File or class grouping. Never empty.
    pub module: String,
    pub status: TestStatus,
    /// Seconds, never negative.
    pub time: f64,
    pub timestamp: String,
    /// Execution context label, "unknown" when the source has none.
    pub browser: String,
}

/// Per-field fallbacks consulted while building rows from a source.
///
/// Each adapter owns one of these so every default lives in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefaults {
    pub suite: String,
    pub name: String,
    pub status: String,
    pub browser: String,
    pub time: f64,
}

impl FieldDefaults {
    pub fn junit(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            name: "Unknown Test".into(),
            status: "Passed".into(),
            browser: "unknown".into(),
            time: 0.0,
        }
    }

    pub fn json(suite: impl Into<String>, browser: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            name: "Unknown".into(),
            status: "unknown".into(),
            browser: browser.into(),
            time: 0.0,
        }
    }

    /// Resolve a module grouping, falling back to the suite label.
    pub fn module(&self, candidate: Option<&str>) -> String {
        match candidate.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => self.suite.clone(),
        }
    }

    pub fn time(&self, seconds: Option<f64>) -> f64 {
        match seconds {
            Some(s) if s.is_finite() => s.max(0.0),
            _ => self.time,
        }
    }
}

/// Local time in ISO-8601, used when a source carries no timestamp.
pub fn now_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
