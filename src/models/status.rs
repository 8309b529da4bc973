use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a single executed test case.
///
/// The four known outcomes are closed, but runners emit vocabulary we don't
/// control, so anything else is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    Error,
    Other(String),
}

impl TestStatus {
    /// Match an already-normalized label against the known outcomes.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Passed" => TestStatus::Passed,
            "Failed" => TestStatus::Failed,
            "Skipped" => TestStatus::Skipped,
            "Error" => TestStatus::Error,
            other => TestStatus::Other(other.to_string()),
        }
    }

    /// Normalize a raw runner status (`passed`, `FAILED`, `timedOut`, ...).
    /// First character upper-cased, the rest lower-cased, then matched.
    pub fn from_raw(raw: &str) -> Self {
        Self::from_label(&capitalize(raw))
    }

    pub fn label(&self) -> &str {
        match self {
            TestStatus::Passed => "Passed",
            TestStatus::Failed => "Failed",
            TestStatus::Skipped => "Skipped",
            TestStatus::Error => "Error",
            TestStatus::Other(label) => label,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TestStatus::Passed => "✔",
            TestStatus::Failed => "✘",
            TestStatus::Skipped => "⊘",
            TestStatus::Error => "‼",
            TestStatus::Other(_) => "?",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TestStatus::Other(_))
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for TestStatus {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<TestStatus> for String {
    fn from(status: TestStatus) -> Self {
        status.label().to_string()
    }
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
