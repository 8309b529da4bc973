use std::path::Path;

use tracing::debug;

use super::{SourceAdapter, read_if_exists};
use crate::error::{IngestError, Result};
use crate::models::{
    FieldDefaults, ResultDocument, ResultTable, TestEntry, TestResultRow, TestStatus,
    now_timestamp,
};

/// Adapter for the runner's JSON result bundle (`test-results.json`).
///
/// The bundle carries no per-test execution context, so every row gets the
/// configured browser label.
#[derive(Debug, Clone)]
pub struct JsonAdapter {
    defaults: FieldDefaults,
}

impl JsonAdapter {
    pub fn new(defaults: FieldDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &FieldDefaults {
        &self.defaults
    }

    /// Convert an already-parsed bundle into rows.
    pub fn rows_from_document(&self, doc: &ResultDocument) -> ResultTable {
        let timestamp = doc
            .start_time()
            .map(str::to_string)
            .unwrap_or_else(now_timestamp);

        doc.tests()
            .map(|entry| self.row_from_entry(entry, &timestamp))
            .collect()
    }

    fn row_from_entry(&self, entry: TestEntry<'_>, timestamp: &str) -> TestResultRow {
        let d = &self.defaults;
        let raw_status = entry
            .status()
            .filter(|s| !s.is_empty())
            .unwrap_or(d.status.as_str());

        TestResultRow {
            suite: d.suite.clone(),
            name: entry.title().map_or_else(|| d.name.clone(), str::to_string),
            module: d.module(entry.file().map(module_from_file)),
            status: TestStatus::from_raw(raw_status),
            time: d.time(entry.duration_ms().map(|ms| ms / 1000.0)),
            timestamp: timestamp.to_string(),
            browser: d.browser.clone(),
        }
    }
}

impl SourceAdapter for JsonAdapter {
    fn name(&self) -> &str {
        "json"
    }

    fn parse(&self, path: &Path) -> Result<ResultTable> {
        let Some(doc) = read_document(path)? else {
            return Ok(ResultTable::empty());
        };
        let table = self.rows_from_document(&doc);
        debug!(path = %path.display(), rows = table.len(), "parsed JSON results");
        Ok(table)
    }
}

/// Read a result bundle without converting it to rows.
/// `Ok(None)` when the file does not exist.
pub fn read_document(path: &Path) -> Result<Option<ResultDocument>> {
    let Some(content) = read_if_exists(path)? else {
        return Ok(None);
    };
    let doc = serde_json::from_str(&content).map_err(|e| IngestError::json(path, e))?;
    Ok(Some(doc))
}

/// Last path segment of a spec file. Backslash-separated paths are
/// recognized before forward-slash ones.
pub fn module_from_file(file: &str) -> &str {
    if file.contains('\\') {
        file.rsplit('\\').next().unwrap_or(file)
    } else if file.contains('/') {
        file.rsplit('/').next().unwrap_or(file)
    } else {
        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> JsonAdapter {
        JsonAdapter::new(FieldDefaults::json("Playwright", "chromium"))
    }

    #[test]
    fn module_uses_last_segment() {
        assert_eq!(module_from_file("specs/login.spec.ts"), "login.spec.ts");
        assert_eq!(module_from_file(r"specs\auth\login.spec.ts"), "login.spec.ts");
        assert_eq!(module_from_file("login.spec.ts"), "login.spec.ts");
    }

    #[test]
    fn backslash_wins_over_forward_slash() {
        assert_eq!(module_from_file(r"a/b\c.spec.ts"), "c.spec.ts");
        assert_eq!(module_from_file(r"a\b/c.spec.ts"), "b/c.spec.ts");
    }

    #[test]
    fn entry_defaults_apply() {
        let doc: ResultDocument = serde_json::from_str(r#"{"tests":[{}]}"#).unwrap();
        let table = adapter().rows_from_document(&doc);
        let row = &table.rows()[0];
        assert_eq!(row.name, "Unknown");
        assert_eq!(row.module, "Playwright");
        assert_eq!(row.status, TestStatus::Other("Unknown".into()));
        assert_eq!(row.time, 0.0);
        assert_eq!(row.browser, "chromium");
        assert!(!row.timestamp.is_empty());
    }

    #[test]
    fn rows_share_summary_start_time() {
        let doc: ResultDocument = serde_json::from_str(
            r#"{"summary":{"startTime":"2025-02-10T08:00:00.000Z"},
                "tests":[{"title":"a","status":"passed","duration":120},
                         {"title":"b","status":"failed","duration":2500}]}"#,
        )
        .unwrap();
        let table = adapter().rows_from_document(&doc);
        assert_eq!(table.len(), 2);
        assert!(
            table
                .iter()
                .all(|r| r.timestamp == "2025-02-10T08:00:00.000Z")
        );
        assert_eq!(table.rows()[0].time, 0.12);
        assert_eq!(table.rows()[1].status, TestStatus::Failed);
    }

    #[test]
    fn empty_status_string_uses_default() {
        let doc: ResultDocument =
            serde_json::from_str(r#"{"tests":[{"title":"x","status":""}]}"#).unwrap();
        let table = adapter().rows_from_document(&doc);
        assert_eq!(table.rows()[0].status.label(), "Unknown");
    }
}
