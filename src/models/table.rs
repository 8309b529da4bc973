use serde::Serialize;

use super::row::TestResultRow;
use super::status::TestStatus;

/// Column names of the unified table, in display order.
pub const COLUMNS: [&str; 7] = [
    "suite",
    "name",
    "module",
    "status",
    "time",
    "timestamp",
    "browser",
];

/// The unified table. Built once per load and never edited afterwards;
/// filtering yields a new table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    rows: Vec<TestResultRow>,
}

/// Row selection criteria. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    pub suite: Option<String>,
    pub status: Option<TestStatus>,
    pub browser: Option<String>,
    /// Case-insensitive substring of the test name.
    pub name_query: Option<String>,
}

impl RowFilter {
    pub fn is_empty(&self) -> bool {
        self.suite.is_none()
            && self.status.is_none()
            && self.browser.is_none()
            && self.name_query.as_deref().is_none_or(str::is_empty)
    }

    pub fn matches(&self, row: &TestResultRow) -> bool {
        if let Some(ref suite) = self.suite
            && row.suite != *suite
        {
            return false;
        }
        if let Some(ref status) = self.status
            && row.status != *status
        {
            return false;
        }
        if let Some(ref browser) = self.browser
            && row.browser != *browser
        {
            return false;
        }
        if let Some(ref query) = self.name_query
            && !query.is_empty()
            && !row.name.to_lowercase().contains(&query.to_lowercase())
        {
            return false;
        }
        true
    }
}

impl ResultTable {
    pub fn new(rows: Vec<TestResultRow>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[TestResultRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestResultRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row-stack several tables. Row order follows input order.
    pub fn concat(tables: impl IntoIterator<Item = ResultTable>) -> Self {
        let rows = tables.into_iter().flat_map(|t| t.rows).collect();
        Self { rows }
    }

    pub fn filter(&self, filter: &RowFilter) -> ResultTable {
        if filter.is_empty() {
            return self.clone();
        }
        let rows = self
            .rows
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();
        Self { rows }
    }

    pub fn distinct_suites(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|r| r.suite.clone()))
    }

    pub fn distinct_statuses(&self) -> Vec<TestStatus> {
        distinct(self.rows.iter().map(|r| r.status.clone()))
    }

    pub fn distinct_browsers(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|r| r.browser.clone()))
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a TestResultRow;
    type IntoIter = std::slice::Iter<'a, TestResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl FromIterator<TestResultRow> for ResultTable {
    fn from_iter<I: IntoIterator<Item = TestResultRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Unique values in first-appearance order.
fn distinct<T: PartialEq>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, status: TestStatus, browser: &str) -> TestResultRow {
        TestResultRow {
            suite: "Playwright".into(),
            name: name.into(),
            module: "login.spec.ts".into(),
            status,
            time: 1.0,
            timestamp: "2025-01-01T00:00:00".into(),
            browser: browser.into(),
        }
    }

    fn sample() -> ResultTable {
        ResultTable::new(vec![
            row("opens login page", TestStatus::Passed, "chromium"),
            row("rejects bad password", TestStatus::Failed, "firefox"),
            row("remembers user", TestStatus::Passed, "firefox"),
        ])
    }

    #[test]
    fn filter_returns_new_table_and_leaves_source_intact() {
        let table = sample();
        let filtered = table.filter(&RowFilter {
            status: Some(TestStatus::Passed),
            ..Default::default()
        });
        assert_eq!(filtered.len(), 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn filter_combines_criteria() {
        let filtered = sample().filter(&RowFilter {
            status: Some(TestStatus::Passed),
            browser: Some("firefox".into()),
            ..Default::default()
        });
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows()[0].name, "remembers user");
    }

    #[test]
    fn name_query_is_case_insensitive() {
        let filtered = sample().filter(&RowFilter {
            name_query: Some("LOGIN".into()),
            ..Default::default()
        });
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let table = sample();
        assert_eq!(table.distinct_browsers(), vec!["chromium", "firefox"]);
        assert_eq!(
            table.distinct_statuses(),
            vec![TestStatus::Passed, TestStatus::Failed]
        );
        assert_eq!(table.distinct_suites(), vec!["Playwright"]);
    }
}
