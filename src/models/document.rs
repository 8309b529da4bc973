use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON result bundle as written by the runner: `summary` + `tests`.
///
/// The object is held as parsed, so a bundle re-serializes to the same JSON
/// and odd field types (`4.0`, `null`) never reject the file. Typed reads go
/// through the [`ResultSummary`] and [`TestEntry`] views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultDocument(Map<String, Value>);

/// The runner's self-reported aggregate. Passed through, never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSummary<'a>(&'a Map<String, Value>);

/// One entry of the bundle's `tests` array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestEntry<'a>(&'a Map<String, Value>);

impl ResultDocument {
    pub fn summary(&self) -> Option<ResultSummary<'_>> {
        self.0.get("summary")?.as_object().map(ResultSummary)
    }

    /// Object entries of `tests`; anything else in the array is skipped.
    pub fn tests(&self) -> impl Iterator<Item = TestEntry<'_>> {
        self.0
            .get("tests")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
            .map(TestEntry)
    }

    pub fn start_time(&self) -> Option<&str> {
        self.summary()?.start_time()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl<'a> ResultSummary<'a> {
    pub fn total(&self) -> u64 {
        count(self.0.get("total"))
    }

    pub fn passed(&self) -> u64 {
        count(self.0.get("passed"))
    }

    pub fn failed(&self) -> u64 {
        count(self.0.get("failed"))
    }

    pub fn skipped(&self) -> u64 {
        count(self.0.get("skipped"))
    }

    /// Milliseconds; 0 when absent or not a number.
    pub fn duration_ms(&self) -> f64 {
        self.0.get("duration").and_then(Value::as_f64).unwrap_or(0.0)
    }

    pub fn start_time(&self) -> Option<&'a str> {
        self.0.get("startTime")?.as_str()
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.get(key)
    }

    /// Passed share of the reported total, guarding against a zero total.
    pub fn pass_rate(&self) -> f64 {
        self.passed() as f64 / self.total().max(1) as f64 * 100.0
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_ms() / 1000.0
    }

    /// `YYYY-MM-DDTHH:MM` prefix of the start time, for compact display.
    pub fn start_time_short(&self) -> Option<&'a str> {
        let start = self.start_time()?;
        Some(start.get(..16).unwrap_or(start))
    }
}

impl<'a> TestEntry<'a> {
    pub fn title(&self) -> Option<&'a str> {
        self.0.get("title")?.as_str()
    }

    pub fn file(&self) -> Option<&'a str> {
        self.0.get("file")?.as_str()
    }

    pub fn status(&self) -> Option<&'a str> {
        self.0.get("status")?.as_str()
    }

    /// Milliseconds.
    pub fn duration_ms(&self) -> Option<f64> {
        self.0.get("duration")?.as_f64()
    }
}

/// Whole counts, also accepting integral floats such as `4.0`.
fn count(value: Option<&Value>) -> u64 {
    match value {
        Some(v) => v
            .as_u64()
            .or_else(|| {
                v.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ResultDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn summary_keeps_unknown_fields() {
        let doc = parse(
            r#"{"summary":{"total":4,"passed":3,"failed":1,"skipped":0,"duration":1200,
                "startTime":"2025-03-01T10:15:30.000Z","flaky":2},"tests":[],"config":{}}"#,
        );
        let summary = doc.summary().unwrap();
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.get("flaky"), Some(&Value::from(2)));
        assert!(doc.get("config").is_some());
        assert_eq!(doc.start_time(), Some("2025-03-01T10:15:30.000Z"));
    }

    #[test]
    fn pass_rate_guards_zero_total() {
        let doc = parse(r#"{"summary":{}}"#);
        assert_eq!(doc.summary().unwrap().pass_rate(), 0.0);

        let doc = parse(r#"{"summary":{"total":8,"passed":6,"duration":2500}}"#);
        let summary = doc.summary().unwrap();
        assert_eq!(summary.pass_rate(), 75.0);
        assert_eq!(summary.duration_secs(), 2.5);
    }

    #[test]
    fn short_start_time_truncates_to_minutes() {
        let doc = parse(r#"{"summary":{"startTime":"2025-03-01T10:15:30.000Z"}}"#);
        assert_eq!(
            doc.summary().unwrap().start_time_short(),
            Some("2025-03-01T10:15")
        );
    }

    #[test]
    fn loose_number_types_are_read_not_rejected() {
        let doc = parse(
            r#"{"summary":{"total":4.0,"passed":null,"failed":"1","skipped":-2,"duration":null}}"#,
        );
        let summary = doc.summary().unwrap();
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.passed(), 0);
        assert_eq!(summary.failed(), 0);
        assert_eq!(summary.skipped(), 0);
        assert_eq!(summary.duration_ms(), 0.0);
    }

    #[test]
    fn document_serializes_back_unchanged() {
        let raw = r#"{"summary":{"total":4.0,"passed":3,"failed":null,"duration":1200,
            "startTime":"2025-03-01T10:15:30.000Z"},
            "tests":[{"title":"a","duration":1200},"stray"],"config":{"workers":2}}"#;
        let original: Value = serde_json::from_str(raw).unwrap();

        let doc = parse(raw);
        let written = serde_json::to_value(&doc).unwrap();
        assert_eq!(written, original);
        assert_eq!(written["summary"]["duration"], Value::from(1200u64));
        assert!(written["summary"]["duration"].is_u64());
    }

    #[test]
    fn non_object_tests_are_skipped() {
        let doc = parse(r#"{"tests":[{"title":"a","duration":500},3,null,{"file":"b.ts"}]}"#);
        let entries: Vec<_> = doc.tests().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title(), Some("a"));
        assert_eq!(entries[0].duration_ms(), Some(500.0));
        assert_eq!(entries[1].file(), Some("b.ts"));
        assert_eq!(entries[1].status(), None);

        assert_eq!(parse(r#"{"tests":null}"#).tests().count(), 0);
    }
}
