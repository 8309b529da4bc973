//! Summary statistics over a result table.
//!
//! Everything here aggregates whatever rows it is handed. Filtering is the
//! caller's job; pass a filtered table to get filtered metrics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ResultTable, TestStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricsResult {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Percentage, two decimals.
    pub pass_rate: f64,
    /// Seconds, two decimals.
    pub avg_execution_time: f64,
    /// Seconds, two decimals.
    pub total_execution_time: f64,
}

/// Counts, pass rate and timing for `table`. An empty table is all zeros.
///
/// Only exact `Passed`/`Failed`/`Skipped` rows land in those buckets.
/// `Error` and unrecognized statuses count toward `total_tests` alone.
pub fn calculate_metrics(table: &ResultTable) -> MetricsResult {
    if table.is_empty() {
        return MetricsResult::default();
    }

    let total_tests = table.len();
    let mut passed = 0;
    let mut failed = 0;
    let mut skipped = 0;
    let mut total_time = 0.0;

    for row in table {
        match row.status {
            TestStatus::Passed => passed += 1,
            TestStatus::Failed => failed += 1,
            TestStatus::Skipped => skipped += 1,
            _ => {}
        }
        total_time += row.time;
    }

    MetricsResult {
        total_tests,
        passed,
        failed,
        skipped,
        pass_rate: round2(passed as f64 / total_tests as f64 * 100.0),
        avg_execution_time: round2(total_time / total_tests as f64),
        total_execution_time: round2(total_time),
    }
}

/// Row count per status, in order of first appearance.
pub fn status_distribution(table: &ResultTable) -> Vec<(TestStatus, usize)> {
    let mut counts: Vec<(TestStatus, usize)> = Vec::new();
    for row in table {
        match counts.iter_mut().find(|(s, _)| *s == row.status) {
            Some((_, n)) => *n += 1,
            None => counts.push((row.status.clone(), 1)),
        }
    }
    counts
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModuleStats {
    pub module: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub error: usize,
    pub other: usize,
    pub total_time: f64,
}

impl ModuleStats {
    /// Mean execution time in seconds, two decimals.
    pub fn avg_time(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            round2(self.total_time / self.total as f64)
        }
    }
}

/// Per-module status counts and timing, sorted by module name.
pub fn module_breakdown(table: &ResultTable) -> Vec<ModuleStats> {
    let mut by_module: BTreeMap<&str, ModuleStats> = BTreeMap::new();
    for row in table {
        let stats = by_module
            .entry(row.module.as_str())
            .or_insert_with(|| ModuleStats {
                module: row.module.clone(),
                ..Default::default()
            });
        stats.total += 1;
        stats.total_time += row.time;
        match row.status {
            TestStatus::Passed => stats.passed += 1,
            TestStatus::Failed => stats.failed += 1,
            TestStatus::Skipped => stats.skipped += 1,
            TestStatus::Error => stats.error += 1,
            TestStatus::Other(_) => stats.other += 1,
        }
    }
    by_module.into_values().collect()
}

/// The `n` modules with the highest mean execution time, slowest first.
pub fn slowest_modules(table: &ResultTable, n: usize) -> Vec<ModuleStats> {
    let mut modules = module_breakdown(table);
    modules.sort_by(|a, b| {
        let (a_avg, b_avg) = (a.total_time / a.total as f64, b.total_time / b.total as f64);
        b_avg.total_cmp(&a_avg).then_with(|| a.module.cmp(&b.module))
    });
    modules.truncate(n);
    modules
}

/// Two decimals, rounding the exact binary value with ties to even, so
/// `0.125` becomes `0.12` and `2.675` (stored just below) becomes `2.67`.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestResultRow;

    fn row(module: &str, status: TestStatus, time: f64) -> TestResultRow {
        TestResultRow {
            suite: "Playwright".into(),
            name: format!("{module}-{time}"),
            module: module.into(),
            status,
            time,
            timestamp: "2025-01-01T00:00:00".into(),
            browser: "chromium".into(),
        }
    }

    #[test]
    fn empty_table_is_all_zero() {
        let metrics = calculate_metrics(&ResultTable::empty());
        assert_eq!(metrics, MetricsResult::default());
        assert_eq!(metrics.pass_rate, 0.0);
    }

    #[test]
    fn mixed_statuses() {
        let table = ResultTable::new(vec![
            row("a", TestStatus::Passed, 1.0),
            row("a", TestStatus::Passed, 2.0),
            row("b", TestStatus::Failed, 3.0),
            row("b", TestStatus::Skipped, 4.0),
        ]);
        let metrics = calculate_metrics(&table);
        assert_eq!(metrics.total_tests, 4);
        assert_eq!(metrics.passed, 2);
        assert_eq!(metrics.failed, 1);
        assert_eq!(metrics.skipped, 1);
        assert_eq!(metrics.pass_rate, 50.0);
        assert_eq!(metrics.avg_execution_time, 2.5);
        assert_eq!(metrics.total_execution_time, 10.0);
    }

    #[test]
    fn values_round_to_two_decimals() {
        let table = ResultTable::new(vec![
            row("a", TestStatus::Passed, 0.111),
            row("a", TestStatus::Failed, 0.222),
            row("a", TestStatus::Failed, 0.333),
        ]);
        let metrics = calculate_metrics(&table);
        assert_eq!(metrics.pass_rate, 33.33);
        assert_eq!(metrics.avg_execution_time, 0.22);
        assert_eq!(metrics.total_execution_time, 0.67);
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.625), 0.62);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(1.005), 1.0);

        let single = ResultTable::new(vec![row("a", TestStatus::Passed, 0.125)]);
        let metrics = calculate_metrics(&single);
        assert_eq!(metrics.avg_execution_time, 0.12);
        assert_eq!(metrics.total_execution_time, 0.12);

        let metrics = calculate_metrics(&ResultTable::new(vec![
            row("a", TestStatus::Passed, 0.5),
            row("a", TestStatus::Passed, 0.75),
        ]));
        assert_eq!(metrics.avg_execution_time, 0.62);
    }

    #[test]
    fn unknown_statuses_only_count_toward_total() {
        let table = ResultTable::new(vec![
            row("a", TestStatus::Passed, 1.0),
            row("a", TestStatus::Error, 1.0),
            row("a", TestStatus::from_raw("timedOut"), 1.0),
            row("a", TestStatus::from_raw("flaky"), 1.0),
        ]);
        let metrics = calculate_metrics(&table);
        assert_eq!(metrics.total_tests, 4);
        assert_eq!(metrics.passed + metrics.failed + metrics.skipped, 1);
        assert_eq!(metrics.pass_rate, 25.0);
    }

    #[test]
    fn distribution_counts_every_status() {
        let table = ResultTable::new(vec![
            row("a", TestStatus::Failed, 1.0),
            row("a", TestStatus::Passed, 1.0),
            row("a", TestStatus::Failed, 1.0),
            row("a", TestStatus::from_raw("interrupted"), 1.0),
        ]);
        assert_eq!(
            status_distribution(&table),
            vec![
                (TestStatus::Failed, 2),
                (TestStatus::Passed, 1),
                (TestStatus::Other("Interrupted".into()), 1),
            ]
        );
    }

    #[test]
    fn breakdown_groups_by_module() {
        let table = ResultTable::new(vec![
            row("login.spec.ts", TestStatus::Passed, 1.0),
            row("cart.spec.ts", TestStatus::Failed, 4.0),
            row("login.spec.ts", TestStatus::Error, 2.0),
            row("cart.spec.ts", TestStatus::Passed, 2.0),
        ]);
        let modules = module_breakdown(&table);
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].module, "cart.spec.ts");
        assert_eq!((modules[0].passed, modules[0].failed), (1, 1));
        assert_eq!(modules[0].avg_time(), 3.0);
        assert_eq!(modules[1].error, 1);
        assert_eq!(modules[1].avg_time(), 1.5);
    }

    #[test]
    fn slowest_modules_sorted_by_mean_time() {
        let table = ResultTable::new(vec![
            row("fast", TestStatus::Passed, 0.5),
            row("slow", TestStatus::Passed, 9.0),
            row("medium", TestStatus::Passed, 3.0),
            row("medium", TestStatus::Passed, 5.0),
        ]);
        let names: Vec<_> = slowest_modules(&table, 2)
            .into_iter()
            .map(|m| m.module)
            .collect();
        assert_eq!(names, vec!["slow", "medium"]);
    }
}
