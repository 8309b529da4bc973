use std::path::{Path, PathBuf};

use chrono::Local;

use crate::models::{ResultTable, TestResultRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Suite,
    Name,
    Module,
    Status,
    Time,
    Timestamp,
    Browser,
}

/// Every column of the unified table.
pub const ALL_COLUMNS: [Column; 7] = [
    Column::Suite,
    Column::Name,
    Column::Module,
    Column::Status,
    Column::Time,
    Column::Timestamp,
    Column::Browser,
];

/// The columns shown in result listings.
pub const DETAIL_COLUMNS: [Column; 5] = [
    Column::Name,
    Column::Module,
    Column::Suite,
    Column::Status,
    Column::Time,
];

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Suite => "suite",
            Column::Name => "name",
            Column::Module => "module",
            Column::Status => "status",
            Column::Time => "time",
            Column::Timestamp => "timestamp",
            Column::Browser => "browser",
        }
    }

    pub fn value(&self, row: &TestResultRow) -> String {
        match self {
            Column::Suite => row.suite.clone(),
            Column::Name => row.name.clone(),
            Column::Module => row.module.clone(),
            Column::Status => row.status.label().to_string(),
            Column::Time => row.time.to_string(),
            Column::Timestamp => row.timestamp.clone(),
            Column::Browser => row.browser.clone(),
        }
    }
}

/// Render `table` as CSV with a header line.
pub fn to_csv(table: &ResultTable, columns: &[Column]) -> String {
    let mut out = String::new();
    let header: Vec<&str> = columns.iter().map(Column::header).collect();
    out.push_str(&header.join(","));
    out.push('\n');
    for row in table {
        let fields: Vec<String> = columns.iter().map(|c| csv_escape(&c.value(row))).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Write every column of `table` to `qa_results_<timestamp>.csv` in `dir`.
pub fn write_csv(table: &ResultTable, dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let file_name = format!("qa_results_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
    let path = dir.join(file_name);
    std::fs::write(&path, to_csv(table, &ALL_COLUMNS))?;
    Ok(path)
}

/// Quote a field when it contains a delimiter, quote or line break.
fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
