pub mod document;
pub mod row;
pub mod status;
pub mod table;

pub use document::{ResultDocument, ResultSummary, TestEntry};
pub use row::{FieldDefaults, TestResultRow, now_timestamp};
pub use status::TestStatus;
pub use table::{COLUMNS, ResultTable, RowFilter};
