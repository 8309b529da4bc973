use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use super::{SourceAdapter, read_if_exists};
use crate::error::{IngestError, Result};
use crate::models::{FieldDefaults, ResultTable, TestResultRow, TestStatus, now_timestamp};

/// Adapter for JUnit-style XML (`testsuite` / `testcase` elements).
#[derive(Debug, Clone)]
pub struct JunitAdapter {
    defaults: FieldDefaults,
}

impl JunitAdapter {
    pub fn new(defaults: FieldDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &FieldDefaults {
        &self.defaults
    }

    /// Parse an XML document held in memory. `path` is only used for diagnostics.
    pub fn parse_str(&self, xml: &str, path: &Path) -> Result<ResultTable> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let now = now_timestamp();
        let mut rows = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut suite: Option<SuiteAttrs> = None;
        let mut case: Option<CaseState> = None;
        let mut root_seen = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| IngestError::xml(path, position_message(&reader, e)))?;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let is_empty = matches!(event, Event::Empty(_));
                    if stack.is_empty() {
                        if root_seen {
                            return Err(IngestError::xml(path, "content after the root element"));
                        }
                        root_seen = true;
                    }

                    let frame = match (e.name().as_ref(), stack.as_slice()) {
                        // <testsuites><testsuite> or a bare <testsuite> root
                        (b"testsuite", [] | [Frame::Root]) => {
                            suite = Some(self.suite_attrs(e, path, &now)?);
                            Frame::Suite
                        }
                        (b"testcase", [.., Frame::Suite]) => {
                            case = Some(self.case_attrs(e, path)?);
                            Frame::Case
                        }
                        (tag, [.., Frame::Case]) => {
                            if let Some(ref mut c) = case {
                                c.mark(tag);
                            }
                            Frame::Other
                        }
                        (_, []) => Frame::Root,
                        _ => Frame::Other,
                    };

                    if is_empty {
                        self.close(frame, &mut suite, &mut case, &mut rows);
                    } else {
                        stack.push(frame);
                    }
                }
                Event::End(_) => {
                    let Some(frame) = stack.pop() else {
                        return Err(IngestError::xml(path, "unexpected closing tag"));
                    };
                    self.close(frame, &mut suite, &mut case, &mut rows);
                }
                Event::Text(ref t) if stack.is_empty() => {
                    if t.iter().any(|b| !b.is_ascii_whitespace()) {
                        return Err(IngestError::xml(path, "text outside the root element"));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !root_seen {
            return Err(IngestError::xml(path, "no root element"));
        }
        if !stack.is_empty() {
            return Err(IngestError::xml(path, "unexpected end of document"));
        }

        Ok(ResultTable::new(rows))
    }

    fn close(
        &self,
        frame: Frame,
        suite: &mut Option<SuiteAttrs>,
        case: &mut Option<CaseState>,
        rows: &mut Vec<TestResultRow>,
    ) {
        match frame {
            Frame::Case => {
                if let (Some(c), Some(s)) = (case.take(), suite.as_ref()) {
                    rows.push(self.row(c, s));
                }
            }
            Frame::Suite => *suite = None,
            Frame::Root | Frame::Other => {}
        }
    }

    fn row(&self, case: CaseState, suite: &SuiteAttrs) -> TestResultRow {
        let d = &self.defaults;
        let module = match case.classname.as_deref() {
            Some(c) if !c.is_empty() => d.module(Some(c)),
            _ => d.module(suite.name.as_deref()),
        };
        let status = case.status(&d.status);

        TestResultRow {
            suite: d.suite.clone(),
            name: case.name.unwrap_or_else(|| d.name.clone()),
            module,
            status,
            time: d.time(case.time),
            timestamp: suite.timestamp.clone(),
            browser: suite.hostname.clone().unwrap_or_else(|| d.browser.clone()),
        }
    }

    fn suite_attrs(&self, e: &BytesStart<'_>, path: &Path, now: &str) -> Result<SuiteAttrs> {
        let mut attrs = SuiteAttrs {
            name: None,
            timestamp: now.to_string(),
            hostname: None,
        };
        for (key, value) in attributes(e, path)? {
            match key.as_slice() {
                b"name" => attrs.name = Some(value),
                b"timestamp" => attrs.timestamp = value,
                b"hostname" => attrs.hostname = Some(value),
                _ => {}
            }
        }
        Ok(attrs)
    }

    fn case_attrs(&self, e: &BytesStart<'_>, path: &Path) -> Result<CaseState> {
        let mut state = CaseState::default();
        for (key, value) in attributes(e, path)? {
            match key.as_slice() {
                b"name" => state.name = Some(value),
                b"classname" => state.classname = Some(value),
                b"time" => {
                    let seconds = value.trim().parse::<f64>().map_err(|_| {
                        IngestError::xml(path, format!("invalid testcase time '{}'", value))
                    })?;
                    state.time = Some(seconds);
                }
                _ => {}
            }
        }
        Ok(state)
    }
}

impl SourceAdapter for JunitAdapter {
    fn name(&self) -> &str {
        "junit"
    }

    fn parse(&self, path: &Path) -> Result<ResultTable> {
        let Some(content) = read_if_exists(path)? else {
            return Ok(ResultTable::empty());
        };
        let table = self.parse_str(&content, path)?;
        debug!(path = %path.display(), rows = table.len(), "parsed JUnit results");
        Ok(table)
    }
}

/// What an open element means to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Root,
    Suite,
    Case,
    Other,
}

#[derive(Debug)]
struct SuiteAttrs {
    name: Option<String>,
    timestamp: String,
    hostname: Option<String>,
}

#[derive(Debug, Default)]
struct CaseState {
    name: Option<String>,
    classname: Option<String>,
    time: Option<f64>,
    failure: bool,
    skipped: bool,
    error: bool,
}

impl CaseState {
    fn mark(&mut self, tag: &[u8]) {
        match tag {
            b"failure" => self.failure = true,
            b"skipped" => self.skipped = true,
            b"error" => self.error = true,
            _ => {}
        }
    }

    /// failure > skipped > error > default.
    fn status(&self, default: &str) -> TestStatus {
        if self.failure {
            TestStatus::Failed
        } else if self.skipped {
            TestStatus::Skipped
        } else if self.error {
            TestStatus::Error
        } else {
            TestStatus::from_label(default)
        }
    }
}

fn attributes(e: &BytesStart<'_>, path: &Path) -> Result<Vec<(Vec<u8>, String)>> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| IngestError::xml(path, err.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|err| IngestError::xml(path, err.to_string()))?
            .into_owned();
        out.push((attr.key.as_ref().to_vec(), value));
    }
    Ok(out)
}

fn position_message(reader: &Reader<&[u8]>, err: quick_xml::Error) -> String {
    format!("{} (at byte {})", err, reader.error_position())
}
