//! Appendix parsing: turning loosely formatted field lists into records.
//!
//! Operators hand-edit appendix files, so the text is often a run of
//! comma-joined objects with no enclosing brackets and a dangling comma.
//! Parsing tries each [`ParseStrategy`] in [`ParseStrategy::ORDER`] and keeps
//! the first that succeeds, remembering why the earlier ones were rejected.

use crate::error::AppendixParseError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStrategy {
    /// `{..},{..},` wrapped in brackets and read as an array of records.
    CommaJoined,
    /// One JSON value; an array is the record list, anything else one record.
    SingleValue,
}

impl ParseStrategy {
    pub const ORDER: [ParseStrategy; 2] = [Self::CommaJoined, Self::SingleValue];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommaJoined => "comma_joined",
            Self::SingleValue => "single_value",
        }
    }

    fn attempt(self, body: &str) -> Result<Vec<Value>, serde_json::Error> {
        match self {
            Self::CommaJoined => serde_json::from_str::<Vec<Value>>(&format!("[{body}]")),
            Self::SingleValue => match serde_json::from_str::<Value>(body)? {
                Value::Array(records) => Ok(records),
                record => Ok(vec![record]),
            },
        }
    }
}

impl fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rejected strategy and the parser's complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAttempt {
    pub strategy: ParseStrategy,
    pub message: String,
}

/// Ordered, immutable list of field records to merge into every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppendixFieldSet {
    records: Vec<Value>,
}

impl AppendixFieldSet {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fresh copies of every record, in order.
    pub fn cloned_records(&self) -> Vec<Value> {
        self.records.clone()
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAppendix {
    pub fields: AppendixFieldSet,
    pub strategy: ParseStrategy,
    /// Strategies tried before `strategy`, in order.
    pub rejected: Vec<ParseAttempt>,
}

/// Parse appendix text with the ordered strategy list.
pub fn parse_appendix(text: &str) -> Result<ParsedAppendix, AppendixParseError> {
    let trimmed = text.trim();
    let body = trimmed.strip_suffix(',').unwrap_or(trimmed);

    let mut rejected = Vec::new();
    for strategy in ParseStrategy::ORDER {
        match strategy.attempt(body) {
            Ok(records) => {
                return Ok(ParsedAppendix {
                    fields: AppendixFieldSet::new(records),
                    strategy,
                    rejected,
                });
            }
            Err(err) => rejected.push(ParseAttempt {
                strategy,
                message: err.to_string(),
            }),
        }
    }

    Err(AppendixParseError { attempts: rejected })
}
