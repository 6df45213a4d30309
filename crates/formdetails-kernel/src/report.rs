//! Reporting interface threaded through every pipeline.
//!
//! Pipelines describe what happened as [`BatchEvent`]s; the caller decides
//! where they go (tracing, a log file, or an in-memory list in tests).

use crate::appendix::ParseStrategy;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pipeline {
    Merge,
    Normalize,
}

impl Pipeline {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Normalize => "normalize",
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    AppendixAttemptFailed {
        strategy: ParseStrategy,
        message: String,
    },
    AppendixLoaded {
        path: String,
        records: usize,
        strategy: ParseStrategy,
    },
    AppendixUnavailable { message: String },
    InputDirMissing { input_dir: String },
    NoInputFiles { input_dir: String },
    FilesDiscovered { input_dir: String, count: usize },
    FileStarted { file: String },
    FormMerged {
        file: String,
        form: usize,
        existing: usize,
        appended: usize,
        total: usize,
    },
    FileSkipped { file: String, reason: String },
    FileFailed { file: String, reason: String },
    FileWritten { file: String, output: String },
    BatchFinished { processed: usize, discovered: usize },
}

impl BatchEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            Self::AppendixAttemptFailed { .. } => EventLevel::Info,
            Self::NoInputFiles { .. } | Self::FileSkipped { .. } => EventLevel::Warn,
            Self::AppendixUnavailable { .. }
            | Self::InputDirMissing { .. }
            | Self::FileFailed { .. } => EventLevel::Error,
            _ => EventLevel::Info,
        }
    }
}

impl fmt::Display for BatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppendixAttemptFailed { strategy, message } => write!(
                f,
                "appendix strategy `{strategy}` rejected input: {message}"
            ),
            Self::AppendixLoaded {
                path,
                records,
                strategy,
            } => write!(
                f,
                "loaded {records} appendix field(s) from {path} via `{strategy}`"
            ),
            Self::AppendixUnavailable { message } => {
                write!(f, "cannot load appendix, aborting: {message}")
            }
            Self::InputDirMissing { input_dir } => {
                write!(f, "input directory does not exist: {input_dir}")
            }
            Self::NoInputFiles { input_dir } => write!(f, "no JSON files found in {input_dir}"),
            Self::FilesDiscovered { input_dir, count } => {
                write!(f, "found {count} JSON file(s) in {input_dir}")
            }
            Self::FileStarted { file } => write!(f, "processing {file}"),
            Self::FormMerged {
                file,
                form,
                existing,
                appended,
                total,
            } => write!(
                f,
                "{file}: forms[{form}] had {existing} field(s), appended {appended}, now {total}"
            ),
            Self::FileSkipped { file, reason } => write!(f, "skipped {file}: {reason}"),
            Self::FileFailed { file, reason } => write!(f, "failed {file}: {reason}"),
            Self::FileWritten { file, output } => write!(f, "wrote {file} -> {output}"),
            Self::BatchFinished {
                processed,
                discovered,
            } => write!(f, "finished: {processed}/{discovered} file(s) processed"),
        }
    }
}

pub trait Reporter {
    fn report(&mut self, event: BatchEvent);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, event: BatchEvent) {
        (**self).report(event);
    }
}

/// Keeps every event in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    events: Vec<BatchEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BatchEvent] {
        &self.events
    }

    pub fn count_at(&self, level: EventLevel) -> usize {
        self.events.iter().filter(|e| e.level() == level).count()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: BatchEvent) {
        self.events.push(event);
    }
}
