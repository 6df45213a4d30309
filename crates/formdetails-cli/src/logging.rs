//! Logging setup and the tracing-backed reporter.
//!
//! Console output goes to stderr and honours `RUST_LOG`. Each pipeline that
//! runs also gets its own append-only log file, fed by the events carrying
//! that pipeline's target.

use crate::config::Config;
use formdetails_kernel::{BatchEvent, EventLevel, Pipeline, Reporter};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{Level, Subscriber};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

pub const MERGE_TARGET: &str = "formdetails::merge";
pub const NORMALIZE_TARGET: &str = "formdetails::normalize";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {message}")]
    Open { path: String, message: String },

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Install the process-wide subscriber for the given pipelines.
pub fn init(config: &Config, pipelines: &[Pipeline], log_files: bool) -> Result<(), LoggingError> {
    let console = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let wants_file = |pipeline: Pipeline| log_files && pipelines.contains(&pipeline);
    let merge_file = if wants_file(Pipeline::Merge) {
        Some(file_layer(config.merge_log_path(), MERGE_TARGET)?)
    } else {
        None
    };
    let normalize_file = if wants_file(Pipeline::Normalize) {
        Some(file_layer(config.normalize_log_path(), NORMALIZE_TARGET)?)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console)
        .with(merge_file)
        .with(normalize_file)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

/// Plain-text layer appending `target`'s events to the file at `path`.
fn file_layer<S>(path: PathBuf, target: &'static str) -> Result<impl Layer<S>, LoggingError>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let file = open_log(&path)?;
    Ok(tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(Targets::new().with_target(target, Level::INFO)))
}

fn open_log(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggingError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// Forwards batch events to `tracing` under the pipeline's target.
#[derive(Debug, Clone, Copy)]
pub struct TracingReporter {
    pipeline: Pipeline,
}

impl TracingReporter {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }
}

impl Reporter for TracingReporter {
    fn report(&mut self, event: BatchEvent) {
        match (self.pipeline, event.level()) {
            (Pipeline::Merge, EventLevel::Info) => tracing::info!(target: MERGE_TARGET, "{event}"),
            (Pipeline::Merge, EventLevel::Warn) => tracing::warn!(target: MERGE_TARGET, "{event}"),
            (Pipeline::Merge, EventLevel::Error) => {
                tracing::error!(target: MERGE_TARGET, "{event}")
            }
            (Pipeline::Normalize, EventLevel::Info) => {
                tracing::info!(target: NORMALIZE_TARGET, "{event}")
            }
            (Pipeline::Normalize, EventLevel::Warn) => {
                tracing::warn!(target: NORMALIZE_TARGET, "{event}")
            }
            (Pipeline::Normalize, EventLevel::Error) => {
                tracing::error!(target: NORMALIZE_TARGET, "{event}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipelines_log_under_distinct_targets() {
        assert_ne!(MERGE_TARGET, NORMALIZE_TARGET);
        assert!(MERGE_TARGET.starts_with("formdetails::"));
    }

    #[test]
    fn reporter_accepts_events_without_a_subscriber() {
        let mut reporter = TracingReporter::new(Pipeline::Normalize);
        reporter.report(BatchEvent::BatchFinished {
            processed: 1,
            discovered: 1,
        });
    }
}
