//! Loading the appendix field list from disk.

use formdetails_kernel::{
    AppendixFieldSet, AppendixParseError, BatchEvent, Reporter, parse_appendix,
};
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum AppendixError {
    #[error("appendix file does not exist: {path}")]
    Missing { path: String },

    #[error("failed to read appendix {path}: {message}")]
    Read { path: String, message: String },

    #[error("malformed appendix {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: AppendixParseError,
    },
}

/// Read and parse the appendix at `path`.
///
/// Every rejected parse strategy is reported, whether or not a later one
/// succeeds.
pub fn load_appendix(
    path: impl AsRef<Path>,
    reporter: &mut dyn Reporter,
) -> Result<AppendixFieldSet, AppendixError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    if !path.exists() {
        return Err(AppendixError::Missing { path: display });
    }

    let text = fs::read_to_string(path).map_err(|e| AppendixError::Read {
        path: display.clone(),
        message: e.to_string(),
    })?;

    match parse_appendix(&text) {
        Ok(parsed) => {
            for attempt in parsed.rejected {
                reporter.report(BatchEvent::AppendixAttemptFailed {
                    strategy: attempt.strategy,
                    message: attempt.message,
                });
            }
            reporter.report(BatchEvent::AppendixLoaded {
                path: display,
                records: parsed.fields.len(),
                strategy: parsed.strategy,
            });
            Ok(parsed.fields)
        }
        Err(source) => {
            for attempt in &source.attempts {
                reporter.report(BatchEvent::AppendixAttemptFailed {
                    strategy: attempt.strategy,
                    message: attempt.message.clone(),
                });
            }
            Err(AppendixError::Malformed {
                path: display,
                source,
            })
        }
    }
}
