//! Whole-document JSON files.
//!
//! Documents are read in one go and written through a sibling temp file that
//! is renamed into place, so an output path never holds a partial document.

use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Errors from reading or writing a document file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{path}: read failed: {message}")]
    Read { path: String, message: String },

    #[error("{path}: invalid JSON: {message}")]
    Parse { path: String, message: String },

    #[error("{path}: serialization failed: {message}")]
    Serialize { path: String, message: String },

    #[error("{path}: write failed: {message}")]
    Write { path: String, message: String },
}

impl StoreError {
    fn write(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Write {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

pub fn read_document(path: impl AsRef<Path>) -> Result<Value, StoreError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| StoreError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Two-space indented JSON with non-ASCII characters left unescaped.
pub fn render_document<T: Serialize + ?Sized>(document: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

pub fn write_document<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    document: &T,
) -> Result<(), StoreError> {
    let path = path.as_ref();
    let rendered = render_document(document).map_err(|e| StoreError::Serialize {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let tmp_path = tmp_write_path(path);
    let write_result = (|| -> Result<(), StoreError> {
        let file = File::create(&tmp_path).map_err(|e| StoreError::write(&tmp_path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(rendered.as_bytes())
            .map_err(|e| StoreError::write(&tmp_path, e))?;
        writer.flush().map_err(|e| StoreError::write(&tmp_path, e))?;
        let file = writer
            .into_inner()
            .map_err(|e| StoreError::write(&tmp_path, e))?;
        file.sync_all().map_err(|e| StoreError::write(&tmp_path, e))?;
        Ok(())
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StoreError::Write {
            path: path.display().to_string(),
            message: format!("rename from {}: {e}", tmp_path.display()),
        }
    })
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}
