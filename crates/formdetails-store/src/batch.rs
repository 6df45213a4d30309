//! Batch driver: one pipeline over every JSON file of an input directory.
//!
//! Per-file problems (unreadable input, malformed JSON, structural errors,
//! write failures) become [`FileOutcome`]s and the batch moves on. Only the
//! preconditions (appendix, input directory, output directory) abort a run.

use crate::appendix_file::{AppendixError, load_appendix};
use crate::json_file::{read_document, write_document};
use formdetails_kernel::{
    BatchEvent, MergeOutcome, Pipeline, Reporter, TransformError, merge_document,
    normalize_document,
};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPaths {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl BatchPaths {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Conditions that stop a batch before any file is attempted.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Appendix(#[from] AppendixError),

    #[error("input directory does not exist: {path}")]
    InputDirMissing { path: String },

    #[error("failed to list input directory {path}: {message}")]
    ListInput { path: String, message: String },

    #[error("failed to create output directory {path}: {message}")]
    OutputDir { path: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Written { output: String },
    Skipped { reason: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub pipeline: Pipeline,
    pub input_dir: String,
    pub output_dir: String,
    pub discovered: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    fn new(pipeline: Pipeline, paths: &BatchPaths) -> Self {
        Self {
            pipeline,
            input_dir: paths.input_dir.display().to_string(),
            output_dir: paths.output_dir.display().to_string(),
            discovered: 0,
            processed: 0,
            skipped: 0,
            failed: 0,
            files: Vec::new(),
        }
    }

    fn record(&mut self, file: String, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Written { .. } => self.processed += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Failed { .. } => self.failed += 1,
        }
        self.files.push(FileReport { file, outcome });
    }

    pub fn all_processed(&self) -> bool {
        self.processed == self.discovered
    }
}

/// Every regular `*.json` file directly inside `dir`, sorted by name.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let list_error = |e: std::io::Error| BatchError::ListInput {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load the appendix once and merge it into every input document.
///
/// Documents without a `forms` collection are skipped and not written.
pub fn run_merge(
    paths: &BatchPaths,
    append_file: &Path,
    reporter: &mut dyn Reporter,
) -> Result<BatchReport, BatchError> {
    let appendix = load_appendix(append_file, reporter).inspect_err(|err| {
        reporter.report(BatchEvent::AppendixUnavailable {
            message: err.to_string(),
        });
    })?;

    run_batch(Pipeline::Merge, paths, reporter, |file, document, reporter| {
        match merge_document(document, &appendix)? {
            MergeOutcome::NotApplicable => Ok(None),
            MergeOutcome::Merged { document, forms } => {
                for stats in forms {
                    reporter.report(BatchEvent::FormMerged {
                        file: file.to_string(),
                        form: stats.form,
                        existing: stats.existing,
                        appended: stats.appended,
                        total: stats.total,
                    });
                }
                Ok(Some(document))
            }
        }
    })
}

/// Rewrite every input document into canonical shape.
pub fn run_normalize(
    paths: &BatchPaths,
    reporter: &mut dyn Reporter,
) -> Result<BatchReport, BatchError> {
    run_batch(Pipeline::Normalize, paths, reporter, |_, document, _| {
        normalize_document(&document).map(Some)
    })
}

fn run_batch<T, F>(
    pipeline: Pipeline,
    paths: &BatchPaths,
    reporter: &mut dyn Reporter,
    mut transform: F,
) -> Result<BatchReport, BatchError>
where
    T: Serialize,
    F: FnMut(&str, Value, &mut dyn Reporter) -> Result<Option<T>, TransformError>,
{
    let input_dir = &paths.input_dir;
    if !input_dir.is_dir() {
        reporter.report(BatchEvent::InputDirMissing {
            input_dir: input_dir.display().to_string(),
        });
        return Err(BatchError::InputDirMissing {
            path: input_dir.display().to_string(),
        });
    }

    fs::create_dir_all(&paths.output_dir).map_err(|e| BatchError::OutputDir {
        path: paths.output_dir.display().to_string(),
        message: e.to_string(),
    })?;

    let files = list_json_files(input_dir)?;
    let mut report = BatchReport::new(pipeline, paths);
    report.discovered = files.len();
    if files.is_empty() {
        reporter.report(BatchEvent::NoInputFiles {
            input_dir: input_dir.display().to_string(),
        });
    } else {
        reporter.report(BatchEvent::FilesDiscovered {
            input_dir: input_dir.display().to_string(),
            count: files.len(),
        });
    }

    for path in files {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        reporter.report(BatchEvent::FileStarted { file: file.clone() });

        let outcome = process_file(&path, &file, &paths.output_dir, reporter, &mut transform);
        let event = match &outcome {
            FileOutcome::Written { output } => BatchEvent::FileWritten {
                file: file.clone(),
                output: output.clone(),
            },
            FileOutcome::Skipped { reason } => BatchEvent::FileSkipped {
                file: file.clone(),
                reason: reason.clone(),
            },
            FileOutcome::Failed { reason } => BatchEvent::FileFailed {
                file: file.clone(),
                reason: reason.clone(),
            },
        };
        reporter.report(event);
        report.record(file, outcome);
    }

    reporter.report(BatchEvent::BatchFinished {
        processed: report.processed,
        discovered: report.discovered,
    });
    Ok(report)
}

fn process_file<T, F>(
    path: &Path,
    file: &str,
    output_dir: &Path,
    reporter: &mut dyn Reporter,
    transform: &mut F,
) -> FileOutcome
where
    T: Serialize,
    F: FnMut(&str, Value, &mut dyn Reporter) -> Result<Option<T>, TransformError>,
{
    let document = match read_document(path) {
        Ok(document) => document,
        Err(err) => {
            return FileOutcome::Failed {
                reason: err.to_string(),
            };
        }
    };

    let transformed = match transform(file, document, reporter) {
        Ok(Some(transformed)) => transformed,
        Ok(None) => {
            return FileOutcome::Skipped {
                reason: "no forms collection".to_string(),
            };
        }
        Err(err) => {
            return FileOutcome::Failed {
                reason: err.to_string(),
            };
        }
    };

    let output = output_dir.join(file);
    match write_document(&output, &transformed) {
        Ok(()) => FileOutcome::Written {
            output: output.display().to_string(),
        },
        Err(err) => FileOutcome::Failed {
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_file::read_document;
    use crate::test_support::TempDirGuard;
    use formdetails_kernel::{EventLevel, RecordingReporter};
    use serde_json::json;

    struct Workspace {
        _root: TempDirGuard,
        paths: BatchPaths,
        append_file: PathBuf,
    }

    fn workspace(prefix: &str) -> Workspace {
        let root = TempDirGuard::new(prefix);
        let input = root.path().join("add");
        fs::create_dir_all(&input).expect("input dir should be created");
        let paths = BatchPaths::new(input, root.path().join("out"));
        let append_file = root.path().join("append_json.json");
        Workspace {
            _root: root,
            paths,
            append_file,
        }
    }

    fn write_input(ws: &Workspace, name: &str, contents: &str) {
        fs::write(ws.paths.input_dir.join(name), contents).expect("input should be written");
    }

    fn output(ws: &Workspace, name: &str) -> Value {
        read_document(ws.paths.output_dir.join(name)).expect("output should parse")
    }

    #[test]
    fn normalize_survives_one_malformed_file() {
        let ws = workspace("normalize-resilience");
        write_input(&ws, "a.json", r#"{"forms": [{"formId": "a"}]}"#);
        write_input(&ws, "b.json", r#"{"forms": [ broken"#);
        write_input(&ws, "c.json", r#"{"otherData": "x"}"#);

        let mut reporter = RecordingReporter::new();
        let report = run_normalize(&ws.paths, &mut reporter).expect("batch should run");

        assert_eq!((report.processed, report.discovered), (2, 3));
        assert_eq!(report.failed, 1);
        assert!(!ws.paths.output_dir.join("b.json").exists());
        assert_eq!(output(&ws, "c.json"), json!({"forms": []}));
        assert_eq!(output(&ws, "a.json")["forms"][0]["formId"], json!("a"));
        assert_eq!(reporter.count_at(EventLevel::Error), 1);
        assert_eq!(
            reporter.events().last(),
            Some(&BatchEvent::BatchFinished {
                processed: 2,
                discovered: 3,
            })
        );
    }

    #[test]
    fn merge_skips_documents_without_forms() {
        let ws = workspace("merge-skip");
        fs::write(&ws.append_file, r#"{"fieldName":"B"},{"fieldName":"C"},"#)
            .expect("appendix should be written");
        write_input(
            &ws,
            "form.json",
            r#"{"forms": [{"formId": "f", "formFields": [{"fieldName": "A"}]}]}"#,
        );
        write_input(&ws, "other.json", r#"{"otherData": "x"}"#);

        let mut reporter = RecordingReporter::new();
        let report =
            run_merge(&ws.paths, &ws.append_file, &mut reporter).expect("batch should run");

        assert_eq!(
            (report.processed, report.skipped, report.discovered),
            (1, 1, 2)
        );
        assert!(!ws.paths.output_dir.join("other.json").exists());
        let names: Vec<Value> = output(&ws, "form.json")["forms"][0]["formFields"]
            .as_array()
            .expect("fields should be an array")
            .iter()
            .map(|field| field["fieldName"].clone())
            .collect();
        assert_eq!(names, vec![json!("A"), json!("B"), json!("C")]);
        assert!(reporter.events().contains(&BatchEvent::FormMerged {
            file: "form.json".to_string(),
            form: 0,
            existing: 1,
            appended: 2,
            total: 3,
        }));
    }

    #[test]
    fn merge_aborts_before_touching_files_when_appendix_missing() {
        let ws = workspace("merge-no-appendix");
        write_input(&ws, "form.json", r#"{"forms": [{"formId": "f"}]}"#);

        let mut reporter = RecordingReporter::new();
        let result = run_merge(&ws.paths, &ws.append_file, &mut reporter);

        assert!(matches!(
            result,
            Err(BatchError::Appendix(AppendixError::Missing { .. }))
        ));
        assert!(!ws.paths.output_dir.exists());
        assert!(matches!(
            reporter.events(),
            [BatchEvent::AppendixUnavailable { .. }]
        ));
    }

    #[test]
    fn missing_input_directory_is_a_hard_stop() {
        let ws = workspace("missing-input");
        let paths = BatchPaths::new(
            ws.paths.input_dir.join("does-not-exist"),
            ws.paths.output_dir.clone(),
        );
        let mut reporter = RecordingReporter::new();
        let result = run_normalize(&paths, &mut reporter);
        assert!(matches!(result, Err(BatchError::InputDirMissing { .. })));
        assert!(!paths.output_dir.exists());
    }

    #[test]
    fn only_top_level_json_files_are_listed() {
        let ws = workspace("listing");
        write_input(&ws, "b.json", "{}");
        write_input(&ws, "a.json", "{}");
        write_input(&ws, "notes.txt", "{}");
        fs::create_dir_all(ws.paths.input_dir.join("nested.json"))
            .expect("nested dir should be created");
        fs::write(
            ws.paths.input_dir.join("nested.json").join("inner.json"),
            "{}",
        )
        .expect("nested file should be written");

        let names: Vec<String> = list_json_files(&ws.paths.input_dir)
            .expect("listing should succeed")
            .iter()
            .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(names, vec!["a.json".to_string(), "b.json".to_string()]);
    }

    #[test]
    fn empty_input_directory_reports_zero_of_zero() {
        let ws = workspace("empty");
        let mut reporter = RecordingReporter::new();
        let report = run_normalize(&ws.paths, &mut reporter).expect("batch should run");
        assert_eq!((report.processed, report.discovered), (0, 0));
        assert!(report.all_processed());
        assert!(matches!(
            reporter.events().first(),
            Some(BatchEvent::NoInputFiles { .. })
        ));
    }

    #[test]
    fn structural_error_fails_only_that_file() {
        let ws = workspace("structural");
        write_input(&ws, "bad.json", r#"{"forms": "not-a-list"}"#);
        write_input(
            &ws,
            "good.json",
            r#"{"forms": [{"formFields": [{"colSpan": 6}]}]}"#,
        );

        let report =
            run_normalize(&ws.paths, &mut RecordingReporter::new()).expect("batch should run");
        assert_eq!((report.processed, report.failed), (1, 1));
        assert_eq!(
            output(&ws, "good.json")["forms"][0]["formFields"][0]["extensionData"],
            json!({"colSpan": 6})
        );
    }

    #[test]
    fn write_failure_fails_only_that_file() {
        let ws = workspace("write-failure");
        write_input(&ws, "a.json", r#"{"forms": []}"#);
        write_input(&ws, "b.json", r#"{"forms": []}"#);
        fs::create_dir_all(ws.paths.output_dir.join("a.json"))
            .expect("blocking dir should be created");

        let report =
            run_normalize(&ws.paths, &mut RecordingReporter::new()).expect("batch should run");

        assert_eq!((report.processed, report.failed), (1, 1));
        assert!(matches!(
            &report.files[0],
            FileReport {
                outcome: FileOutcome::Failed { .. },
                ..
            }
        ));
        assert!(ws.paths.output_dir.join("a.json").is_dir());
        assert_eq!(output(&ws, "b.json"), json!({"forms": []}));

        let mut names: Vec<String> = fs::read_dir(&ws.paths.output_dir)
            .expect("output dir should list")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.json".to_string(), "b.json".to_string()]);
    }

    #[test]
    fn merge_output_keeps_oversized_integers_verbatim() {
        let ws = workspace("merge-big-int");
        fs::write(&ws.append_file, r#"{"fieldName":"B"},"#).expect("appendix should be written");
        write_input(
            &ws,
            "form.json",
            r#"{"forms":[{"formFields":[{"sort":123456789012345678901234567890}]}]}"#,
        );

        let report = run_merge(&ws.paths, &ws.append_file, &mut RecordingReporter::new())
            .expect("batch should run");

        assert_eq!(report.processed, 1);
        let written =
            fs::read_to_string(ws.paths.output_dir.join("form.json")).expect("output should exist");
        assert!(written.contains(r#""sort": 123456789012345678901234567890"#));
    }

    #[test]
    fn report_serializes_with_flattened_outcomes() {
        let ws = workspace("report-json");
        write_input(&ws, "a.json", "{}");
        let report =
            run_normalize(&ws.paths, &mut RecordingReporter::new()).expect("batch should run");
        let rendered = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(rendered["pipeline"], json!("normalize"));
        assert_eq!(rendered["files"][0]["file"], json!("a.json"));
        assert_eq!(rendered["files"][0]["status"], json!("written"));
    }
}
