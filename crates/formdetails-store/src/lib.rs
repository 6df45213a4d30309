//! # formdetails-store
//!
//! File-system side of the pipelines:
//! - `json_file`: whole-document reads and atomic pretty writes
//! - `appendix_file`: loading an appendix from disk
//! - `batch`: directory enumeration, per-file pipeline dispatch, tallies
//!
//! Transformations themselves live in `formdetails-kernel`; this crate only
//! moves bytes and turns failures into per-file outcomes.

pub mod appendix_file;
pub mod batch;
pub mod json_file;

pub use appendix_file::{AppendixError, load_appendix};
pub use batch::{
    BatchError, BatchPaths, BatchReport, FileOutcome, FileReport, list_json_files, run_merge,
    run_normalize,
};
pub use json_file::{StoreError, read_document, render_document, write_document};
