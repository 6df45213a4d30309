//! # formdetails-kernel
//!
//! Pure, I/O-free transformations over form-definition documents.
//!
//! ```text
//! appendix text --parse--> AppendixFieldSet --+
//!                                             |
//! form document --------------merge-----------+--> form document
//!       |
//!       +---------------------normalize----------> CanonicalDocument
//! ```
//!
//! The merger keeps every key of the document it is given; the normalizer
//! rebuilds a fresh document driven by the field-key policy table in
//! [`policy`]. Neither touches the file system. Progress is emitted through
//! the [`Reporter`] passed in by the caller.

pub mod appendix;
pub mod error;
pub mod field;
pub mod merge;
pub mod normalize;
pub mod policy;
pub mod report;
pub mod value;

pub use appendix::{AppendixFieldSet, ParseAttempt, ParseStrategy, ParsedAppendix, parse_appendix};
pub use error::{AppendixParseError, TransformError};
pub use field::{CanonicalField, normalize_field};
pub use merge::{FormMergeStats, MergeOutcome, merge_document};
pub use normalize::{CanonicalDocument, CanonicalForm, normalize_document};
pub use policy::{FIELD_KEY_POLICY, FORM_IDENTITY_KEYS, FieldKey, KeyDefault, KeyRule, Presence};
pub use report::{BatchEvent, EventLevel, Pipeline, RecordingReporter, Reporter};
pub use value::is_truthy;
