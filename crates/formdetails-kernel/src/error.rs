//! Error types for document transformations.

use crate::appendix::ParseAttempt;

/// A document whose structure cannot be merged or normalized.
///
/// Indices are zero-based positions in the source arrays.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// `forms` is present and non-empty but is not an array.
    #[error("`forms` is not an array (found {found})")]
    FormsNotArray { found: &'static str },

    /// An entry of `forms` is not an object.
    #[error("forms[{form}] is not an object (found {found})")]
    FormNotObject { form: usize, found: &'static str },

    /// `formFields` is present and non-empty but is not an array.
    #[error("forms[{form}].formFields is not an array (found {found})")]
    FieldsNotArray { form: usize, found: &'static str },

    /// An entry of `formFields` is not an object.
    #[error("forms[{form}].formFields[{field}] is not an object (found {found})")]
    FieldNotObject {
        form: usize,
        field: usize,
        found: &'static str,
    },
}

/// Every appendix parse strategy failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("appendix is not valid JSON under any strategy ({})", render_attempts(.attempts))]
pub struct AppendixParseError {
    pub attempts: Vec<ParseAttempt>,
}

fn render_attempts(attempts: &[ParseAttempt]) -> String {
    attempts
        .iter()
        .map(|attempt| format!("{}: {}", attempt.strategy, attempt.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// JSON type name used in error messages.
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
