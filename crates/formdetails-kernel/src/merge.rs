//! Field merger: appends appendix records to every form's `formFields`.

use crate::appendix::AppendixFieldSet;
use crate::error::{TransformError, kind_of};
use crate::value::is_truthy;
use serde::Serialize;
use serde_json::Value;

/// Field counts for one merged form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormMergeStats {
    pub form: usize,
    pub existing: usize,
    pub appended: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    Merged {
        document: Value,
        forms: Vec<FormMergeStats>,
    },
    /// The document has no (or an empty) `forms` collection.
    NotApplicable,
}

/// Merge `appendix` into every form of `document`.
///
/// Existing fields keep their positions; appendix records are appended as
/// independent copies. A form without fields receives a copy of the whole
/// appendix. Every other key of the document and its forms is kept as-is.
pub fn merge_document(
    mut document: Value,
    appendix: &AppendixFieldSet,
) -> Result<MergeOutcome, TransformError> {
    let forms = match document.get_mut("forms") {
        Some(forms) if is_truthy(forms) => forms,
        _ => return Ok(MergeOutcome::NotApplicable),
    };
    let found = kind_of(forms);
    let forms = forms
        .as_array_mut()
        .ok_or(TransformError::FormsNotArray { found })?;

    let mut stats = Vec::with_capacity(forms.len());
    for (index, form) in forms.iter_mut().enumerate() {
        let found = kind_of(form);
        let form = form
            .as_object_mut()
            .ok_or(TransformError::FormNotObject { form: index, found })?;

        let existing = match form.get("formFields").filter(|fields| is_truthy(fields)) {
            None => 0,
            Some(Value::Array(fields)) => fields.len(),
            Some(other) => {
                return Err(TransformError::FieldsNotArray {
                    form: index,
                    found: kind_of(other),
                });
            }
        };

        if existing == 0 {
            form.insert(
                "formFields".to_string(),
                Value::Array(appendix.cloned_records()),
            );
        } else if let Some(Value::Array(fields)) = form.get_mut("formFields") {
            fields.extend(appendix.cloned_records());
        }

        stats.push(FormMergeStats {
            form: index,
            existing,
            appended: appendix.len(),
            total: existing + appendix.len(),
        });
    }

    Ok(MergeOutcome::Merged {
        document,
        forms: stats,
    })
}
