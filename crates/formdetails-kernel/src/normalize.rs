//! Document normalizer: rebuilds a form document in canonical shape.

use crate::error::{TransformError, kind_of};
use crate::field::{CanonicalField, normalize_field};
use crate::policy::FORM_IDENTITY_KEYS;
use crate::value::truthy_member;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalDocument {
    pub forms: Vec<CanonicalForm>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalForm {
    pub form_id: Value,
    pub form_name: Value,
    pub description: Value,
    pub form_fields: Vec<CanonicalField>,
    /// Passed through untouched when non-empty, `[]` otherwise.
    pub field_groups: Value,
}

impl CanonicalDocument {
    pub fn field_count(&self) -> usize {
        self.forms.iter().map(|form| form.form_fields.len()).sum()
    }
}

/// Build the canonical form of `document` without modifying it.
///
/// A missing or empty `forms` yields `{"forms": []}`; this includes
/// documents that are not JSON objects at all.
pub fn normalize_document(document: &Value) -> Result<CanonicalDocument, TransformError> {
    let Some(forms) = truthy_member(document, "forms") else {
        return Ok(CanonicalDocument { forms: Vec::new() });
    };
    let found = kind_of(forms);
    let forms = forms
        .as_array()
        .ok_or(TransformError::FormsNotArray { found })?;

    let forms = forms
        .iter()
        .enumerate()
        .map(|(index, form)| normalize_form(index, form))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CanonicalDocument { forms })
}

fn normalize_form(index: usize, form: &Value) -> Result<CanonicalForm, TransformError> {
    if !form.is_object() {
        return Err(TransformError::FormNotObject {
            form: index,
            found: kind_of(form),
        });
    }

    let [form_id, form_name, description] = FORM_IDENTITY_KEYS.map(|key| {
        form.get(key)
            .filter(|value| !value.is_null())
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()))
    });

    let form_fields = match truthy_member(form, "formFields") {
        None => Vec::new(),
        Some(Value::Array(fields)) => fields
            .iter()
            .enumerate()
            .map(|(field_index, field)| {
                field
                    .as_object()
                    .map(normalize_field)
                    .ok_or(TransformError::FieldNotObject {
                        form: index,
                        field: field_index,
                        found: kind_of(field),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(TransformError::FieldsNotArray {
                form: index,
                found: kind_of(other),
            });
        }
    };

    let field_groups = truthy_member(form, "fieldGroups")
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));

    Ok(CanonicalForm {
        form_id,
        form_name,
        description,
        form_fields,
        field_groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(document: &Value) -> Value {
        let canonical = normalize_document(document).expect("document should normalize");
        serde_json::to_value(&canonical).expect("canonical document should serialize")
    }

    #[test]
    fn document_without_forms_normalizes_to_empty_forms() {
        assert_eq!(render(&json!({"otherData": "x"})), json!({"forms": []}));
        assert_eq!(render(&json!({"forms": null})), json!({"forms": []}));
        assert_eq!(render(&json!({"forms": {}})), json!({"forms": []}));
        assert_eq!(render(&json!([1, 2, 3])), json!({"forms": []}));
    }

    #[test]
    fn empty_form_fields_stay_an_empty_array() {
        let out = render(&json!({"forms": [{"formId": "f", "formFields": []}]}));
        assert_eq!(out["forms"][0]["formFields"], json!([]));
    }

    #[test]
    fn bare_form_gets_identity_defaults_and_empty_collections() {
        let out = render(&json!({"forms": [{}]}));
        assert_eq!(
            out,
            json!({"forms": [{
                "formId": "",
                "formName": "",
                "description": "",
                "formFields": [],
                "fieldGroups": []
            }]})
        );
    }

    #[test]
    fn field_groups_pass_through_verbatim() {
        let groups = json!([{"groupId": "g1", "anything": {"nested": [1, 2]}}]);
        let out = render(&json!({"forms": [{"fieldGroups": groups.clone()}]}));
        assert_eq!(out["forms"][0]["fieldGroups"], groups);
    }

    #[test]
    fn extra_form_and_document_keys_are_dropped() {
        let out = render(&json!({
            "version": 3,
            "forms": [{"formId": "a", "owner": "ops"}]
        }));
        assert!(out.get("version").is_none());
        assert!(out["forms"][0].get("owner").is_none());
    }

    #[test]
    fn input_document_is_left_untouched() {
        let document = json!({"forms": [{"formFields": [{"fieldName": "x", "junk": 1}]}]});
        let before = document.clone();
        let _ = normalize_document(&document).expect("should normalize");
        assert_eq!(document, before);
    }

    #[test]
    fn normalization_is_deterministic() {
        let document = json!({"forms": [{"formFields": [
            {"colSpan": 4, "fieldName": "a", "translation": {"zh": "甲"}},
            {"fieldOptions": [{"label": "x"}], "sort": 2}
        ]}]});
        let first =
            serde_json::to_string(&normalize_document(&document).expect("ok")).expect("serialize");
        let second =
            serde_json::to_string(&normalize_document(&document).expect("ok")).expect("serialize");
        assert_eq!(first, second);
    }

    #[test]
    fn structural_errors_carry_positions() {
        assert_eq!(
            normalize_document(&json!({"forms": "abc"})),
            Err(TransformError::FormsNotArray { found: "string" })
        );
        assert_eq!(
            normalize_document(&json!({"forms": [{}, 7]})),
            Err(TransformError::FormNotObject {
                form: 1,
                found: "number",
            })
        );
        assert_eq!(
            normalize_document(&json!({"forms": [{"formFields": {"a": 1}}]})),
            Err(TransformError::FieldsNotArray {
                form: 0,
                found: "object",
            })
        );
        assert_eq!(
            normalize_document(&json!({"forms": [{"formFields": [{}, "x"]}]})),
            Err(TransformError::FieldNotObject {
                form: 0,
                field: 1,
                found: "string",
            })
        );
    }

    #[test]
    fn canonical_document_snapshot() {
        let document = json!({
            "forms": [{
                "formId": "F-01",
                "formName": "Claim form",
                "formFields": [{
                    "fieldName": "amount",
                    "fieldType": "dxNumberBox",
                    "isVisible": true,
                    "sort": 3,
                    "fieldOptions": [],
                    "colSpan": 6,
                    "unknownKey": 1
                }]
            }]
        });
        let canonical = normalize_document(&document).expect("should normalize");
        assert_eq!(canonical.field_count(), 1);
        let rendered = serde_json::to_string_pretty(&canonical).expect("should render");
        insta::assert_snapshot!(rendered, @r###"
        {
          "forms": [
            {
              "formId": "F-01",
              "formName": "Claim form",
              "description": "",
              "formFields": [
                {
                  "formFieldId": "",
                  "fieldName": "amount",
                  "fieldType": "dxNumberBox",
                  "isReadonly": false,
                  "isVisible": true,
                  "infoDisplayCondition": false,
                  "sort": 3,
                  "specialFieldCode": "",
                  "extensionData": {
                    "colSpan": 6
                  }
                }
              ],
              "fieldGroups": []
            }
          ]
        }
        "###);
    }
}
