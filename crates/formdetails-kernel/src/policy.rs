//! Field-key policy: which source keys survive normalization and how.
//!
//! The table is the whole policy. Emission order of a canonical field is the
//! table order for required and optional keys, followed by `extensionData`.

use serde_json::Value;

/// Value written for a required key the source does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDefault {
    EmptyString,
    False,
    Zero,
}

impl KeyDefault {
    pub fn to_value(self) -> Value {
        match self {
            Self::EmptyString => Value::String(String::new()),
            Self::False => Value::Bool(false),
            Self::Zero => Value::from(0),
        }
    }
}

/// When an optional key is considered present in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Present with any value other than `null`.
    NotNull,
    /// Present with a non-empty value (see [`crate::is_truthy`]).
    Truthy,
}

impl Presence {
    pub fn admits(self, value: &Value) -> bool {
        match self {
            Self::NotNull => !value.is_null(),
            Self::Truthy => crate::is_truthy(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRule {
    /// Always emitted; defaulted when absent or `null`.
    Required(KeyDefault),
    /// Emitted only when the presence rule admits the source value.
    Optional(Presence),
    /// Collected verbatim into `extensionData` when non-null.
    Extension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKey {
    pub name: &'static str,
    pub rule: KeyRule,
}

const fn required(name: &'static str, default: KeyDefault) -> FieldKey {
    FieldKey {
        name,
        rule: KeyRule::Required(default),
    }
}

const fn optional(name: &'static str, presence: Presence) -> FieldKey {
    FieldKey {
        name,
        rule: KeyRule::Optional(presence),
    }
}

const fn extension(name: &'static str) -> FieldKey {
    FieldKey {
        name,
        rule: KeyRule::Extension,
    }
}

pub const EXTENSION_DATA_KEY: &str = "extensionData";

pub const FIELD_KEY_POLICY: [FieldKey; 18] = [
    required("formFieldId", KeyDefault::EmptyString),
    required("fieldName", KeyDefault::EmptyString),
    required("fieldType", KeyDefault::EmptyString),
    required("isReadonly", KeyDefault::False),
    required("isVisible", KeyDefault::False),
    required("infoDisplayCondition", KeyDefault::False),
    required("sort", KeyDefault::Zero),
    required("specialFieldCode", KeyDefault::EmptyString),
    optional("defaultValue", Presence::NotNull),
    optional("relatedSource", Presence::NotNull),
    optional("fieldOptions", Presence::Truthy),
    optional("fieldGroup", Presence::Truthy),
    optional("parentField", Presence::Truthy),
    optional("displayCondition", Presence::NotNull),
    optional("relatedFormsExtend", Presence::Truthy),
    optional("flowNodeCode", Presence::Truthy),
    extension("colSpan"),
    extension("translation"),
];

/// Identity keys of a form, all defaulted to `""`.
pub const FORM_IDENTITY_KEYS: [&str; 3] = ["formId", "formName", "description"];

pub fn lookup(name: &str) -> Option<&'static FieldKey> {
    FIELD_KEY_POLICY.iter().find(|key| key.name == name)
}

pub fn is_extension_key(name: &str) -> bool {
    lookup(name).is_some_and(|key| key.rule == KeyRule::Extension)
}
