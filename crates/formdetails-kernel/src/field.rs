//! Canonical shape of a single form field.

use crate::policy::{EXTENSION_DATA_KEY, FIELD_KEY_POLICY, KeyRule, is_extension_key};
use serde::Serialize;
use serde_json::{Map, Value};

/// A field rebuilt from the policy table.
///
/// Key order: required keys, admitted optional keys, then `extensionData`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CanonicalField(Map<String, Value>);

impl CanonicalField {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn extension_data(&self) -> Option<&Map<String, Value>> {
        self.0.get(EXTENSION_DATA_KEY).and_then(Value::as_object)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

pub fn normalize_field(source: &Map<String, Value>) -> CanonicalField {
    let mut out = Map::new();

    for key in &FIELD_KEY_POLICY {
        let found = source.get(key.name);
        match key.rule {
            KeyRule::Required(default) => {
                let value = found
                    .filter(|value| !value.is_null())
                    .cloned()
                    .unwrap_or_else(|| default.to_value());
                out.insert(key.name.to_string(), value);
            }
            KeyRule::Optional(presence) => {
                if let Some(value) = found.filter(|value| presence.admits(value)) {
                    out.insert(key.name.to_string(), value.clone());
                }
            }
            KeyRule::Extension => {}
        }
    }

    // Source order, not table order.
    let extension: Map<String, Value> = source
        .iter()
        .filter(|(name, value)| is_extension_key(name) && !value.is_null())
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    if !extension.is_empty() {
        out.insert(EXTENSION_DATA_KEY.to_string(), Value::Object(extension));
    }

    CanonicalField(out)
}
