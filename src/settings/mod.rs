//! The general settings document and its typed representation.
//!
//! [`GeneralSettings`] is an open mapping of key to [`SettingValue`]. Values
//! are limited to strings, numbers and booleans; anything else in a stored
//! document is rejected when the document is read.

pub mod handler;

use std::collections::BTreeMap;

use serde::Serialize;

/// Collection holding the settings document.
pub const COLLECTION: &str = "general_settings";

/// Id of the settings document inside [`COLLECTION`].
pub const DOCUMENT_ID: &str = "config";

pub const WHATSAPP_REDIRECT_NUMBER: &str = "whatsapp_redirect_number";
pub const REFERRAL_DOMAIN: &str = "referral_domain";

pub const DEFAULT_WHATSAPP_REDIRECT_NUMBER: &str = "+62 815-1780-0900";
pub const DEFAULT_REFERRAL_DOMAIN: &str = "www.kacamatagratis.org";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GeneralSettings {
    fields: BTreeMap<String, SettingValue>,
}

impl GeneralSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The settings served when no document is stored.
    #[must_use]
    pub fn defaults() -> Self {
        let mut settings = Self::new();
        settings.insert(WHATSAPP_REDIRECT_NUMBER, DEFAULT_WHATSAPP_REDIRECT_NUMBER);
        settings.insert(REFERRAL_DOMAIN, DEFAULT_REFERRAL_DOMAIN);
        settings
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.fields.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build settings from a JSON object, rejecting any non-scalar value.
    pub fn from_json_object(
        object: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, UnsupportedValue> {
        let mut settings = Self::new();
        for (key, value) in object {
            let value = match value {
                serde_json::Value::String(s) => SettingValue::Text(s),
                serde_json::Value::Number(n) => SettingValue::Number(n),
                serde_json::Value::Bool(b) => SettingValue::Flag(b),
                other => {
                    return Err(UnsupportedValue {
                        key,
                        found: json_type_name(&other),
                    })
                }
            };
            settings.fields.insert(key, value);
        }
        Ok(settings)
    }
}

/// A stored field whose value is outside the permitted scalar types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("setting '{key}' has unsupported value type {found}")]
pub struct UnsupportedValue {
    pub key: String,
    pub found: &'static str,
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
