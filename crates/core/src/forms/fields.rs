//! Untyped form fields as they arrive from multipart or JSON bodies.

use std::collections::HashMap;

use serde_json::Value;

use super::error::FormError;

/// Value of one submitted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain text, as sent by HTML forms.
    Text(String),
    /// Boolean, as sent by JSON clients.
    Flag(bool),
}

/// Text fields of one submission, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    values: HashMap<String, FieldValue>,
}

impl FormFields {
    /// Empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text field. A repeated name replaces the earlier value.
    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(name.into(), FieldValue::Text(value.into()));
    }

    /// Set a boolean field.
    pub fn insert_flag(&mut self, name: impl Into<String>, value: bool) {
        self.values.insert(name.into(), FieldValue::Flag(value));
    }

    /// Build from a JSON object. Numbers are kept as their text, nulls,
    /// arrays and objects are dropped.
    #[must_use]
    pub fn from_json(object: serde_json::Map<String, Value>) -> Self {
        let mut fields = Self::new();
        for (name, value) in object {
            match value {
                Value::String(text) => fields.insert_text(name, text),
                Value::Bool(flag) => fields.insert_flag(name, flag),
                Value::Number(number) => fields.insert_text(name, number.to_string()),
                Value::Null | Value::Array(_) | Value::Object(_) => {}
            }
        }
        fields
    }

    /// Raw value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Trimmed text of a field; blank text and booleans count as absent.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            FieldValue::Text(text) => Some(text.trim()).filter(|t| !t.is_empty()),
            FieldValue::Flag(_) => None,
        }
    }

    /// Owned text of a field, if present.
    #[must_use]
    pub fn optional(&self, name: &str) -> Option<String> {
        self.text(name).map(str::to_string)
    }

    /// First present field among `names`, in order.
    #[must_use]
    pub fn first_of(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.optional(name))
    }

    /// Text of a field that must be present.
    pub fn required(&self, name: &'static str) -> Result<String, FormError> {
        self.optional(name).ok_or(FormError::MissingField(name))
    }

    /// Consent checkbox: only `"on"` or a JSON `true` count as given.
    #[must_use]
    pub fn consent(&self, name: &str) -> bool {
        consent_given(self.values.get(name))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field was sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields = Self::new();
        for (name, value) in iter {
            fields.insert_text(name, value);
        }
        fields
    }
}

/// Coerce a checkbox value into a boolean.
#[must_use]
pub fn consent_given(value: Option<&FieldValue>) -> bool {
    match value {
        Some(FieldValue::Text(text)) => text == "on",
        Some(FieldValue::Flag(flag)) => *flag,
        None => false,
    }
}
