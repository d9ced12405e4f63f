//! Section payloads and the literal/placeholder field model.
//!
//! A payload maps field labels to [`FieldValue`]s. Each value is either real
//! data ([`FieldValue::Literal`]) or a reference to a field that a downstream
//! templating pass will substitute ([`FieldValue::Placeholder`]). The two are
//! distinct variants, so a literal that merely looks like `{token}` is never
//! mistaken for a placeholder.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::currency;

/// Text rendered for fields that are absent from a payload.
pub const MISSING_FIELD: &str = "N/A";

/// A single payload field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum FieldValue {
    /// Concrete data: a string, number, boolean or nested mapping.
    Literal(Value),
    /// A dotted field path rendered as `{path}`.
    Placeholder(String),
}

impl FieldValue {
    /// Creates a literal field.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Creates a placeholder field referencing `path`.
    pub fn placeholder(path: impl Into<String>) -> Self {
        Self::Placeholder(path.into())
    }

    /// Returns whether this is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Returns the referenced path of a placeholder.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Placeholder(path) => Some(path),
            Self::Literal(_) => None,
        }
    }

    /// Returns the substitution token of a placeholder, e.g. `{policy_number}`.
    pub fn token(&self) -> Option<String> {
        self.path().map(placeholder_token)
    }

    /// Renders the field as plain text.
    pub fn text(&self) -> String {
        match self {
            Self::Literal(value) => currency::raw_text(value),
            Self::Placeholder(path) => placeholder_token(path),
        }
    }

    /// Renders the field as currency.
    ///
    /// Placeholders render as their token. Literals that cannot be formatted
    /// come back as `Err` holding the raw text.
    pub fn currency_text(&self) -> Result<String, String> {
        match self {
            Self::Literal(value) => currency::format_value(value),
            Self::Placeholder(path) => Ok(placeholder_token(path)),
        }
    }

    /// Returns the nested mapping of a literal object as a payload.
    pub fn as_payload(&self) -> Option<Payload> {
        match self {
            Self::Literal(Value::Object(map)) => Some(Payload::from(map.clone())),
            _ => None,
        }
    }
}

/// Formats a field path as a substitution token.
pub fn placeholder_token(path: &str) -> String {
    format!("{{{path}}}")
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Literal(Value::String(value.to_owned()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Literal(Value::String(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::literal(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::literal(value)
    }
}

/// Ordered mapping from field label to value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Payload {
    fields: Vec<(String, FieldValue)>,
}

impl Payload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field and returns the updated payload.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(label, value);
        self
    }

    /// Inserts a placeholder field and returns the updated payload.
    pub fn with_placeholder(self, label: impl Into<String>, path: impl Into<String>) -> Self {
        self.with(label, FieldValue::placeholder(path))
    }

    /// Inserts or replaces a field, keeping the original position on replace.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<FieldValue>) {
        let label = label.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((label, value)),
        }
    }

    /// Looks up a top-level field.
    pub fn get(&self, label: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value)
    }

    /// Looks up a dotted path such as `agent.name` through nested literals.
    pub fn get_path(&self, path: &str) -> Option<FieldValue> {
        let mut segments = path.split('.');
        let first = self.get(segments.next()?)?;
        let mut current = match first {
            FieldValue::Placeholder(_) => {
                return if path.contains('.') {
                    None
                } else {
                    Some(first.clone())
                };
            }
            FieldValue::Literal(value) => value,
        };
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(FieldValue::Literal(current.clone()))
    }

    /// Returns a nested mapping as its own payload.
    pub fn nested(&self, label: &str) -> Option<Payload> {
        self.get(label).and_then(FieldValue::as_payload)
    }

    /// Iterates over the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .map(|(label, value)| (label.as_str(), value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Payload
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Payload::new();
        for (label, value) in iter {
            payload.insert(label, value);
        }
        payload
    }
}
