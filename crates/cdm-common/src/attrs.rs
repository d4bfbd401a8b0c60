//! Free-form attribute bags for arrays and coordinate variables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single attribute value. CF metadata is either textual or numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Number(f64),
}

impl AttrValue {
    /// The textual value, if this attribute is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Number(_) => None,
        }
    }

    /// The numeric value, if this attribute is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Text(_) => None,
            AttrValue::Number(n) => Some(*n),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

/// String-keyed attribute mapping attached to arrays and coordinates.
///
/// The translation layer only ever reads `units` and `standard_name`;
/// everything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for constructing attribute bags inline.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The `units` attribute, when present and textual.
    pub fn units(&self) -> Option<&str> {
        self.get("units").and_then(AttrValue::as_str)
    }

    pub fn set_units(&mut self, units: impl Into<String>) {
        self.set("units", units.into());
    }

    /// The `standard_name` attribute, when present and textual.
    pub fn standard_name(&self) -> Option<&str> {
        self.get("standard_name").and_then(AttrValue::as_str)
    }
}
