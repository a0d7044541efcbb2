use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::request::RequestError;

use super::Document;

/// One attribute of a write payload.
///
/// Three states are needed to tell "write this value" apart from "this
/// attribute is null" and "drop this attribute". Updates remove both `Null`
/// and `Undefined` attributes; puts write `Null` and skip `Undefined`.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Present(Value),
    Null,
    Undefined,
}

impl Field {
    /// The value an update assigns, or `None` when it removes the attribute.
    pub fn assigned_value(&self) -> Option<&Value> {
        match self {
            Self::Present(Value::Null) | Self::Null | Self::Undefined => None,
            Self::Present(value) => Some(value),
        }
    }

    /// The value to store on a put. `Undefined` is skipped.
    pub fn stored_value(&self) -> Option<Value> {
        match self {
            Self::Present(value) => Some(value.clone()),
            Self::Null => Some(Value::Null),
            Self::Undefined => None,
        }
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            value => Self::Present(value),
        }
    }
}

impl From<Option<Value>> for Field {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Undefined, Self::from)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Self::Present(Value::from(value))
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Self::Present(Value::from(value))
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Self::Present(Value::from(value))
    }
}

impl From<i32> for Field {
    fn from(value: i32) -> Self {
        Self::Present(Value::from(value))
    }
}

impl From<i64> for Field {
    fn from(value: i64) -> Self {
        Self::Present(Value::from(value))
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Self::Present(Value::from(value))
    }
}

/// Attributes to write, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Document")]
pub struct Payload {
    fields: BTreeMap<String, Field>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute. `Value::Null` becomes [`Field::Null`].
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Field>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Marks an attribute as explicitly null.
    pub fn null(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), Field::Null);
        self
    }

    /// Marks an attribute for removal.
    pub fn unset(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), Field::Undefined);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, field: Field) -> Option<Field> {
        self.fields.insert(name.into(), field)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Document> for Payload {
    fn from(document: Document) -> Self {
        document
            .into_iter()
            .map(|(name, value)| (name, Field::from(value)))
            .collect()
    }
}

impl FromIterator<(String, Field)> for Payload {
    fn from_iter<T: IntoIterator<Item = (String, Field)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<Value> for Payload {
    type Error = RequestError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into_iter().map(|(k, v)| (k, Field::from(v))).collect()),
            _ => Err(RequestError::PayloadNotAnObject),
        }
    }
}
