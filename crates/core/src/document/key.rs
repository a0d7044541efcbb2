use serde_json::Value;

use crate::request::RequestError;

use super::Document;

/// Key attribute used when a collection is created without a schema.
pub const DEFAULT_KEY_ATTRIBUTE: &str = "id";

/// Names of the attributes that make up a table's primary key.
///
/// One name is a simple key, two names are a partition key followed by a
/// sort key. The order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    names: Vec<String>,
}

impl KeySchema {
    /// Creates a schema from an ordered list of attribute names.
    ///
    /// Fails when the list is empty, has more than two names, repeats a name,
    /// or contains an empty name.
    pub fn new<I, S>(names: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(RequestError::EmptyKeySchema);
        }
        if names.len() > 2 {
            return Err(RequestError::TooManyKeyAttributes(names.len()));
        }
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(RequestError::EmptyAttributeName);
            }
            if names[..i].contains(name) {
                return Err(RequestError::DuplicateKeyAttribute(name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// Simple primary key.
    pub fn simple(name: impl Into<String>) -> Result<Self, RequestError> {
        Self::new([name.into()])
    }

    /// Partition key plus sort key.
    pub fn composite(
        partition: impl Into<String>,
        sort: impl Into<String>,
    ) -> Result<Self, RequestError> {
        Self::new([partition.into(), sort.into()])
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn partition_key(&self) -> &str {
        &self.names[0]
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.names.get(1).map(String::as_str)
    }

    pub fn is_composite(&self) -> bool {
        self.names.len() > 1
    }

    /// Returns true if `name` is one of the key attributes.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl Default for KeySchema {
    fn default() -> Self {
        Self {
            names: vec![DEFAULT_KEY_ATTRIBUTE.to_string()],
        }
    }
}

/// Value identifying one record, or a partition when querying.
///
/// A scalar binds the partition key and is only accepted by simple schemas
/// (and by queries). Attributes name each key attribute explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValue {
    Scalar(Value),
    Attributes(Document),
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<i32> for KeyValue {
    fn from(value: i32) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<u64> for KeyValue {
    fn from(value: u64) -> Self {
        Self::Scalar(Value::from(value))
    }
}

impl From<Document> for KeyValue {
    fn from(value: Document) -> Self {
        Self::Attributes(value)
    }
}

impl From<Value> for KeyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Attributes(map.into_iter().collect()),
            other => Self::Scalar(other),
        }
    }
}

impl<const N: usize> From<[(&str, Value); N]> for KeyValue {
    fn from(pairs: [(&str, Value); N]) -> Self {
        Self::Attributes(
            pairs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_schema_is_id() {
        let schema = KeySchema::default();
        assert_eq!(schema.names(), ["id"]);
        assert_eq!(schema.partition_key(), "id");
        assert_eq!(schema.sort_key(), None);
        assert!(!schema.is_composite());
    }

    #[test]
    fn test_composite_schema_keeps_order() {
        let schema = KeySchema::composite("userId", "createdAt").unwrap();
        assert_eq!(schema.partition_key(), "userId");
        assert_eq!(schema.sort_key(), Some("createdAt"));
        assert!(schema.is_composite());
        assert!(schema.contains("createdAt"));
        assert!(!schema.contains("title"));
    }

    #[test]
    fn test_schema_rejects_invalid_names() {
        assert_eq!(
            KeySchema::new(Vec::<String>::new()),
            Err(RequestError::EmptyKeySchema)
        );
        assert_eq!(
            KeySchema::composite("pk", "pk"),
            Err(RequestError::DuplicateKeyAttribute("pk".to_string()))
        );
        assert_eq!(KeySchema::simple(""), Err(RequestError::EmptyAttributeName));
        assert_eq!(
            KeySchema::new(["a", "b", "c"]),
            Err(RequestError::TooManyKeyAttributes(3))
        );
    }

    #[test]
    fn test_key_value_from_json() {
        assert_eq!(
            KeyValue::from(json!("abc")),
            KeyValue::Scalar(json!("abc"))
        );

        let KeyValue::Attributes(attrs) = KeyValue::from(json!({"pk": "a", "sk": 1})) else {
            panic!("expected attributes");
        };
        assert_eq!(attrs.get("pk"), Some(&json!("a")));
        assert_eq!(attrs.get("sk"), Some(&json!(1)));
    }

    #[test]
    fn test_key_value_from_pairs() {
        let key = KeyValue::from([("pk", json!("a")), ("sk", json!("b"))]);
        let KeyValue::Attributes(attrs) = key else {
            panic!("expected attributes");
        };
        assert_eq!(attrs.len(), 2);
    }
}
