//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between `AttributeValue` maps and JSON
//! documents. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine;
use docstore_core::document::Document;
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// A DynamoDB item as the SDK represents it.
pub type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unsupported attribute type")]
    UnsupportedType,
}

// ============================================================================
// JSON to DynamoDB
// ============================================================================

/// Convert a JSON value to an attribute value.
pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(value_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_attribute(v)))
                .collect(),
        ),
    }
}

/// Convert a document to a DynamoDB item.
pub fn document_to_item(document: &Document) -> Item {
    document
        .iter()
        .map(|(k, v)| (k.clone(), value_to_attribute(v)))
        .collect()
}

// ============================================================================
// DynamoDB to JSON
// ============================================================================

/// Convert an attribute value to a JSON value.
///
/// Sets become arrays and binary values become base64 strings.
pub fn attribute_to_value(attribute: &AttributeValue) -> Result<Value, ConversionError> {
    let value = match attribute {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(b) => Value::String(encode_blob(b)),
        AttributeValue::L(list) => Value::Array(
            list.iter()
                .map(attribute_to_value)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), attribute_to_value(v)?)))
                .collect::<Result<Map<_, _>, ConversionError>>()?,
        ),
        AttributeValue::Ss(ss) => Value::Array(ss.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(ns) => Value::Array(
            ns.iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Bs(bs) => Value::Array(
            bs.iter()
                .map(|b| Value::String(encode_blob(b)))
                .collect(),
        ),
        _ => return Err(ConversionError::UnsupportedType),
    };
    Ok(value)
}

/// Convert a DynamoDB item to a document.
pub fn item_to_document(item: &Item) -> Result<Document, ConversionError> {
    item.iter()
        .map(|(k, v)| Ok((k.clone(), attribute_to_value(v)?)))
        .collect()
}

// ============================================================================
// Helpers
// ============================================================================

/// Integers stay integers; anything else must fit an `f64`.
fn parse_number(n: &str) -> Result<Number, ConversionError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Number::from(u));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| ConversionError::InvalidNumber(n.to_string()))
}

fn encode_blob(blob: &Blob) -> String {
    base64::engine::general_purpose::STANDARD.encode(blob.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Document {
        let value = json!({
            "id": "u1",
            "age": 37,
            "score": 9.5,
            "active": true,
            "nickname": null,
            "tags": ["a", "b"],
            "address": {"city": "Montevideo", "zip": 11000}
        });
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_value_to_attribute_scalars() {
        assert_eq!(
            value_to_attribute(&json!("x")),
            AttributeValue::S("x".to_string())
        );
        assert_eq!(
            value_to_attribute(&json!(42)),
            AttributeValue::N("42".to_string())
        );
        assert_eq!(
            value_to_attribute(&json!(-1.5)),
            AttributeValue::N("-1.5".to_string())
        );
        assert_eq!(value_to_attribute(&json!(false)), AttributeValue::Bool(false));
        assert_eq!(value_to_attribute(&Value::Null), AttributeValue::Null(true));
    }

    #[test]
    fn test_document_to_item_nests_lists_and_maps() {
        let item = document_to_item(&sample_document());

        assert_eq!(item.get("id").unwrap().as_s().unwrap(), "u1");
        assert_eq!(item.get("age").unwrap().as_n().unwrap(), "37");
        assert!(item.get("nickname").unwrap().is_null());

        let tags = item.get("tags").unwrap().as_l().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].as_s().unwrap(), "a");

        let address = item.get("address").unwrap().as_m().unwrap();
        assert_eq!(address.get("city").unwrap().as_s().unwrap(), "Montevideo");
        assert_eq!(address.get("zip").unwrap().as_n().unwrap(), "11000");
    }

    #[test]
    fn test_item_to_document_restores_document() {
        let document = sample_document();
        let parsed = item_to_document(&document_to_item(&document)).unwrap();

        assert_eq!(parsed, document);
    }

    #[test]
    fn test_numbers_keep_their_kind() {
        assert_eq!(
            attribute_to_value(&AttributeValue::N("7".to_string())).unwrap(),
            json!(7)
        );
        assert_eq!(
            attribute_to_value(&AttributeValue::N("18446744073709551615".to_string())).unwrap(),
            json!(u64::MAX)
        );
        assert_eq!(
            attribute_to_value(&AttributeValue::N("0.25".to_string())).unwrap(),
            json!(0.25)
        );
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        for n in ["abc", "1e999", ""] {
            assert_eq!(
                attribute_to_value(&AttributeValue::N(n.to_string())),
                Err(ConversionError::InvalidNumber(n.to_string()))
            );
        }
    }

    #[test]
    fn test_sets_become_arrays() {
        let strings = AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(attribute_to_value(&strings).unwrap(), json!(["a", "b"]));

        let numbers = AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string()]);
        assert_eq!(attribute_to_value(&numbers).unwrap(), json!([1, 2.5]));
    }

    #[test]
    fn test_binary_becomes_base64() {
        let blob = AttributeValue::B(Blob::new(b"hello".to_vec()));
        assert_eq!(attribute_to_value(&blob).unwrap(), json!("aGVsbG8="));

        let blobs = AttributeValue::Bs(vec![Blob::new(vec![0u8, 1, 2])]);
        assert_eq!(attribute_to_value(&blobs).unwrap(), json!(["AAEC"]));
    }

    #[test]
    fn test_invalid_nested_number_fails_the_item() {
        let mut item = Item::new();
        item.insert(
            "nested".to_string(),
            AttributeValue::M(HashMap::from([(
                "n".to_string(),
                AttributeValue::N("not-a-number".to_string()),
            )])),
        );

        assert_eq!(
            item_to_document(&item),
            Err(ConversionError::InvalidNumber("not-a-number".to_string()))
        );
    }
}
