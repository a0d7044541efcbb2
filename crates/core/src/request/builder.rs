//! Pure functions that turn keys and payloads into request parameters.
//!
//! Placeholders are derived from attribute names (`#name`, `:name`) with no
//! further escaping, so attribute names must already be valid in the store's
//! expression grammar. Key attributes are told apart from data attributes
//! purely by membership in the [`KeySchema`].

use serde_json::Value;

use crate::document::{Document, Field, KeySchema, KeyValue, Payload, Projection};

use super::error::RequestError;
use super::expression::{
    name_placeholder, value_placeholder, KeyCondition, ProjectionExpression, UpdateExpression,
};
use super::params::{
    AttributeNames, AttributeValues, DeleteParams, GetParams, PutParams, QueryParams,
    UpdateParams,
};

/// Builds the parameters to read one document.
///
/// With a projection, only the listed attributes are requested, each through
/// a name placeholder.
pub fn build_get(
    table: &str,
    key_schema: &KeySchema,
    key_value: KeyValue,
    projection: Option<&Projection>,
) -> Result<GetParams, RequestError> {
    let mut params = GetParams {
        table_name: table_name(table)?,
        key: resolve_key(key_schema, key_value)?,
        projection_expression: None,
        expression_attribute_names: None,
    };

    if let Some(projection) = projection {
        if projection.is_empty() {
            return Err(RequestError::EmptyProjection);
        }

        let mut expression = ProjectionExpression::default();
        let mut names = AttributeNames::new();
        for attribute in projection.attributes() {
            check_attribute_name(attribute)?;
            expression.push(attribute);
            names.insert(name_placeholder(attribute), attribute.clone());
        }

        params.projection_expression = Some(expression);
        params.expression_attribute_names = Some(names);
    }

    Ok(params)
}

/// Builds the parameters to query by key equality.
///
/// The partition key is required. On a composite schema the sort key may be
/// left out to match the whole partition. A scalar key binds the partition
/// key.
pub fn build_query(
    table: &str,
    key_schema: &KeySchema,
    key_value: KeyValue,
) -> Result<QueryParams, RequestError> {
    let table_name = table_name(table)?;
    let bound = resolve_key_condition(key_schema, key_value)?;

    let mut condition = KeyCondition::default();
    let mut names = AttributeNames::new();
    let mut values = AttributeValues::new();
    for (attribute, value) in bound {
        condition.push(&attribute);
        values.insert(value_placeholder(&attribute), value);
        names.insert(name_placeholder(&attribute), attribute);
    }

    Ok(QueryParams {
        table_name,
        key_condition_expression: condition,
        expression_attribute_names: names,
        expression_attribute_values: values,
    })
}

/// Builds the parameters to write a whole document.
///
/// Key attributes are written along with everything else. `Undefined`
/// attributes are skipped and `Null` attributes are written as null.
pub fn build_put(
    table: &str,
    key_schema: &KeySchema,
    data: &Payload,
) -> Result<PutParams, RequestError> {
    let table_name = table_name(table)?;
    key_from_payload(key_schema, data)?;

    let mut item = Document::new();
    for (attribute, field) in data.iter() {
        check_attribute_name(attribute)?;
        if let Some(value) = field.stored_value() {
            item.insert(attribute.clone(), value);
        }
    }

    Ok(PutParams { table_name, item })
}

/// Builds the parameters to update the listed attributes of one document.
///
/// Non-key attributes holding a value are assigned with `SET`; `Null` and
/// `Undefined` attributes are dropped with `REMOVE`. Attributes are replaced
/// wholesale, nested values are not merged.
///
/// Returns [`RequestError::NothingToUpdate`] when the payload only holds key
/// attributes.
pub fn build_update(
    table: &str,
    key_schema: &KeySchema,
    data: &Payload,
) -> Result<UpdateParams, RequestError> {
    let table_name = table_name(table)?;
    let key = key_from_payload(key_schema, data)?;

    let mut expression = UpdateExpression::default();
    let mut names = AttributeNames::new();
    let mut values = AttributeValues::new();
    for (attribute, field) in data.iter().filter(|(name, _)| !key_schema.contains(name)) {
        check_attribute_name(attribute)?;
        names.insert(name_placeholder(attribute), attribute.clone());
        match field.assigned_value() {
            Some(value) => {
                expression.assign(attribute);
                values.insert(value_placeholder(attribute), value.clone());
            }
            None => expression.remove(attribute),
        }
    }

    if expression.is_empty() {
        return Err(RequestError::NothingToUpdate { table: table_name });
    }

    Ok(UpdateParams {
        table_name,
        key,
        update_expression: expression,
        expression_attribute_names: names,
        expression_attribute_values: (!values.is_empty()).then_some(values),
    })
}

/// Builds the parameters to delete one document.
pub fn build_delete(
    table: &str,
    key_schema: &KeySchema,
    key_value: KeyValue,
) -> Result<DeleteParams, RequestError> {
    Ok(DeleteParams {
        table_name: table_name(table)?,
        key: resolve_key(key_schema, key_value)?,
    })
}

fn table_name(table: &str) -> Result<String, RequestError> {
    if table.is_empty() {
        return Err(RequestError::EmptyTableName);
    }
    Ok(table.to_string())
}

fn check_attribute_name(name: &str) -> Result<(), RequestError> {
    if name.is_empty() {
        return Err(RequestError::EmptyAttributeName);
    }
    Ok(())
}

/// Key attributes must be non-empty strings or numbers.
fn check_key_scalar(name: &str, value: &Value) -> Result<(), RequestError> {
    let found = match value {
        Value::String(s) if s.is_empty() => "an empty string",
        Value::String(_) | Value::Number(_) => return Ok(()),
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    Err(RequestError::InvalidKeyValue {
        name: name.to_string(),
        reason: format!("expected a string or a number, got {found}"),
    })
}

fn reject_unexpected(key_schema: &KeySchema, attributes: &Document) -> Result<(), RequestError> {
    match attributes.keys().find(|name| !key_schema.contains(name)) {
        Some(name) => Err(RequestError::UnexpectedKeyAttribute(name.clone())),
        None => Ok(()),
    }
}

/// Full key map for a single record.
fn resolve_key(key_schema: &KeySchema, key_value: KeyValue) -> Result<Document, RequestError> {
    match key_value {
        KeyValue::Scalar(value) => {
            if let Some(sort) = key_schema.sort_key() {
                return Err(RequestError::ScalarKeyForCompositeSchema {
                    partition: key_schema.partition_key().to_string(),
                    sort: sort.to_string(),
                });
            }
            let name = key_schema.partition_key();
            check_key_scalar(name, &value)?;
            Ok(Document::from([(name.to_string(), value)]))
        }
        KeyValue::Attributes(mut attributes) => {
            reject_unexpected(key_schema, &attributes)?;
            let mut key = Document::new();
            for name in key_schema.names() {
                let value = attributes
                    .remove(name)
                    .ok_or_else(|| RequestError::MissingKeyAttribute(name.clone()))?;
                check_key_scalar(name, &value)?;
                key.insert(name.clone(), value);
            }
            Ok(key)
        }
    }
}

/// Key attributes bound by a query, partition key first.
fn resolve_key_condition(
    key_schema: &KeySchema,
    key_value: KeyValue,
) -> Result<Vec<(String, Value)>, RequestError> {
    let mut attributes = match key_value {
        KeyValue::Scalar(value) => {
            Document::from([(key_schema.partition_key().to_string(), value)])
        }
        KeyValue::Attributes(attributes) => {
            reject_unexpected(key_schema, &attributes)?;
            attributes
        }
    };

    let mut bound = Vec::with_capacity(key_schema.names().len());
    for name in key_schema.names() {
        match attributes.remove(name) {
            Some(value) => {
                check_key_scalar(name, &value)?;
                bound.push((name.clone(), value));
            }
            None if name == key_schema.partition_key() => {
                return Err(RequestError::MissingKeyAttribute(name.clone()));
            }
            None => {}
        }
    }

    Ok(bound)
}

/// Key map taken from a write payload. Every key attribute must be present.
fn key_from_payload(key_schema: &KeySchema, data: &Payload) -> Result<Document, RequestError> {
    let mut key = Document::new();
    for name in key_schema.names() {
        let value = data
            .get(name)
            .and_then(Field::stored_value)
            .ok_or_else(|| RequestError::MissingKeyAttribute(name.clone()))?;
        check_key_scalar(name, &value)?;
        key.insert(name.clone(), value);
    }
    Ok(key)
}
