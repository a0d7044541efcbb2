//! Store-native request parameters.
//!
//! Field names serialize to the store's documented parameter names
//! (`TableName`, `Key`, `ExpressionAttributeNames`, ...). Optional fields are
//! left out when absent.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::document::Document;

use super::expression::{KeyCondition, ProjectionExpression, UpdateExpression};

/// Name placeholder to attribute name.
pub type AttributeNames = BTreeMap<String, String>;

/// Value placeholder to attribute value.
pub type AttributeValues = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetParams {
    pub table_name: String,
    pub key: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<ProjectionExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_names: Option<AttributeNames>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryParams {
    pub table_name: String,
    pub key_condition_expression: KeyCondition,
    pub expression_attribute_names: AttributeNames,
    pub expression_attribute_values: AttributeValues,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutParams {
    pub table_name: String,
    pub item: Document,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateParams {
    pub table_name: String,
    pub key: Document,
    pub update_expression: UpdateExpression,
    pub expression_attribute_names: AttributeNames,
    /// Absent when the update only removes attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_attribute_values: Option<AttributeValues>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteParams {
    pub table_name: String,
    pub key: Document,
}
