//! In-memory store implementation.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Number, Value};
use tokio::sync::RwLock;

use docstore_core::document::{Document, KeySchema};
use docstore_core::request::{
    AttributeNames, AttributeValues, DeleteParams, GetParams, PutParams, QueryParams,
    UpdateParams,
};
use docstore_core::storage::{DocumentStore, Operation, Result, StoreError, StoreErrorKind};

/// Key values of one item, in schema order, as canonical key parts.
type ItemKey = Vec<String>;

#[derive(Debug)]
struct Table {
    key_schema: KeySchema,
    items: HashMap<ItemKey, Document>,
}

impl Table {
    fn new(key_schema: KeySchema) -> Self {
        Self {
            key_schema,
            items: HashMap::new(),
        }
    }
}

/// In-memory document store for testing.
///
/// Tables must be registered with [`InMemoryStore::create_table`] before
/// use. Clones share the same data, which is lost when the last clone is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    /// Creates a new store with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table, dropping any existing table of the same name.
    pub async fn create_table(&self, name: impl Into<String>, key_schema: KeySchema) {
        let mut tables = self.tables.write().await;
        tables.insert(name.into(), Table::new(key_schema));
    }

    /// Number of items stored in `table`, or `None` for an unknown table.
    pub async fn item_count(&self, table: &str) -> Option<usize> {
        let tables = self.tables.read().await;
        tables.get(table).map(|t| t.items.len())
    }
}

fn rejected(
    operation: Operation,
    table: &str,
    kind: StoreErrorKind,
    message: impl Into<String>,
) -> StoreError {
    StoreError::Rejected {
        operation,
        table: table.to_string(),
        kind,
        message: message.into(),
    }
}

fn validation(operation: Operation, table: &str, message: impl Into<String>) -> StoreError {
    rejected(operation, table, StoreErrorKind::Validation, message)
}

fn table_not_found(operation: Operation, table: &str) -> StoreError {
    rejected(
        operation,
        table,
        StoreErrorKind::ResourceNotFound,
        "table does not exist",
    )
}

/// Extracts the item key, requiring every schema attribute and nothing else
/// when `exact` is set.
fn item_key(
    operation: Operation,
    table: &str,
    key_schema: &KeySchema,
    attributes: &Document,
    exact: bool,
) -> Result<ItemKey> {
    if exact && attributes.len() != key_schema.names().len() {
        return Err(validation(
            operation,
            table,
            "the provided key does not match the key schema",
        ));
    }

    key_schema
        .names()
        .iter()
        .map(|name| match attributes.get(name) {
            Some(value) => key_part(value).ok_or_else(|| {
                validation(
                    operation,
                    table,
                    format!("key attribute '{name}' must be a string or a number"),
                )
            }),
            None => Err(validation(
                operation,
                table,
                format!("missing key attribute '{name}'"),
            )),
        })
        .collect()
}

/// Identity of a key scalar. Numbers are compared by value, so `1` and
/// `1.0` name the same item. `None` for values that cannot be keys.
fn key_part(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(format!("S:{s}")),
        Value::Number(n) => Some(format!("N:{}", canonical_number(n))),
        _ => None,
    }
}

fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // Integral floats within the exact range of an f64 collapse to integers.
        Some(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
            (f as i64).to_string()
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn resolve_name<'a>(
    operation: Operation,
    table: &str,
    names: &'a AttributeNames,
    placeholder: &str,
) -> Result<&'a String> {
    names.get(placeholder).ok_or_else(|| {
        validation(
            operation,
            table,
            format!("undefined attribute name placeholder '{placeholder}'"),
        )
    })
}

fn resolve_value<'a>(
    operation: Operation,
    table: &str,
    values: Option<&'a AttributeValues>,
    placeholder: &str,
) -> Result<&'a Value> {
    values
        .and_then(|values| values.get(placeholder))
        .ok_or_else(|| {
            validation(
                operation,
                table,
                format!("undefined attribute value placeholder '{placeholder}'"),
            )
        })
}

/// Numbers compare numerically, strings lexically.
fn compare_key_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            }
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, params: GetParams) -> Result<Option<Document>> {
        let table_name = params.table_name.as_str();
        let tables = self.tables.read().await;
        let table = tables
            .get(table_name)
            .ok_or_else(|| table_not_found(Operation::Get, table_name))?;

        let key = item_key(Operation::Get, table_name, &table.key_schema, &params.key, true)?;
        let Some(item) = table.items.get(&key) else {
            return Ok(None);
        };

        let Some(projection) = &params.projection_expression else {
            return Ok(Some(item.clone()));
        };

        let names = params.expression_attribute_names.unwrap_or_default();
        let mut projected = Document::new();
        for placeholder in projection.names() {
            let attribute = resolve_name(Operation::Get, table_name, &names, placeholder)?;
            if let Some(value) = item.get(attribute) {
                projected.insert(attribute.clone(), value.clone());
            }
        }
        Ok(Some(projected))
    }

    async fn put(&self, params: PutParams) -> Result<()> {
        let table_name = params.table_name.as_str();
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| table_not_found(Operation::Put, table_name))?;

        let key = item_key(
            Operation::Put,
            table_name,
            &table.key_schema,
            &params.item,
            false,
        )?;
        table.items.insert(key, params.item);
        Ok(())
    }

    async fn update(&self, params: UpdateParams) -> Result<()> {
        let table_name = params.table_name.as_str();
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| table_not_found(Operation::Update, table_name))?;

        let key = item_key(
            Operation::Update,
            table_name,
            &table.key_schema,
            &params.key,
            true,
        )?;

        let names = &params.expression_attribute_names;
        let values = params.expression_attribute_values.as_ref();
        let expression = &params.update_expression;

        // Resolve everything before touching the item so a bad request
        // leaves it unchanged.
        let mut assignments = Vec::with_capacity(expression.assignments().len());
        for binding in expression.assignments() {
            let attribute = resolve_name(Operation::Update, table_name, names, &binding.name)?;
            let value = resolve_value(Operation::Update, table_name, values, &binding.value)?;
            assignments.push((attribute, value));
        }
        let mut removals = Vec::with_capacity(expression.removals().len());
        for placeholder in expression.removals() {
            removals.push(resolve_name(Operation::Update, table_name, names, placeholder)?);
        }

        if let Some(attribute) = assignments
            .iter()
            .map(|(attribute, _)| *attribute)
            .chain(removals.iter().copied())
            .find(|attribute| table.key_schema.contains(attribute))
        {
            return Err(validation(
                Operation::Update,
                table_name,
                format!("cannot update key attribute '{attribute}'"),
            ));
        }

        let item = table
            .items
            .entry(key)
            .or_insert_with(|| params.key.clone());
        for (attribute, value) in assignments {
            item.insert(attribute.clone(), value.clone());
        }
        for attribute in removals {
            item.remove(attribute);
        }
        Ok(())
    }

    async fn delete(&self, params: DeleteParams) -> Result<()> {
        let table_name = params.table_name.as_str();
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| table_not_found(Operation::Delete, table_name))?;

        let key = item_key(
            Operation::Delete,
            table_name,
            &table.key_schema,
            &params.key,
            true,
        )?;
        table.items.remove(&key);
        Ok(())
    }

    async fn query(&self, params: QueryParams) -> Result<Vec<Document>> {
        let table_name = params.table_name.as_str();
        let tables = self.tables.read().await;
        let table = tables
            .get(table_name)
            .ok_or_else(|| table_not_found(Operation::Query, table_name))?;

        let mut conditions = Vec::new();
        for clause in params.key_condition_expression.clauses() {
            let attribute = resolve_name(
                Operation::Query,
                table_name,
                &params.expression_attribute_names,
                &clause.name,
            )?;
            if !table.key_schema.contains(attribute) {
                return Err(validation(
                    Operation::Query,
                    table_name,
                    format!("'{attribute}' is not a key attribute"),
                ));
            }
            let value = resolve_value(
                Operation::Query,
                table_name,
                Some(&params.expression_attribute_values),
                &clause.value,
            )?;
            let part = key_part(value).ok_or_else(|| {
                validation(
                    Operation::Query,
                    table_name,
                    format!("key attribute '{attribute}' must be a string or a number"),
                )
            })?;
            conditions.push((attribute, part));
        }

        let partition_key = table.key_schema.partition_key();
        if !conditions
            .iter()
            .any(|(attribute, _)| attribute.as_str() == partition_key)
        {
            return Err(validation(
                Operation::Query,
                table_name,
                format!("query condition must include the partition key '{partition_key}'"),
            ));
        }

        let mut matches: Vec<Document> = table
            .items
            .values()
            .filter(|item| {
                conditions.iter().all(|(attribute, part)| {
                    item.get(attribute.as_str()).and_then(key_part).as_ref() == Some(part)
                })
            })
            .cloned()
            .collect();

        if let Some(sort_key) = table.key_schema.sort_key() {
            matches.sort_by(|a, b| compare_key_values(a.get(sort_key), b.get(sort_key)));
        }

        Ok(matches)
    }
}
