//! DynamoDB store implementation.
//!
//! Implements `DocumentStore` from `docstore_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::Client;

use docstore_core::document::Document;
use docstore_core::request::{DeleteParams, GetParams, PutParams, QueryParams, UpdateParams};
use docstore_core::storage::{DocumentStore, Operation, Result, StoreError};

use super::conversions::{document_to_item, item_to_document, value_to_attribute, Item};
use super::error::map_sdk_error;
use crate::config::{ClientConfig, ConfigError, DEFAULT_REGION};

/// DynamoDB-backed document store.
///
/// Every call is a single SDK request. Retries and timeouts are whatever the
/// SDK client was configured with.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a new store from client configuration.
    ///
    /// Uses the AWS SDK default credential chain. Without a configured
    /// region the SDK provider chain is tried before `us-east-1`.
    pub async fn from_config(config: &ClientConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let region_provider = RegionProviderChain::first_try(config.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(DEFAULT_REGION);

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let mut dynamo_config = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(url) = &config.endpoint_url {
            dynamo_config = dynamo_config.endpoint_url(url);
        }

        tracing::debug!(
            region = ?sdk_config.region(),
            endpoint_url = ?config.endpoint_url,
            api_version = %config.api_version,
            "DynamoDB client configured"
        );

        Ok(Self::new(Client::from_conf(dynamo_config.build())))
    }

    /// Get the underlying SDK client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn to_document(table: &str, item: &Item) -> Result<Document> {
    item_to_document(item).map_err(|e| StoreError::InvalidItem {
        table: table.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl DocumentStore for DynamoDbStore {
    async fn get(&self, params: GetParams) -> Result<Option<Document>> {
        let result = self
            .client
            .get_item()
            .table_name(&params.table_name)
            .set_key(Some(document_to_item(&params.key)))
            .set_projection_expression(params.projection_expression.map(|e| e.to_string()))
            .set_expression_attribute_names(
                params
                    .expression_attribute_names
                    .map(|names| names.into_iter().collect()),
            )
            .send()
            .await
            .map_err(|e| map_sdk_error(Operation::Get, &params.table_name, e))?;

        match result.item {
            Some(item) => Ok(Some(to_document(&params.table_name, &item)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, params: PutParams) -> Result<()> {
        self.client
            .put_item()
            .table_name(&params.table_name)
            .set_item(Some(document_to_item(&params.item)))
            .send()
            .await
            .map_err(|e| map_sdk_error(Operation::Put, &params.table_name, e))?;

        Ok(())
    }

    async fn update(&self, params: UpdateParams) -> Result<()> {
        self.client
            .update_item()
            .table_name(&params.table_name)
            .set_key(Some(document_to_item(&params.key)))
            .update_expression(params.update_expression.to_string())
            .set_expression_attribute_names(Some(
                params.expression_attribute_names.into_iter().collect(),
            ))
            .set_expression_attribute_values(params.expression_attribute_values.map(|values| {
                values
                    .iter()
                    .map(|(placeholder, value)| (placeholder.clone(), value_to_attribute(value)))
                    .collect()
            }))
            .send()
            .await
            .map_err(|e| map_sdk_error(Operation::Update, &params.table_name, e))?;

        Ok(())
    }

    async fn delete(&self, params: DeleteParams) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&params.table_name)
            .set_key(Some(document_to_item(&params.key)))
            .send()
            .await
            .map_err(|e| map_sdk_error(Operation::Delete, &params.table_name, e))?;

        Ok(())
    }

    async fn query(&self, params: QueryParams) -> Result<Vec<Document>> {
        let values: Item = params
            .expression_attribute_values
            .iter()
            .map(|(placeholder, value)| (placeholder.clone(), value_to_attribute(value)))
            .collect();

        let result = self
            .client
            .query()
            .table_name(&params.table_name)
            .key_condition_expression(params.key_condition_expression.to_string())
            .set_expression_attribute_names(Some(
                params.expression_attribute_names.into_iter().collect(),
            ))
            .set_expression_attribute_values(Some(values))
            .send()
            .await
            .map_err(|e| map_sdk_error(Operation::Query, &params.table_name, e))?;

        if result.last_evaluated_key.is_some() {
            tracing::warn!(
                table = %params.table_name,
                "Query returned a partial page, remaining results were not fetched"
            );
        }

        let items = result.items.unwrap_or_default();
        items
            .iter()
            .map(|item| to_document(&params.table_name, item))
            .collect()
    }
}
