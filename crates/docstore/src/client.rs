use std::sync::Arc;

use docstore_core::document::KeySchema;
use docstore_core::storage::DocumentStore;

use crate::collection::Collection;

#[cfg(feature = "dynamodb")]
use crate::config::{ClientConfig, ConfigError};
#[cfg(feature = "dynamodb")]
use crate::storage::dynamodb::DynamoDbStore;

/// Entry point handing out per-table [`Collection`]s over one store.
#[derive(Debug)]
pub struct DocumentClient<S> {
    store: Arc<S>,
}

impl<S> Clone for DocumentClient<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore> DocumentClient<S> {
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Collection over `table` keyed by the default `id` attribute.
    pub fn collection(&self, table: impl Into<String>) -> Collection<S> {
        self.collection_with_key(table, KeySchema::default())
    }

    /// Collection over `table` with an explicit key schema.
    pub fn collection_with_key(
        &self,
        table: impl Into<String>,
        key_schema: KeySchema,
    ) -> Collection<S> {
        Collection::new(Arc::clone(&self.store), table.into(), key_schema)
    }
}

#[cfg(feature = "dynamodb")]
impl DocumentClient<DynamoDbStore> {
    /// Builds a DynamoDB-backed client.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ConfigError> {
        let store = DynamoDbStore::from_config(config).await?;
        Ok(Self::new(store))
    }

    /// Builds a DynamoDB-backed client from environment configuration.
    pub async fn from_env() -> Result<Self, ConfigError> {
        Self::connect(&ClientConfig::from_env()).await
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use crate::storage::inmemory::InMemoryStore;

    #[test]
    fn test_collection_uses_default_key() {
        let client = DocumentClient::new(InMemoryStore::new());
        let users = client.collection("users");

        assert_eq!(users.table_name(), "users");
        assert_eq!(users.key_schema().names(), ["id".to_string()]);
    }

    #[test]
    fn test_collection_with_key() {
        let client = DocumentClient::new(InMemoryStore::new());
        let posts = client.collection_with_key(
            "posts",
            KeySchema::composite("userId", "createdAt").unwrap(),
        );

        assert_eq!(posts.key_schema().partition_key(), "userId");
        assert_eq!(posts.key_schema().sort_key(), Some("createdAt"));
    }

    #[tokio::test]
    async fn test_collections_share_the_store() {
        let client = DocumentClient::new(InMemoryStore::new());
        client
            .store()
            .create_table("users", KeySchema::default())
            .await;

        let other = client.clone();
        assert!(Arc::ptr_eq(&client.store, &other.store));
        assert_eq!(other.store().item_count("users").await, Some(0));
    }
}
