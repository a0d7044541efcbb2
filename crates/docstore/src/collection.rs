use std::sync::Arc;

use docstore_core::document::{Document, KeySchema, KeyValue, Payload, Projection};
use docstore_core::request::{build_delete, build_get, build_put, build_query, build_update};
use docstore_core::storage::{DocumentStore, Operation};
use docstore_core::Result;

/// Document helpers bound to one table and its key schema.
///
/// Every method validates its input locally and then sends exactly one
/// request to the store. Local validation failures are
/// [`Error::Request`](docstore_core::Error::Request) and nothing is sent;
/// store failures come back as [`Error::Store`](docstore_core::Error::Store).
#[derive(Debug)]
pub struct Collection<S> {
    store: Arc<S>,
    table: String,
    key_schema: KeySchema,
}

impl<S> Clone for Collection<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            table: self.table.clone(),
            key_schema: self.key_schema.clone(),
        }
    }
}

impl<S: DocumentStore> Collection<S> {
    pub(crate) fn new(store: Arc<S>, table: String, key_schema: KeySchema) -> Self {
        Self {
            store,
            table,
            key_schema,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn key_schema(&self) -> &KeySchema {
        &self.key_schema
    }

    /// Reads the whole document stored under `key`.
    pub async fn get(&self, key: impl Into<KeyValue>) -> Result<Option<Document>> {
        self.fetch(key.into(), None).await
    }

    /// Reads only the `projection` attributes of the document under `key`.
    pub async fn get_projected(
        &self,
        key: impl Into<KeyValue>,
        projection: impl Into<Projection>,
    ) -> Result<Option<Document>> {
        self.fetch(key.into(), Some(&projection.into())).await
    }

    async fn fetch(
        &self,
        key: KeyValue,
        projection: Option<&Projection>,
    ) -> Result<Option<Document>> {
        let params = build_get(&self.table, &self.key_schema, key, projection)?;
        tracing::debug!(
            table = %self.table,
            operation = %Operation::Get,
            projected = params.projection_expression.is_some(),
            "Sending request"
        );

        let document = self.store.get(params).await?;
        if document.is_none() {
            tracing::debug!(table = %self.table, "Document not found");
        }
        Ok(document)
    }

    /// Writes `data` as a whole document, replacing any existing one.
    pub async fn put(&self, data: impl Into<Payload>) -> Result<()> {
        let params = build_put(&self.table, &self.key_schema, &data.into())?;
        tracing::debug!(
            table = %self.table,
            operation = %Operation::Put,
            attributes = params.item.len(),
            "Sending request"
        );

        self.store.put(params).await?;
        Ok(())
    }

    /// Sets every non-key attribute of `data` that holds a value and removes
    /// the ones that are null or undefined.
    ///
    /// `data` must carry the full key. A payload with nothing but key
    /// attributes is rejected with
    /// [`RequestError::NothingToUpdate`](docstore_core::request::RequestError::NothingToUpdate).
    pub async fn update(&self, data: impl Into<Payload>) -> Result<()> {
        let params = build_update(&self.table, &self.key_schema, &data.into())?;
        tracing::trace!(
            table = %self.table,
            names = params.expression_attribute_names.len(),
            values = params.expression_attribute_values.as_ref().map_or(0, |v| v.len()),
            "Update placeholders"
        );
        tracing::debug!(
            table = %self.table,
            operation = %Operation::Update,
            expression = %params.update_expression,
            "Sending request"
        );

        self.store.update(params).await?;
        Ok(())
    }

    /// Deletes the document under `key`. Deleting a missing document succeeds.
    pub async fn delete(&self, key: impl Into<KeyValue>) -> Result<()> {
        let params = build_delete(&self.table, &self.key_schema, key.into())?;
        tracing::debug!(
            table = %self.table,
            operation = %Operation::Delete,
            "Sending request"
        );

        self.store.delete(params).await?;
        Ok(())
    }

    /// Returns the documents whose key attributes equal `key`.
    ///
    /// Only the first page the store returns is read. Results past the
    /// store's page size limit are silently dropped (a warning is logged by
    /// the DynamoDB backend). No continuation token is returned, so callers
    /// that need every page must page through the store directly.
    pub async fn query(&self, key: impl Into<KeyValue>) -> Result<Vec<Document>> {
        let params = build_query(&self.table, &self.key_schema, key.into())?;
        tracing::debug!(
            table = %self.table,
            operation = %Operation::Query,
            condition = %params.key_condition_expression,
            "Sending request"
        );

        let documents = self.store.query(params).await?;
        tracing::debug!(table = %self.table, count = documents.len(), "Query completed");
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use docstore_core::request::{
        DeleteParams, GetParams, PutParams, QueryParams, RequestError, UpdateParams,
    };
    use docstore_core::storage::{Result as StoreResult, StoreError, StoreErrorKind};
    use docstore_core::Error;
    use serde_json::json;

    /// Records every request it receives and answers with nothing.
    #[derive(Debug, Default)]
    struct RecordingStore {
        requests: Mutex<Vec<Operation>>,
        updates: Mutex<Vec<UpdateParams>>,
        reject: bool,
    }

    impl RecordingStore {
        fn record(&self, operation: Operation, table: &str) -> StoreResult<()> {
            self.requests.lock().unwrap().push(operation);
            if self.reject {
                return Err(StoreError::Rejected {
                    operation,
                    table: table.to_string(),
                    kind: StoreErrorKind::Throttling,
                    message: "slow down".to_string(),
                });
            }
            Ok(())
        }

        fn requests(&self) -> Vec<Operation> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentStore for RecordingStore {
        async fn get(&self, params: GetParams) -> StoreResult<Option<Document>> {
            self.record(Operation::Get, &params.table_name)?;
            Ok(None)
        }

        async fn put(&self, params: PutParams) -> StoreResult<()> {
            self.record(Operation::Put, &params.table_name)
        }

        async fn update(&self, params: UpdateParams) -> StoreResult<()> {
            self.record(Operation::Update, &params.table_name)?;
            self.updates.lock().unwrap().push(params);
            Ok(())
        }

        async fn delete(&self, params: DeleteParams) -> StoreResult<()> {
            self.record(Operation::Delete, &params.table_name)
        }

        async fn query(&self, params: QueryParams) -> StoreResult<Vec<Document>> {
            self.record(Operation::Query, &params.table_name)?;
            Ok(Vec::new())
        }
    }

    fn collection(store: RecordingStore, key_schema: KeySchema) -> Collection<RecordingStore> {
        Collection::new(Arc::new(store), "posts".to_string(), key_schema)
    }

    #[tokio::test]
    async fn test_each_operation_sends_one_request() {
        let posts = collection(RecordingStore::default(), KeySchema::default());

        posts.get("p1").await.unwrap();
        posts.get_projected("p1", ["title"]).await.unwrap();
        posts.put(Payload::new().set("id", "p1")).await.unwrap();
        posts
            .update(Payload::new().set("id", "p1").set("title", "x"))
            .await
            .unwrap();
        posts.delete("p1").await.unwrap();
        posts.query("p1").await.unwrap();

        assert_eq!(
            posts.store.requests(),
            vec![
                Operation::Get,
                Operation::Get,
                Operation::Put,
                Operation::Update,
                Operation::Delete,
                Operation::Query,
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_update_sends_nothing() {
        let posts = collection(RecordingStore::default(), KeySchema::default());

        let err = posts
            .update(Payload::new().set("id", "p1"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Request(RequestError::NothingToUpdate { ref table }) if table == "posts"
        ));
        assert!(posts.store.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        let schema = KeySchema::composite("userId", "createdAt").unwrap();
        let posts = collection(RecordingStore::default(), schema);

        let err = posts.delete("u1").await.unwrap_err();

        assert!(matches!(err, Error::Request(_)));
        assert!(posts.store.requests().is_empty());
    }

    #[tokio::test]
    async fn test_update_never_sends_key_names() {
        let schema = KeySchema::composite("userId", "createdAt").unwrap();
        let posts = collection(RecordingStore::default(), schema);

        posts
            .update(
                Payload::new()
                    .set("userId", "u1")
                    .set("createdAt", 1)
                    .set("title", "x")
                    .unset("draft"),
            )
            .await
            .unwrap();

        let updates = posts.store.updates.lock().unwrap();
        let params = &updates[0];
        let key: Document =
            serde_json::from_value(json!({"userId": "u1", "createdAt": 1})).unwrap();
        assert_eq!(params.key, key);
        assert_eq!(
            params.update_expression.to_string(),
            "SET #title = :title REMOVE #draft"
        );
        assert!(!params.expression_attribute_names.contains_key("#userId"));
        assert!(!params.expression_attribute_names.contains_key("#createdAt"));
        assert!(!params
            .expression_attribute_values
            .as_ref()
            .unwrap()
            .contains_key(":draft"));
    }

    #[tokio::test]
    async fn test_store_errors_pass_through() {
        let store = RecordingStore {
            reject: true,
            ..Default::default()
        };
        let posts = collection(store, KeySchema::default());

        let err = posts.get("p1").await.unwrap_err();

        match err {
            Error::Store(store_err) => assert_eq!(store_err.kind(), StoreErrorKind::Throttling),
            other => panic!("expected a store error, got {other:?}"),
        }
    }

    #[cfg(feature = "inmemory")]
    mod inmemory {
        use super::*;
        use crate::storage::inmemory::InMemoryStore;
        use crate::DocumentClient;

        async fn client() -> DocumentClient<InMemoryStore> {
            let store = InMemoryStore::new();
            store.create_table("users", KeySchema::default()).await;
            store
                .create_table(
                    "posts",
                    KeySchema::composite("userId", "createdAt").unwrap(),
                )
                .await;
            DocumentClient::new(store)
        }

        fn doc(value: serde_json::Value) -> Document {
            serde_json::from_value(value).unwrap()
        }

        #[tokio::test]
        async fn test_put_get_update_delete() {
            let client = client().await;
            let users = client.collection("users");

            users
                .put(doc(json!({"id": "u1", "name": "Ada", "email": "ada@example.com"})))
                .await
                .unwrap();
            assert_eq!(
                users.get("u1").await.unwrap(),
                Some(doc(json!({"id": "u1", "name": "Ada", "email": "ada@example.com"})))
            );

            users
                .update(Payload::new().set("id", "u1").set("name", "Ada L.").null("email"))
                .await
                .unwrap();
            assert_eq!(
                users.get_projected("u1", ["name", "email"]).await.unwrap(),
                Some(doc(json!({"name": "Ada L."})))
            );

            users.delete("u1").await.unwrap();
            users.delete("u1").await.unwrap();
            assert_eq!(users.get("u1").await.unwrap(), None);
        }

        #[tokio::test]
        async fn test_query_partition() {
            let client = client().await;
            let posts = client.collection_with_key(
                "posts",
                KeySchema::composite("userId", "createdAt").unwrap(),
            );

            for (user, created_at) in [("u1", 2), ("u1", 1), ("u2", 3)] {
                posts
                    .put(Payload::new().set("userId", user).set("createdAt", created_at))
                    .await
                    .unwrap();
            }

            let found = posts.query("u1").await.unwrap();
            assert_eq!(
                found,
                vec![
                    doc(json!({"userId": "u1", "createdAt": 1})),
                    doc(json!({"userId": "u1", "createdAt": 2})),
                ]
            );
        }

        #[tokio::test]
        async fn test_unknown_table_is_a_store_error() {
            let client = client().await;
            let missing = client.collection("missing");

            let err = missing.get("x").await.unwrap_err();
            assert!(matches!(
                err,
                Error::Store(ref e) if e.kind() == StoreErrorKind::ResourceNotFound
            ));
        }
    }
}
