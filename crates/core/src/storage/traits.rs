use async_trait::async_trait;

use crate::document::Document;
use crate::request::{DeleteParams, GetParams, PutParams, QueryParams, UpdateParams};

use super::Result;

/// Item-level API of a document store.
///
/// Each method is one request/response exchange. Implementations do not
/// retry and do not translate failures beyond wrapping them in
/// [`StoreError`](super::StoreError).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads one document. A missing item is `Ok(None)`.
    async fn get(&self, params: GetParams) -> Result<Option<Document>>;

    /// Writes a whole document, replacing any document with the same key.
    async fn put(&self, params: PutParams) -> Result<()>;

    /// Applies an update expression to one document.
    async fn update(&self, params: UpdateParams) -> Result<()>;

    /// Deletes one document. Deleting a missing item succeeds.
    async fn delete(&self, params: DeleteParams) -> Result<()>;

    /// Returns the first page of documents matching the key condition.
    async fn query(&self, params: QueryParams) -> Result<Vec<Document>>;
}
