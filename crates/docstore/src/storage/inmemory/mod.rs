//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the `DocumentStore`
//! trait that keeps every table in a HashMap wrapped in `Arc<RwLock<_>>`.
//! It evaluates the same expressions the DynamoDB backend sends, which makes
//! it useful for testing without a running DynamoDB.
//!
//! # Example
//!
//! ```rust,ignore
//! use docstore::storage::inmemory::InMemoryStore;
//! use docstore::{DocumentClient, KeySchema};
//!
//! let store = InMemoryStore::new();
//! store.create_table("users", KeySchema::default()).await;
//! let client = DocumentClient::new(store);
//! ```

mod store;

pub use store::InMemoryStore;
