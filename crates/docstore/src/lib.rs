//! Per-table document helpers over a key-value document store.
//!
//! A [`DocumentClient`] hands out [`Collection`]s, one per table. Each
//! collection operation validates its input locally with the builders from
//! `docstore_core`, then sends exactly one request to the underlying
//! [`DocumentStore`].
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): [`storage::dynamodb::DynamoDbStore`] using `aws-sdk-dynamodb`
//! - `inmemory` (default): [`storage::inmemory::InMemoryStore`] for tests and local work
//!
//! # Example
//!
//! ```rust,ignore
//! use docstore::{ClientConfig, DocumentClient, Payload};
//!
//! let client = DocumentClient::connect(&ClientConfig::from_env()).await?;
//! let users = client.collection("users");
//!
//! users.put(Payload::new().set("id", "u1").set("name", "Ada")).await?;
//! let user = users.get("u1").await?;
//! ```

pub mod client;
pub mod collection;
pub mod config;
pub mod storage;

pub use client::DocumentClient;
pub use collection::Collection;
pub use config::{ClientConfig, ConfigError};

pub use docstore_core::document::{
    Document, Field, KeySchema, KeyValue, Payload, Projection, DEFAULT_KEY_ATTRIBUTE,
};
pub use docstore_core::request::RequestError;
pub use docstore_core::storage::{DocumentStore, Operation, StoreError, StoreErrorKind};
pub use docstore_core::{Error, Result};
