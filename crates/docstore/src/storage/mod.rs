//! Storage backend implementations.
//!
//! This module provides concrete implementations of the
//! [`DocumentStore`](docstore_core::storage::DocumentStore) trait defined in
//! `docstore_core::storage`. Backends are selected at compile time via
//! feature flags and can be enabled together.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//! - `inmemory` (default): in-memory backend for tests
//!
//! # Examples
//!
//! Build with DynamoDB only:
//! ```bash
//! cargo build -p docstore --no-default-features --features dynamodb
//! ```

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryStore;
