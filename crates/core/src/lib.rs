//! Pure building blocks for docstore.
//!
//! Everything in this crate is free of I/O: key schemas, payloads, the
//! request builders that turn them into store-native parameters, and the
//! [`storage::DocumentStore`] trait that the imperative shell implements.

pub mod document;
pub mod request;
pub mod storage;

mod error;

pub use error::{Error, Result};
