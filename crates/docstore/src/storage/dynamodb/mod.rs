//! DynamoDB storage backend implementation.
//!
//! Sends the parameters built by `docstore_core::request` through the
//! `aws-sdk-dynamodb` fluent builders.

mod conversions;
mod error;
mod store;

pub use conversions::{
    attribute_to_value, document_to_item, item_to_document, value_to_attribute, ConversionError,
    Item,
};
pub use error::map_sdk_error;
pub use store::DynamoDbStore;
