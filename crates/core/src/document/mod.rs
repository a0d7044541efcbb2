mod key;
mod payload;
mod projection;

pub use key::{KeySchema, KeyValue, DEFAULT_KEY_ATTRIBUTE};
pub use payload::{Field, Payload};
pub use projection::Projection;

use std::collections::BTreeMap;

use serde_json::Value;

/// A stored or fetched item: attribute name to JSON value.
pub type Document = BTreeMap<String, Value>;
