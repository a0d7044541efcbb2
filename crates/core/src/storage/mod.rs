mod error;
mod traits;
mod types;

pub use error::{BoxError, Result, StoreError};
pub use traits::DocumentStore;
pub use types::{Operation, StoreErrorKind};
