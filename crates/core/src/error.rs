use thiserror::Error;

use crate::request::RequestError;
use crate::storage::StoreError;

/// Errors returned by collection operations.
///
/// Request errors are raised locally before anything is sent; store errors
/// come back from the document store untouched.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, Error>;
