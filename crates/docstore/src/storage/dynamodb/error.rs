//! DynamoDB error mapping.
//!
//! Wraps AWS SDK errors in `StoreError` from `docstore_core::storage`
//! without rewriting them. The service error code only picks the
//! [`StoreErrorKind`].

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use docstore_core::storage::{Operation, StoreError, StoreErrorKind};

/// Map any operation's SDK error to `StoreError::Sdk`.
pub fn map_sdk_error<E, R>(operation: Operation, table: &str, err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    let kind = match &err {
        SdkError::ServiceError(service_err) => StoreErrorKind::from_code(service_err.err().code()),
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) | SdkError::ResponseError(_) => {
            StoreErrorKind::Connection
        }
        _ => StoreErrorKind::Other,
    };

    StoreError::Sdk {
        operation,
        table: table.to_string(),
        kind,
        source: Box::new(err),
    }
}
