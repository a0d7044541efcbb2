use thiserror::Error;

/// Errors raised while building request parameters.
///
/// These are detected locally; no request is sent when one occurs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("table name must not be empty")]
    EmptyTableName,
    #[error("key schema must name at least one attribute")]
    EmptyKeySchema,
    #[error("key schema supports a partition and a sort key, got {0} attributes")]
    TooManyKeyAttributes(usize),
    #[error("key attribute '{0}' is listed more than once")]
    DuplicateKeyAttribute(String),
    #[error("attribute names must not be empty")]
    EmptyAttributeName,
    #[error("missing key attribute '{0}'")]
    MissingKeyAttribute(String),
    #[error("'{0}' is not a key attribute")]
    UnexpectedKeyAttribute(String),
    #[error("a scalar key cannot address the composite key ({partition}, {sort})")]
    ScalarKeyForCompositeSchema { partition: String, sort: String },
    #[error("invalid value for key attribute '{name}': {reason}")]
    InvalidKeyValue { name: String, reason: String },
    #[error("projection must name at least one attribute")]
    EmptyProjection,
    #[error("payload must be a JSON object")]
    PayloadNotAnObject,
    #[error("nothing to update in table '{table}'")]
    NothingToUpdate { table: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_attribute_display() {
        let error = RequestError::MissingKeyAttribute("createdAt".to_string());
        assert_eq!(error.to_string(), "missing key attribute 'createdAt'");
    }

    #[test]
    fn test_scalar_key_display() {
        let error = RequestError::ScalarKeyForCompositeSchema {
            partition: "userId".to_string(),
            sort: "createdAt".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "a scalar key cannot address the composite key (userId, createdAt)"
        );
    }

    #[test]
    fn test_invalid_key_value_display() {
        let error = RequestError::InvalidKeyValue {
            name: "id".to_string(),
            reason: "expected a string or a number, got a boolean".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid value for key attribute 'id': expected a string or a number, got a boolean"
        );
    }
}
