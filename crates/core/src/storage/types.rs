use std::fmt;

/// Item-level operation sent to a document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Put,
    Update,
    Delete,
    Query,
}

impl Operation {
    /// Store-native operation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GetItem",
            Self::Put => "PutItem",
            Self::Update => "UpdateItem",
            Self::Delete => "DeleteItem",
            Self::Query => "Query",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a store failure.
///
/// Only a hint for callers; the original failure stays available as the
/// error source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    ResourceNotFound,
    ConditionalCheckFailed,
    Throttling,
    Validation,
    AccessDenied,
    Connection,
    Other,
}

impl StoreErrorKind {
    /// Classifies a service error code such as `ValidationException`.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("ResourceNotFoundException") => Self::ResourceNotFound,
            Some("ConditionalCheckFailedException") => Self::ConditionalCheckFailed,
            Some(
                "ProvisionedThroughputExceededException"
                | "ThrottlingException"
                | "RequestLimitExceeded",
            ) => Self::Throttling,
            Some("ValidationException" | "ItemCollectionSizeLimitExceededException") => {
                Self::Validation
            }
            Some(
                "AccessDeniedException"
                | "UnrecognizedClientException"
                | "InvalidSignatureException"
                | "ExpiredTokenException",
            ) => Self::AccessDenied,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceNotFound => "resource not found",
            Self::ConditionalCheckFailed => "conditional check failed",
            Self::Throttling => "throttling",
            Self::Validation => "validation",
            Self::AccessDenied => "access denied",
            Self::Connection => "connection",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
