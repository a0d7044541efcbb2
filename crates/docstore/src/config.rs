use std::env;

use thiserror::Error;

/// The only API version the DynamoDB client speaks.
pub const DEFAULT_API_VERSION: &str = "2012-08-10";

/// Region used when neither the configuration nor the SDK provides one.
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported API version '{0}', expected '{DEFAULT_API_VERSION}'")]
    UnsupportedApiVersion(String),
    #[error("region must not be empty")]
    EmptyRegion,
}

/// Client configuration.
///
/// Read once when the client is built and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// AWS region. `None` defers to the SDK provider chain, then `us-east-1`.
    pub region: Option<String>,
    /// Store API version (default: "2012-08-10")
    pub api_version: String,
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
}

impl ClientConfig {
    /// Configuration for an explicit region and API version.
    pub fn new(region: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            api_version: api_version.into(),
            endpoint_url: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_REGION` - AWS region (default: SDK provider chain, then "us-east-1")
    /// - `DOCSTORE_API_VERSION` - Store API version (default: "2012-08-10")
    /// - `AWS_ENDPOINT_URL` - Endpoint override for local DynamoDB (default: none)
    pub fn from_env() -> Self {
        Self {
            region: env::var("AWS_REGION").ok().filter(|v| !v.is_empty()),
            api_version: env::var("DOCSTORE_API_VERSION")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_version != DEFAULT_API_VERSION {
            return Err(ConfigError::UnsupportedApiVersion(self.api_version.clone()));
        }
        if matches!(self.region.as_deref(), Some("")) {
            return Err(ConfigError::EmptyRegion);
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
