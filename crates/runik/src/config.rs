//! Client configuration builder.

use std::fmt;

/// Configuration for constructing a [`Users`](crate::Users) resource.
///
/// A `Config` is a plain value builder: both fields are optional and
/// unvalidated so it can be assembled incrementally. Validation happens at
/// [`Users::new`](crate::Users::new), never here.
///
/// # Example
///
/// ```
/// use runik::Config;
///
/// let config = Config::new()
///     .set_endpoint("https://identity.example.com")
///     .set_key("service-api-key");
/// assert_eq!(config.endpoint(), Some("https://identity.example.com"));
/// ```
#[derive(Clone, Default)]
pub struct Config {
    endpoint: Option<String>,
    key: Option<String>,
}

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend endpoint URL. Last write wins.
    pub fn set_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the integration API key. Last write wins.
    pub fn set_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Returns the configured endpoint, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Returns the configured API key, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

// Hide the API key in Debug output
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
