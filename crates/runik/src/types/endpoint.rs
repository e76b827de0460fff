//! Backend endpoint type.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated backend endpoint URL.
///
/// This type ensures the endpoint is an absolute http(s) URL with a host,
/// normalized so route paths can be appended without double slashes.
///
/// # Example
///
/// ```
/// use runik::Endpoint;
///
/// let endpoint = Endpoint::new("https://identity.example.com").unwrap();
/// assert_eq!(endpoint.route("/users/me"),
///            "https://identity.example.com/users/me");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint(Url);

impl Endpoint {
    /// Create a new endpoint from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not an absolute http(s) URL.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::Endpoint {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for a route path (leading slash expected).
    pub fn route(&self, path: &str) -> String {
        // The url crate keeps a trailing slash on root paths; trim it so
        // route paths join cleanly.
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}{}", base, path)
    }

    /// Returns the endpoint as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let endpoint = Endpoint::new("https://identity.example.com").unwrap();
        assert_eq!(endpoint.host(), Some("identity.example.com"));
    }

    #[test]
    fn valid_http_url() {
        let endpoint = Endpoint::new("http://localhost:8080").unwrap();
        assert_eq!(endpoint.host(), Some("localhost"));
    }

    #[test]
    fn route_construction() {
        let endpoint = Endpoint::new("https://identity.example.com").unwrap();
        assert_eq!(
            endpoint.route("/users/sessions"),
            "https://identity.example.com/users/sessions"
        );
    }

    #[test]
    fn route_handles_trailing_slash() {
        let endpoint = Endpoint::new("https://identity.example.com/").unwrap();
        assert_eq!(
            endpoint.route("/users"),
            "https://identity.example.com/users"
        );
    }

    #[test]
    fn trailing_slash_in_route_is_preserved() {
        let endpoint = Endpoint::new("https://identity.example.com").unwrap();
        assert_eq!(
            endpoint.route("/users/sessions/"),
            "https://identity.example.com/users/sessions/"
        );
    }

    #[test]
    fn invalid_scheme() {
        assert!(Endpoint::new("ftp://identity.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(Endpoint::new("/users").is_err());
    }

    #[test]
    fn invalid_garbage() {
        assert!(Endpoint::new("not a url").is_err());
    }
}
