//! Root resource: account, session, and project administration.
//!
//! [`Users`] owns the integration API key and exposes the key-authenticated
//! operations plus two namespaces whose operations take a session token per
//! call: [`SelfService`] and [`Projects`]. A multi-tenant caller holds one
//! `Users` and threads many concurrent user tokens through the namespaces.

mod projects;
mod self_service;

pub use projects::Projects;
pub use self_service::SelfService;

use std::fmt;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::Error;
use crate::http::{self, HttpClient, SignInRequest, SignUpRequest};
use crate::types::{Account, CreatedAccount, Endpoint};
use crate::user::User;

/// The root resource for a Runik backend.
///
/// Constructed from a validated [`Config`]; the endpoint and API key are
/// fixed for the lifetime of the instance. Safe for concurrent use.
///
/// # Example
///
/// ```no_run
/// use runik::{Config, Users};
///
/// # async fn example() -> Result<(), runik::Error> {
/// let users = Users::new(
///     &Config::new()
///         .set_endpoint("https://identity.example.com")
///         .set_key("service-api-key"),
/// )?;
/// let accounts = users.list().await?;
/// println!("{} accounts", accounts.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Users {
    http: HttpClient,
    key: String,
    me: SelfService,
    projects: Projects,
}

impl Users {
    /// Validate a configuration and construct the root resource.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` listing every issue found if the
    /// endpoint is absent or not a well-formed URL, or the key is absent
    /// or empty. No network I/O is performed.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut issues = Vec::new();

        let endpoint = match config.endpoint() {
            None => {
                issues.push("endpoint is required".to_string());
                None
            }
            Some(raw) => match Endpoint::new(raw) {
                Ok(endpoint) => Some(endpoint),
                Err(e) => {
                    issues.push(e.to_string());
                    None
                }
            },
        };

        let key = match config.key() {
            None => {
                issues.push("key is required".to_string());
                None
            }
            Some("") => {
                issues.push("key must be a non-empty string".to_string());
                None
            }
            Some(key) => Some(key.to_string()),
        };

        let (Some(endpoint), Some(key)) = (endpoint, key) else {
            return Err(Error::InvalidConfiguration { issues });
        };

        let http = HttpClient::new(endpoint);
        Ok(Self {
            me: SelfService::new(http.clone()),
            projects: Projects::new(http.clone()),
            http,
            key,
        })
    }

    /// Returns the endpoint this resource is bound to.
    pub fn endpoint(&self) -> &Endpoint {
        self.http.endpoint()
    }

    /// Self-service operations, parameterized by a caller-supplied session
    /// token.
    pub fn me(&self) -> &SelfService {
        &self.me
    }

    /// Project repository administration, parameterized by a
    /// caller-supplied session token.
    pub fn projects(&self) -> &Projects {
        &self.projects
    }

    /// List every account on the backend. Unauthenticated.
    #[instrument(skip(self), fields(endpoint = %self.http.endpoint()))]
    pub async fn list(&self) -> Result<Vec<Account>, Error> {
        debug!("listing accounts");
        self.http.query(http::USERS, None).await
    }

    /// Create an account.
    ///
    /// `verification_url` is the callback the backend mails to the new
    /// address. Authenticated with the API key.
    ///
    /// # Errors
    ///
    /// `BackendRejected` if the response carries a backend error code
    /// (even under a 2xx status); `UnexpectedResponse` if the body lacks
    /// an `id`.
    #[instrument(skip(self, password), fields(endpoint = %self.http.endpoint()))]
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        verification_url: &str,
    ) -> Result<CreatedAccount, Error> {
        info!(email, "signing up");

        let body = SignUpRequest {
            email,
            password,
            url: verification_url,
        };
        let json = self
            .http
            .inspect(Method::POST, http::USERS, Some(&self.key), &body)
            .await?;

        match json.get("id").and_then(Value::as_str) {
            Some(id) => Ok(CreatedAccount { id: id.to_string() }),
            None => Err(Error::UnexpectedResponse { body: json }),
        }
    }

    /// Authenticate an account and return a session-bound [`User`].
    ///
    /// With `expire` set the backend applies its token expiry policy; this
    /// client does not track expiry either way. `ip` optionally records the
    /// client address against the session.
    #[instrument(skip(self, password), fields(endpoint = %self.http.endpoint()))]
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        expire: bool,
        ip: Option<&str>,
    ) -> Result<User, Error> {
        info!(email, "signing in");

        let body = SignInRequest {
            email,
            password,
            expire,
            ip,
        };
        let json = self
            .http
            .inspect(Method::POST, http::SESSIONS, Some(&self.key), &body)
            .await?;

        match json.get("token").and_then(Value::as_str) {
            Some(token) => Ok(User::new(token, self.http.endpoint().clone())),
            None => Err(Error::UnexpectedResponse { body: json }),
        }
    }

    /// Confirm an email address from a verification token. Unauthenticated.
    #[instrument(skip(self, token), fields(endpoint = %self.http.endpoint()))]
    pub async fn verify_email(&self, token: &str) -> Result<(), Error> {
        debug!("verifying email");
        self.http
            .expect_status::<()>(
                Method::PUT,
                &http::verify(token),
                None,
                None,
                &[StatusCode::NO_CONTENT],
            )
            .await
    }
}

// Hide the API key in Debug output
impl fmt::Debug for Users {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Users")
            .field("endpoint", &self.http.endpoint().as_str())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_endpoint_and_key() {
        let err = Users::new(&Config::new()).unwrap_err();
        match err {
            Error::InvalidConfiguration { issues } => {
                assert_eq!(issues.len(), 2);
                assert!(issues[0].contains("endpoint"));
                assert!(issues[1].contains("key"));
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_endpoint() {
        let config = Config::new().set_endpoint("not a url").set_key("k");
        let err = Users::new(&config).unwrap_err();
        match err {
            Error::InvalidConfiguration { issues } => {
                assert_eq!(issues.len(), 1);
                assert!(issues[0].contains("not a url"));
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_key() {
        let config = Config::new()
            .set_endpoint("https://identity.example.com")
            .set_key("");
        assert!(matches!(
            Users::new(&config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn constructs_from_valid_config() {
        let config = Config::new()
            .set_endpoint("https://identity.example.com")
            .set_key("service-api-key");
        let users = Users::new(&config).unwrap();
        assert_eq!(users.endpoint().as_str(), "https://identity.example.com/");
    }

    #[test]
    fn hides_key_in_debug() {
        let config = Config::new()
            .set_endpoint("https://identity.example.com")
            .set_key("service-api-key");
        let users = Users::new(&config).unwrap();
        let debug = format!("{users:?}");
        assert!(!debug.contains("service-api-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
