//! User self-service operations with the session token passed per call.

use base64::Engine as _;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{Error, InvalidInputError};
use crate::http::{
    self, HttpClient, PasswordRequest, UpdateAvatarRequest, UpdateEmailRequest,
    UpdatePasswordRequest,
};
use crate::types::Account;

/// Self-service operations for an authenticated user.
///
/// Every operation takes the session token explicitly, so one instance can
/// serve many concurrent user sessions. [`User`](crate::User) offers the
/// same operations with the token bound once.
#[derive(Debug, Clone)]
pub struct SelfService {
    http: HttpClient,
}

impl SelfService {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fetch the account the session belongs to.
    #[instrument(skip(self, session), fields(endpoint = %self.http.endpoint()))]
    pub async fn get(&self, session: &str) -> Result<Account, Error> {
        debug!("fetching own account");
        self.http.query(http::ME, Some(session)).await
    }

    /// Delete the account. Requires the account password.
    #[instrument(skip(self, password, session), fields(endpoint = %self.http.endpoint()))]
    pub async fn delete(&self, password: &str, session: &str) -> Result<(), Error> {
        debug!("deleting own account");
        let body = PasswordRequest { password };
        self.http
            .expect_status(
                Method::DELETE,
                http::ME,
                Some(session),
                Some(&body),
                &[StatusCode::NO_CONTENT],
            )
            .await
    }

    /// Revoke the session itself. The token travels in the path; no
    /// Authorization header is sent.
    #[instrument(skip(self, session), fields(endpoint = %self.http.endpoint()))]
    pub async fn sign_out(&self, session: &str) -> Result<(), Error> {
        debug!("signing out");
        self.http
            .expect_status::<()>(
                Method::DELETE,
                &http::session(session),
                None,
                None,
                &[StatusCode::OK],
            )
            .await
    }

    /// List the account's active session tokens.
    ///
    /// # Errors
    ///
    /// `UnexpectedResponse` if the body is not an array of strings; partial
    /// data is never returned.
    #[instrument(skip(self, session), fields(endpoint = %self.http.endpoint()))]
    pub async fn get_sessions(&self, session: &str) -> Result<Vec<String>, Error> {
        debug!("listing sessions");
        let json: Value = self.http.query(http::SESSIONS, Some(session)).await?;
        session_list(json)
    }

    /// Revoke every session for the account. Requires the password.
    #[instrument(skip(self, password, session), fields(endpoint = %self.http.endpoint()))]
    pub async fn delete_sessions(&self, password: &str, session: &str) -> Result<(), Error> {
        debug!("revoking all sessions");
        let body = PasswordRequest { password };
        self.http
            .expect_status(
                Method::DELETE,
                http::SESSIONS_ALL,
                Some(session),
                Some(&body),
                &[StatusCode::OK],
            )
            .await
    }

    /// Change the account email. `url` is the verification callback for
    /// the new address.
    #[instrument(skip(self, session), fields(endpoint = %self.http.endpoint()))]
    pub async fn update_email(&self, email: &str, url: &str, session: &str) -> Result<(), Error> {
        debug!(email, "updating email");
        let body = UpdateEmailRequest { email, url };
        self.http
            .expect_status(
                Method::PUT,
                http::ME_EMAIL,
                Some(session),
                Some(&body),
                &[StatusCode::NO_CONTENT],
            )
            .await
    }

    /// Change the account password.
    ///
    /// The backend serves password updates on the email route.
    #[instrument(skip_all, fields(endpoint = %self.http.endpoint()))]
    pub async fn update_password(
        &self,
        old_password: &str,
        new_password: &str,
        session: &str,
    ) -> Result<(), Error> {
        debug!("updating password");
        let body = UpdatePasswordRequest {
            old_password,
            new_password,
        };
        self.http
            .expect_status(
                Method::PUT,
                http::ME_EMAIL,
                Some(session),
                Some(&body),
                &[StatusCode::NO_CONTENT],
            )
            .await
    }

    /// Replace the account avatar with a base64-encoded image.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `image` is not valid base64; no request is issued.
    #[instrument(skip(self, image, session), fields(endpoint = %self.http.endpoint()))]
    pub async fn update_avatar(&self, image: &str, session: &str) -> Result<(), Error> {
        validate_base64(image)?;
        debug!("updating avatar");
        let body = UpdateAvatarRequest { avatar: image };
        self.http
            .expect_status(
                Method::PUT,
                http::ME_AVATAR,
                Some(session),
                Some(&body),
                &[StatusCode::NO_CONTENT],
            )
            .await
    }

    /// Remove the account avatar.
    #[instrument(skip(self, session), fields(endpoint = %self.http.endpoint()))]
    pub async fn delete_avatar(&self, session: &str) -> Result<(), Error> {
        debug!("deleting avatar");
        self.http
            .expect_status::<()>(
                Method::DELETE,
                http::ME_AVATAR,
                Some(session),
                None,
                &[StatusCode::NO_CONTENT],
            )
            .await
    }
}

/// Validate the sessions listing shape: an array of strings, nothing else.
fn session_list(json: Value) -> Result<Vec<String>, Error> {
    let Some(items) = json.as_array() else {
        return Err(Error::UnexpectedResponse { body: json });
    };

    let mut sessions = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(token) => sessions.push(token.to_string()),
            None => {
                return Err(Error::UnexpectedResponse { body: json.clone() });
            }
        }
    }
    Ok(sessions)
}

fn validate_base64(image: &str) -> Result<(), Error> {
    base64::engine::general_purpose::STANDARD
        .decode(image)
        .map(|_| ())
        .map_err(|e| {
            InvalidInputError::Avatar {
                reason: e.to_string(),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_list_accepts_string_array() {
        let sessions = session_list(json!(["tok-a", "tok-b"])).unwrap();
        assert_eq!(sessions, vec!["tok-a".to_string(), "tok-b".to_string()]);
    }

    #[test]
    fn session_list_accepts_empty_array() {
        assert!(session_list(json!([])).unwrap().is_empty());
    }

    #[test]
    fn session_list_rejects_non_array() {
        let err = session_list(json!({"sessions": []})).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { .. }));
    }

    #[test]
    fn session_list_rejects_non_string_element() {
        let err = session_list(json!(["tok-a", 42])).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { .. }));
    }

    #[test]
    fn base64_validation() {
        assert!(validate_base64("aGVsbG8=").is_ok());
        let err = validate_base64("not base64 !!!").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Avatar { .. })
        ));
    }
}
