//! Route definitions and request body types for the Runik backend.

use std::collections::HashMap;

use serde::Serialize;

// ============================================================================
// Routes
// ============================================================================

/// GET (public account listing) and POST (sign-up).
pub(crate) const USERS: &str = "/users";

/// POST (sign-in) and GET (session listing).
pub(crate) const SESSIONS: &str = "/users/sessions";

/// DELETE (revoke every session). The backend requires the trailing slash.
pub(crate) const SESSIONS_ALL: &str = "/users/sessions/";

/// GET (fetch own account) and DELETE (delete own account).
pub(crate) const ME: &str = "/users/me";

/// PUT (email and password updates share this route on the backend).
pub(crate) const ME_EMAIL: &str = "/users/me/email";

/// PUT (replace avatar) and DELETE (remove avatar).
pub(crate) const ME_AVATAR: &str = "/users/me/avatar";

/// POST (create project) and GET (list projects).
pub(crate) const PROJECTS: &str = "/projects";

/// PATCH (partial content update).
pub(crate) const PROJECT_FILES: &str = "/projects/files";

/// PUT route for email verification tokens.
pub(crate) fn verify(token: &str) -> String {
    format!("/users/verify/{token}")
}

/// DELETE route for revoking one session; the token travels in the path.
pub(crate) fn session(token: &str) -> String {
    format!("/users/sessions/{token}")
}

/// GET route for a single project.
pub(crate) fn project(id: &str) -> String {
    format!("/projects/{id}")
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for sign-up.
#[derive(Debug, Serialize)]
pub(crate) struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    /// Verification callback URL mailed to the new account.
    pub url: &'a str,
}

/// Request body for sign-in.
#[derive(Debug, Serialize)]
pub(crate) struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    /// Request a token subject to the backend's expiry policy.
    pub expire: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<&'a str>,
}

/// Request body for operations that confirm with the account password.
#[derive(Debug, Serialize)]
pub(crate) struct PasswordRequest<'a> {
    pub password: &'a str,
}

/// Request body for email updates.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateEmailRequest<'a> {
    pub email: &'a str,
    /// Verification callback URL for the new address.
    pub url: &'a str,
}

/// Request body for password updates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

/// Request body for avatar updates.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateAvatarRequest<'a> {
    /// Base64-encoded image.
    pub avatar: &'a str,
}

/// Request body for project creation.
#[derive(Debug, Serialize)]
pub(crate) struct CreateProjectRequest<'a> {
    pub name: &'a str,
}

/// Request body for partial project content updates.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateContentRequest<'a> {
    pub id: &'a str,
    /// Files to create or overwrite, keyed by path.
    pub files: &'a HashMap<String, String>,
    /// Paths to remove.
    pub delete: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_omits_absent_ip() {
        let body = SignInRequest {
            email: "a@example.com",
            password: "pw",
            expire: false,
            ip: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("ip").is_none());
        assert_eq!(json["expire"], false);
    }

    #[test]
    fn update_password_uses_camel_case() {
        let body = UpdatePasswordRequest {
            old_password: "old",
            new_password: "new",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["oldPassword"], "old");
        assert_eq!(json["newPassword"], "new");
    }

    #[test]
    fn path_builders() {
        assert_eq!(verify("tok"), "/users/verify/tok");
        assert_eq!(session("tok"), "/users/sessions/tok");
        assert_eq!(project("p1"), "/projects/p1");
    }
}
