//! Session-bound user handle.

use std::collections::HashMap;

use crate::error::Error;
use crate::http::HttpClient;
use crate::types::{Account, CreatedProject, Endpoint, Project, SessionToken};
use crate::users::{Projects, SelfService};

/// An authenticated user handle with the session token bound once.
///
/// `User` is a convenience facade over the same backend routes as
/// [`Users::me`](crate::Users::me): the token is captured at construction
/// so call sites do not repeat it. Obtained from
/// [`Users::sign_in`](crate::Users::sign_in), or constructed directly from
/// a stored token.
///
/// A `User` holds no reference back to the [`Users`](crate::Users) that
/// created it.
///
/// # Example
///
/// ```no_run
/// use runik::{Endpoint, User};
///
/// # async fn example() -> Result<(), runik::Error> {
/// let endpoint = Endpoint::new("https://identity.example.com")?;
/// let user = User::new("stored-session-token", endpoint);
/// let account = user.get().await?;
/// println!("{}", account.email);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct User {
    session: SessionToken,
    ops: SelfService,
    projects: Projects,
}

impl User {
    /// Bind a session token to an endpoint.
    ///
    /// The token is trusted opaque and not validated; validity is
    /// discovered only by a failed call.
    pub fn new(session: impl Into<String>, endpoint: Endpoint) -> Self {
        let http = HttpClient::new(endpoint);
        Self {
            session: SessionToken::new(session),
            ops: SelfService::new(http.clone()),
            projects: Projects::new(http),
        }
    }

    /// Returns the session token.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It grants access to the account.
    pub fn session(&self) -> &str {
        self.session.as_str()
    }

    /// Returns the endpoint this handle is bound to.
    pub fn endpoint(&self) -> &Endpoint {
        self.ops.http().endpoint()
    }

    /// Fetch the account this session belongs to.
    pub async fn get(&self) -> Result<Account, Error> {
        self.ops.get(self.session.as_str()).await
    }

    /// Delete the account. Requires the account password.
    pub async fn delete(&self, password: &str) -> Result<(), Error> {
        self.ops.delete(password, self.session.as_str()).await
    }

    /// Revoke this session.
    pub async fn sign_out(&self) -> Result<(), Error> {
        self.ops.sign_out(self.session.as_str()).await
    }

    /// List the account's active session tokens.
    pub async fn get_sessions(&self) -> Result<Vec<String>, Error> {
        self.ops.get_sessions(self.session.as_str()).await
    }

    /// Revoke every session for the account. Requires the password.
    pub async fn delete_sessions(&self, password: &str) -> Result<(), Error> {
        self.ops
            .delete_sessions(password, self.session.as_str())
            .await
    }

    /// Change the account email. `url` is the verification callback for
    /// the new address.
    pub async fn update_email(&self, email: &str, url: &str) -> Result<(), Error> {
        self.ops
            .update_email(email, url, self.session.as_str())
            .await
    }

    /// Change the account password.
    pub async fn update_password(&self, old_password: &str, new_password: &str) -> Result<(), Error> {
        self.ops
            .update_password(old_password, new_password, self.session.as_str())
            .await
    }

    /// Replace the account avatar with a base64-encoded image.
    pub async fn update_avatar(&self, image: &str) -> Result<(), Error> {
        self.ops.update_avatar(image, self.session.as_str()).await
    }

    /// Remove the account avatar.
    pub async fn delete_avatar(&self) -> Result<(), Error> {
        self.ops.delete_avatar(self.session.as_str()).await
    }

    /// Project operations with this session pre-bound.
    pub fn projects(&self) -> BoundProjects<'_> {
        BoundProjects {
            projects: &self.projects,
            session: self.session.as_str(),
        }
    }
}

/// Project administration with a session token pre-bound.
///
/// Borrowed from a [`User`]; see [`Projects`] for the explicit-token form.
#[derive(Debug, Clone, Copy)]
pub struct BoundProjects<'a> {
    projects: &'a Projects,
    session: &'a str,
}

impl BoundProjects<'_> {
    /// Create a project repository.
    pub async fn create(&self, name: &str) -> Result<CreatedProject, Error> {
        self.projects.create(self.session, name).await
    }

    /// Apply a partial content update in one request.
    pub async fn update_content(
        &self,
        project_id: &str,
        files: &HashMap<String, String>,
        delete: &[String],
    ) -> Result<(), Error> {
        self.projects
            .update_content(self.session, project_id, files, delete)
            .await
    }

    /// List the projects visible to this session.
    pub async fn list(&self) -> Result<Vec<Project>, Error> {
        self.projects.list(self.session).await
    }

    /// Fetch one project by id. The backend answers with a sequence even
    /// for a single id.
    pub async fn get(&self, project_id: &str) -> Result<Vec<Project>, Error> {
        self.projects.get(self.session, project_id).await
    }
}
