//! Project repository administration.

use std::collections::HashMap;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{Error, InvalidInputError};
use crate::http::{self, CreateProjectRequest, HttpClient, UpdateContentRequest};
use crate::types::{CreatedProject, Project};

/// Minimum project name length in characters.
pub const NAME_MIN: usize = 4;
/// Maximum project name length in characters.
pub const NAME_MAX: usize = 64;

/// Project repository operations for an authenticated user.
///
/// Every operation takes the session token explicitly, mirroring
/// [`SelfService`](crate::SelfService).
#[derive(Debug, Clone)]
pub struct Projects {
    http: HttpClient,
}

impl Projects {
    pub(crate) fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Create a project repository.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `name` is shorter than [`NAME_MIN`] or longer than
    /// [`NAME_MAX`] characters; no request is issued. `BackendFailure`
    /// unless the backend answers 201; `UnexpectedResponse` if the created
    /// body lacks an `id`.
    #[instrument(skip(self, session), fields(endpoint = %self.http.endpoint()))]
    pub async fn create(&self, session: &str, name: &str) -> Result<CreatedProject, Error> {
        validate_name(name)?;
        debug!(name, "creating project");

        let body = CreateProjectRequest { name };
        let json = self
            .http
            .json_expecting(
                Method::POST,
                http::PROJECTS,
                Some(session),
                &body,
                StatusCode::CREATED,
            )
            .await?;

        match json.get("id").and_then(Value::as_str) {
            Some(id) => Ok(CreatedProject { id: id.to_string() }),
            None => Err(Error::UnexpectedResponse { body: json }),
        }
    }

    /// Apply a partial content update in one request: entries in `files`
    /// are created or overwritten, paths in `delete` are removed.
    #[instrument(skip(self, session, files), fields(endpoint = %self.http.endpoint()))]
    pub async fn update_content(
        &self,
        session: &str,
        project_id: &str,
        files: &HashMap<String, String>,
        delete: &[String],
    ) -> Result<(), Error> {
        debug!(project_id, "updating project content");

        let body = UpdateContentRequest {
            id: project_id,
            files,
            delete,
        };
        self.http
            .expect_status(
                Method::PATCH,
                http::PROJECT_FILES,
                Some(session),
                Some(&body),
                &[StatusCode::OK, StatusCode::NO_CONTENT],
            )
            .await
    }

    /// List the projects visible to the session.
    #[instrument(skip(self, session), fields(endpoint = %self.http.endpoint()))]
    pub async fn list(&self, session: &str) -> Result<Vec<Project>, Error> {
        debug!("listing projects");
        self.http.query(http::PROJECTS, Some(session)).await
    }

    /// Fetch one project by id.
    ///
    /// The backend answers with a sequence even for a single id; the wire
    /// shape is preserved here rather than flattened.
    #[instrument(skip(self, session), fields(endpoint = %self.http.endpoint()))]
    pub async fn get(&self, session: &str, project_id: &str) -> Result<Vec<Project>, Error> {
        debug!(project_id, "fetching project");
        self.http
            .query(&http::project(project_id), Some(session))
            .await
    }
}

fn validate_name(name: &str) -> Result<(), Error> {
    let length = name.chars().count();
    if (NAME_MIN..=NAME_MAX).contains(&length) {
        return Ok(());
    }
    Err(InvalidInputError::ProjectName {
        value: name.to_string(),
        reason: format!("length must be between {NAME_MIN} and {NAME_MAX} characters"),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_within_bounds() {
        assert!(validate_name("demo").is_ok());
        assert!(validate_name(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn rejects_short_name() {
        let err = validate_name("abc").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::ProjectName { .. })
        ));
    }

    #[test]
    fn rejects_long_name() {
        let err = validate_name(&"a".repeat(65)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::ProjectName { .. })
        ));
    }

    #[test]
    fn counts_characters_not_bytes() {
        // five characters, seven bytes
        assert!(validate_name("héllö").is_ok());
    }
}
