//! Project wire types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A project repository as returned by the backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Project {
    /// Opaque project id.
    pub id: String,
    /// Project name, when the backend includes it.
    #[serde(default)]
    pub name: Option<String>,
    /// File contents keyed by path, when the backend includes them.
    #[serde(default)]
    pub files: HashMap<String, String>,
}

/// Result of a successful project creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatedProject {
    /// Opaque id of the newly created project.
    pub id: String,
}
