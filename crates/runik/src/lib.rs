//! runik - Typed client for the Runik identity and project service.
//!
//! This library provides a typed, async client for the Runik backend. A
//! privileged integration authenticates with an API key held by [`Users`];
//! individual end users authenticate with a session token, either threaded
//! explicitly through [`Users::me`] or captured once in a [`User`] handle.
//!
//! # Example
//!
//! ```no_run
//! use runik::{Config, Users};
//!
//! # async fn example() -> Result<(), runik::Error> {
//! let config = Config::new()
//!     .set_endpoint("https://identity.example.com")
//!     .set_key("service-api-key");
//! let users = Users::new(&config)?;
//!
//! let created = users
//!     .sign_up("alice@example.com", "correct-horse", "https://app.example.com/verify")
//!     .await?;
//! println!("created account {}", created.id);
//!
//! let user = users
//!     .sign_in("alice@example.com", "correct-horse", false, None)
//!     .await?;
//! let account = user.get().await?;
//! println!("signed in as {}", account.email);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod types;
pub mod user;
pub mod users;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::Error;
pub use types::{Account, CreatedAccount, CreatedProject, Endpoint, Project};
pub use user::{BoundProjects, User};
pub use users::{Projects, SelfService, Users};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
