//! Core types for the runik client.

mod account;
mod endpoint;
mod project;
mod token;

pub use account::{Account, CreatedAccount};
pub use endpoint::Endpoint;
pub use project::{CreatedProject, Project};
pub use token::SessionToken;
