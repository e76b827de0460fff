//! HTTP plumbing for the Runik backend.
//!
//! This module owns the request wrapper and the response-classification
//! policy applied at every network call boundary.

mod client;
mod routes;

pub(crate) use client::HttpClient;
pub(crate) use routes::*;
