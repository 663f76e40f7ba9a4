//! # taskmaster-server
//!
//! Axum HTTP API for the TaskMaster service. Thin by design: routes map
//! HTTP verbs onto repository and bridge calls, wrap results in the JSON
//! envelope, and translate error kinds to transport status codes.

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod health;
pub mod response;
pub mod routes;
pub mod server;
pub mod shutdown;

pub use config::{Environment, ServerConfig};
pub use errors::ApiError;
pub use server::{ApiServer, AppState};

/// The user every request is resolved to.
///
/// Authentication is out of scope; the schema stays multi-user but the API
/// serves the single seeded account.
pub const DEFAULT_USER_ID: i64 = 1;
