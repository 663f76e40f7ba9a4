//! # taskmaster-store
//!
//! `SQLite` storage layer for the TaskMaster service:
//!
//! - **[`connection`]**: `r2d2` connection pool with WAL mode, foreign keys,
//!   and busy-timeout pragmas applied to every connection.
//! - **[`migrations`]**: version-tracked schema evolution; SQL embedded at
//!   compile time, each migration applied transactionally.
//! - **[`seed`]**: default user and category bootstrap.
//! - **[`row_types`]**: raw database row structs for `rusqlite` mapping.
//! - **[`query`]**: the structured, fully parameterized list-query builder.
//! - **[`repositories`]**: stateless repository structs — each method takes
//!   `&Connection` and executes SQL. No shared mutable state.

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod query;
pub mod repositories;
pub mod row_types;
pub mod seed;

pub use connection::{ConnectionConfig, ConnectionPool, PooledConnection, open_pool};
pub use errors::{Result, StoreError};
pub use migrations::run_migrations;
pub use repositories::category::CategoryRepo;
pub use repositories::task::{CreateTaskOptions, TaskRepo, UpdateTaskParams};
