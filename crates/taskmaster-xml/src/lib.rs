//! # taskmaster-xml
//!
//! Bridge between the relational task store and the `<taskmaster>` XML
//! document format:
//!
//! - **[`export`]**: serialize a user's live tasks and categories to the
//!   fixed document shape (metadata, tasks, categories).
//! - **[`import`]**: parse that shape back into task inserts, all-or-nothing.
//!   The document is parsed completely before the transaction begins, so
//!   malformed XML can never leave partial rows behind.

#![deny(unsafe_code)]

pub mod errors;
pub mod export;
pub mod import;

pub use errors::{Result, XmlError};
pub use export::export_tasks;
pub use import::{ImportSummary, import_tasks};

/// Format version stamped into the export metadata block.
pub const FORMAT_VERSION: &str = "2.0";
