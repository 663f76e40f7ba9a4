//! # taskmaster-core
//!
//! Shared domain types for the TaskMaster service:
//!
//! - **Filter/sort specification**: typed optional filters for task listing
//!   (no magic sentinel strings — absence means "no filter")
//! - **Priority**: the three-level priority scale with its sort rank
//! - **Status**: canonical status strings (the store keeps status as TEXT
//!   because XML import takes it verbatim)
//! - **Validation**: field-level input rules returning a field→message map

#![deny(unsafe_code)]

pub mod types;
pub mod validation;

pub use types::{Priority, SortBy, StatusFilter, TaskFilters, status};
pub use validation::{FieldErrors, TaskDraft, validate_task_input};
