//! Input validation for task create/update.
//!
//! Applied by the API layer before anything reaches the repository. Failures
//! are reported as a field→message map so a form can mark every offending
//! field at once; an empty map means the input passed.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::Priority;

/// Titles must be at least this many characters.
pub const TITLE_MIN_CHARS: usize = 2;
/// Titles must not exceed this many characters.
pub const TITLE_MAX_CHARS: usize = 100;
/// Descriptions must not exceed this many characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// The fixed category allow-list for API input.
pub const ALLOWED_CATEGORIES: [&str; 4] = ["personal", "work", "study", "shopping"];

/// Field name → human-readable message.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Raw task input as the API layer received it, before any coercion.
#[derive(Clone, Copy, Debug, Default)]
pub struct TaskDraft<'a> {
    /// Task title.
    pub title: Option<&'a str>,
    /// Task description.
    pub description: Option<&'a str>,
    /// Category name.
    pub category: Option<&'a str>,
    /// Priority string.
    pub priority: Option<&'a str>,
    /// Due date string (`YYYY-MM-DD`).
    pub due_date: Option<&'a str>,
}

/// Validate task input.
///
/// `require_title` distinguishes create (title mandatory) from update
/// (absent title means "leave unchanged"). Returns an empty map when the
/// input is acceptable.
pub fn validate_task_input(draft: &TaskDraft<'_>, require_title: bool) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match draft.title {
        None | Some("") if require_title => {
            let _ = errors.insert("title", "Title is required".to_string());
        }
        None => {}
        Some(title) => {
            let len = title.chars().count();
            if len < TITLE_MIN_CHARS {
                let _ = errors.insert(
                    "title",
                    format!("Title must be at least {TITLE_MIN_CHARS} characters"),
                );
            } else if len > TITLE_MAX_CHARS {
                let _ = errors.insert(
                    "title",
                    format!("Title must not exceed {TITLE_MAX_CHARS} characters"),
                );
            }
        }
    }

    if let Some(description) = draft.description {
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            let _ = errors.insert(
                "description",
                format!("Description must not exceed {DESCRIPTION_MAX_CHARS} characters"),
            );
        }
    }

    if let Some(priority) = draft.priority {
        if Priority::parse(priority).is_none() {
            let _ = errors.insert("priority", "Invalid priority value".to_string());
        }
    }

    if let Some(category) = draft.category {
        if !ALLOWED_CATEGORIES.contains(&category) {
            let _ = errors.insert("category", "Invalid category value".to_string());
        }
    }

    if let Some(due_date) = draft.due_date {
        if !due_date.is_empty() && !is_valid_due_date(due_date) {
            let _ = errors.insert("due_date", "Invalid date format (use YYYY-MM-DD)".to_string());
        }
    }

    errors
}

/// Strict calendar-date check: must parse as `%Y-%m-%d` AND format back to
/// the identical string. The round-trip rejects both impossible dates
/// (`2024-02-30`) and unpadded forms (`2024-2-3`) that a lenient parser
/// would accept.
fn is_valid_due_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string() == s)
        .unwrap_or(false)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
