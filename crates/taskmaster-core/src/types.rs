//! Domain types: priority, status, and the task filter/sort specification.

use serde::{Deserialize, Serialize};

/// Canonical task status strings.
///
/// Statuses live in the database as TEXT — XML import stores whatever the
/// document said — so only the two canonical values get named constants.
/// Everything that isn't `completed` is treated as active.
pub mod status {
    /// Task is open.
    pub const PENDING: &str = "pending";
    /// Task is done; `completed_at` must be set.
    pub const COMPLETED: &str = "completed";

    /// Whether a raw status string counts as completed.
    pub fn is_completed(s: &str) -> bool {
        s == COMPLETED
    }
}

/// Task priority. Ordering for the priority sort is high < medium < low
/// (most urgent first), not lexical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low urgency.
    Low,
    /// Default urgency.
    Medium,
    /// High urgency.
    High,
}

impl Priority {
    /// The TEXT value stored in the database.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse a raw string. Returns `None` for anything outside the scale.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Parse a filter parameter. Absent, empty, `"all"`, or unrecognized
    /// values all mean "no filter" — invalid input is never an error here.
    pub fn from_param(param: Option<&str>) -> Option<Self> {
        param.and_then(Self::parse)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Status filter for task listing.
///
/// `None` at the [`TaskFilters`] level means "no filter". The historical
/// query-string contract maps `"completed"` to [`Completed`] and any other
/// non-`"all"` value to [`Active`].
///
/// [`Completed`]: StatusFilter::Completed
/// [`Active`]: StatusFilter::Active
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Only tasks with `status = 'completed'`.
    Completed,
    /// Only tasks with `status != 'completed'`.
    Active,
}

impl StatusFilter {
    /// Map a raw query-string value to a filter.
    ///
    /// Absent, empty, and `"all"` mean no filter; `"completed"` selects
    /// completed tasks; every other value selects active tasks.
    pub fn from_param(param: Option<&str>) -> Option<Self> {
        match param {
            None | Some("" | "all") => None,
            Some("completed") => Some(Self::Completed),
            Some(_) => Some(Self::Active),
        }
    }
}

/// Sort order for task listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Creation timestamp, newest first (the default).
    #[default]
    Newest,
    /// Creation timestamp, oldest first.
    Oldest,
    /// Priority rank (high, medium, low), ties newest first.
    Priority,
    /// Due date ascending, tasks without a due date last, ties newest first.
    DueDate,
    /// Title ascending.
    Alphabetical,
}

impl SortBy {
    /// Map a raw query-string value. Unknown values fall back to [`Newest`].
    ///
    /// [`Newest`]: SortBy::Newest
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("oldest") => Self::Oldest,
            Some("priority") => Self::Priority,
            Some("due_date") => Self::DueDate,
            Some("alphabetical") => Self::Alphabetical,
            _ => Self::Newest,
        }
    }

    /// The query-string name of this sort order.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Priority => "priority",
            Self::DueDate => "due_date",
            Self::Alphabetical => "alphabetical",
        }
    }
}

/// The full filter/sort specification for a task listing.
///
/// Every field is optional; an absent field means "no filter". Listing is
/// always scoped to one user and always excludes soft-deleted tasks — those
/// two predicates are not options.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskFilters {
    /// Completed/active filter.
    pub status: Option<StatusFilter>,
    /// Exact category-name match.
    pub category: Option<String>,
    /// Exact priority match.
    pub priority: Option<Priority>,
    /// Case-insensitive substring match on title or description.
    pub search: Option<String>,
    /// Sort order.
    pub sort_by: SortBy,
    /// Maximum rows to return.
    pub limit: Option<u32>,
    /// Rows to skip. Only applied when `limit` is present.
    pub offset: Option<u32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
