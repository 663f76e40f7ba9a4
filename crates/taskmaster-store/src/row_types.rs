//! Database row types for mapping between `SQLite` rows and Rust structs.
//!
//! These represent the raw row shapes handed back by the repositories.
//! They serialize directly into the JSON responses the API layer returns,
//! so field names here are the wire contract.

use serde::{Deserialize, Serialize};

/// A task row joined with its category's name and color.
///
/// `priority` and `status` stay as raw strings: XML import stores document
/// values verbatim, so the database may hold values outside the canonical
/// sets and reads must not lose them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaskRow {
    /// Task ID.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Category, if assigned.
    pub category_id: Option<i64>,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Priority (`low`/`medium`/`high` for API-created tasks).
    pub priority: String,
    /// Status (`pending`/`completed` for API-created tasks).
    pub status: String,
    /// Due date (`YYYY-MM-DD`).
    pub due_date: Option<String>,
    /// Completion timestamp; set iff `status = 'completed'`.
    pub completed_at: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last-modified timestamp.
    pub updated_at: String,
    /// Joined category name.
    pub category: Option<String>,
    /// Joined category color.
    pub category_color: Option<String>,
}

/// Raw category row from the `categories` table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryRow {
    /// Category ID.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Name (unique per user).
    pub name: String,
    /// Display color.
    pub color: String,
    /// Display icon.
    pub icon: String,
    /// Sidebar position.
    pub sort_order: i64,
}

/// Aggregate task counters for one user. All counts coerce NULL to zero.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskStats {
    /// All non-deleted tasks.
    pub total: i64,
    /// Completed tasks.
    pub completed: i64,
    /// Non-completed tasks.
    pub active: i64,
    /// Active high-priority tasks.
    pub high_priority: i64,
    /// Active medium-priority tasks.
    pub medium_priority: i64,
    /// Active low-priority tasks.
    pub low_priority: i64,
    /// Active tasks whose due date is strictly before today.
    pub overdue: i64,
    /// Tasks completed today.
    pub completed_today: i64,
}

/// Per-category count of active tasks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category name.
    pub name: String,
    /// Category color.
    pub color: String,
    /// Active (non-completed, non-deleted) task count.
    pub count: i64,
}

/// Summary row for the upcoming-deadlines view.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeadlineRow {
    /// Task ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Due date.
    pub due_date: String,
    /// Priority.
    pub priority: String,
    /// Joined category name.
    pub category: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_row_json_field_names_are_the_wire_contract() {
        let row = TaskRow {
            id: 1,
            user_id: 1,
            category_id: Some(4),
            title: "Buy milk".into(),
            description: None,
            priority: "low".into(),
            status: "pending".into(),
            due_date: Some("2099-01-01".into()),
            completed_at: None,
            created_at: "2025-01-01T00:00:00Z".into(),
            updated_at: "2025-01-01T00:00:00Z".into(),
            category: Some("shopping".into()),
            category_color: Some("#22c55e".into()),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["category"], "shopping");
        assert_eq!(json["category_color"], "#22c55e");
        assert!(json["description"].is_null());
        assert!(json["completed_at"].is_null());
    }

    #[test]
    fn stats_default_is_all_zeros() {
        let stats = TaskStats::default();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completed_today, 0);
    }
}
