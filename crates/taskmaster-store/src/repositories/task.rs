//! Task repository — CRUD, soft delete, and aggregate statistics.
//!
//! Every operation is scoped to one `user_id` and every read excludes
//! soft-deleted rows; cross-user access is impossible through this API.

use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, params};
use taskmaster_core::{Priority, TaskFilters, status};

use crate::errors::{Result, StoreError};
use crate::query::{self, TASK_COLUMNS};
use crate::repositories::category::CategoryRepo;
use crate::row_types::{CategoryCount, DeadlineRow, TaskRow, TaskStats};

/// Get current UTC timestamp as an ISO 8601 string.
fn now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Options for creating a new task. Status always starts as `pending`.
pub struct CreateTaskOptions<'a> {
    /// Title (validated upstream: 2–100 chars).
    pub title: &'a str,
    /// Optional description.
    pub description: Option<&'a str>,
    /// Category name; defaults to `personal`. An unmatched name stores a
    /// NULL category rather than failing.
    pub category: Option<&'a str>,
    /// Priority; defaults to medium.
    pub priority: Option<Priority>,
    /// Due date (`YYYY-MM-DD`); empty strings count as absent.
    pub due_date: Option<&'a str>,
}

/// Partial update — only present fields change.
///
/// `due_date` is tri-state: `None` leaves it alone, `Some(None)` clears it,
/// `Some(Some(date))` sets it. `status` is a raw string because toggle and
/// import traffic in values the API never validates.
#[derive(Debug, Default)]
pub struct UpdateTaskParams {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category name (resolved to an ID; unmatched → NULL).
    pub category: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New due date (see type-level note).
    pub due_date: Option<Option<String>>,
    /// New status. Setting `completed` stamps `completed_at`; any other
    /// value clears it.
    pub status: Option<String>,
}

/// Task repository — stateless, every method takes `&Connection`.
pub struct TaskRepo;

impl TaskRepo {
    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TaskRow> {
        Ok(TaskRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            category_id: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            priority: row.get(5)?,
            status: row.get(6)?,
            due_date: row.get(7)?,
            completed_at: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
            category: row.get(11)?,
            category_color: row.get(12)?,
        })
    }

    /// List a user's tasks with filtering and sorting.
    pub fn list(conn: &Connection, user_id: i64, filters: &TaskFilters) -> Result<Vec<TaskRow>> {
        let built = query::build_list_query(user_id, filters);
        let mut stmt = conn.prepare(&built.sql)?;
        let rows = stmt
            .query_map(built.param_refs().as_slice(), Self::map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Get a single task. `None` when the row doesn't exist, belongs to
    /// another user, or is soft-deleted.
    pub fn get(conn: &Connection, id: i64, user_id: i64) -> Result<Option<TaskRow>> {
        let row = conn
            .query_row(
                &format!(
                    "SELECT {TASK_COLUMNS} FROM tasks t \
                     LEFT JOIN categories c ON t.category_id = c.id \
                     WHERE t.id = ?1 AND t.user_id = ?2 AND t.is_deleted = 0"
                ),
                params![id, user_id],
                Self::map_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Create a task and return the freshly inserted row.
    pub fn create(conn: &Connection, user_id: i64, opts: &CreateTaskOptions<'_>) -> Result<TaskRow> {
        let category_id =
            CategoryRepo::id_by_name(conn, user_id, opts.category.unwrap_or("personal"))?;
        let priority = opts.priority.unwrap_or_default();
        let due_date = opts.due_date.filter(|d| !d.is_empty());
        let now = now_iso();

        let _ = conn.execute(
            "INSERT INTO tasks (user_id, category_id, title, description, priority, due_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![
                user_id,
                category_id,
                opts.title,
                opts.description,
                priority.as_sql(),
                due_date,
                now,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get(conn, id, user_id)?.ok_or(StoreError::TaskNotFound(id))
    }

    /// Apply a partial update. Returns the updated row, or `None` when the
    /// task doesn't exist for this user.
    ///
    /// An update with no fields set is a no-op read: the current row comes
    /// back and nothing is written, not even `updated_at`.
    pub fn update(
        conn: &Connection,
        id: i64,
        user_id: i64,
        updates: &UpdateTaskParams,
    ) -> Result<Option<TaskRow>> {
        let Some(existing) = Self::get(conn, id, user_id)? else {
            return Ok(None);
        };

        let mut sets: Vec<&'static str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(ref title) = updates.title {
            sets.push("title = ?");
            values.push(Box::new(title.clone()));
        }
        if let Some(ref description) = updates.description {
            sets.push("description = ?");
            values.push(Box::new(description.clone()));
        }
        if let Some(ref name) = updates.category {
            let category_id = CategoryRepo::id_by_name(conn, user_id, name)?;
            sets.push("category_id = ?");
            values.push(Box::new(category_id));
        }
        if let Some(priority) = updates.priority {
            sets.push("priority = ?");
            values.push(Box::new(priority.as_sql()));
        }
        if let Some(ref due_date) = updates.due_date {
            sets.push("due_date = ?");
            values.push(Box::new(due_date.clone()));
        }
        if let Some(ref status_value) = updates.status {
            sets.push("status = ?");
            values.push(Box::new(status_value.clone()));
            if status::is_completed(status_value) {
                sets.push("completed_at = ?");
                values.push(Box::new(now_iso()));
            } else {
                sets.push("completed_at = NULL");
            }
        }

        if sets.is_empty() {
            return Ok(Some(existing));
        }

        sets.push("updated_at = ?");
        values.push(Box::new(now_iso()));

        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ? AND user_id = ?",
            sets.join(", ")
        );
        values.push(Box::new(id));
        values.push(Box::new(user_id));

        let value_refs: Vec<&dyn ToSql> = values.iter().map(Box::as_ref).collect();
        let _ = conn.execute(&sql, value_refs.as_slice())?;

        Self::get(conn, id, user_id)
    }

    /// Flip a task between pending and completed.
    ///
    /// A status outside the canonical pair collapses to pending on the flip.
    pub fn toggle_complete(conn: &Connection, id: i64, user_id: i64) -> Result<Option<TaskRow>> {
        let Some(task) = Self::get(conn, id, user_id)? else {
            return Ok(None);
        };
        let new_status = if status::is_completed(&task.status) {
            status::PENDING
        } else {
            status::COMPLETED
        };
        Self::update(
            conn,
            id,
            user_id,
            &UpdateTaskParams {
                status: Some(new_status.to_string()),
                ..UpdateTaskParams::default()
            },
        )
    }

    /// Soft-delete a task. Returns whether a row was affected.
    pub fn soft_delete(conn: &Connection, id: i64, user_id: i64) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE tasks SET is_deleted = 1, updated_at = ?1 WHERE id = ?2 AND user_id = ?3",
            params![now_iso(), id, user_id],
        )?;
        Ok(changed > 0)
    }

    /// Soft-delete all completed, non-deleted tasks. Returns the count.
    pub fn clear_completed(conn: &Connection, user_id: i64) -> Result<usize> {
        let changed = conn.execute(
            "UPDATE tasks SET is_deleted = 1, updated_at = ?1
             WHERE user_id = ?2 AND status = 'completed' AND is_deleted = 0",
            params![now_iso(), user_id],
        )?;
        Ok(changed)
    }

    /// Aggregate counters for the dashboard. NULL sums coerce to zero.
    pub fn stats(conn: &Connection, user_id: i64) -> Result<TaskStats> {
        let stats = conn.query_row(
            "SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN status != 'completed' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN priority = 'high' AND status != 'completed' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN priority = 'medium' AND status != 'completed' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN priority = 'low' AND status != 'completed' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN due_date < date('now') AND status != 'completed' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN date(completed_at) = date('now') THEN 1 ELSE 0 END), 0)
             FROM tasks WHERE user_id = ?1 AND is_deleted = 0",
            params![user_id],
            |row| {
                Ok(TaskStats {
                    total: row.get(0)?,
                    completed: row.get(1)?,
                    active: row.get(2)?,
                    high_priority: row.get(3)?,
                    medium_priority: row.get(4)?,
                    low_priority: row.get(5)?,
                    overdue: row.get(6)?,
                    completed_today: row.get(7)?,
                })
            },
        )?;
        Ok(stats)
    }

    /// Active task count per category, zero-count categories included,
    /// ordered by the category sort order.
    pub fn category_counts(conn: &Connection, user_id: i64) -> Result<Vec<CategoryCount>> {
        let mut stmt = conn.prepare(
            "SELECT c.name, c.color, COUNT(t.id)
             FROM categories c
             LEFT JOIN tasks t ON c.id = t.category_id
                 AND t.status != 'completed'
                 AND t.is_deleted = 0
             WHERE c.user_id = ?1
             GROUP BY c.id, c.name, c.color
             ORDER BY c.sort_order",
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok(CategoryCount {
                    name: row.get(0)?,
                    color: row.get(1)?,
                    count: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Active tasks with a due date, soonest first, capped at `limit`.
    pub fn upcoming_deadlines(
        conn: &Connection,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<DeadlineRow>> {
        let mut stmt = conn.prepare(
            "SELECT t.id, t.title, t.due_date, t.priority, c.name AS category
             FROM tasks t
             LEFT JOIN categories c ON t.category_id = c.id
             WHERE t.user_id = ?1
                 AND t.is_deleted = 0
                 AND t.status != 'completed'
                 AND t.due_date IS NOT NULL
             ORDER BY t.due_date ASC
             LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![user_id, limit], |row| {
                Ok(DeadlineRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    due_date: row.get(2)?,
                    priority: row.get(3)?,
                    category: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
