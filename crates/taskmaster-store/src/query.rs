//! Structured builder for the task list query.
//!
//! Composes predicate and order clauses from the typed [`TaskFilters`]
//! specification into one parameterized SELECT. Values are always bound as
//! parameters, never interpolated into the SQL text.

use rusqlite::types::ToSql;
use taskmaster_core::{SortBy, StatusFilter, TaskFilters};

/// Column list shared by the list and get queries: every task column plus
/// the joined category name and color.
pub const TASK_COLUMNS: &str = "t.id, t.user_id, t.category_id, t.title, t.description, \
     t.priority, t.status, t.due_date, t.completed_at, t.created_at, t.updated_at, \
     c.name AS category, c.color AS category_color";

/// A SQL string with its positional parameters.
pub struct BuiltQuery {
    /// The SELECT statement.
    pub sql: String,
    /// Values for the `?` placeholders, in order.
    pub params: Vec<Box<dyn ToSql>>,
}

impl BuiltQuery {
    /// Borrowed parameter slice in the form `rusqlite` expects.
    pub fn param_refs(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(Box::as_ref).collect()
    }
}

/// Build the list query for one user with the given filters.
///
/// The user scope and the soft-delete exclusion are unconditional; every
/// optional filter contributes a predicate only when present.
pub fn build_list_query(user_id: i64, filters: &TaskFilters) -> BuiltQuery {
    let mut sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks t \
         LEFT JOIN categories c ON t.category_id = c.id \
         WHERE t.user_id = ? AND t.is_deleted = 0"
    );
    let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(user_id)];

    match filters.status {
        Some(StatusFilter::Completed) => sql.push_str(" AND t.status = 'completed'"),
        Some(StatusFilter::Active) => sql.push_str(" AND t.status != 'completed'"),
        None => {}
    }

    if let Some(ref category) = filters.category {
        sql.push_str(" AND c.name = ?");
        params.push(Box::new(category.clone()));
    }

    if let Some(priority) = filters.priority {
        sql.push_str(" AND t.priority = ?");
        params.push(Box::new(priority.as_sql()));
    }

    if let Some(ref search) = filters.search {
        sql.push_str(" AND (t.title LIKE ? OR t.description LIKE ?)");
        let pattern = format!("%{search}%");
        params.push(Box::new(pattern.clone()));
        params.push(Box::new(pattern));
    }

    sql.push_str(order_clause(filters.sort_by));

    // OFFSET is only meaningful with LIMIT, mirroring the historical API.
    if let Some(limit) = filters.limit {
        sql.push_str(" LIMIT ?");
        params.push(Box::new(i64::from(limit)));
        if let Some(offset) = filters.offset {
            sql.push_str(" OFFSET ?");
            params.push(Box::new(i64::from(offset)));
        }
    }

    BuiltQuery { sql, params }
}

/// The ORDER BY clause for a sort order.
///
/// Priority rank is a custom total order (high before medium before low),
/// and the due-date sort pushes tasks without a due date to the end.
fn order_clause(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::Newest => " ORDER BY t.created_at DESC",
        SortBy::Oldest => " ORDER BY t.created_at ASC",
        SortBy::Priority => {
            " ORDER BY CASE t.priority WHEN 'high' THEN 1 WHEN 'medium' THEN 2 WHEN 'low' THEN 3 END, t.created_at DESC"
        }
        SortBy::DueDate => " ORDER BY t.due_date IS NULL, t.due_date ASC, t.created_at DESC",
        SortBy::Alphabetical => " ORDER BY t.title ASC",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
