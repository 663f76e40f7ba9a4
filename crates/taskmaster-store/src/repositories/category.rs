//! Category repository — lookups for the `categories` table.
//!
//! Categories are created by seeding, not through the API, so this repo only
//! reads. Name resolution is the one operation task creation depends on.

use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::Result;
use crate::row_types::CategoryRow;

/// Category repository — stateless, every method takes `&Connection`.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List a user's categories in sidebar order.
    pub fn list(conn: &Connection, user_id: i64) -> Result<Vec<CategoryRow>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, color, icon, sort_order
             FROM categories WHERE user_id = ?1 ORDER BY sort_order",
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok(CategoryRow {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    name: row.get(2)?,
                    color: row.get(3)?,
                    icon: row.get(4)?,
                    sort_order: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Resolve a category name to its ID for one user.
    ///
    /// Returns `None` when no category with that name exists — callers store
    /// the resulting NULL rather than failing, which is the long-standing
    /// contract of task creation and import.
    pub fn id_by_name(conn: &Connection, user_id: i64, name: &str) -> Result<Option<i64>> {
        let id = conn
            .query_row(
                "SELECT id FROM categories WHERE user_id = ?1 AND name = ?2",
                params![user_id, name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
