//! Default-data bootstrap.
//!
//! Creates the default user and the four stock categories on first run.
//! Task creation resolves category names against this set, so a fresh
//! database must have them before the API serves requests.

use rusqlite::{Connection, params};
use tracing::info;

use crate::errors::Result;

/// The stock categories seeded for a new user: (name, color, icon, sort order).
const DEFAULT_CATEGORIES: [(&str, &str, &str, i64); 4] = [
    ("personal", "#7c3aed", "👤", 1),
    ("work", "#ef4444", "💼", 2),
    ("study", "#f59e0b", "📚", 3),
    ("shopping", "#22c55e", "🛒", 4),
];

/// Ensure the default user and categories exist. Idempotent.
pub fn ensure_defaults(conn: &Connection) -> Result<()> {
    let user_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE username = 'johndoe'",
        [],
        |row| row.get(0),
    )?;
    if user_count > 0 {
        return Ok(());
    }

    let _ = conn.execute(
        "INSERT INTO users (username, email, password_hash, first_name, last_name)
         VALUES ('johndoe', 'john@example.com', '$2y$10$92IXUNpkjO0rOQ5byMi.Ye4oKoEa3Ro9llC/.og/at2.uheWG/igi', 'John', 'Doe')",
        [],
    )?;
    let user_id = conn.last_insert_rowid();

    for (name, color, icon, sort_order) in DEFAULT_CATEGORIES {
        let _ = conn.execute(
            "INSERT INTO categories (user_id, name, color, icon, sort_order)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, name, color, icon, sort_order],
        )?;
    }

    info!(user_id, "seeded default user and categories");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
