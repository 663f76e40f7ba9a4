//! XML import — parse a `<taskmaster>` document into task inserts.
//!
//! Parsing happens completely up front: a malformed document is rejected
//! before any transaction begins. The inserts then run all-or-nothing —
//! a failure mid-way rolls back every row written so far.

use quick_xml::Reader;
use quick_xml::events::Event;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use taskmaster_core::status;
use taskmaster_store::CategoryRepo;

use crate::errors::{Result, XmlError};

/// Outcome counters for one import run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Tasks inserted.
    pub imported: usize,
    /// Tasks skipped (empty title after trimming).
    pub skipped: usize,
    /// Tasks seen in the document.
    pub total: usize,
}

/// One `<task>` element as found in the document, fields verbatim.
#[derive(Debug, Default)]
struct ParsedTask {
    title: String,
    description: String,
    category: String,
    priority: String,
    status: String,
    due_date: String,
}

/// The task child element currently being read.
#[derive(Clone, Copy, Debug)]
enum TaskField {
    Title,
    Description,
    Category,
    Priority,
    Status,
    DueDate,
}

impl TaskField {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"title" => Some(Self::Title),
            b"description" => Some(Self::Description),
            b"category" => Some(Self::Category),
            b"priority" => Some(Self::Priority),
            b"status" => Some(Self::Status),
            b"due_date" => Some(Self::DueDate),
            _ => None,
        }
    }
}

/// Import tasks from an XML document into `user_id`'s store.
///
/// Per task: an empty (post-trim) title skips the task; the category name
/// resolves by lookup (empty → `personal`, unmatched → NULL); priority and
/// status are taken verbatim when non-empty, else defaulted. A task imported
/// as completed gets `completed_at` stamped with the import time so the
/// status/completed_at invariant holds.
///
/// # Errors
///
/// [`XmlError::Parse`] for a malformed document (nothing written);
/// [`XmlError::Sqlite`] if any insert fails (everything rolled back).
pub fn import_tasks(conn: &mut Connection, user_id: i64, xml: &str) -> Result<ImportSummary> {
    let parsed = parse_document(xml)?;
    let now = now_iso();

    let tx = conn.transaction()?;
    let mut imported = 0usize;
    let mut skipped = 0usize;

    for task in &parsed {
        let title = task.title.trim();
        if title.is_empty() {
            skipped += 1;
            continue;
        }

        let category_name = if task.category.is_empty() {
            "personal"
        } else {
            task.category.as_str()
        };
        let category_id = CategoryRepo::id_by_name(&tx, user_id, category_name)?;

        let priority = if task.priority.is_empty() {
            "medium"
        } else {
            task.priority.as_str()
        };
        let task_status = if task.status.is_empty() {
            "pending"
        } else {
            task.status.as_str()
        };
        let description = (!task.description.is_empty()).then_some(task.description.as_str());
        let due_date = (!task.due_date.is_empty()).then_some(task.due_date.as_str());
        let completed_at = status::is_completed(task_status).then(|| now.clone());

        let _ = tx.execute(
            "INSERT INTO tasks (user_id, category_id, title, description, priority, status,
                                due_date, completed_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
            params![
                user_id,
                category_id,
                title,
                description,
                priority,
                task_status,
                due_date,
                completed_at,
                now,
            ],
        )?;
        imported += 1;
    }

    tx.commit()?;

    Ok(ImportSummary {
        imported,
        skipped,
        total: imported + skipped,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal
// ─────────────────────────────────────────────────────────────────────────────

fn now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Walk the document and collect every `<task>` under a `<tasks>` block.
///
/// Well-formedness is enforced here: parser errors, unbalanced elements,
/// and documents with no root element at all are rejected.
fn parse_document(xml: &str) -> Result<Vec<ParsedTask>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut tasks: Vec<ParsedTask> = Vec::new();
    let mut current: Option<ParsedTask> = None;
    let mut current_field: Option<TaskField> = None;
    let mut in_tasks_block = false;
    let mut depth: i64 = 0;
    let mut saw_element = false;

    loop {
        match reader.read_event() {
            Err(e) => {
                return Err(parse_error(&e.to_string(), reader.buffer_position()));
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                depth += 1;
                saw_element = true;
                match e.name().as_ref() {
                    b"tasks" => in_tasks_block = true,
                    b"task" if in_tasks_block && current.is_none() => {
                        current = Some(ParsedTask::default());
                    }
                    tag => {
                        if current.is_some() {
                            current_field = TaskField::from_tag(tag);
                        }
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                saw_element = true;
                if e.name().as_ref() == b"task" && in_tasks_block && current.is_none() {
                    tasks.push(ParsedTask::default());
                }
            }
            Ok(Event::End(e)) => {
                depth -= 1;
                match e.name().as_ref() {
                    b"tasks" => in_tasks_block = false,
                    b"task" => {
                        if let Some(task) = current.take() {
                            tasks.push(task);
                        }
                    }
                    _ => current_field = None,
                }
            }
            Ok(Event::Text(t)) => {
                if let (Some(task), Some(field)) = (current.as_mut(), current_field) {
                    let text = t
                        .unescape()
                        .map_err(|e| parse_error(&e.to_string(), reader.buffer_position()))?;
                    assign(task, field, &text);
                }
            }
            Ok(Event::CData(t)) => {
                if let (Some(task), Some(field)) = (current.as_mut(), current_field) {
                    let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                    assign(task, field, &text);
                }
            }
            Ok(_) => {}
        }
    }

    if depth != 0 {
        return Err(parse_error("unclosed element", reader.buffer_position()));
    }
    if !saw_element {
        return Err(parse_error("no root element", reader.buffer_position()));
    }

    Ok(tasks)
}

fn assign(task: &mut ParsedTask, field: TaskField, text: &str) {
    let slot = match field {
        TaskField::Title => &mut task.title,
        TaskField::Description => &mut task.description,
        TaskField::Category => &mut task.category,
        TaskField::Priority => &mut task.priority,
        TaskField::Status => &mut task.status,
        TaskField::DueDate => &mut task.due_date,
    };
    slot.push_str(text);
}

fn parse_error(message: &str, position: u64) -> XmlError {
    XmlError::Parse {
        message: format!("{message} (at byte {position})"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;
    use taskmaster_core::{Priority, TaskFilters};
    use taskmaster_store::{CreateTaskOptions, TaskRepo, migrations, seed};

    const USER: i64 = 1;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        migrations::run_migrations(&conn).unwrap();
        seed::ensure_defaults(&conn).unwrap();
        conn
    }

    fn task_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM tasks", [], |r| r.get(0))
            .unwrap()
    }

    fn doc(tasks: &str) -> String {
        format!("<taskmaster><tasks>{tasks}</tasks></taskmaster>")
    }

    #[test]
    fn imports_valid_and_skips_empty_title() {
        let mut conn = setup();
        let xml = doc(
            "<task><title>Buy milk</title><priority>low</priority></task>\
             <task><title>   </title></task>",
        );

        let summary = import_tasks(&mut conn, USER, &xml).unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total, 2);

        let rows = TaskRepo::list(&conn, USER, &TaskFilters::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Buy milk");
        assert_eq!(rows[0].priority, "low");
    }

    #[test]
    fn defaults_applied_for_missing_fields() {
        let mut conn = setup();
        let xml = doc("<task><title>Bare minimum</title></task>");

        import_tasks(&mut conn, USER, &xml).unwrap();
        let task = &TaskRepo::list(&conn, USER, &TaskFilters::default()).unwrap()[0];

        assert_eq!(task.priority, "medium");
        assert_eq!(task.status, "pending");
        assert!(task.due_date.is_none());
        assert!(task.description.is_none());
        // Empty category resolves to "personal".
        assert_eq!(task.category.as_deref(), Some("personal"));
    }

    #[test]
    fn status_and_due_date_taken_verbatim() {
        let mut conn = setup();
        let xml = doc(
            "<task><title>Done already</title><status>completed</status>\
             <due_date>2024-06-01</due_date></task>",
        );

        import_tasks(&mut conn, USER, &xml).unwrap();
        let task = &TaskRepo::list(&conn, USER, &TaskFilters::default()).unwrap()[0];

        assert_eq!(task.status, "completed");
        assert_eq!(task.due_date.as_deref(), Some("2024-06-01"));
        // Completed on import means completed_at is stamped.
        assert!(task.completed_at.is_some());
    }

    #[test]
    fn pending_import_leaves_completed_at_null() {
        let mut conn = setup();
        let xml = doc("<task><title>Open task</title><status>pending</status></task>");

        import_tasks(&mut conn, USER, &xml).unwrap();
        let task = &TaskRepo::list(&conn, USER, &TaskFilters::default()).unwrap()[0];
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn unmatched_category_stores_null() {
        let mut conn = setup();
        let xml = doc("<task><title>Oddball</title><category>errands</category></task>");

        import_tasks(&mut conn, USER, &xml).unwrap();
        let task = &TaskRepo::list(&conn, USER, &TaskFilters::default()).unwrap()[0];
        assert!(task.category_id.is_none());
    }

    #[test]
    fn known_category_resolves() {
        let mut conn = setup();
        let xml = doc("<task><title>Groceries</title><category>shopping</category></task>");

        import_tasks(&mut conn, USER, &xml).unwrap();
        let task = &TaskRepo::list(&conn, USER, &TaskFilters::default()).unwrap()[0];
        assert_eq!(task.category.as_deref(), Some("shopping"));
    }

    #[test]
    fn entities_are_unescaped() {
        let mut conn = setup();
        let xml = doc("<task><title>Fish &amp; chips &lt;tonight&gt;</title></task>");

        import_tasks(&mut conn, USER, &xml).unwrap();
        let task = &TaskRepo::list(&conn, USER, &TaskFilters::default()).unwrap()[0];
        assert_eq!(task.title, "Fish & chips <tonight>");
    }

    #[test]
    fn malformed_xml_is_rejected_before_any_write() {
        let mut conn = setup();
        for bad in [
            "",
            "not xml at all",
            "<taskmaster><tasks>",
            "<taskmaster><tasks><task><title>Oops</title></task>",
            "<a></b>",
        ] {
            let err = import_tasks(&mut conn, USER, bad).unwrap_err();
            assert!(err.is_parse(), "expected parse error for {bad:?}, got {err}");
            assert_eq!(task_count(&conn), 0, "store must be untouched for {bad:?}");
        }
    }

    #[test]
    fn document_without_tasks_block_imports_nothing() {
        let mut conn = setup();
        let summary = import_tasks(&mut conn, USER, "<taskmaster></taskmaster>").unwrap();
        assert_eq!(summary.total, 0);
    }

    #[test]
    fn category_elements_outside_tasks_are_not_tasks() {
        let mut conn = setup();
        let xml = "<taskmaster><tasks></tasks><categories>\
                   <category><name>personal</name><color>#7c3aed</color><icon>x</icon></category>\
                   </categories></taskmaster>";
        let summary = import_tasks(&mut conn, USER, xml).unwrap();
        assert_eq!(summary.total, 0);
        assert_eq!(task_count(&conn), 0);
    }

    #[test]
    fn export_then_import_roundtrips() {
        let mut conn = setup();
        TaskRepo::create(
            &conn,
            USER,
            &CreateTaskOptions {
                title: "Buy milk",
                description: Some("2 liters"),
                category: Some("shopping"),
                priority: Some(Priority::Low),
                due_date: Some("2099-01-01"),
            },
        )
        .unwrap();
        let done = TaskRepo::create(
            &conn,
            USER,
            &CreateTaskOptions {
                title: "File report",
                description: None,
                category: Some("work"),
                priority: Some(Priority::High),
                due_date: None,
            },
        )
        .unwrap();
        TaskRepo::toggle_complete(&conn, done.id, USER).unwrap();

        let xml = crate::export::export_tasks(&conn, USER).unwrap();

        // Wipe and re-import into the same (now empty) store.
        conn.execute("DELETE FROM tasks", []).unwrap();
        let summary = import_tasks(&mut conn, USER, &xml).unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 0);

        let mut rows = TaskRepo::list(&conn, USER, &TaskFilters::default()).unwrap();
        rows.sort_by(|a, b| a.title.cmp(&b.title));

        assert_eq!(rows[0].title, "File report");
        assert_eq!(rows[0].priority, "high");
        assert_eq!(rows[0].status, "completed");
        assert!(rows[0].due_date.is_none());
        assert_eq!(rows[0].category.as_deref(), Some("work"));

        assert_eq!(rows[1].title, "Buy milk");
        assert_eq!(rows[1].priority, "low");
        assert_eq!(rows[1].status, "pending");
        assert_eq!(rows[1].due_date.as_deref(), Some("2099-01-01"));
        assert_eq!(rows[1].category.as_deref(), Some("shopping"));
    }

    #[test]
    fn self_closing_task_counts_as_skipped() {
        let mut conn = setup();
        let summary = import_tasks(&mut conn, USER, &doc("<task/>")).unwrap();
        assert_eq!(summary.imported, 0);
        assert_eq!(summary.skipped, 1);
    }
}
