//! XML export — serialize a user's tasks and categories.
//!
//! Produces the `<taskmaster>` document: a `metadata` block, one `<task>`
//! element per live task (soft-deleted excluded, newest first), and the
//! user's categories in sort order. Absent optional values serialize as
//! empty elements, not omitted ones, so the shape is fixed.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rusqlite::Connection;
use taskmaster_core::TaskFilters;
use taskmaster_store::{CategoryRepo, TaskRepo};

use crate::errors::{Result, XmlError};
use crate::FORMAT_VERSION;

/// Serialize all live tasks and categories for `user_id` into an indented
/// XML document.
pub fn export_tasks(conn: &Connection, user_id: i64) -> Result<String> {
    let tasks = TaskRepo::list(conn, user_id, &TaskFilters::default())?;
    let categories = CategoryRepo::list(conn, user_id)?;
    let exported_at = chrono::Utc::now().to_rfc3339();

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    open(&mut writer, "taskmaster")?;

    open(&mut writer, "metadata")?;
    text_element(&mut writer, "exported_at", &exported_at)?;
    text_element(&mut writer, "version", FORMAT_VERSION)?;
    text_element(&mut writer, "total_tasks", &tasks.len().to_string())?;
    text_element(&mut writer, "user_id", &user_id.to_string())?;
    close(&mut writer, "metadata")?;

    open(&mut writer, "tasks")?;
    for task in &tasks {
        let mut start = BytesStart::new("task");
        start.push_attribute(("id", task.id.to_string().as_str()));
        write_event(&mut writer, Event::Start(start))?;

        text_element(&mut writer, "title", &task.title)?;
        text_element(&mut writer, "description", task.description.as_deref().unwrap_or(""))?;
        text_element(&mut writer, "category", task.category.as_deref().unwrap_or("personal"))?;
        text_element(&mut writer, "priority", &task.priority)?;
        text_element(&mut writer, "status", &task.status)?;
        text_element(&mut writer, "due_date", task.due_date.as_deref().unwrap_or(""))?;
        text_element(&mut writer, "created_at", &task.created_at)?;
        text_element(&mut writer, "completed_at", task.completed_at.as_deref().unwrap_or(""))?;

        close(&mut writer, "task")?;
    }
    close(&mut writer, "tasks")?;

    open(&mut writer, "categories")?;
    for category in &categories {
        open(&mut writer, "category")?;
        text_element(&mut writer, "name", &category.name)?;
        text_element(&mut writer, "color", &category.color)?;
        text_element(&mut writer, "icon", &category.icon)?;
        close(&mut writer, "category")?;
    }
    close(&mut writer, "categories")?;

    close(&mut writer, "taskmaster")?;

    String::from_utf8(writer.into_inner()).map_err(|e| XmlError::Write {
        message: e.to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal
// ─────────────────────────────────────────────────────────────────────────────

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(|e| XmlError::Write {
        message: e.to_string(),
    })
}

fn open(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new(tag)))
}

fn close(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<()> {
    write_event(writer, Event::End(BytesEnd::new(tag)))
}

/// `<tag>text</tag>`, with the text escaped by the writer.
///
/// The text event is written even when empty — it keeps the indenting
/// writer from line-breaking the element, so absent values render as
/// `<tag></tag>`.
fn text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    open(writer, tag)?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    close(writer, tag)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
