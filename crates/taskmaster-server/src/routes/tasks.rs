//! Task routes — CRUD, toggle, clear, stats, deadlines.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use taskmaster_core::{
    Priority, SortBy, StatusFilter, TaskDraft, TaskFilters, status, validate_task_input,
};
use taskmaster_store::{CreateTaskOptions, TaskRepo, UpdateTaskParams};

use crate::DEFAULT_USER_ID;
use crate::errors::ApiError;
use crate::response;
use crate::server::AppState;

/// Raw list-query parameters as they arrive on the query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    status: Option<String>,
    category: Option<String>,
    priority: Option<String>,
    search: Option<String>,
    sort_by: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl ListQuery {
    /// Coerce raw strings into the typed filter options. Absent, empty, and
    /// `"all"` values mean "no filter"; invalid values are never an error.
    fn to_filters(&self) -> TaskFilters {
        TaskFilters {
            status: StatusFilter::from_param(self.status.as_deref()),
            category: self
                .category
                .as_deref()
                .filter(|c| !c.is_empty() && *c != "all")
                .map(str::to_string),
            priority: Priority::from_param(self.priority.as_deref()),
            search: self
                .search
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            sort_by: SortBy::from_param(self.sort_by.as_deref()),
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// JSON body for task creation. `dueDate` is accepted as an alias because
/// the browser client sends camelCase.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    priority: Option<String>,
    #[serde(alias = "dueDate")]
    due_date: Option<String>,
}

/// JSON body for partial update. Absent fields are left unchanged; an empty
/// `due_date` clears the date.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskBody {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    priority: Option<String>,
    #[serde(alias = "dueDate")]
    due_date: Option<String>,
    status: Option<String>,
}

/// `GET /api/tasks`
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let conn = state.conn()?;
    let filters = query.to_filters();
    let tasks = TaskRepo::list(&conn, DEFAULT_USER_ID, &filters)
        .map_err(|e| ApiError::storage(&state.config, e))?;
    let stats = TaskRepo::stats(&conn, DEFAULT_USER_ID)
        .map_err(|e| ApiError::storage(&state.config, e))?;

    Ok(response::success(
        "Success",
        json!({ "tasks": tasks, "stats": stats, "filters": filters }),
    ))
}

/// `GET /api/tasks/{id}`
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let conn = state.conn()?;
    let task = TaskRepo::get(&conn, id, DEFAULT_USER_ID)
        .map_err(|e| ApiError::storage(&state.config, e))?
        .ok_or_else(ApiError::task_not_found)?;
    Ok(response::success("Success", task))
}

/// `POST /api/tasks`
pub async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let draft = TaskDraft {
        title: body.title.as_deref(),
        description: body.description.as_deref(),
        category: body.category.as_deref(),
        priority: body.priority.as_deref(),
        due_date: body.due_date.as_deref(),
    };
    let errors = validate_task_input(&draft, true);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let conn = state.conn()?;
    let task = TaskRepo::create(
        &conn,
        DEFAULT_USER_ID,
        &CreateTaskOptions {
            title: body.title.as_deref().unwrap_or_default(),
            description: body.description.as_deref(),
            category: body.category.as_deref(),
            priority: body.priority.as_deref().and_then(Priority::parse),
            due_date: body.due_date.as_deref(),
        },
    )
    .map_err(|e| ApiError::storage(&state.config, e))?;

    Ok(response::created("Task created successfully", task))
}

/// `PUT /api/tasks/{id}`
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let draft = TaskDraft {
        title: body.title.as_deref(),
        description: body.description.as_deref(),
        category: body.category.as_deref(),
        priority: body.priority.as_deref(),
        due_date: body.due_date.as_deref(),
    };
    let errors = validate_task_input(&draft, false);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let params = UpdateTaskParams {
        title: body.title,
        description: body.description,
        category: body.category,
        priority: body.priority.as_deref().and_then(Priority::parse),
        due_date: body.due_date.map(|s| (!s.is_empty()).then_some(s)),
        status: body.status,
    };

    let conn = state.conn()?;
    let task = TaskRepo::update(&conn, id, DEFAULT_USER_ID, &params)
        .map_err(|e| ApiError::storage(&state.config, e))?
        .ok_or_else(ApiError::task_not_found)?;

    Ok(response::success("Task updated successfully", task))
}

/// `PATCH /api/tasks/{id}` — flip between pending and completed.
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let conn = state.conn()?;
    let task = TaskRepo::toggle_complete(&conn, id, DEFAULT_USER_ID)
        .map_err(|e| ApiError::storage(&state.config, e))?
        .ok_or_else(ApiError::task_not_found)?;

    let message = if status::is_completed(&task.status) {
        "Task completed successfully"
    } else {
        "Task restored successfully"
    };
    Ok(response::success(message, task))
}

/// `DELETE /api/tasks/{id}` — soft delete.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let conn = state.conn()?;
    let deleted = TaskRepo::soft_delete(&conn, id, DEFAULT_USER_ID)
        .map_err(|e| ApiError::storage(&state.config, e))?;
    if !deleted {
        return Err(ApiError::task_not_found());
    }
    Ok(response::success("Task deleted successfully", json!(null)))
}

/// `DELETE /api/tasks/completed` — clear all completed tasks.
pub async fn clear_completed(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let conn = state.conn()?;
    let count = TaskRepo::clear_completed(&conn, DEFAULT_USER_ID)
        .map_err(|e| ApiError::storage(&state.config, e))?;
    Ok(response::success(
        &format!("{count} completed tasks cleared"),
        json!({ "deleted_count": count }),
    ))
}

/// `GET /api/stats` — aggregate counters plus per-category counts.
pub async fn stats(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let conn = state.conn()?;
    let stats = TaskRepo::stats(&conn, DEFAULT_USER_ID)
        .map_err(|e| ApiError::storage(&state.config, e))?;
    let categories = TaskRepo::category_counts(&conn, DEFAULT_USER_ID)
        .map_err(|e| ApiError::storage(&state.config, e))?;

    Ok(response::success(
        "Success",
        json!({ "stats": stats, "categories": categories }),
    ))
}

/// Query parameters for the deadlines view.
#[derive(Debug, Default, Deserialize)]
pub struct DeadlineQuery {
    limit: Option<i64>,
}

/// `GET /api/deadlines`
pub async fn deadlines(
    State(state): State<AppState>,
    Query(query): Query<DeadlineQuery>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let conn = state.conn()?;
    let rows = TaskRepo::upcoming_deadlines(&conn, DEFAULT_USER_ID, query.limit.unwrap_or(5))
        .map_err(|e| ApiError::storage(&state.config, e))?;
    Ok(response::success("Success", rows))
}
