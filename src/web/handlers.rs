use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::AppState;
use super::errors::AppError;
use crate::models::{NewTask, Task, TaskPatch};

type ApiResult<T> = Result<T, AppError>;

/// GET /todos
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let db = state.db()?;
    Ok(Json(db.list_tasks()?))
}

/// POST /todos
pub async fn create_todo(
    State(state): State<AppState>,
    Json(body): Json<NewTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let db = state.db()?;
    let task = db.insert_task(&body.text, body.checked)?;
    tracing::debug!(id = %task.id, "created todo");
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /todos/{id}
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> ApiResult<Json<Task>> {
    if patch.is_empty() {
        return Err(AppError::Validation(
            "update needs at least one of: text, checked".to_string(),
        ));
    }
    let db = state.db()?;
    db.update_task(&id, &patch)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("todo not found: {id}")))
}

/// DELETE /todos/{id}
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let db = state.db()?;
    if db.delete_task(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("todo not found: {id}")))
    }
}
