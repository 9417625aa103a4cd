/// Task endpoints, all owner-scoped
///
/// Every route carries a user id in the path; the ownership check
/// runs before any store call. Update and delete additionally scope
/// the SQL to the owner, so a task id belonging to someone else
/// behaves exactly like a nonexistent one (404, not 403; existence
/// of other users' task ids is never confirmed).
///
/// # Endpoints
///
/// - `POST   /tasks/user/:user_id` - create a task
/// - `GET    /tasks/user/:user_id` - list the user's tasks
/// - `PUT    /tasks/user/:user_id/task/:task_id` - update a task
/// - `DELETE /tasks/user/:user_id/task/:task_id` - delete a task

use crate::{
    app::{AppState, CurrentUser},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::authorization::require_owner,
    models::task::{CreateTask, Task},
};
use validator::Validate;

/// Task create/update payload
#[derive(Debug, Deserialize, Validate)]
pub struct TaskPayload {
    /// Task title
    #[validate(length(min = 1, max = 30, message = "Title must be 1-30 characters"))]
    pub title: String,

    /// Optional description; omitting it on update clears the field
    #[validate(length(max = 50, message = "Description must be at most 50 characters"))]
    pub description: Option<String>,
}

/// Public view of a task
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskRead {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskRead {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            created_at: task.created_at,
        }
    }
}

/// Deletion acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// Create a task for the path user
///
/// # Errors
///
/// - `401 Unauthorized`: missing/invalid token
/// - `403 Forbidden`: path user id is not the authenticated user
/// - `422 Unprocessable Entity`: title/description limits violated
pub async fn create_task(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<TaskPayload>,
) -> ApiResult<Json<TaskRead>> {
    require_owner(&user, user_id)?;
    req.validate()?;

    let task = Task::create(
        &state.db,
        user_id,
        CreateTask {
            title: req.title,
            description: req.description,
        },
    )
    .await?;

    tracing::debug!(task_id = task.id, user_id, "Task created");

    Ok(Json(task.into()))
}

/// List all tasks owned by the path user
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<TaskRead>>> {
    require_owner(&user, user_id)?;

    let tasks = Task::list_by_owner(&state.db, user_id).await?;

    Ok(Json(tasks.into_iter().map(TaskRead::from).collect()))
}

/// Update a task's title and description
///
/// Overwrites both fields; an omitted description clears it.
///
/// # Errors
///
/// - `404 Not Found`: no task with this id is owned by the path user
///   (including ids that belong to someone else)
/// - `401` / `403` / `422` as for creation
pub async fn update_task(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(i64, i64)>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<TaskPayload>,
) -> ApiResult<Json<TaskRead>> {
    require_owner(&user, user_id)?;
    req.validate()?;

    let task = Task::update(&state.db, user_id, task_id, req.title, req.description)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task.into()))
}

/// Delete a task
///
/// Deleting an absent task is a no-op and still returns 200.
pub async fn delete_task(
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(i64, i64)>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<DetailResponse>> {
    require_owner(&user, user_id)?;

    Task::delete(&state.db, user_id, task_id).await?;

    tracing::debug!(task_id, user_id, "Task deleted");

    Ok(Json(DetailResponse {
        detail: "Task deleted".to_string(),
    }))
}
