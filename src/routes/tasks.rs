use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{task_id_from_path, NewTask, TaskInput},
    state::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

pub const MISSING_FIELDS_MESSAGE: &str = "Title and description required";

/// Response to a successful task creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskCreated {
    pub message: String,
    /// The tag computed from the description and stored with the task.
    pub tag: String,
}

fn validate_input(input: &TaskInput) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|_| AppError::BadRequest(MISSING_FIELDS_MESSAGE.into()))
}

/// Retrieves every task owned by the authenticated user.
///
/// Tasks are ordered by creation date in descending order. There is no paging.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid session token.
#[get("")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list_tasks(user_id.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The tag is always computed from the description before the row is stored,
/// independently of any preview the client may have shown.
///
/// ## Request Body:
/// - `title`: required, non-empty.
/// - `description`: required, non-empty.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task created", "tag": ...}`.
/// - `400 Bad Request`: If either field is missing or empty. Nothing is stored.
/// - `401 Unauthorized`: If the request lacks a valid session token.
/// - `500 Internal Server Error`: Database or model failure.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    user_id: AuthenticatedUserId,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    validate_input(&task_data)?;

    let tag = state.ai.tag_for_task(&task_data.description).await?;
    let task = state
        .tasks
        .create_task(NewTask::new(task_data.into_inner(), user_id.0, tag))
        .await?;

    log::info!("User {} created task {} tagged {:?}", user_id.0, task.id, task.tag);
    Ok(HttpResponse::Ok().json(TaskCreated {
        message: "Task created".to_string(),
        tag: task.tag,
    }))
}

/// Overwrites the title and description of a task owned by the caller.
///
/// The task id is the last segment of the path. Fields are written as given, so
/// missing or empty values blank the column. Reports success even when no row
/// matched (unknown id or another user's task); the affected-row count is only logged.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task updated"}`.
/// - `401 Unauthorized`: If the request lacks a valid session token.
#[put("/{tail:.*}")]
pub async fn update_task(
    state: web::Data<AppState>,
    user_id: AuthenticatedUserId,
    task_id: web::Path<String>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let affected = match task_id_from_path(&task_id) {
        Some(id) => {
            state
                .tasks
                .update_task(id, user_id.0, &task_data.title, &task_data.description)
                .await?
        }
        None => 0,
    };

    log::info!(
        "User {} updated task {}: {} row(s) affected",
        user_id.0,
        task_id.as_str(),
        affected
    );
    Ok(HttpResponse::Ok().json(json!({ "message": "Task updated" })))
}

/// Deletes a task owned by the caller.
///
/// Like updates, the id is the last path segment and this reports success whether
/// or not a row was removed.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task deleted"}`.
/// - `401 Unauthorized`: If the request lacks a valid session token.
#[delete("/{tail:.*}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    user_id: AuthenticatedUserId,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let affected = match task_id_from_path(&task_id) {
        Some(id) => state.tasks.delete_task(id, user_id.0).await?,
        None => 0,
    };

    log::info!(
        "User {} deleted task {}: {} row(s) affected",
        user_id.0,
        task_id.as_str(),
        affected
    );
    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_input_validation_maps_to_bad_request() {
        let invalid_input_empty_title = TaskInput {
            title: "".to_string(),
            description: "Test Description".to_string(),
        };
        assert_eq!(
            validate_input(&invalid_input_empty_title),
            Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()))
        );

        let valid_input = TaskInput {
            title: "Valid Title".to_string(),
            description: "Test Description".to_string(),
        };
        assert!(validate_input(&valid_input).is_ok());
    }
}
