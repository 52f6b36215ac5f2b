use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::user::UserId;

/// Tag stored when no model is available to suggest one.
pub const DEFAULT_TAG: &str = "General";

/// Store-generated task identifier.
pub type TaskId = i64;

/// Input structure for creating or updating a task.
///
/// Missing fields deserialize as empty strings so that they fail validation with a
/// JSON `400` rather than an extractor error.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Must not be empty.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub title: String,

    /// The description of the task. Must not be empty.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub description: String,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    /// Owner of the task. Set at creation and never changed.
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    /// Short category label computed from the description at creation.
    pub tag: String,
    pub created_at: DateTime<Utc>,
}

/// A task that has not been persisted yet; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub tag: String,
}

impl NewTask {
    pub fn new(input: TaskInput, user_id: UserId, tag: String) -> Self {
        Self {
            user_id,
            title: input.title,
            description: input.description,
            tag,
        }
    }
}

/// Parses the trailing `/api/tasks/{id}` segment.
///
/// Returns `None` for anything that is not an integer id; callers treat that as an
/// id that matches no row.
pub fn parse_task_id(raw: &str) -> Option<TaskId> {
    raw.trim().parse().ok()
}

/// Task id named by the last `/`-separated segment of a path under `/api/tasks/`.
///
/// `5`, `archive/5` and `5/` give `Some(5)`, `Some(5)` and `None` respectively.
pub fn task_id_from_path(path: &str) -> Option<TaskId> {
    path.rsplit('/').next().and_then(parse_task_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_validation() {
        let valid_input = TaskInput {
            title: "Buy milk".to_string(),
            description: "Get 2% milk from the store".to_string(),
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = TaskInput {
            title: "".to_string(),
            description: "Valid Description".to_string(),
        };
        assert!(empty_title.validate().is_err());

        let empty_description = TaskInput {
            title: "Valid title".to_string(),
            description: "".to_string(),
        };
        assert!(empty_description.validate().is_err());
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let input: TaskInput = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(input.description, "");
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_new_task_from_input() {
        let input = TaskInput {
            title: "Test Task".to_string(),
            description: "Test Description".to_string(),
        };

        let task = NewTask::new(input, 1, "Testing".to_string());
        assert_eq!(task.title, "Test Task");
        assert_eq!(task.user_id, 1);
        assert_eq!(task.tag, "Testing");
    }

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("42"), Some(42));
        assert_eq!(parse_task_id("abc"), None);
        assert_eq!(parse_task_id(""), None);
    }

    #[test]
    fn test_task_id_from_path_uses_last_segment() {
        assert_eq!(task_id_from_path("7"), Some(7));
        assert_eq!(task_id_from_path("archive/7"), Some(7));
        assert_eq!(task_id_from_path("7/"), None);
        assert_eq!(task_id_from_path(""), None);
    }
}
