//! Wire DTOs and their validation.
//!
//! # Design
//! Read, create, and update variants are separate types: create payloads
//! require a title, update payloads are all-`Option` overlays where an
//! omitted field means "leave unchanged" (an explicit empty string clears a
//! description). Read DTOs serialize every field, nulls included, so absent
//! collections stay distinguishable from empty ones on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{TaskPriority, TaskStatus};
use crate::error::ApiError;

pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// A task as returned by the API. Carries the owning list's id, `null` when
/// the task is not attached to a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub task_list_id: Option<Uuid>,
}

/// A task list as returned by the API, with the computed `count` and
/// `progress` fields. `progress` is the closed/total ratio in [0, 1] and is
/// `null` when the list has no tasks. A `null` `tasks` collection means the
/// collection was not loaded, which is distinct from an empty one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub tasks: Option<Vec<TaskDto>>,
}

/// Request payload for creating a task list. The title is required, but its
/// absence is reported by `validate` (a 400 like a blank title), not by the
/// deserializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskListDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request payload for updating a task list. Omitted fields are left
/// unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskListDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request payload for creating a task. Priority and status fall back to
/// `MEDIUM` and `OPEN` when absent; a missing title fails `validate`, the
/// same way a blank one does.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Request payload for updating a task. Omitted fields are left unchanged;
/// the parent list can never be moved through an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::Validation {
            field: "title",
            message: "must not be blank",
        });
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ApiError::Validation {
            field: "title",
            message: "must not exceed 255 characters",
        });
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ApiError> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(ApiError::Validation {
            field: "description",
            message: "must not exceed 1000 characters",
        });
    }
    Ok(())
}

impl CreateTaskListDto {
    /// A missing title is indistinguishable from a blank one.
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_title(self.title.as_deref().unwrap_or(""))?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

impl UpdateTaskListDto {
    /// Only present fields are validated; an empty update is legal.
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

impl CreateTaskDto {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_title(self.title.as_deref().unwrap_or(""))?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

impl UpdateTaskDto {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_task_missing_title_deserializes_but_fails_validation() {
        let dto: CreateTaskDto = serde_json::from_str(r#"{"status":"OPEN"}"#).unwrap();
        assert!(dto.title.is_none());
        let err = dto.validate().unwrap_err();
        assert_eq!(err.to_string(), "title: must not be blank");
    }

    #[test]
    fn create_task_list_missing_title_fails_validation() {
        let dto: CreateTaskListDto = serde_json::from_str(r#"{"description":"no title"}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn create_task_optional_fields_default_to_none() {
        let dto: CreateTaskDto = serde_json::from_str(r#"{"title":"Milk"}"#).unwrap();
        assert_eq!(dto.title.as_deref(), Some("Milk"));
        assert!(dto.description.is_none());
        assert!(dto.due_date.is_none());
        assert!(dto.priority.is_none());
        assert!(dto.status.is_none());
    }

    #[test]
    fn update_task_all_fields_optional() {
        let dto: UpdateTaskDto = serde_json::from_str("{}").unwrap();
        assert!(dto.title.is_none());
        assert!(dto.description.is_none());
        assert!(dto.due_date.is_none());
        assert!(dto.priority.is_none());
        assert!(dto.status.is_none());
    }

    #[test]
    fn update_task_partial_fields() {
        let dto: UpdateTaskDto = serde_json::from_str(r#"{"status":"CLOSED"}"#).unwrap();
        assert_eq!(dto.status, Some(crate::domain::TaskStatus::Closed));
        assert!(dto.title.is_none());
    }

    #[test]
    fn blank_title_fails_validation() {
        let dto = CreateTaskListDto {
            title: Some("   ".to_string()),
            description: None,
        };
        let err = dto.validate().unwrap_err();
        assert_eq!(err.to_string(), "title: must not be blank");
    }

    #[test]
    fn empty_title_fails_validation() {
        let dto = CreateTaskListDto {
            title: Some(String::new()),
            description: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn title_at_max_length_passes() {
        let dto = CreateTaskListDto {
            title: Some("a".repeat(TITLE_MAX_LEN)),
            description: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn title_over_max_length_fails() {
        let dto = CreateTaskListDto {
            title: Some("a".repeat(TITLE_MAX_LEN + 1)),
            description: None,
        };
        let err = dto.validate().unwrap_err();
        assert_eq!(err.to_string(), "title: must not exceed 255 characters");
    }

    #[test]
    fn description_over_max_length_fails() {
        let dto = CreateTaskDto {
            title: Some("ok".to_string()),
            description: Some("d".repeat(DESCRIPTION_MAX_LEN + 1)),
            due_date: None,
            priority: None,
            status: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn update_validates_only_present_fields() {
        // No title at all: nothing to check.
        let dto = UpdateTaskDto::default();
        assert!(dto.validate().is_ok());

        // A present blank title is still rejected.
        let dto = UpdateTaskDto {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn update_description_may_be_cleared_to_empty() {
        let dto = UpdateTaskDto {
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn task_list_dto_serializes_null_progress_and_tasks() {
        let dto = TaskListDto {
            id: Uuid::nil(),
            title: "Empty".to_string(),
            description: None,
            count: 0,
            progress: None,
            tasks: None,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["count"], 0);
        assert_eq!(json["progress"], serde_json::Value::Null);
        assert_eq!(json["tasks"], serde_json::Value::Null);
    }
}
