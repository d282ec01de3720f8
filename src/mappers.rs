//! Pure entity⇄DTO conversions.
//!
//! # Design
//! Plain functions grouped by entity, no trait objects — there is exactly one
//! mapping per direction. The computed fields live here: `toDTO` of a task
//! list derives `count` and the closed/total `progress` ratio during
//! conversion. A `None` task collection maps to `None` on the other side;
//! "never loaded" is not the same list as "known to be empty".

use chrono::Utc;
use uuid::Uuid;

/// Conversions for tasks.
pub mod task {
    use super::*;
    use crate::domain::{Task, TaskPatch, TaskPriority, TaskStatus};
    use crate::dto::{CreateTaskDto, TaskDto, UpdateTaskDto};

    /// Builds a fresh task from a create payload: new id, no parent list
    /// (the service attaches it), priority and status defaulted. Timestamps
    /// are placeholders; the service re-stamps them on persist. The title is
    /// validated upstream; an unvalidated `None` maps to the empty string.
    pub fn from_create_dto(dto: CreateTaskDto) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: dto.title.unwrap_or_default(),
            description: dto.description,
            due_date: dto.due_date,
            priority: dto.priority.unwrap_or(TaskPriority::Medium),
            status: dto.status.unwrap_or(TaskStatus::Open),
            task_list_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Turns an update payload into a field-level overlay.
    pub fn from_update_dto(dto: UpdateTaskDto) -> TaskPatch {
        TaskPatch {
            title: dto.title,
            description: dto.description,
            due_date: dto.due_date,
            priority: dto.priority,
            status: dto.status,
        }
    }

    /// Full read-DTO to entity. Copies every scalar field but never attaches
    /// a parent list; that is the service's job.
    pub fn from_dto(dto: TaskDto) -> Task {
        let now = Utc::now();
        Task {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            due_date: dto.due_date,
            priority: dto.priority,
            status: dto.status,
            task_list_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_dto(task: &Task) -> TaskDto {
        TaskDto {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: task.priority,
            status: task.status,
            task_list_id: task.task_list_id,
        }
    }
}

/// Conversions for task lists.
pub mod task_list {
    use super::*;
    use crate::domain::{TaskList, TaskListPatch, TaskStatus};
    use crate::dto::{CreateTaskListDto, TaskListDto, UpdateTaskListDto};

    pub fn from_create_dto(dto: CreateTaskListDto) -> TaskList {
        let now = Utc::now();
        TaskList {
            id: Uuid::new_v4(),
            title: dto.title.unwrap_or_default(),
            description: dto.description,
            tasks: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copies id/title/description and maps any embedded tasks. A `null`
    /// task collection on the DTO stays `None` on the entity.
    pub fn from_dto(dto: TaskListDto) -> TaskList {
        let now = Utc::now();
        TaskList {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            tasks: dto
                .tasks
                .map(|tasks| tasks.into_iter().map(task::from_dto).collect()),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_update_dto(dto: UpdateTaskListDto) -> TaskListPatch {
        TaskListPatch {
            title: dto.title,
            description: dto.description,
        }
    }

    /// Entity to read DTO, deriving the computed fields: `count` is the size
    /// of the task collection (0 when absent) and `progress` is
    /// closed / total in [0, 1], `None` when the list has no tasks.
    pub fn to_dto(list: &TaskList) -> TaskListDto {
        let count = list.tasks.as_ref().map_or(0, Vec::len);
        let progress = match &list.tasks {
            Some(tasks) if !tasks.is_empty() => {
                let closed = tasks
                    .iter()
                    .filter(|t| t.status == TaskStatus::Closed)
                    .count();
                Some(closed as f64 / tasks.len() as f64)
            }
            _ => None,
        };
        TaskListDto {
            id: list.id,
            title: list.title.clone(),
            description: list.description.clone(),
            count,
            progress,
            tasks: list
                .tasks
                .as_ref()
                .map(|tasks| tasks.iter().map(task::to_dto).collect()),
        }
    }
}
