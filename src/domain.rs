//! Domain entities for task lists and their tasks.
//!
//! # Design
//! A `Task` stores its parent as `task_list_id` rather than holding a
//! reference to the owning `TaskList`, so the parent↔child relation never
//! forms a reference cycle; the repository resolves the id when a list's
//! task collection is needed. Partial updates travel as patch types whose
//! `Some` fields overwrite the stored entity and whose `None` fields leave
//! it untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Priority of a task. Defaults to `Medium` when absent on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Lifecycle status of a task. Defaults to `Open` when absent on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,
    InProgress,
    Closed,
}

/// A list owning an ordered collection of tasks.
#[derive(Debug, Clone)]
pub struct TaskList {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// `None` when the collection was never loaded or supplied, distinct
    /// from `Some(vec![])` (a list known to have zero tasks).
    pub tasks: Option<Vec<Task>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single task. Always belongs to exactly one list once persisted.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// `None` until the service attaches the task to its owning list.
    pub task_list_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a task list. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct TaskListPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Partial update for a task. The parent list is never part of a patch.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}
