//! Service layer orchestrating repository calls.
//!
//! # Design
//! Concrete structs built directly over their repository handles — no
//! container, no trait indirection. Absence is `None`/`false`, never an
//! error; the one hard failure is creating a task under a parent list that
//! does not resolve. Timestamp bookkeeping lives here: `created_at ==
//! updated_at` on create, updates bump `updated_at` and never touch
//! `created_at`.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Task, TaskList, TaskListPatch, TaskPatch};
use crate::error::ApiError;
use crate::repository::{TaskListRepository, TaskRepository};

#[derive(Debug, Clone)]
pub struct TaskListService {
    task_lists: TaskListRepository,
}

impl TaskListService {
    pub fn new(task_lists: TaskListRepository) -> Self {
        Self { task_lists }
    }

    /// All lists, in repository order.
    pub async fn list(&self) -> Vec<TaskList> {
        self.task_lists.find_all().await
    }

    pub async fn get(&self, id: Uuid) -> Option<TaskList> {
        self.task_lists.find_by_id(id).await
    }

    pub async fn create(&self, mut list: TaskList) -> TaskList {
        let now = Utc::now();
        list.created_at = now;
        list.updated_at = now;
        let created = self.task_lists.save(list).await;
        tracing::info!(id = %created.id, "created task list");
        created
    }

    /// Overlays the `Some` fields of the patch onto the stored list.
    /// Returns `None` when the id is unknown.
    pub async fn update(&self, id: Uuid, patch: TaskListPatch) -> Option<TaskList> {
        let mut existing = self.task_lists.find_by_id(id).await?;
        if let Some(title) = patch.title {
            existing.title = title;
        }
        if let Some(description) = patch.description {
            existing.description = Some(description);
        }
        existing.updated_at = Utc::now();
        let updated = self.task_lists.save(existing).await;
        tracing::info!(%id, "updated task list");
        Some(updated)
    }

    /// Deletes the list and, by cascade, all its tasks. False when absent.
    pub async fn delete(&self, id: Uuid) -> bool {
        let deleted = self.task_lists.delete_by_id(id).await;
        if deleted {
            tracing::info!(%id, "deleted task list and its tasks");
        }
        deleted
    }
}

#[derive(Debug, Clone)]
pub struct TaskService {
    tasks: TaskRepository,
    task_lists: TaskListRepository,
}

impl TaskService {
    pub fn new(tasks: TaskRepository, task_lists: TaskListRepository) -> Self {
        Self { tasks, task_lists }
    }

    /// Tasks under the given list. An unknown parent yields an empty vec,
    /// not an error: the scoped query naturally returns nothing.
    pub async fn list_by_task_list(&self, task_list_id: Uuid) -> Vec<Task> {
        self.tasks.find_by_task_list_id(task_list_id).await
    }

    /// Compound-key lookup: the task must exist AND belong to the given
    /// list. A valid task id under a different parent yields `None`.
    pub async fn get(&self, task_list_id: Uuid, task_id: Uuid) -> Option<Task> {
        self.tasks
            .find_by_id_and_task_list_id(task_id, task_list_id)
            .await
    }

    /// Attaches the parent list and persists. Fails when the parent id does
    /// not resolve; storage failures would propagate unchanged.
    pub async fn create(&self, task_list_id: Uuid, mut task: Task) -> Result<Task, ApiError> {
        if !self.task_lists.exists_by_id(task_list_id).await {
            return Err(ApiError::MissingParentList(task_list_id));
        }
        let now = Utc::now();
        task.task_list_id = Some(task_list_id);
        task.created_at = now;
        task.updated_at = now;
        let created = self.tasks.save(task).await;
        tracing::info!(id = %created.id, %task_list_id, "created task");
        Ok(created)
    }

    /// Overlays the `Some` fields of the patch onto the stored task. The
    /// parent-list reference is never touched. `None` when the id is unknown.
    pub async fn update(&self, task_id: Uuid, patch: TaskPatch) -> Option<Task> {
        let mut existing = self.tasks.find_by_id(task_id).await?;
        if let Some(title) = patch.title {
            existing.title = title;
        }
        if let Some(description) = patch.description {
            existing.description = Some(description);
        }
        if let Some(due_date) = patch.due_date {
            existing.due_date = Some(due_date);
        }
        if let Some(priority) = patch.priority {
            existing.priority = priority;
        }
        if let Some(status) = patch.status {
            existing.status = status;
        }
        existing.updated_at = Utc::now();
        let updated = self.tasks.save(existing).await;
        tracing::info!(%task_id, "updated task");
        Some(updated)
    }

    /// Compound-key delete: false when the task is absent or belongs to a
    /// different list.
    pub async fn delete(&self, task_list_id: Uuid, task_id: Uuid) -> bool {
        let deleted = self
            .tasks
            .delete_by_id_and_task_list_id(task_id, task_list_id)
            .await;
        if deleted {
            tracing::info!(%task_id, %task_list_id, "deleted task");
        }
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskPriority, TaskStatus};
    use crate::repository;
    use std::time::Duration;

    fn services() -> (TaskListService, TaskService) {
        let (task_lists, tasks) = repository::in_memory();
        (
            TaskListService::new(task_lists.clone()),
            TaskService::new(tasks, task_lists),
        )
    }

    fn new_list(title: &str) -> TaskList {
        TaskList {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            tasks: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn new_task(title: &str) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            due_date: None,
            priority: TaskPriority::Medium,
            status: TaskStatus::Open,
            task_list_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_stamps_equal_timestamps() {
        let (lists, _) = services();
        let created = lists.create(new_list("Groceries")).await;
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn update_bumps_updated_at_and_preserves_created_at() {
        let (lists, _) = services();
        let created = lists.create(new_list("Groceries")).await;

        // Make sure the clock moves between create and update.
        std::thread::sleep(Duration::from_millis(2));

        let patch = TaskListPatch {
            title: Some("Weekly groceries".to_string()),
            description: None,
        };
        let updated = lists.update(created.id, patch).await.unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > updated.created_at);
        assert_eq!(updated.title, "Weekly groceries");
    }

    #[tokio::test]
    async fn update_leaves_absent_fields_unchanged() {
        let (lists, _) = services();
        let mut list = new_list("Groceries");
        list.description = Some("weekly".to_string());
        let created = lists.create(list).await;

        let patch = TaskListPatch {
            title: Some("Food".to_string()),
            description: None,
        };
        let updated = lists.update(created.id, patch).await.unwrap();
        assert_eq!(updated.description.as_deref(), Some("weekly"));
    }

    #[tokio::test]
    async fn update_unknown_list_returns_none() {
        let (lists, _) = services();
        let patch = TaskListPatch::default();
        assert!(lists.update(Uuid::new_v4(), patch).await.is_none());
    }

    #[tokio::test]
    async fn create_task_attaches_resolved_parent() {
        let (lists, tasks) = services();
        let parent = lists.create(new_list("Groceries")).await;
        let created = tasks.create(parent.id, new_task("Milk")).await.unwrap();
        assert_eq!(created.task_list_id, Some(parent.id));
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn create_task_under_unknown_parent_fails() {
        let (_, tasks) = services();
        let missing = Uuid::new_v4();
        let err = tasks.create(missing, new_task("Milk")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Task list not found with id: {missing}")
        );
    }

    #[tokio::test]
    async fn task_update_bumps_updated_at_and_preserves_created_at() {
        let (lists, tasks) = services();
        let parent = lists.create(new_list("Groceries")).await;
        let created = tasks.create(parent.id, new_task("Milk")).await.unwrap();

        std::thread::sleep(Duration::from_millis(2));

        let patch = TaskPatch {
            status: Some(TaskStatus::Closed),
            ..Default::default()
        };
        let updated = tasks.update(created.id, patch).await.unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > updated.created_at);
    }

    #[tokio::test]
    async fn task_update_keeps_parent_reference() {
        let (lists, tasks) = services();
        let parent = lists.create(new_list("Groceries")).await;
        let created = tasks.create(parent.id, new_task("Milk")).await.unwrap();

        let patch = TaskPatch {
            status: Some(TaskStatus::Closed),
            ..Default::default()
        };
        let updated = tasks.update(created.id, patch).await.unwrap();
        assert_eq!(updated.status, TaskStatus::Closed);
        assert_eq!(updated.task_list_id, Some(parent.id));
        assert_eq!(updated.title, "Milk");
    }

    #[tokio::test]
    async fn task_lookup_is_scoped_to_parent() {
        let (lists, tasks) = services();
        let a = lists.create(new_list("A")).await;
        let b = lists.create(new_list("B")).await;
        let milk = tasks.create(a.id, new_task("Milk")).await.unwrap();

        assert!(tasks.get(a.id, milk.id).await.is_some());
        assert!(tasks.get(b.id, milk.id).await.is_none());
        assert!(!tasks.delete(b.id, milk.id).await);
        assert!(tasks.delete(a.id, milk.id).await);
    }

    #[tokio::test]
    async fn deleting_list_cascades_through_service() {
        let (lists, tasks) = services();
        let parent = lists.create(new_list("Groceries")).await;
        tasks.create(parent.id, new_task("Milk")).await.unwrap();

        assert!(lists.delete(parent.id).await);
        assert!(tasks.list_by_task_list(parent.id).await.is_empty());
        // Second delete is a plain false, not an error.
        assert!(!lists.delete(parent.id).await);
    }
}
