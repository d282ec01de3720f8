//! In-memory persistence for task lists and tasks.
//!
//! # Design
//! One store behind `Arc<RwLock<…>>`; `TaskListRepository` and
//! `TaskRepository` are cheap cloneable handles over it, passed explicitly
//! into the services at construction. Task lists are stored without their
//! task collection; reads assemble it from the task table, so the
//! parent↔child relation lives only as ids. `find_all` and assembled
//! collections are ordered by creation time.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Task, TaskList};

#[derive(Debug, Default)]
struct Store {
    task_lists: HashMap<Uuid, TaskList>,
    tasks: HashMap<Uuid, Task>,
}

type Db = Arc<RwLock<Store>>;

/// Creates a fresh empty store and both repository handles over it.
pub fn in_memory() -> (TaskListRepository, TaskRepository) {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    (
        TaskListRepository { db: db.clone() },
        TaskRepository { db },
    )
}

fn assemble(list: &TaskList, tasks: &HashMap<Uuid, Task>) -> TaskList {
    let mut children: Vec<Task> = tasks
        .values()
        .filter(|t| t.task_list_id == Some(list.id))
        .cloned()
        .collect();
    children.sort_by_key(|t| (t.created_at, t.id));
    TaskList {
        tasks: Some(children),
        ..list.clone()
    }
}

/// Persistence handle for task lists.
#[derive(Debug, Clone)]
pub struct TaskListRepository {
    db: Db,
}

impl TaskListRepository {
    pub async fn find_all(&self) -> Vec<TaskList> {
        let store = self.db.read().await;
        let mut lists: Vec<TaskList> = store
            .task_lists
            .values()
            .map(|l| assemble(l, &store.tasks))
            .collect();
        lists.sort_by_key(|l| (l.created_at, l.id));
        lists
    }

    /// Returns the list with its task collection assembled (`Some`, possibly
    /// empty), or `None` when the id is unknown.
    pub async fn find_by_id(&self, id: Uuid) -> Option<TaskList> {
        let store = self.db.read().await;
        store.task_lists.get(&id).map(|l| assemble(l, &store.tasks))
    }

    /// Upsert. The task table is the source of truth for children, so the
    /// stored record drops the collection; the echoed entity keeps it.
    pub async fn save(&self, list: TaskList) -> TaskList {
        let mut store = self.db.write().await;
        let mut record = list.clone();
        record.tasks = None;
        store.task_lists.insert(record.id, record);
        list
    }

    /// Deletes the list and cascades to every task under it. Returns false
    /// when the id is unknown.
    pub async fn delete_by_id(&self, id: Uuid) -> bool {
        let mut store = self.db.write().await;
        if store.task_lists.remove(&id).is_none() {
            return false;
        }
        store.tasks.retain(|_, task| task.task_list_id != Some(id));
        true
    }

    pub async fn exists_by_id(&self, id: Uuid) -> bool {
        self.db.read().await.task_lists.contains_key(&id)
    }
}

/// Persistence handle for tasks.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    db: Db,
}

impl TaskRepository {
    pub async fn find_by_id(&self, id: Uuid) -> Option<Task> {
        self.db.read().await.tasks.get(&id).cloned()
    }

    /// Tasks scoped to a parent list, ordered by creation time. An unknown
    /// parent id naturally yields an empty vec.
    pub async fn find_by_task_list_id(&self, task_list_id: Uuid) -> Vec<Task> {
        let store = self.db.read().await;
        let mut tasks: Vec<Task> = store
            .tasks
            .values()
            .filter(|t| t.task_list_id == Some(task_list_id))
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.created_at, t.id));
        tasks
    }

    /// Compound-key lookup: present only when the task exists AND belongs to
    /// the given parent list.
    pub async fn find_by_id_and_task_list_id(
        &self,
        id: Uuid,
        task_list_id: Uuid,
    ) -> Option<Task> {
        self.db
            .read()
            .await
            .tasks
            .get(&id)
            .filter(|t| t.task_list_id == Some(task_list_id))
            .cloned()
    }

    pub async fn save(&self, task: Task) -> Task {
        let mut store = self.db.write().await;
        store.tasks.insert(task.id, task.clone());
        task
    }

    /// Compound-key delete: a task id valid under a different parent is a
    /// no-op returning false.
    pub async fn delete_by_id_and_task_list_id(&self, id: Uuid, task_list_id: Uuid) -> bool {
        let mut store = self.db.write().await;
        match store.tasks.get(&id) {
            Some(t) if t.task_list_id == Some(task_list_id) => {
                store.tasks.remove(&id);
                true
            }
            _ => false,
        }
    }

    pub async fn exists_by_id(&self, id: Uuid) -> bool {
        self.db.read().await.tasks.contains_key(&id)
    }
}
