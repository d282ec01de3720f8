//! REST backend for task lists and their tasks.
//!
//! # Overview
//! CRUD endpoints for two resource families, `/task-lists` and
//! `/task-lists/{id}/tasks`, over an in-memory store. Every operation is a
//! direct pass-through — handler → mapper → service → repository — with one
//! computed field (a list's completion progress) and cascade deletion of a
//! list's tasks.
//!
//! # Design
//! - Mappers are plain functions, services are concrete structs handed their
//!   repository handles at construction; nothing is dynamically dispatched.
//! - Tasks reference their parent list by id only, so the parent↔child
//!   relation never forms a cycle.
//! - Errors surface as a three-field `{status, message, path}` envelope,
//!   rendered by a single middleware; missing ids are a 404 on read, update,
//!   and delete alike.

pub mod domain;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mappers;
pub mod repository;
pub mod service;

use axum::Router;
use tokio::net::TcpListener;

use handlers::AppState;
use service::{TaskListService, TaskService};

pub use domain::{Task, TaskList, TaskListPatch, TaskPatch, TaskPriority, TaskStatus};
pub use dto::{
    CreateTaskDto, CreateTaskListDto, TaskDto, TaskListDto, UpdateTaskDto, UpdateTaskListDto,
};
pub use error::{ApiError, ErrorBody};

/// Builds the router with a fresh empty store wired through repositories and
/// services.
pub fn app() -> Router {
    let (task_lists, tasks) = repository::in_memory();
    let state = AppState {
        task_list_service: TaskListService::new(task_lists.clone()),
        task_service: TaskService::new(tasks, task_lists),
    };
    handlers::router(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
