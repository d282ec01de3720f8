//! HTTP route handlers for the task-list and task resources.
//!
//! # Design
//! Handlers stay thin: deserialize → validate → map → service → map →
//! respond. Absence coming back from a service (`None`/`false`) is turned
//! into the matching `ApiError` here, so missing ids are always a 404 on
//! read, update, and delete alike. Bodies and path params come through the
//! wrappers in `extract`, so extraction failures land in the same envelope,
//! which is rendered by the middleware in `error`.

use axum::{extract::State, http::StatusCode, middleware, routing::get, Router};
use uuid::Uuid;

use crate::dto::{
    CreateTaskDto, CreateTaskListDto, TaskDto, TaskListDto, UpdateTaskDto, UpdateTaskListDto,
};
use crate::error::{error_envelope, ApiError};
use crate::extract::{Json, Path};
use crate::mappers::{task, task_list};
use crate::service::{TaskListService, TaskService};

#[derive(Clone)]
pub struct AppState {
    pub task_list_service: TaskListService,
    pub task_service: TaskService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/task-lists", get(list_task_lists).post(create_task_list))
        .route(
            "/task-lists/{task_list_id}",
            get(get_task_list).put(update_task_list).delete(delete_task_list),
        )
        .route(
            "/task-lists/{task_list_id}/tasks",
            get(list_tasks).post(create_task),
        )
        .route(
            "/task-lists/{task_list_id}/tasks/{task_id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(middleware::from_fn(error_envelope))
        .with_state(state)
}

async fn list_task_lists(State(state): State<AppState>) -> Json<Vec<TaskListDto>> {
    let lists = state.task_list_service.list().await;
    Json(lists.iter().map(task_list::to_dto).collect())
}

async fn create_task_list(
    State(state): State<AppState>,
    Json(dto): Json<CreateTaskListDto>,
) -> Result<(StatusCode, Json<TaskListDto>), ApiError> {
    dto.validate()?;
    let created = state
        .task_list_service
        .create(task_list::from_create_dto(dto))
        .await;
    Ok((StatusCode::CREATED, Json(task_list::to_dto(&created))))
}

async fn get_task_list(
    State(state): State<AppState>,
    Path(task_list_id): Path<Uuid>,
) -> Result<Json<TaskListDto>, ApiError> {
    let list = state
        .task_list_service
        .get(task_list_id)
        .await
        .ok_or(ApiError::TaskListNotFound(task_list_id))?;
    Ok(Json(task_list::to_dto(&list)))
}

async fn update_task_list(
    State(state): State<AppState>,
    Path(task_list_id): Path<Uuid>,
    Json(dto): Json<UpdateTaskListDto>,
) -> Result<Json<TaskListDto>, ApiError> {
    dto.validate()?;
    let updated = state
        .task_list_service
        .update(task_list_id, task_list::from_update_dto(dto))
        .await
        .ok_or(ApiError::TaskListNotFound(task_list_id))?;
    Ok(Json(task_list::to_dto(&updated)))
}

async fn delete_task_list(
    State(state): State<AppState>,
    Path(task_list_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.task_list_service.delete(task_list_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::TaskListNotFound(task_list_id))
    }
}

async fn list_tasks(
    State(state): State<AppState>,
    Path(task_list_id): Path<Uuid>,
) -> Json<Vec<TaskDto>> {
    let tasks = state.task_service.list_by_task_list(task_list_id).await;
    Json(tasks.iter().map(task::to_dto).collect())
}

async fn create_task(
    State(state): State<AppState>,
    Path(task_list_id): Path<Uuid>,
    Json(dto): Json<CreateTaskDto>,
) -> Result<(StatusCode, Json<TaskDto>), ApiError> {
    dto.validate()?;
    let created = state
        .task_service
        .create(task_list_id, task::from_create_dto(dto))
        .await?;
    Ok((StatusCode::CREATED, Json(task::to_dto(&created))))
}

async fn get_task(
    State(state): State<AppState>,
    Path((task_list_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<TaskDto>, ApiError> {
    let found = state
        .task_service
        .get(task_list_id, task_id)
        .await
        .ok_or(ApiError::TaskNotFound(task_id))?;
    Ok(Json(task::to_dto(&found)))
}

async fn update_task(
    State(state): State<AppState>,
    Path((_task_list_id, task_id)): Path<(Uuid, Uuid)>,
    Json(dto): Json<UpdateTaskDto>,
) -> Result<Json<TaskDto>, ApiError> {
    dto.validate()?;
    let updated = state
        .task_service
        .update(task_id, task::from_update_dto(dto))
        .await
        .ok_or(ApiError::TaskNotFound(task_id))?;
    Ok(Json(task::to_dto(&updated)))
}

async fn delete_task(
    State(state): State<AppState>,
    Path((task_list_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    if state.task_service.delete(task_list_id, task_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::TaskNotFound(task_id))
    }
}
