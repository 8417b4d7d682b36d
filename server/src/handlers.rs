//! Handlers for the `/todos` resource.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::db::Db;
use crate::error::ApiError;
use crate::model::{Todo, TodoFields, TodoParams};

fn fields(payload: Result<Json<Value>, JsonRejection>) -> Result<TodoFields, ApiError> {
    let Json(value) = payload?;
    TodoParams::from_json(value)
        .map_err(ApiError::Attributes)?
        .validate()
        .map_err(ApiError::Validation)
}

pub async fn list_todos(State(db): State<Db>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(db.list().await?))
}

pub async fn get_todo(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Todo>, ApiError> {
    db.find(id).await?.map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_todo(
    State(db): State<Db>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let todo = db.insert(fields(payload)?).await?;
    info!(id = %todo.id, "created todo");
    Ok(StatusCode::CREATED)
}

pub async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    // A missing record wins over a bad body.
    if db.find(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let todo = db.update(id, fields(payload)?).await?.ok_or(ApiError::NotFound)?;
    info!(%id, "updated todo");
    Ok(Json(todo))
}

pub async fn delete_todo(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    if !db.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    info!(%id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}
