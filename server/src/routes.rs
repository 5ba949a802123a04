use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::warn;

use crate::error::ApiError;
use crate::payload::ItemBody;
use crate::store::{TodoItem, TodoStore};

/// Collection path of the item API.
pub const API_BASE_PATH: &str = "/api/todoItems";

/// Lower-case spelling of `API_BASE_PATH`, served as well for clients that
/// rely on case-insensitive routing.
pub const API_BASE_PATH_LOWER: &str = "/api/todoitems";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new();
    for base in [API_BASE_PATH, API_BASE_PATH_LOWER] {
        router = router
            .route(base, get(list_items).post(create_item))
            .route(
                &format!("{base}/{{id}}"),
                get(get_item).put(update_item).delete(delete_item),
            );
    }
    router.with_state(state)
}

async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoItem>, ApiError> {
    state.store.get(&id).await?.map(Json).ok_or(ApiError::NotFound)
}

async fn create_item(
    State(state): State<AppState>,
    body: ItemBody,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if body.has_id {
        warn!("rejected create: body names an id");
        return Err(ApiError::IdOnCreate);
    }
    let item = body.into_new_item().inspect_err(|_| warn!("rejected create: no description"))?;
    state.store.create(item).await.inspect_err(|e| warn!("rejected create: {e}"))?;
    Ok((StatusCode::CREATED, Json(json!({}))))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: ItemBody,
) -> Result<Json<Value>, ApiError> {
    if body.has_id {
        warn!(%id, "rejected update: body names an id");
        return Err(ApiError::IdOnUpdate);
    }
    match state.store.update(&id, body.into_replacement()).await? {
        Some(_) => Ok(Json(json!({}))),
        None => Err(ApiError::NotFound),
    }
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
