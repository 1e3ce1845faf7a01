//! In-memory stand-in for the remote todo service.
//!
//! Mirrors the production API surface: integer autoincrement ids, a `/api`
//! route prefix, a body-less PATCH that flips the completion flag, and a
//! newest-first listing.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

#[derive(Clone, Default)]
pub struct Db {
    todos: Arc<RwLock<BTreeMap<i64, Todo>>>,
    next_id: Arc<AtomicI64>,
}

pub fn app() -> Router {
    let db = Db::default();
    Router::new()
        .route("/health", get(health))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", patch(toggle_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "message": "Todo API is running"}))
}

/// Newest-first, matching the production `ORDER BY id DESC`.
async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let todos = db.todos.read().await;
    Json(todos.values().rev().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), (StatusCode, Json<serde_json::Value>)> {
    if input.title.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Title is required"})),
        ));
    }
    let todo = Todo {
        id: db.next_id.fetch_add(1, Ordering::Relaxed) + 1,
        title: input.title,
        completed: false,
    };
    db.todos.write().await.insert(todo.id, todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn toggle_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, (StatusCode, Json<serde_json::Value>)> {
    let mut todos = db.todos.write().await;
    let todo = todos
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, Json(json!({"error": "Todo not found"}))))?;
    todo.completed = !todo.completed;
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let mut todos = db.todos.write().await;
    todos
        .remove(&id)
        .map(|_| Json(json!({"message": "Todo deleted successfully"})))
        .ok_or((StatusCode::NOT_FOUND, Json(json!({"error": "Todo not found"}))))
}
