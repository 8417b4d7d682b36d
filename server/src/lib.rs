//! HTTP service for the todo list.
//!
//! # Overview
//! A single CRUD resource mounted under `/api/v1/todos`, backed by one SQLite
//! table, plus a host page at `/` that renders the current list.
//!
//! # Design
//! - Handlers are stateless; the `Db` pool is the only shared state.
//! - Create answers `201` with no body. Update answers with the stored record.
//! - Validation failures are `422` with a `{field: [messages]}` map.
//! - Every request runs inside an `http_request` tracing span.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod model;
pub mod page;

use axum::{extract::Request, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use db::Db;
pub use error::ApiError;
pub use model::{FieldErrors, Todo};

pub fn app(db: Db) -> Router {
    let api = Router::new()
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .patch(handlers::update_todo)
                .delete(handlers::delete_todo),
        );

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!("http_request", method = %request.method(), uri = %request.uri())
    });

    Router::new()
        .route("/", get(page::home))
        .nest("/api/v1", api)
        .layer(trace)
        .with_state(db)
}

pub async fn run(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app(db)).await
}
