//! HTTP surface of the to-do service.
//!
//! # Responsibility
//! - Map routes to the operation services in `todo_core`.
//! - Scope one storage session to each request.
//! - Translate service errors into status codes with a `detail` body.

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use handlers::{health, todo_items, todo_lists, users};
use log::info;
use std::time::Instant;
use tokio::net::TcpListener;

pub mod error;
pub mod handlers;
pub mod session;

pub use error::ApiError;
pub use session::AppState;

/// Builds the full router over `state`.
pub fn app(state: AppState) -> Router {
    let item_by_id = get(todo_items::get_item)
        .put(todo_items::update_item)
        .delete(todo_items::delete_item);

    Router::new()
        .route("/health", get(health::health))
        .route("/", get(users::list_users))
        .route("/users/", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/todo-lists/",
            get(todo_lists::lists_for_user).post(todo_lists::create_list),
        )
        .route("/todo-lists/search", get(todo_lists::search))
        .route("/search", get(todo_lists::search))
        .route(
            "/todo-lists/{list_id}",
            get(todo_lists::get_list)
                .put(todo_lists::update_list)
                .delete(todo_lists::delete_list),
        )
        .route(
            "/todo-lists/{list_id}/items/",
            get(todo_lists::list_items).post(todo_lists::create_list_item),
        )
        .route(
            "/todo-lists/{list_id}/items/{item_id}",
            get(todo_lists::get_list_item)
                .put(todo_lists::update_list_item)
                .delete(todo_lists::delete_list_item),
        )
        .route(
            "/todo-items/",
            get(todo_items::all_items).post(todo_items::create_item),
        )
        .route("/todo-items/todo-items/", get(todo_items::all_items))
        .route("/todo-items/search-items/", get(todo_items::search_items))
        .route("/todo-items/{item_id}", item_by_id.clone())
        .route("/todo-items/todo-items/{item_id}", item_by_id)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Serves the router on `listener` until the process stops.
pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=api method={} path={} http_status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
