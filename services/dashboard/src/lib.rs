pub mod aggregate;
pub mod config;
pub mod cors;
pub mod error;
pub mod routes_collections;
pub mod routes_summary;
pub mod state;
pub mod types;

use axum::{http::Method, middleware, routing::get, Router};

use crate::error::AppError;
use crate::routes_collections::{get_collection, get_collection_summary, list_collections};
use crate::routes_summary::get_summary;
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/collections", get(list_collections).fallback(method_not_allowed))
        .route("/api/collections/:name", get(get_collection).fallback(method_not_allowed))
        .route(
            "/api/collections/:name/summary",
            get(get_collection_summary).fallback(method_not_allowed),
        )
        .route("/api/summary", get(get_summary).fallback(method_not_allowed))
        .fallback(unknown_route)
        .layer(cors::cors_layer())
        .layer(middleware::from_fn(cors::preflight))
        .with_state(state)
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn unknown_route(method: Method) -> AppError {
    if method == Method::GET || method == Method::HEAD {
        AppError::NotFound
    } else {
        AppError::MethodNotAllowed
    }
}
