//! Server-rendered user directory.
//!
//! Serves HTML pages to create, list, edit and delete user records, with
//! structured logging (tracing) and Prometheus metrics.
//!
//! # Routes
//!
//! | Route | Method | Handler |
//! |---|---|---|
//! | `/` | GET | create form |
//! | `/read` | GET | user listing |
//! | `/delete/{id}` | GET | delete, redirect to `/read` |
//! | `/edit/{userid}` | GET | edit form |
//! | `/update/{userid}` | POST | update, redirect to `/read` |
//! | `/create` | POST | create, redirect to `/read` |
//!
//! Anything else is looked up in the static asset directory.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod views;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use user_store::UserStore;

use routes::users::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: UserStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
    static_dir: impl AsRef<Path>,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/", get(routes::users::index))
        .route("/read", get(routes::users::read::<S>))
        .route("/delete/{id}", get(routes::users::delete::<S>))
        .route("/edit/{userid}", get(routes::users::edit::<S>))
        .route("/update/{userid}", post(routes::users::update::<S>))
        .route("/create", post(routes::users::create::<S>))
        .route("/health", get(routes::health::check))
        .with_state(state)
        .merge(metrics_router)
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
}

/// Wraps a store in the shared state handed to every handler.
pub fn create_state<S: UserStore + 'static>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState::new(store))
}
