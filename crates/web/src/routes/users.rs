//! User CRUD page handlers.
//!
//! Every handler makes exactly one store call and then renders a page or
//! redirects back to the listing.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{Html, IntoResponse, Response};
use common::{UserFields, UserId};
use user_store::UserStore;

use crate::error::WebError;
use crate::extract::FormOrJson;
use crate::views::{self, EditPage, IndexPage, ReadPage};

/// Shared application state accessible from all handlers.
pub struct AppState<S: UserStore> {
    pub store: S,
}

impl<S: UserStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

/// 302 back to the listing page.
fn redirect_to_read() -> Response {
    (StatusCode::FOUND, [(LOCATION, "/read")]).into_response()
}

fn parse_user_id(id: &str) -> Option<UserId> {
    id.parse().ok()
}

/// GET / — home page with the create form.
pub async fn index() -> Result<Html<String>, WebError> {
    views::render(&IndexPage::default())
}

/// GET /read — list every user.
#[tracing::instrument(skip(state))]
pub async fn read<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Html<String>, WebError> {
    let users = state.store.list_all().await?;
    views::render(&ReadPage::new(users))
}

/// GET /delete/{id} — delete a user, then show the listing.
#[tracing::instrument(skip(state))]
pub async fn delete<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let Some(user_id) = parse_user_id(&id) else {
        tracing::debug!(%id, "delete skipped, malformed id");
        return Ok(redirect_to_read());
    };

    match state.store.delete_by_id(user_id).await? {
        Some(user) => tracing::info!(user_id = %user.id, "user deleted"),
        None => tracing::debug!(%user_id, "delete matched no user"),
    }
    Ok(redirect_to_read())
}

/// GET /edit/{userid} — edit form for one user.
#[tracing::instrument(skip(state))]
pub async fn edit<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let not_found = || WebError::NotFound(format!("User {id} not found"));

    let user_id = parse_user_id(&id).ok_or_else(not_found)?;
    let user = state
        .store
        .get_by_id(user_id)
        .await?
        .ok_or_else(not_found)?;

    views::render(&EditPage::new(user))
}

/// POST /update/{userid} — overwrite name, email and image.
#[tracing::instrument(skip(state, fields))]
pub async fn update<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    FormOrJson(fields): FormOrJson<UserFields>,
) -> Result<Response, WebError> {
    let Some(user_id) = parse_user_id(&id) else {
        tracing::debug!(%id, "update skipped, malformed id");
        return Ok(redirect_to_read());
    };

    if state.store.update_by_id(user_id, fields).await?.is_none() {
        tracing::debug!(%user_id, "update matched no user");
    }
    Ok(redirect_to_read())
}

/// POST /create — insert a new user.
#[tracing::instrument(skip(state, fields))]
pub async fn create<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    FormOrJson(fields): FormOrJson<UserFields>,
) -> Result<Response, WebError> {
    let user = state.store.create(fields).await?;
    tracing::info!(user_id = %user.id, "user created");
    Ok(redirect_to_read())
}
