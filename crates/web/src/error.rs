//! Web error types with HTML response mapping.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use user_store::UserStoreError;

use crate::views::ErrorPage;

/// Handler-level error type that maps to HTML error pages.
#[derive(Debug, Error)]
pub enum WebError {
    /// Requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The record store failed or was unreachable.
    #[error("Store error: {0}")]
    Store(#[from] UserStoreError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Store(_) | WebError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            WebError::NotFound(msg) => msg.clone(),
            WebError::Store(_) | WebError::Render(_) => {
                tracing::error!(error = %self, "internal server error");
                "Something went wrong. Please try again later.".to_string()
            }
        };
        metrics::counter!("http_errors_total", "status" => status.as_str().to_owned())
            .increment(1);

        match ErrorPage::new(status.as_u16(), message.as_str()).render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render error page");
                (status, message).into_response()
            }
        }
    }
}
