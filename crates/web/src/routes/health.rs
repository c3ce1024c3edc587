//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

/// Body of `GET /health`. The store is not consulted.
#[derive(Debug, Serialize)]
pub struct Liveness {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health — reports that the process is serving requests.
pub async fn check() -> Json<Liveness> {
    Json(Liveness {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
