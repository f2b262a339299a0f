use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::{AppServices, StoreBackend};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Which store is wired in (handy when checking a deployment's env).
pub async fn info(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let backend = match services.backend() {
        StoreBackend::InMemory => "in_memory",
        StoreBackend::Postgres => "postgres",
    };
    Json(serde_json::json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "store": backend,
    }))
}
