use axum::Router;

pub mod socks;
pub mod system;

/// Router for the stock endpoints.
pub fn router(max_upload_bytes: usize) -> Router {
    socks::router(max_upload_bytes)
}
