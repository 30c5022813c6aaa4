use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{delete_file, upload_file};

/// Upload bodies are capped before they reach the gateway.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024; // 20 MiB

pub fn init_files_router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/delete-file", post(delete_file))
}
