use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{create_cours, delete_cours, get_cours, update_cours};

pub fn init_cours_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cours).post(create_cours))
        .route("/{id}", put(update_cours).delete(delete_cours))
}
