use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_classe, get_classes, get_classes_by_enseignant, get_eleves_of_classe,
};

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_classes).post(create_classe))
        .route("/enseignant/{id}", get(get_classes_by_enseignant))
        .route("/{id}/eleves", get(get_eleves_of_classe))
}
