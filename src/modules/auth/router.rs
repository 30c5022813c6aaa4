use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login, register_eleve, reset_password};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register/eleve", post(register_eleve))
        .route("/reset-password", post(reset_password))
}
