use axum::extract::State;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::{require_admin, require_enseignant};
use crate::modules::auth::router::init_auth_router;
use crate::modules::classes::router::init_classes_router;
use crate::modules::cours::router::init_cours_router;
use crate::modules::files::router::init_files_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

/// Liveness snapshot, also reporting whether the storage gateway came up.
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "running",
        "storage": state.drive.status(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub fn init_router(state: AppState) -> Router {
    let cors = if state.cors_config.allow_any_origin() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::AUTHORIZATION,
                axum::http::header::CONTENT_TYPE,
            ])
    } else {
        let allowed_origins: Vec<HeaderValue> = state
            .cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::AUTHORIZATION,
                axum::http::header::CONTENT_TYPE,
            ])
    };

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(health))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest(
                    "/users",
                    init_users_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                )
                .nest("/classes", init_classes_router())
                .nest(
                    "/cours",
                    init_cours_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_enseignant,
                    )),
                )
                .merge(init_files_router()),
        )
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}
