use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{UserRole, check_any_role};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Classe, CreateClasseDto, Eleve};
use super::service::ClasseService;

/// Create a class (admin or teacher)
#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClasseDto,
    responses(
        (status = 201, description = "Class created", body = Classe),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn create_classe(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClasseDto>,
) -> Result<(StatusCode, Json<Classe>), AppError> {
    // Only POST is gated; listings are open to any authenticated user.
    check_any_role(&auth_user, &[UserRole::Admin, UserRole::Enseignant])?;

    let classe = ClasseService::create_classe(state.provider.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(classe)))
}

/// List all classes
#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "List of classes", body = Vec<Classe>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Classe>>, AppError> {
    let classes = ClasseService::list_classes(state.provider.as_ref()).await?;
    Ok(Json(classes))
}

/// Classes owned by a specific teacher
#[utoipa::path(
    get,
    path = "/api/classes/enseignant/{id}",
    params(("id" = Uuid, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Classes of the teacher", body = Vec<Classe>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes_by_enseignant(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Classe>>, AppError> {
    let classes = ClasseService::classes_by_enseignant(state.provider.as_ref(), id).await?;
    Ok(Json(classes))
}

/// Students enrolled in a class
#[utoipa::path(
    get,
    path = "/api/classes/{id}/eleves",
    params(("id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Students of the class", body = Vec<Eleve>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_eleves_of_classe(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Eleve>>, AppError> {
    let eleves = ClasseService::eleves_of_classe(state.provider.as_ref(), id).await?;
    Ok(Json(eleves))
}
