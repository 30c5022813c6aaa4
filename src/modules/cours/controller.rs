use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Cours, CoursWithClasse, CreateCoursDto, UpdateCoursDto};
use super::service::CoursService;

/// List the caller's courses with the class name flattened on
#[utoipa::path(
    get,
    path = "/api/cours",
    responses(
        (status = 200, description = "Courses of the authenticated teacher", body = Vec<CoursWithClasse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teacher role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cours"
)]
#[instrument(skip(state))]
pub async fn get_cours(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<CoursWithClasse>>, AppError> {
    let enseignant_id = auth_user.user_id()?;
    let cours = CoursService::list_for_enseignant(state.provider.as_ref(), enseignant_id).await?;
    Ok(Json(cours))
}

/// Create a course owned by the caller
#[utoipa::path(
    post,
    path = "/api/cours",
    request_body = CreateCoursDto,
    responses(
        (status = 201, description = "Course created", body = Cours),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teacher role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cours"
)]
#[instrument(skip(state, dto))]
pub async fn create_cours(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCoursDto>,
) -> Result<(StatusCode, Json<Cours>), AppError> {
    let enseignant_id = auth_user.user_id()?;
    let cours = CoursService::create_cours(state.provider.as_ref(), enseignant_id, dto).await?;
    Ok((StatusCode::CREATED, Json(cours)))
}

/// Update a course; targeting another teacher's course is a 404
#[utoipa::path(
    put,
    path = "/api/cours/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    request_body = UpdateCoursDto,
    responses(
        (status = 200, description = "Updated course", body = Cours),
        (status = 404, description = "Course not found or not owned by caller", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teacher role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cours"
)]
#[instrument(skip(state, dto))]
pub async fn update_cours(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCoursDto>,
) -> Result<Json<Cours>, AppError> {
    let enseignant_id = auth_user.user_id()?;
    let cours = CoursService::update_cours(state.provider.as_ref(), enseignant_id, id, dto).await?;
    Ok(Json(cours))
}

/// Delete a course; targeting another teacher's course is a 404
#[utoipa::path(
    delete,
    path = "/api/cours/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found or not owned by caller", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teacher role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cours"
)]
#[instrument(skip(state))]
pub async fn delete_cours(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let enseignant_id = auth_user.user_id()?;
    CoursService::delete_cours(state.provider.as_ref(), enseignant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
