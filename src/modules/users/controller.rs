use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateUserDto, UpdateUserDto, UserRow};
use super::service::UserService;

/// Create a new user (admin only)
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let changed_by = auth_user.user_id()?;
    let user =
        UserService::create_user(state.provider.as_ref(), &state.audit_config, dto, changed_by)
            .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users with their class (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserRow>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserRow>>, AppError> {
    let users = UserService::list_users(state.provider.as_ref()).await?;
    Ok(Json(users))
}

/// Update a user (admin only)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated user row"),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<Value>, AppError> {
    let changed_by = auth_user.user_id()?;
    let updated = UserService::update_user(
        state.provider.as_ref(),
        &state.audit_config,
        id,
        dto,
        changed_by,
    )
    .await?;
    Ok(Json(updated))
}

/// Disable a user (admin only, disable-not-delete)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User disabled"),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn disable_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let changed_by = auth_user.user_id()?;
    UserService::disable_user(state.provider.as_ref(), &state.audit_config, id, changed_by).await?;
    Ok(StatusCode::NO_CONTENT)
}
