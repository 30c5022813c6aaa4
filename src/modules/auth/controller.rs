use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    LoginRequest, LoginResponse, MessageResponse, RegisterEleveRequest, RegisterResponse,
    ResetPasswordRequest,
};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Login and receive the provider's session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(state.provider.as_ref(), dto).await?;
    Ok(Json(response))
}

/// Register a new student account (pending teacher validation)
#[utoipa::path(
    post,
    path = "/api/auth/register/eleve",
    request_body = RegisterEleveRequest,
    responses(
        (status = 201, description = "Account created, awaiting validation", body = RegisterResponse),
        (status = 400, description = "Bad request - validation error or email already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_eleve(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterEleveRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let response = AuthService::register_eleve(state.provider.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Request a password-reset email
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Reset email sent", body = MessageResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::reset_password(state.provider.as_ref(), dto).await?;
    Ok(Json(MessageResponse {
        message: "Email de réinitialisation envoyé".to_string(),
    }))
}
