use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::middleware::role::UserRole;
use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and provides the
/// authenticated identity's claims.
///
/// A missing or malformed `Authorization` header is a 401; a token that
/// fails signature or expiry verification is a 403. Tokens are opaque and
/// externally issued, so there is no refresh or revocation path here.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The identity's id from the `sub` claim.
    pub fn user_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::forbidden(anyhow::anyhow!("Invalid user ID in token")))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Parse the role claim into the closed role enumeration.
    pub fn role(&self) -> Result<UserRole, AppError> {
        self.0
            .role
            .parse()
            .map_err(|_| AppError::forbidden(anyhow::anyhow!("Unknown role: {}", self.0.role)))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(anyhow::anyhow!("Missing authorization header"))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
