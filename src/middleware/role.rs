//! Role-based authorization for Axum routes.
//!
//! Roles form a closed enumeration; a route is gated by set membership
//! against its allowed roles, nothing hierarchical. The gate is a pure
//! function of the verified claims and the allowed set.

use std::str::FromStr;

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// The three roles an identity can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Enseignant,
    Eleve,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Enseignant => "enseignant",
            Self::Eleve => "eleve",
        }
    }
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "enseignant" => Ok(Self::Enseignant),
            "eleve" => Ok(Self::Eleve),
            _ => Err(()),
        }
    }
}

/// Middleware that rejects the request unless the authenticated identity's
/// role is a member of `allowed_roles`.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<UserRole>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user_role = auth_user.role()?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles,
            user_role
        )));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Route layer for admin-only routers (user management).
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Route layer for teacher-only routers (course management). Membership
/// is exact: an admin is rejected here.
pub async fn require_enseignant(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Enseignant]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// In-handler check for routes whose gate differs per verb.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    let user_role = auth_user.role()?;

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles,
            user_role
        )));
    }

    Ok(())
}
