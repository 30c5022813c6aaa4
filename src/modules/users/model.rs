//! User-management models and DTOs.
//!
//! Rows come back from the provider as JSON and are viewed through these
//! structs; unknown or absent columns deserialize to `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::role::UserRole;

/// Joined class columns embedded in a user listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClasseInfo {
    pub nom: String,
    pub niveau: Option<String>,
}

/// A user row as listed for administrators, including the joined class.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    #[serde(default)]
    pub matieres: Option<Value>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub classe_id: Option<Uuid>,
    #[serde(default)]
    pub classes: Option<ClasseInfo>,
}

/// Admin-created account. The provider confirms the email immediately;
/// profile fields travel as user metadata.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1))]
    pub nom: String,
    #[validate(length(min = 1))]
    pub prenom: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub matieres: Option<Value>,
    #[serde(default)]
    pub classe_id: Option<Uuid>,
}

/// Partial profile update; only present fields are written.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub prenom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matieres: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classe_id: Option<Uuid>,
}
