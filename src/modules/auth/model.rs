use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::errors::AppError;

/// JWT claims: the identity's id, email, and role, trusted until expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// The identity shape handed back to the frontend on login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginUser {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub nom: String,
    pub prenom: String,
}

impl LoginUser {
    /// Reshape the provider's user record. Profile fields live either at
    /// the top level or inside `user_metadata`, depending on how the
    /// account was created.
    pub fn from_provider(user: &Value) -> Result<Self, AppError> {
        let metadata = user.get("user_metadata");
        let field = |key: &str| {
            user.get(key)
                .or_else(|| metadata.and_then(|m| m.get(key)))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let id = user
            .get("id")
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("Provider user record has no id")))?;

        Ok(Self {
            id,
            email: field("email"),
            role: field("role"),
            nom: field("nom"),
            prenom: field("prenom"),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: LoginUser,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterEleveRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub nom: String,
    #[validate(length(min = 1))]
    pub prenom: String,
    #[validate(length(min = 1))]
    pub classe: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: Value,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_user_reads_metadata_fields() {
        let id = Uuid::new_v4();
        let user = json!({
            "id": id.to_string(),
            "email": "eleve@ecole.fr",
            "user_metadata": { "role": "eleve", "nom": "Martin", "prenom": "Luc" }
        });

        let reshaped = LoginUser::from_provider(&user).unwrap();
        assert_eq!(reshaped.id, id);
        assert_eq!(reshaped.role, "eleve");
        assert_eq!(reshaped.nom, "Martin");
        assert_eq!(reshaped.prenom, "Luc");
    }

    #[test]
    fn login_user_without_id_is_an_error() {
        assert!(LoginUser::from_provider(&json!({ "email": "x@y.fr" })).is_err());
    }
}
