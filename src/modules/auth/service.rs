use serde_json::json;

use crate::provider::{DataProvider, ProviderError};
use crate::utils::errors::AppError;

use super::model::{
    LoginRequest, LoginResponse, LoginUser, RegisterEleveRequest, RegisterResponse,
    ResetPasswordRequest,
};

pub struct AuthService;

impl AuthService {
    /// Exchange credentials for the provider's session token. The provider
    /// is the authority on passwords; its rejection message passes through
    /// at 401.
    pub async fn login(
        provider: &dyn DataProvider,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let session = provider
            .sign_in(&dto.email, &dto.password)
            .await
            .map_err(|e| match e {
                ProviderError::Api { message, .. } => {
                    AppError::unauthorized(anyhow::anyhow!(message))
                }
                other => AppError::internal(other),
            })?;

        let user = LoginUser::from_provider(&session.user)?;

        Ok(LoginResponse {
            access_token: session.access_token,
            user,
        })
    }

    /// Self-service student registration. Accounts start inactive and
    /// wait for a teacher to validate them.
    pub async fn register_eleve(
        provider: &dyn DataProvider,
        dto: RegisterEleveRequest,
    ) -> Result<RegisterResponse, AppError> {
        let metadata = json!({
            "role": "eleve",
            "nom": dto.nom,
            "prenom": dto.prenom,
            "classe": dto.classe,
            "active": false,
        });

        let user = provider
            .sign_up(&dto.email, &dto.password, metadata)
            .await
            .map_err(|e| match e {
                ProviderError::Api { message, .. } => {
                    AppError::bad_request(anyhow::anyhow!(message))
                }
                other => AppError::internal(other),
            })?;

        Ok(RegisterResponse {
            message: "Compte créé, en attente de validation".to_string(),
            user,
        })
    }

    pub async fn reset_password(
        provider: &dyn DataProvider,
        dto: ResetPasswordRequest,
    ) -> Result<(), AppError> {
        provider
            .send_password_reset(&dto.email)
            .await
            .map_err(|e| match e {
                ProviderError::Api { message, .. } => {
                    AppError::bad_request(anyhow::anyhow!(message))
                }
                other => AppError::internal(other),
            })
    }
}
