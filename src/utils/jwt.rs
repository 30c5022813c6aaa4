use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::utils::errors::AppError;

/// Verify a bearer token against the shared signing secret.
///
/// Tokens are issued by the external auth provider and only verified
/// here; a failed signature or expiry check is a 403, a missing
/// credential a 401 (handled by the extractor before this runs).
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::forbidden(anyhow::anyhow!("Invalid or expired token")))
}
