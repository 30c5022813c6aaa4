use std::env;

/// Secret shared with the external auth provider, used only to verify
/// the tokens it issues.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
        }
    }
}
