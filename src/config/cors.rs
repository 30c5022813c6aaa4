use std::env;

/// CORS configuration. The deployment serves a single web client from an
/// origin that is not known ahead of time, so the default is fully open.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| vec!["*".to_string()]);

        Self { allowed_origins }
    }

    pub fn allow_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}
