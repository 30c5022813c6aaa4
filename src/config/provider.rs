use std::env;

/// Connection settings for the hosted auth/database provider.
///
/// The provider exposes two REST surfaces under one base URL: an auth API
/// (`/auth/v1`) and a table API (`/rest/v1`). The service key authorizes
/// both, including the admin user-management endpoints.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub base_url: String,
    pub service_key: String,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("PROVIDER_URL")
                .unwrap_or_else(|_| "http://localhost:54321".to_string()),
            service_key: env::var("PROVIDER_SERVICE_KEY").unwrap_or_default(),
        }
    }
}
