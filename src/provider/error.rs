use thiserror::Error;

/// Failure reported by the auth/database provider.
///
/// Handlers do not distinguish most variants: anything without a specific
/// mapping becomes a 500. Auth endpoints pass `Api` messages through, and
/// a 404 from the storage side is surfaced as a descriptive not-found.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ProviderError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
