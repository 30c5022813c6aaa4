use std::sync::Arc;

use crate::config::audit::AuditConfig;
use crate::config::cors::CorsConfig;
use crate::config::drive::DriveConfig;
use crate::config::jwt::JwtConfig;
use crate::config::provider::ProviderConfig;
use crate::drive::{DriveClient, DriveState};
use crate::provider::{DataProvider, RestProvider};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DataProvider>,
    pub drive: DriveState,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub audit_config: AuditConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        provider: Arc::new(RestProvider::new(&ProviderConfig::from_env())),
        drive: DriveClient::init(&DriveConfig::from_env()).await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        audit_config: AuditConfig::from_env(),
    }
}
