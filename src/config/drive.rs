use std::env;

/// OAuth credentials for the file-storage provider.
///
/// All four values must be present for the storage gateway to initialize;
/// a missing value leaves it disabled for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct DriveConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub folder_id: Option<String>,
}

impl DriveConfig {
    pub fn from_env() -> Self {
        Self {
            client_id: env::var("GOOGLE_CLIENT_ID").ok(),
            client_secret: env::var("GOOGLE_CLIENT_SECRET").ok(),
            refresh_token: env::var("GOOGLE_REFRESH_TOKEN").ok(),
            folder_id: env::var("GOOGLE_DRIVE_FOLDER_ID").ok(),
        }
    }
}
