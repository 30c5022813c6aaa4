//! Drive REST client.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::config::drive::DriveConfig;

use super::{DriveState, FileStore, StorageError, StoredFile};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// Client for the Drive file API, authorized by a long-lived OAuth
/// refresh token. Each operation exchanges the refresh token for a
/// short-lived access token; the client itself never mutates.
pub struct DriveClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    folder_id: String,
}

impl DriveClient {
    /// Initialize the storage gateway from environment credentials.
    ///
    /// Verifies the refresh token with one exchange up front; missing
    /// credentials or a failed exchange disable the gateway for the
    /// lifetime of the process.
    pub async fn init(config: &DriveConfig) -> DriveState {
        let (Some(client_id), Some(client_secret), Some(refresh_token), Some(folder_id)) = (
            config.client_id.clone(),
            config.client_secret.clone(),
            config.refresh_token.clone(),
            config.folder_id.clone(),
        ) else {
            warn!("Storage credentials missing, file gateway disabled");
            return DriveState::Disabled;
        };

        let client = Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
            refresh_token,
            folder_id,
        };

        match client.access_token().await {
            Ok(_) => {
                info!("Storage provider configured");
                DriveState::Ready(Arc::new(client))
            }
            Err(e) => {
                error!("Storage provider initialization failed: {}", e);
                DriveState::Disabled
            }
        }
    }

    async fn access_token(&self) -> Result<String, StorageError> {
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", self.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Auth { message });
        }

        let body: Value = response.json().await?;
        body.get("access_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StorageError::Auth {
                message: "token response missing access_token".to_string(),
            })
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound);
        }

        let message = response.text().await.unwrap_or_default();
        Err(StorageError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Shareable viewer URL for an uploaded file.
    fn share_url(file_id: &str) -> String {
        format!("https://drive.google.com/file/d/{}/view", file_id)
    }

    /// Multipart/related body: a JSON metadata part naming the file and
    /// its parent folder, followed by the raw media part.
    fn multipart_body(&self, name: &str, mime_type: &str, content: Vec<u8>) -> (String, Vec<u8>) {
        let boundary = format!("cartable-{}", uuid::Uuid::new_v4());
        let metadata = json!({ "name": name, "parents": [self.folder_id] });

        let mut body = Vec::with_capacity(content.len() + 512);
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
        body.extend_from_slice(metadata.to_string().as_bytes());
        body.extend_from_slice(format!("\r\n--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
        body.extend_from_slice(&content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        (boundary, body)
    }
}

#[async_trait]
impl FileStore for DriveClient {
    async fn upload(
        &self,
        name: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<StoredFile, StorageError> {
        let token = self.access_token().await?;
        let (boundary, body) = self.multipart_body(name, mime_type, content);

        let response = self
            .http
            .post(UPLOAD_URL)
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .bearer_auth(&token)
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await?;

        let created: Value = Self::check(response).await?.json().await?;
        let file_id = created
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::Api {
                status: 502,
                message: "upload response missing file id".to_string(),
            })?
            .to_string();

        // Grant public read before handing out the URL.
        let response = self
            .http
            .post(format!("{}/{}/permissions", FILES_URL, file_id))
            .bearer_auth(&token)
            .json(&json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await?;
        Self::check(response).await?;

        Ok(StoredFile {
            url: Self::share_url(&file_id),
            name: name.to_string(),
            id: file_id,
        })
    }

    async fn delete(&self, file_id: &str) -> Result<(), StorageError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .delete(format!("{}/{}", FILES_URL, file_id))
            .bearer_auth(&token)
            .send()
            .await?;
        Self::check(response).await?;

        Ok(())
    }
}
