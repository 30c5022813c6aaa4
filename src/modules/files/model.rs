use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Upload result handed to the frontend. Keys are camelCase for
/// compatibility with the existing web client.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub file_url: String,
    pub file_name: String,
    pub file_id: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileRequest {
    #[validate(length(min = 1))]
    pub file_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteFileResponse {
    pub success: bool,
    pub message: String,
}
