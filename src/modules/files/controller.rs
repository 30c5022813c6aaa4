use axum::Json;
use axum::extract::{Multipart, State};
use tracing::instrument;

use crate::drive::StorageError;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{DeleteFileRequest, DeleteFileResponse, UploadResponse};

fn map_storage_error(e: StorageError) -> AppError {
    match e {
        StorageError::NotFound => {
            AppError::not_found(anyhow::anyhow!("Fichier introuvable chez le fournisseur"))
        }
        other => AppError::internal(other),
    }
}

/// Upload a file to the storage provider (multipart field `file`)
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File uploaded with a public share URL", body = UploadResponse),
        (status = 400, description = "No file provided", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 503, description = "Storage provider not configured", body = ErrorResponse),
        (status = 500, description = "Upload failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Files"
)]
#[instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    // Checked before touching the body: a disabled gateway stays disabled
    // until restart.
    let store = state.drive.store()?.clone();

    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::bad_request(anyhow::anyhow!("Corps multipart invalide: {}", e))
    })? {
        if field.name() == Some("file") {
            let name = field
                .file_name()
                .unwrap_or("fichier")
                .to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let content = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(anyhow::anyhow!("Lecture du fichier échouée: {}", e)))?
                .to_vec();
            file = Some((name, mime_type, content));
            break;
        }
    }

    let (name, mime_type, content) =
        file.ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Aucun fichier fourni")))?;

    if content.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "Aucun fichier fourni"
        )));
    }

    let stored = store
        .upload(&name, &mime_type, content)
        .await
        .map_err(map_storage_error)?;

    Ok(Json(UploadResponse {
        success: true,
        file_url: stored.url,
        file_name: stored.name,
        file_id: stored.id,
    }))
}

/// Delete a stored file by id
#[utoipa::path(
    post,
    path = "/api/delete-file",
    request_body = DeleteFileRequest,
    responses(
        (status = 200, description = "File deleted", body = DeleteFileResponse),
        (status = 400, description = "Missing file id", body = ErrorResponse),
        (status = 404, description = "File not found at the provider", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 503, description = "Storage provider not configured", body = ErrorResponse),
        (status = 500, description = "Deletion failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Files"
)]
#[instrument(skip(state))]
pub async fn delete_file(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<DeleteFileRequest>,
) -> Result<Json<DeleteFileResponse>, AppError> {
    let store = state.drive.store()?.clone();

    store.delete(&dto.file_id).await.map_err(map_storage_error)?;

    Ok(Json(DeleteFileResponse {
        success: true,
        message: "Fichier supprimé avec succès".to_string(),
    }))
}
