//! File-storage gateway.
//!
//! Uploaded bytes are streamed straight to the external storage provider;
//! the process keeps no local copy. The gateway is initialized exactly once
//! at startup: a successful credential exchange yields `Ready`, anything
//! else leaves it `Disabled` until the process restarts. There are no
//! runtime transitions and no re-initialization.

pub mod client;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::utils::errors::AppError;

pub use client::DriveClient;

/// A file persisted by the storage provider.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("storage authorization failed: {message}")]
    Auth { message: String },

    /// Provider-reported missing file, kept distinct from generic
    /// failures so callers can answer with a descriptive 404.
    #[error("file not found in storage")]
    NotFound,

    #[error("{message}")]
    Api { status: u16, message: String },
}

/// The external file-storage provider.
///
/// `upload` must leave the file publicly readable and return a shareable
/// URL; `delete` must report a missing file as [`StorageError::NotFound`].
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn upload(
        &self,
        name: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<StoredFile, StorageError>;

    async fn delete(&self, file_id: &str) -> Result<(), StorageError>;
}

impl std::fmt::Debug for dyn FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FileStore")
    }
}

/// Startup outcome of the storage gateway, shared read-only across
/// requests. Checked at the top of every dependent operation.
#[derive(Clone)]
pub enum DriveState {
    Ready(Arc<dyn FileStore>),
    Disabled,
}

impl DriveState {
    pub fn store(&self) -> Result<&Arc<dyn FileStore>, AppError> {
        match self {
            Self::Ready(store) => Ok(store),
            Self::Disabled => Err(AppError::service_unavailable(anyhow::anyhow!(
                "Storage provider not configured"
            ))),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Ready(_) => "ready",
            Self::Disabled => "disabled",
        }
    }
}

impl std::fmt::Debug for DriveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status())
    }
}
