//! Binary ingestion for multipart uploads
//!
//! Streams an uploaded file field to a temp-file spool while enforcing the
//! MIME allow-list and size cap, then hands the bytes back in memory. The
//! spool is removed on every exit path; a failed removal is logged and never
//! surfaced to the caller.

use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use tokio::io::AsyncWriteExt;

use crate::{Error, Result};

/// Maximum accepted upload size (10 MiB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Category of an accepted upload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    /// Classify a declared MIME type against the allow-list
    ///
    /// Accepts `image/*` and `audio/*`; everything else is rejected before
    /// any byte is buffered.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("image/") {
            Some(Self::Image)
        } else if mime.starts_with("audio/") {
            Some(Self::Audio)
        } else {
            None
        }
    }
}

/// An ingested upload: raw bytes plus the client's declared MIME type
///
/// Owned exclusively by the request that received the upload; the backing
/// spool is gone by the time this exists.
#[derive(Debug, Clone)]
pub struct MediaPayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub kind: MediaKind,
}

/// Ingest a multipart file field
///
/// Validates the declared MIME type, streams the field to a spool under the
/// size cap, and returns the complete bytes. The spool is removed whether or
/// not ingestion succeeds.
///
/// # Errors
///
/// Returns `Error::Validation` for a disallowed MIME type, an over-limit
/// upload, or a malformed multipart stream; `Error::Io` if spooling fails.
pub async fn ingest_field(mut field: Field<'_>) -> Result<MediaPayload> {
    let mime_type = field.content_type().unwrap_or_default().to_string();
    let kind = MediaKind::from_mime(&mime_type)
        .ok_or_else(|| Error::Validation("Envie uma imagem ou áudio válido.".to_string()))?;

    let mut spool = UploadSpool::create().await?;
    let result = spool_to_completion(&mut field, &mut spool).await;
    spool.discard().await;

    let bytes = result?;
    tracing::debug!(
        bytes = bytes.len(),
        mime = %mime_type,
        ?kind,
        "upload ingested"
    );

    Ok(MediaPayload {
        bytes,
        mime_type,
        kind,
    })
}

/// Stream all field chunks into the spool, then read the file back
async fn spool_to_completion(field: &mut Field<'_>, spool: &mut UploadSpool) -> Result<Vec<u8>> {
    let mut written = 0usize;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| Error::Validation(format!("Upload inválido: {e}")))?
    {
        written += chunk.len();
        if written > MAX_UPLOAD_BYTES {
            return Err(Error::Validation(
                "Arquivo excede o limite de 10 MiB.".to_string(),
            ));
        }
        spool.write_chunk(&chunk).await?;
    }

    spool.read_back().await
}

/// Scoped temp-file spool for one upload
///
/// Removal is guaranteed: either eagerly via [`discard`](Self::discard) or by
/// `Drop` as a backstop. Removal failures are logged, never propagated.
pub struct UploadSpool {
    file: Option<tokio::fs::File>,
    path: PathBuf,
    removed: bool,
}

impl UploadSpool {
    /// Create a fresh spool file in the system temp directory
    pub async fn create() -> Result<Self> {
        let (file, path) = tempfile::Builder::new()
            .prefix("voxbridge-upload-")
            .tempfile()?
            .keep()
            .map_err(|e| Error::Io(e.error))?;

        Ok(Self {
            file: Some(tokio::fs::File::from_std(file)),
            path,
            removed: false,
        })
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a chunk to the spool
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| Error::Io(std::io::Error::other("spool already consumed")))?;
        file.write_all(chunk).await?;
        Ok(())
    }

    /// Flush and read the complete spooled contents
    pub async fn read_back(&mut self) -> Result<Vec<u8>> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
        }
        Ok(tokio::fs::read(&self.path).await?)
    }

    /// Remove the backing file now
    ///
    /// Idempotent. A removal failure is logged at warn and swallowed so it
    /// can never mask the request's primary result.
    pub async fn discard(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        self.file.take();

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove upload spool");
            }
        }
    }
}

impl Drop for UploadSpool {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;

        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove upload spool");
            }
        }
    }
}
