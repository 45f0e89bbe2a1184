use actix_multipart::Multipart;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::constants;
use crate::error::{AppError, AppResult};

/// File name used on disk: `<unix-millis>-<original-name>`.
///
/// Two uploads with the same original name in the same millisecond map to
/// the same name; the later one overwrites the earlier.
pub fn stored_file_name(received_at: DateTime<Utc>, original_name: &str) -> String {
    format!(
        "{}-{}",
        received_at.timestamp_millis(),
        sanitize_original_name(original_name)
    )
}

/// Keeps only the last path segment of a client-supplied name.
fn sanitize_original_name(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>();

    match last.trim() {
        "" | "." | ".." => "upload".to_string(),
        _ => last,
    }
}

/// An uploaded file that lives on disk for one request only.
///
/// Removed exactly once: by `discard()`, or by `Drop` on any path that never
/// reaches it (early return, panic).
#[derive(Debug)]
pub struct TransientUpload {
    stored_path: PathBuf,
    original_name: String,
    received_at: DateTime<Utc>,
    size: u64,
    released: bool,
}

impl TransientUpload {
    fn new(stored_path: PathBuf, original_name: String, received_at: DateTime<Utc>) -> Self {
        Self {
            stored_path,
            original_name,
            received_at,
            size: 0,
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.stored_path
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub async fn discard(mut self) {
        self.released = true;
        match tokio::fs::remove_file(&self.stored_path).await {
            Ok(()) => debug!("Removed transient upload {:?}", self.stored_path),
            Err(e) => warn!(
                "Failed to remove uploaded file {:?}: {}",
                self.stored_path, e
            ),
        }
    }
}

impl Drop for TransientUpload {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match std::fs::remove_file(&self.stored_path) {
            Ok(()) => debug!("Removed transient upload {:?} on drop", self.stored_path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove uploaded file {:?}: {}",
                self.stored_path, e
            ),
        }
    }
}

/// Writes the `file` part of a multipart request into the upload directory.
#[derive(Debug, Clone)]
pub struct UploadReceiver {
    upload_dir: PathBuf,
    max_bytes: u64,
}

impl UploadReceiver {
    pub fn new(upload_dir: PathBuf, max_bytes: u64) -> Self {
        Self {
            upload_dir,
            max_bytes,
        }
    }

    pub async fn receive(&self, mut payload: Multipart) -> AppResult<TransientUpload> {
        let mut upload: Option<TransientUpload> = None;

        while let Some(item) = payload.next().await {
            let mut field = match item {
                Ok(field) => field,
                Err(e) if upload.is_none() => {
                    debug!("Multipart body unreadable before any file part: {}", e);
                    return Err(AppError::MissingFile);
                }
                Err(e) => return Err(AppError::MalformedUpload(e.to_string())),
            };

            if upload.is_some() || field.name() != Some(constants::FILE_FIELD) {
                continue;
            }
            let Some(original_name) = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_owned)
            else {
                continue;
            };

            let received_at = Utc::now();
            tokio::fs::create_dir_all(&self.upload_dir).await?;
            let mut stored = TransientUpload::new(
                self.upload_dir
                    .join(stored_file_name(received_at, &original_name)),
                original_name,
                received_at,
            );

            let mut file = tokio::fs::File::create(stored.path()).await?;
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(|e| AppError::MalformedUpload(e.to_string()))?;
                stored.size += chunk.len() as u64;
                if stored.size > self.max_bytes {
                    warn!(
                        "Upload {:?} exceeded {} bytes, aborting",
                        stored.original_name, self.max_bytes
                    );
                    return Err(AppError::PayloadTooLarge(self.max_bytes));
                }
                file.write_all(&chunk).await?;
            }
            file.flush().await?;

            info!(
                "Received {:?} ({} bytes) as {:?}",
                stored.original_name, stored.size, stored.stored_path
            );
            upload = Some(stored);
        }

        upload.ok_or(AppError::MissingFile)
    }
}
