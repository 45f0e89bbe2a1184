use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use log::{debug, info};

use crate::error::AppResult;
use crate::models::MetadataResponse;
use crate::services::{MetadataExtractor, UploadReceiver};

/// `POST /api/extract`: store the upload, extract its metadata, delete it.
///
/// The outcome is decided by the extraction alone. The transient file is
/// removed before responding on both branches, and by its guard on any path
/// that unwinds past this function.
pub async fn extract_metadata(
    payload: Multipart,
    receiver: web::Data<UploadReceiver>,
    extractor: web::Data<MetadataExtractor>,
) -> AppResult<HttpResponse> {
    let upload = receiver.receive(payload).await?;
    debug!(
        "Extracting metadata from {:?} ({} bytes) received at {}",
        upload.original_name(),
        upload.size(),
        upload.received_at()
    );

    let outcome = extractor.extract(upload.path()).await;
    upload.discard().await;

    let metadata = outcome?;
    info!("Returning {} metadata fields", metadata.len());
    Ok(HttpResponse::Ok().json(MetadataResponse { metadata }))
}
