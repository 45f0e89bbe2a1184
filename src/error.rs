use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use crate::constants;
use crate::models::{ErrorResponse, ExtractionError};

#[derive(Debug)]
pub enum AppError {
    MissingFile,
    MalformedUpload(String),
    PayloadTooLarge(u64),
    Extraction(ExtractionError),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingFile => write!(f, "Bad request: {}", constants::MISSING_FILE_MESSAGE),
            AppError::MalformedUpload(msg) => write!(f, "Malformed upload: {}", msg),
            AppError::PayloadTooLarge(limit) => {
                write!(f, "Upload exceeds the {} byte limit", limit)
            }
            AppError::Extraction(e) => write!(f, "Extraction error: {}", e),
            AppError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Message safe to show to the client. Internal causes stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MissingFile => constants::MISSING_FILE_MESSAGE,
            AppError::MalformedUpload(_) => constants::MALFORMED_UPLOAD_MESSAGE,
            AppError::PayloadTooLarge(_) => constants::PAYLOAD_TOO_LARGE_MESSAGE,
            AppError::Extraction(_) => constants::EXTRACTION_FAILED_MESSAGE,
            AppError::Io(_) => constants::STORE_FAILED_MESSAGE,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFile | AppError::MalformedUpload(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Extraction(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message().to_string(),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        AppError::Extraction(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_hides_cause() {
        let err = AppError::Extraction(ExtractionError::Reported(
            "File not found: /srv/uploads/123-a.jpg".to_string(),
        ));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Failed to extract metadata");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::PayloadTooLarge(10).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/srv/uploads");
        let err = AppError::from(io);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Failed to store upload");
    }
}
