use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt;
use std::time::Duration;

mod exif_date;
pub use exif_date::*;

/// Tag name to value, as reported by the metadata engine.
pub type MetadataRecord = Map<String, Value>;

pub type ExtractionResult = Result<MetadataRecord, ExtractionError>;

#[derive(Debug)]
pub enum ExtractionError {
    Spawn(std::io::Error),
    Timeout(Duration),
    ToolFailed { status: Option<i32>, stderr: String },
    Reported(String),
    InvalidOutput(String),
    Empty,
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::Spawn(e) => write!(f, "failed to start metadata engine: {}", e),
            ExtractionError::Timeout(d) => write!(f, "metadata engine timed out after {:?}", d),
            ExtractionError::ToolFailed { status, stderr } => match status {
                Some(code) => write!(f, "metadata engine exited with {}: {}", code, stderr),
                None => write!(f, "metadata engine terminated by signal: {}", stderr),
            },
            ExtractionError::Reported(msg) => write!(f, "metadata engine reported: {}", msg),
            ExtractionError::InvalidOutput(msg) => {
                write!(f, "unreadable metadata engine output: {}", msg)
            }
            ExtractionError::Empty => write!(f, "metadata engine returned no records"),
        }
    }
}

impl Error for ExtractionError {}

#[derive(Debug, Serialize)]
pub struct MetadataResponse {
    pub metadata: MetadataRecord,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
