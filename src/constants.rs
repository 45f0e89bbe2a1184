// src/constants.rs

pub const UPLOAD_DIR: &str = "./uploads";
pub const STATIC_DIR: &str = "./static";
pub const EXIFTOOL_BIN: &str = "exiftool";

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_EXTRACT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

// Multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

// Echo of the input path added by the engine; never leaves the server
pub const SOURCE_FILE_TAG: &str = "SourceFile";
pub const ENGINE_ERROR_TAG: &str = "Error";

// Client-facing messages
pub const MISSING_FILE_MESSAGE: &str = "file is required (field name: file)";
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract metadata";
pub const MALFORMED_UPLOAD_MESSAGE: &str = "malformed multipart upload";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "file exceeds maximum upload size";
pub const STORE_FAILED_MESSAGE: &str = "Failed to store upload";

pub const PLACEHOLDER: &str = "-";
