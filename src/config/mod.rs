use std::path::PathBuf;
use std::time::Duration;

use crate::constants;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub exiftool_path: String,
    pub extract_timeout: Duration,
    pub max_upload_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the config from an arbitrary key lookup. Missing or unparsable
    /// values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port: u16 = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(constants::DEFAULT_PORT);
        let timeout_secs: u64 = lookup("EXTRACT_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(constants::DEFAULT_EXTRACT_TIMEOUT_SECS);

        Self {
            host,
            port,
            upload_dir: PathBuf::from(
                lookup("UPLOAD_DIR").unwrap_or_else(|| constants::UPLOAD_DIR.to_string()),
            ),
            static_dir: PathBuf::from(
                lookup("STATIC_DIR").unwrap_or_else(|| constants::STATIC_DIR.to_string()),
            ),
            exiftool_path: lookup("EXIFTOOL_PATH")
                .unwrap_or_else(|| constants::EXIFTOOL_BIN.to_string()),
            extract_timeout: Duration::from_secs(timeout_secs),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(constants::DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}
