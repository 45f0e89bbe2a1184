use async_trait::async_trait;
use log::{debug, error, info};
use serde_json::Value;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

use crate::config::Config;
use crate::constants;
use crate::models::{ExifDateValue, ExtractionError, ExtractionResult, MetadataRecord};

/// Opaque capability that reads embedded tags from a file.
#[async_trait]
pub trait MetadataEngine: Send + Sync {
    async fn read_tags(&self, path: &Path) -> ExtractionResult;
    fn engine_id(&self) -> &'static str;
}

/// Runs the `exiftool` binary as a subprocess.
#[derive(Debug, Clone)]
pub struct ExifToolEngine {
    program: String,
    leading_args: Vec<String>,
    timeout: Duration,
}

impl ExifToolEngine {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.exiftool_path.clone(), config.extract_timeout)
    }

    /// Arguments placed before the exiftool options, e.g. a script path when
    /// `program` is an interpreter.
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }
}

#[async_trait]
impl MetadataEngine for ExifToolEngine {
    async fn read_tags(&self, path: &Path) -> ExtractionResult {
        debug!("Running {} on {:?}", self.program, path);

        let child = Command::new(&self.program)
            .args(&self.leading_args)
            .arg("-json")
            .arg("-struct")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ExtractionError::Spawn)?;

        // Dropping the future on timeout drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ExtractionError::Timeout(self.timeout))?
            .map_err(ExtractionError::Spawn)?;

        parse_engine_output(&output.stdout, &output.stderr, output.status)
    }

    fn engine_id(&self) -> &'static str {
        "exiftool"
    }
}

fn parse_engine_output(stdout: &[u8], stderr: &[u8], status: ExitStatus) -> ExtractionResult {
    let tool_failed = || ExtractionError::ToolFailed {
        status: status.code(),
        stderr: String::from_utf8_lossy(stderr).trim().to_string(),
    };

    let records: Vec<MetadataRecord> = match serde_json::from_slice(stdout) {
        Ok(records) => records,
        Err(_) if !status.success() => return Err(tool_failed()),
        Err(e) => return Err(ExtractionError::InvalidOutput(e.to_string())),
    };

    let Some(record) = records.into_iter().next() else {
        return Err(if status.success() {
            ExtractionError::Empty
        } else {
            tool_failed()
        });
    };

    if let Some(Value::String(msg)) = record.get(constants::ENGINE_ERROR_TAG) {
        return Err(ExtractionError::Reported(msg.clone()));
    }
    if !status.success() {
        return Err(tool_failed());
    }

    Ok(record)
}

/// Removes the engine's echo of the input path and lifts EXIF date strings
/// into structured date objects.
pub fn clean_record(mut record: MetadataRecord) -> MetadataRecord {
    record.remove(constants::SOURCE_FILE_TAG);

    for (tag, value) in record.iter_mut() {
        if !tag.contains("Date") {
            continue;
        }
        let Value::String(raw) = value else {
            continue;
        };
        if let Some(date) = ExifDateValue::parse(raw) {
            match serde_json::to_value(&date) {
                Ok(lifted) => *value = lifted,
                Err(e) => debug!("Keeping {} as text: {}", tag, e),
            }
        }
    }

    record
}

/// Adapter between request handling and the metadata engine.
/// A single failed attempt is final; there are no retries.
#[derive(Clone)]
pub struct MetadataExtractor {
    engine: Arc<dyn MetadataEngine>,
}

impl MetadataExtractor {
    pub fn new(engine: Arc<dyn MetadataEngine>) -> Self {
        Self { engine }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(ExifToolEngine::from_config(config)))
    }

    pub fn engine_id(&self) -> &'static str {
        self.engine.engine_id()
    }

    pub async fn extract(&self, path: &Path) -> ExtractionResult {
        match self.engine.read_tags(path).await {
            Ok(record) => {
                let cleaned = clean_record(record);
                info!(
                    "Extracted {} tags from {:?} via {}",
                    cleaned.len(),
                    path,
                    self.engine_id()
                );
                Ok(cleaned)
            }
            Err(e) => {
                error!("Metadata extraction error for {:?}: {}", path, e);
                Err(e)
            }
        }
    }
}
