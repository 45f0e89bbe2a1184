use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::MetadataResponse;
use crate::presentation;
use crate::services::MetadataExtractor;

#[derive(Parser)]
#[command(name = "exifscope")]
#[command(author, version, about = "Camera metadata extraction service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve,

    /// Extract metadata from a local file and print it
    Extract {
        /// Path to the media file (left untouched)
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary and detail cards as text
    Text,
    /// Same JSON body the HTTP endpoint returns
    Json,
    /// Standalone HTML report
    Html,
}

pub async fn handle_extract(file: &Path, format: OutputFormat) -> Result<()> {
    let config = Config::new();
    let extractor = MetadataExtractor::from_config(&config);

    info!("Extracting metadata from {:?} via {}", file, extractor.engine_id());
    let metadata = extractor
        .extract(file)
        .await
        .with_context(|| format!("Failed to extract metadata from {}", file.display()))?;

    let rendered = match format {
        OutputFormat::Text => presentation::render_text(&metadata),
        OutputFormat::Json => serde_json::to_string_pretty(&MetadataResponse { metadata })?,
        OutputFormat::Html => {
            let title = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "metadata".to_string());
            presentation::render_html(&metadata, &title).context("Failed to render HTML report")?
        }
    };

    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["exifscope"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_extract_with_format() {
        let cli = Cli::try_parse_from(["exifscope", "extract", "IMG_1.JPG", "--format", "html"])
            .unwrap();
        match cli.command {
            Some(Commands::Extract { file, format }) => {
                assert_eq!(file, PathBuf::from("IMG_1.JPG"));
                assert_eq!(format, OutputFormat::Html);
            }
            _ => panic!("expected extract command"),
        }
    }

    #[test]
    fn test_extract_defaults_to_text() {
        let cli = Cli::try_parse_from(["exifscope", "extract", "a.jpg"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Extract { format: OutputFormat::Text, .. })
        ));
    }
}
