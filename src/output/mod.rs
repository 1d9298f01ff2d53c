use anyhow::Result;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::extractors::TranscriptPayload;

pub mod formatters;

pub use formatters::*;

fn render(payload: &TranscriptPayload, format: &OutputFormat, include_timestamps: bool) -> Result<String> {
    let content = match format {
        OutputFormat::Json => format_as_json(payload)?,
        OutputFormat::Text => format_as_text(payload, include_timestamps),
    };
    Ok(content)
}

/// Save transcript to file
pub async fn save_to_file(
    payload: &TranscriptPayload,
    path: &Path,
    format: &OutputFormat,
    include_timestamps: bool,
) -> Result<()> {
    let content = render(payload, format, include_timestamps)?;
    fs_err::write(path, content)?;
    Ok(())
}

/// Print transcript to console
pub fn print_to_console(
    payload: &TranscriptPayload,
    format: &OutputFormat,
    include_timestamps: bool,
) -> Result<()> {
    let content = render(payload, format, include_timestamps)?;
    println!("{}", content);
    Ok(())
}
