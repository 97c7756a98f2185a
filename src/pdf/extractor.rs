use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to extract text from PDF: {0}")]
    Parse(String),
}

/// Extracts all text from a PDF file, page order preserved.
///
/// Pages with no extractable text (scanned images) contribute nothing and do
/// not error; the caller decides what an entirely empty result means.
pub fn extract_file(path: &Path) -> Result<String, ExtractError> {
    let raw = pdf_extract::extract_text(path).map_err(|e| ExtractError::Parse(e.to_string()))?;
    let cleaned = clean_text(&raw);
    debug!(raw_chars = raw.len(), cleaned_chars = cleaned.len(), "Extracted PDF text");
    Ok(cleaned)
}

static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();

/// Normalizes extractor output: trims lines, drops blank ones, collapses
/// interior whitespace runs, strips NUL/BOM artifacts.
fn clean_text(text: &str) -> String {
    let ws = WHITESPACE_RUN.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("valid regex"));
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| ws.replace_all(line, " ").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
        .replace('\u{0}', "")
        .replace('\u{FEFF}', "")
}
