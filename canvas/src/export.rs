//! Export of the deck as a downloadable JSON document, and the byte-to-URL
//! conversion used when an image file is inserted.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::consts::{EXPORT_FILE_NAME, EXPORT_MIME};
use crate::doc::Slide;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize slides: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A file ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime: String,
    pub contents: String,
}

/// Serialize `slides` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`ExportError::Serialize`] if serialization fails.
pub fn to_json(slides: &[Slide]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(slides)?)
}

/// Build the `presentation.json` download for `slides`.
///
/// # Errors
///
/// Returns [`ExportError::Serialize`] if serialization fails.
pub fn export_file(slides: &[Slide]) -> Result<ExportFile, ExportError> {
    Ok(ExportFile {
        file_name: EXPORT_FILE_NAME.to_owned(),
        mime: EXPORT_MIME.to_owned(),
        contents: to_json(slides)?,
    })
}

/// Embed `bytes` as a `data:` URL so an image element can display it without
/// any outside storage.
#[must_use]
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() { "application/octet-stream" } else { mime.trim() };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
