//! Helpers for handing rendered documents to a transport.
use crate::template::error::{Result, TemplateError};
use crate::template::request::RenderRequest;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// MIME type of a `.pptx` document.
pub const PPTX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// File name used when a request does not choose one.
pub const DEFAULT_OUTPUT_NAME: &str = "presentation.pptx";

const PPTX_SUFFIX: &str = ".pptx";

/// Encode document bytes as standard base64.
#[inline]
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64 back into document bytes.
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| TemplateError::InvalidPayload(format!("invalid base64: {}", e)))
}

/// File name for the rendered document.
///
/// Uses `output.file_name` when it is a non-blank string, otherwise
/// `presentation.pptx`. Only the last path component is kept, so the name
/// never points outside the directory it is written to. The `.pptx` suffix
/// is added when missing.
pub fn resolve_output_name(request: &RenderRequest) -> String {
    let requested = request
        .output
        .as_ref()
        .and_then(|output| output.get("file_name"))
        .and_then(|name| name.as_str())
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .filter(|name| !name.trim().is_empty() && !matches!(*name, "." | ".."));

    match requested {
        Some(name) if name.to_ascii_lowercase().ends_with(PPTX_SUFFIX) => name.to_string(),
        Some(name) => format!("{}{}", name, PPTX_SUFFIX),
        None => DEFAULT_OUTPUT_NAME.to_string(),
    }
}
