//! Plain text and JSON output.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to plain text.
///
/// Paragraphs and tables are separated by blank lines, table cells by tabs.
/// Empty paragraphs are dropped so spacing paragraphs do not pile up.
pub fn to_text(doc: &Document) -> String {
    doc.plain_text()
}

/// Convert a document structure to JSON.
///
/// Image payloads are not serialized; only their content type is.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
