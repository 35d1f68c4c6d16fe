//! DOCX document converter.

use crate::error::Result;
use crate::model::Document;
use crate::parser::DocxParser;
use crate::render::{to_html, to_html_with_stats, to_json, to_text, JsonFormat};
use std::path::Path;

use super::{ConvertOptions, ConvertResult, DocumentConverter, OutputFormat};

/// DOCX document converter.
///
/// Converts DOCX documents to HTML, plain text, or JSON.
#[derive(Debug, Clone, Default)]
pub struct DocxConverter {
    _private: (),
}

impl DocxConverter {
    /// Create a new DOCX converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn convert_document(&self, doc: Document, options: &ConvertOptions) -> Result<ConvertResult> {
        let metadata = doc.metadata.clone();
        let format = options.output_format;

        let result = match format {
            OutputFormat::Html if options.collect_stats => {
                let rendered = to_html_with_stats(&doc, &options.render)?;
                ConvertResult::new(rendered.content, metadata).with_stats(rendered.stats)
            }
            OutputFormat::Html => ConvertResult::new(to_html(&doc, &options.render)?, metadata),
            OutputFormat::Text => ConvertResult::new(to_text(&doc), metadata),
            OutputFormat::Json => ConvertResult::new(to_json(&doc, JsonFormat::Pretty)?, metadata),
        };

        Ok(result.with_mime_type(format.mime_type()))
    }
}

impl DocumentConverter for DocxConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = DocxParser::open_with_options(path, options.parse.clone())?;
        let doc = parser.parse()?;
        self.convert_document(doc, options)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = DocxParser::from_bytes_with_options(bytes, options.parse.clone())?;
        let doc = parser.parse()?;
        self.convert_document(doc, options)
    }
}
