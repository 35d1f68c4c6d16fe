//! # docx-html
//!
//! Structural re-rendering of DOCX documents into self-contained HTML.
//!
//! A document is loaded into a structural model (paragraphs, runs, tables,
//! drawings and the relationship table), then walked in body order to emit
//! one HTML page. Images travel inline as data URIs, anchored drawings keep
//! their absolute offsets, and a TrueType font can be embedded so the output
//! needs no companion files.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docx_html::{parse_file, render};
//!
//! fn main() -> docx_html::Result<()> {
//!     let doc = parse_file("report.docx")?;
//!
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     std::fs::write("report.html", html)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Faithful structure**: paragraphs and tables stay in document order
//! - **Inline assets**: images embedded as base64 data URIs
//! - **Absolute placement**: anchored drawings positioned in inches
//! - **Font embedding**: a discovered `.ttf` inlined as `@font-face`
//! - **Parallel rendering**: body blocks rendered with Rayon, reassembled in order

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, DocxConverter,
    OutputFormat,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx};
pub use error::{Error, Result};
pub use model::{
    Alignment, Anchor, Block, Document, Drawing, Metadata, Paragraph, Relationship, Run, Table,
    TableCell, TableRow, TextStyle,
};
pub use parser::{DocxParser, ParseOptions};
pub use render::{ExtractionStats, FontCatalog, JsonFormat, RenderOptions, RenderResult};

use std::io::Read;
use std::path::Path;

/// Parse a DOCX file and return a structured document.
///
/// # Example
///
/// ```no_run
/// use docx_html::parse_file;
///
/// let doc = parse_file("report.docx").unwrap();
/// println!("Body nodes: {}", doc.body.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = DocxParser::open(path)?;
    parser.parse()
}

/// Parse a DOCX file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = DocxParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a DOCX from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = DocxParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a DOCX from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = DocxParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a DOCX from a reader.
///
/// # Example
///
/// ```no_run
/// use docx_html::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("report.docx").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = DocxParser::from_reader(reader)?;
    parser.parse()
}

/// Extract plain text from a DOCX file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file_with_options(path, ParseOptions::new().structure_only())?;
    Ok(render::to_text(&doc))
}

/// Convert a DOCX file to self-contained HTML.
///
/// # Example
///
/// ```no_run
/// use docx_html::to_html;
///
/// let html = to_html("report.docx").unwrap();
/// std::fs::write("report.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Convert a DOCX file to HTML with custom options.
///
/// # Example
///
/// ```no_run
/// use docx_html::{to_html_with_options, RenderOptions};
///
/// let options = RenderOptions::new()
///     .with_font_dir("./fonts")
///     .with_font("Roboto-Regular.ttf");
/// let html = to_html_with_options("report.docx", &options).unwrap();
/// ```
pub fn to_html_with_options<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_html(&doc, options)
}

/// Convert a DOCX file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file_with_options(path, ParseOptions::new().structure_only())?;
    render::to_json(&doc, format)
}

/// Builder for parsing and converting DOCX documents.
///
/// # Example
///
/// ```no_run
/// use docx_html::DocxHtml;
///
/// let html = DocxHtml::new()
///     .with_font_dir("./fonts")
///     .with_font("Roboto-Regular.ttf")
///     .parse("report.docx")?
///     .to_html()?;
/// # Ok::<(), docx_html::Error>(())
/// ```
pub struct DocxHtml {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl DocxHtml {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Render body blocks one after another.
    pub fn sequential(mut self) -> Self {
        self.render_options = self.render_options.sequential();
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.parse_options = self.parse_options.with_resources(extract);
        self
    }

    /// Override the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Discover fonts under a directory.
    pub fn with_font_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.render_options = self.render_options.with_font_dir(dir);
        self
    }

    /// Select a font to embed by file name.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_font(name);
        self
    }

    /// Parse a DOCX file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<DocxHtmlResult> {
        let parser = DocxParser::open_with_options(path, self.parse_options)?;
        let document = parser.parse()?;
        Ok(DocxHtmlResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse a DOCX from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<DocxHtmlResult> {
        let parser = DocxParser::from_bytes_with_options(data, self.parse_options)?;
        let document = parser.parse()?;
        Ok(DocxHtmlResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for DocxHtml {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a DOCX document.
pub struct DocxHtmlResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl DocxHtmlResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to HTML with extraction statistics.
    pub fn to_html_with_stats(&self) -> Result<RenderResult> {
        render::to_html_with_stats(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
