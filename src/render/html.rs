//! HTML rendering for DOCX documents.

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{Alignment, Block, Document, Paragraph, Run, Table, TextStyle};

use super::assets::AssetMap;
use super::font::embed_font;
use super::options::DEFAULT_TITLE;
use super::position::extract_position;
use super::{ExtractionStats, RenderOptions, RenderResult};

/// Convert a document to a self-contained HTML string.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to HTML with statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = HtmlRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Where an image is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageContext {
    /// Directly inside a body paragraph; anchored drawings keep their offset.
    Body,
    /// Inside a table cell; always laid out inline.
    TableCell,
}

impl ImageContext {
    fn alt_text(self) -> &'static str {
        match self {
            ImageContext::Body => "Document Image",
            ImageContext::TableCell => "Table Cell Image",
        }
    }
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document to HTML.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to HTML with extraction statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;

        // Markup would inflate the counts, so count the document text
        self.stats.count_text(&doc.plain_text());

        Ok(RenderResult::new(content, doc.metadata.clone(), self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        let assets = AssetMap::from_document(doc);
        log::debug!(
            "Resolved {} of {} relationships as images",
            assets.len(),
            doc.relationships.len()
        );

        let body = self.render_body(doc, &assets);
        let html = self.wrap_page(doc, &body);

        embed_font(html, &self.options.fonts, self.options.font.as_deref())
    }

    fn render_body(&mut self, doc: &Document, assets: &AssetMap) -> String {
        let fragments: Vec<(String, ExtractionStats)> = if self.options.parallel {
            doc.body
                .par_iter()
                .map(|block| render_block(doc, assets, block))
                .collect()
        } else {
            doc.body
                .iter()
                .map(|block| render_block(doc, assets, block))
                .collect()
        };

        let mut output = String::new();
        for (fragment, stats) in fragments {
            output.push_str(&fragment);
            if self.options.collect_stats {
                self.stats.merge(&stats);
            }
        }
        output
    }

    fn wrap_page(&self, doc: &Document, body: &str) -> String {
        let title = self
            .options
            .title
            .as_deref()
            .or(doc.metadata.title.as_deref())
            .unwrap_or(DEFAULT_TITLE);

        let mut output = String::with_capacity(body.len() + 256);
        output.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset='utf-8'>\n");
        output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        if let Some(ref author) = doc.metadata.author {
            output.push_str(&format!(
                "<meta name=\"author\" content=\"{}\">\n",
                escape_html(author)
            ));
        }
        output.push_str("</head>\n<body>\n<div class=\"page\">");
        output.push_str(body);
        output.push_str("</div></body></html>");
        output
    }
}

/// Render one body block into a standalone fragment.
fn render_block(doc: &Document, assets: &AssetMap, block: &Block) -> (String, ExtractionStats) {
    let mut output = String::new();
    let mut stats = ExtractionStats::new();

    match block {
        Block::Paragraph(index) => match doc.paragraph(*index) {
            Some(para) => {
                stats.add_paragraph();
                render_paragraph(&mut output, para, assets, &mut stats);
            }
            None => {
                log::warn!("Body paragraph {} has no content; skipped", index);
                stats.add_skipped_node();
            }
        },
        Block::Table(index) => match doc.table(*index) {
            Some(table) => {
                stats.add_table();
                render_table(&mut output, table, assets, &mut stats);
            }
            None => {
                log::warn!("Body table {} has no content; skipped", index);
                stats.add_skipped_node();
            }
        },
        Block::Unknown(tag) => {
            log::debug!("Skipping body node <{}>", tag);
            stats.add_skipped_node();
        }
    }

    (output, stats)
}

fn render_paragraph(
    output: &mut String,
    para: &Paragraph,
    assets: &AssetMap,
    stats: &mut ExtractionStats,
) {
    output.push_str("<div class=\"paragraph\">");
    match para.alignment {
        Alignment::Center => output.push_str("<div style=\"text-align: center;\">"),
        Alignment::Right => output.push_str("<div style=\"text-align: right;\">"),
        Alignment::Left | Alignment::Justify => output.push_str("<div>"),
    }

    for run in &para.runs {
        render_run(output, run, assets, ImageContext::Body, stats);
    }

    output.push_str("</div></div>");
}

fn render_table(
    output: &mut String,
    table: &Table,
    assets: &AssetMap,
    stats: &mut ExtractionStats,
) {
    output.push_str("<table>");
    for row in &table.rows {
        output.push_str("<tr>");
        for cell in &row.cells {
            output.push_str("<td>");
            for run in cell.paragraphs.iter().flat_map(|p| &p.runs) {
                render_run(output, run, assets, ImageContext::TableCell, stats);
            }
            output.push_str("</td>");
        }
        output.push_str("</tr>");
    }
    output.push_str("</table>");
}

/// Write a run's images followed by its styled text.
fn render_run(
    output: &mut String,
    run: &Run,
    assets: &AssetMap,
    context: ImageContext,
    stats: &mut ExtractionStats,
) {
    for drawing in &run.drawings {
        let Some(id) = drawing.embed.as_deref() else {
            continue;
        };
        let Some(uri) = assets.get(id) else {
            log::debug!("Image {} has no resolved asset; skipped", id);
            stats.add_missing_image();
            continue;
        };

        let position = match context {
            ImageContext::Body => extract_position(drawing),
            ImageContext::TableCell => None,
        };
        match position {
            Some(position) => {
                output.push_str(&format!(
                    "<div class=\"image-container\" style=\"{}\">",
                    position.to_css()
                ));
                stats.add_positioned_image();
            }
            None => output.push_str("<div class=\"image-container\">"),
        }
        output.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\"/></div>",
            uri,
            context.alt_text()
        ));
        stats.add_image();
    }

    if !run.text.trim().is_empty() {
        output.push_str(&format!(
            "<span style=\"{}\">{}</span>",
            style_declarations(&run.style).join("; "),
            escape_html(&run.text)
        ));
    }
}

/// CSS declarations for the formatting flags that are explicitly on.
pub fn style_declarations(style: &TextStyle) -> Vec<String> {
    let mut declarations = Vec::new();

    if style.bold == Some(true) {
        declarations.push("font-weight: bold".to_string());
    }
    if style.italic == Some(true) {
        declarations.push("font-style: italic".to_string());
    }
    if style.underline == Some(true) {
        declarations.push("text-decoration: underline".to_string());
    }
    if let Some(size) = style.font_size.filter(|s| *s > 0.0) {
        declarations.push(format!("font-size: {}pt", size));
    }

    declarations
}

/// Escape text for HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
