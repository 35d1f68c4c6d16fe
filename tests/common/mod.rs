//! In-memory DOCX packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const WP_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const IMAGE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Builds a DOCX package from body XML fragments and media parts.
#[derive(Default)]
pub struct DocxBuilder {
    body: String,
    rels: Vec<(String, String, String)>,
    media: Vec<(String, Vec<u8>)>,
    damaged: Vec<String>,
    core: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw body XML.
    pub fn body(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    /// Append a paragraph with one plain run.
    pub fn paragraph(self, text: &str) -> Self {
        let xml = format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text);
        self.body(&xml)
    }

    /// Register an image part under `word/media/<name>`.
    pub fn image(mut self, id: &str, name: &str, data: &[u8]) -> Self {
        self.rels.push((
            id.to_string(),
            IMAGE_REL.to_string(),
            format!("media/{}", name),
        ));
        self.media.push((format!("word/media/{}", name), data.to_vec()));
        self
    }

    /// Register an image relationship whose target part is absent.
    pub fn dangling_image(mut self, id: &str, name: &str) -> Self {
        self.rels.push((
            id.to_string(),
            IMAGE_REL.to_string(),
            format!("media/{}", name),
        ));
        self
    }

    /// Register an image part whose compressed bytes are damaged, so the
    /// entry is listed but cannot be read back.
    pub fn damaged_image(mut self, id: &str, name: &str, data: &[u8]) -> Self {
        self = self.image(id, name, data);
        self.damaged.push(format!("word/media/{}", name));
        self
    }

    /// Add core properties with a title and creator.
    pub fn core(mut self, title: &str, creator: &str) -> Self {
        self.core = Some(format!(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:creator>{}</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T09:30:00Z</dcterms:created></cp:coreProperties>"#,
            title, creator
        ));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        let content_types = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="jpeg" ContentType="image/jpeg"/><Default Extension="gif" ContentType="image/gif"/><Default Extension="emf" ContentType="image/x-emf"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>{}</Types>"#,
            if self.core.is_some() {
                r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#
            } else {
                ""
            }
        );
        put(&mut writer, "[Content_Types].xml", content_types.as_bytes(), options);

        let mut root_rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
        );
        if self.core.is_some() {
            root_rels.push_str(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#);
        }
        root_rels.push_str("</Relationships>");
        put(&mut writer, "_rels/.rels", root_rels.as_bytes(), options);

        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}" xmlns:wp="{}" xmlns:a="{}" xmlns:r="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            W_NS, WP_NS, A_NS, R_NS, self.body
        );
        put(&mut writer, "word/document.xml", document.as_bytes(), options);

        if !self.rels.is_empty() {
            let mut rels = String::from(
                r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            );
            for (id, rel_type, target) in &self.rels {
                rels.push_str(&format!(
                    r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                    id, rel_type, target
                ));
            }
            rels.push_str("</Relationships>");
            put(&mut writer, "word/_rels/document.xml.rels", rels.as_bytes(), options);
        }

        for (name, data) in &self.media {
            put(&mut writer, name, data, options);
        }

        if let Some(core) = &self.core {
            put(&mut writer, "docProps/core.xml", core.as_bytes(), options);
        }

        let mut data = writer.finish().unwrap().into_inner();
        for name in &self.damaged {
            flip_entry_byte(&mut data, name);
        }
        data
    }
}

/// Flip one byte in the middle of an entry's stored data.
fn flip_entry_byte(data: &mut [u8], name: &str) {
    let header = (0..data.len() - 30)
        .find(|&i| {
            data[i..i + 4] == *b"PK\x03\x04"
                && data[i + 30..].starts_with(name.as_bytes())
        })
        .unwrap();
    let field = |at: usize| u16::from_le_bytes([data[at], data[at + 1]]) as usize;
    let compressed = u32::from_le_bytes(data[header + 18..header + 22].try_into().unwrap());
    let start = header + 30 + field(header + 26) + field(header + 28);
    data[start + compressed as usize / 2] ^= 0xFF;
}

fn put(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    name: &str,
    data: &[u8],
    options: SimpleFileOptions,
) {
    writer.start_file(name, options).unwrap();
    writer.write_all(data).unwrap();
}

/// Run XML containing an inline drawing.
pub fn inline_drawing(id: &str) -> String {
    format!(
        r#"<w:drawing><wp:inline><a:graphic><a:graphicData><a:blip r:embed="{}"/></a:graphicData></a:graphic></wp:inline></w:drawing>"#,
        id
    )
}

/// Run XML containing an anchored drawing at the given EMU offsets.
pub fn anchored_drawing(id: &str, x: i64, y: i64) -> String {
    format!(
        r#"<w:drawing><wp:anchor><wp:positionH relativeFrom="page"><wp:posOffset>{}</wp:posOffset></wp:positionH><wp:positionV relativeFrom="page"><wp:posOffset>{}</wp:posOffset></wp:positionV><a:graphic><a:graphicData><a:blip r:embed="{}"/></a:graphicData></a:graphic></wp:anchor></w:drawing>"#,
        x, y, id
    )
}

/// Content between the page wrapper tags.
pub fn page_body(html: &str) -> &str {
    let open = "<div class=\"page\">";
    let start = html.find(open).unwrap() + open.len();
    let end = html.rfind("</div></body></html>").unwrap();
    &html[start..end]
}
