//! DOCX document parser using zip and roxmltree.

use std::io::{Cursor, Read};
use std::path::Path;

use zip::ZipArchive;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Part, Relationship};

use super::body::parse_body;
use super::options::ParseOptions;
use super::package::{
    core_properties_part, main_document_part, parse_core_properties, parse_relationships,
    read_part, read_xml_part, rels_path_for, resolve_target, Archive, ContentTypes,
    CONTENT_TYPES_PART, ROOT_RELS_PART,
};

/// DOCX document parser.
pub struct DocxParser {
    archive: Archive,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a DOCX file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a ZIP container before reading it whole
        detect_format_from_path(path)?;

        let data = std::fs::read(path)?;
        Self::from_vec(data, options)
    }

    /// Parse a DOCX from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a DOCX from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect_format_from_bytes(data)?;
        Self::from_vec(data.to_vec(), options)
    }

    /// Parse a DOCX from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a DOCX from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        detect_format_from_bytes(&data)?;
        Self::from_vec(data, options)
    }

    fn from_vec(data: Vec<u8>, options: ParseOptions) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive, options })
    }

    /// Number of entries in the package.
    pub fn part_count(&self) -> usize {
        self.archive.len()
    }

    /// Parse the package into a document.
    pub fn parse(mut self) -> Result<Document> {
        let content_types = match read_xml_part(&mut self.archive, CONTENT_TYPES_PART) {
            Ok(xml) => ContentTypes::parse(&xml)?,
            Err(e) => {
                log::warn!("No usable content types part: {}", e);
                ContentTypes::default()
            }
        };

        let root_rels = match read_xml_part(&mut self.archive, ROOT_RELS_PART) {
            Ok(xml) => parse_relationships(&xml)?,
            Err(e) => {
                log::debug!("No package relationships: {}", e);
                Vec::new()
            }
        };

        let main_part = main_document_part(&root_rels);
        let xml = read_xml_part(&mut self.archive, &main_part).map_err(|e| match e {
            Error::MissingPart(_) => Error::UnknownFormat,
            other => other,
        })?;
        let body = parse_body(&xml)?;

        let metadata = self.read_metadata(&core_properties_part(&root_rels));
        let relationships = self.read_relationships(&main_part, &content_types)?;

        let mut doc = Document::new();
        doc.metadata = metadata;
        doc.body = body.blocks;
        doc.paragraphs = body.paragraphs;
        doc.tables = body.tables;
        for relationship in relationships {
            doc.add_relationship(relationship);
        }

        log::debug!(
            "Loaded {}: {} body nodes, {} paragraphs, {} tables, {} relationships",
            main_part,
            doc.body.len(),
            doc.paragraphs.len(),
            doc.tables.len(),
            doc.relationships.len()
        );

        Ok(doc)
    }

    fn read_metadata(&mut self, core_part: &str) -> Metadata {
        let parsed = read_xml_part(&mut self.archive, core_part)
            .and_then(|xml| parse_core_properties(&xml));
        match parsed {
            Ok(metadata) => metadata,
            Err(e) => {
                log::debug!("No core properties: {}", e);
                Metadata::default()
            }
        }
    }

    fn read_relationships(
        &mut self,
        source_part: &str,
        content_types: &ContentTypes,
    ) -> Result<Vec<Relationship>> {
        let rels_part = rels_path_for(source_part);
        let xml = match read_xml_part(&mut self.archive, &rels_part) {
            Ok(xml) => xml,
            Err(Error::MissingPart(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut relationships = Vec::new();
        for raw in parse_relationships(&xml)? {
            let mut relationship = Relationship::new(raw.id, raw.rel_type, raw.target);
            relationship.target_mode = raw.target_mode;

            if self.options.extract_resources && !relationship.is_external() {
                let part_name = resolve_target(source_part, &relationship.target);
                match read_part(&mut self.archive, &part_name) {
                    Ok(data) => {
                        let content_type = content_types.lookup(&part_name);
                        relationship.part = Some(Part::new(content_type, data));
                    }
                    Err(e) => {
                        log::warn!(
                            "Relationship {} target {} unreadable: {}",
                            relationship.id,
                            part_name,
                            e
                        );
                    }
                }
            }

            relationships.push(relationship);
        }

        Ok(relationships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn package(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    const DOCUMENT: &[u8] = br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Hi</w:t></w:r></w:p></w:body></w:document>"#;

    #[test]
    fn test_parse_minimal_package() {
        let data = package(&[("word/document.xml", DOCUMENT)]);
        let doc = DocxParser::from_bytes(&data).unwrap().parse().unwrap();
        assert_eq!(doc.plain_text(), "Hi");
        assert!(doc.relationships.is_empty());
        assert!(doc.metadata.is_empty());
    }

    #[test]
    fn test_part_count() {
        let data = package(&[("word/document.xml", DOCUMENT), ("word/media/a.png", b"png")]);
        let parser = DocxParser::from_bytes(&data).unwrap();
        assert_eq!(parser.part_count(), 2);
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            DocxParser::from_bytes(b"definitely not a zip"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_zip_without_main_part() {
        let data = package(&[("hello.txt", b"hello")]);
        let result = DocxParser::from_bytes(&data).unwrap().parse();
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_unreadable_relationship_target_is_kept_without_part() {
        let rels = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/missing.png"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/present.png"/>
</Relationships>"#;
        let data = package(&[
            ("word/document.xml", DOCUMENT),
            ("word/_rels/document.xml.rels", rels),
            ("word/media/present.png", b"\x89PNG\r\n\x1a\n"),
        ]);
        let doc = DocxParser::from_bytes(&data).unwrap().parse().unwrap();
        assert!(doc.relationship("rId1").unwrap().part.is_none());
        let present = doc.relationship("rId2").unwrap().part.as_ref().unwrap();
        assert_eq!(present.size(), 8);
        assert_eq!(present.content_type, "application/octet-stream");
    }

    #[test]
    fn test_structure_only_skips_payloads() {
        let rels = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
</Relationships>"#;
        let data = package(&[
            ("word/document.xml", DOCUMENT),
            ("word/_rels/document.xml.rels", rels),
            ("word/media/image1.png", b"png-bytes"),
        ]);
        let options = ParseOptions::new().structure_only();
        let doc = DocxParser::from_bytes_with_options(&data, options)
            .unwrap()
            .parse()
            .unwrap();
        assert!(doc.relationship("rId1").unwrap().part.is_none());
    }
}
