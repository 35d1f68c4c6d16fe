//! OOXML package plumbing: part access, content types, relationships and
//! core properties.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use chrono::{DateTime, Utc};
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::model::{Metadata, TargetMode};

pub(crate) type Archive = ZipArchive<Cursor<Vec<u8>>>;

pub(crate) const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub(crate) const ROOT_RELS_PART: &str = "_rels/.rels";
pub(crate) const DEFAULT_MAIN_PART: &str = "word/document.xml";

const OFFICE_DOCUMENT_REL_SUFFIX: &str = "/officeDocument";
const CORE_PROPERTIES_REL_SUFFIX: &str = "/core-properties";
const DEFAULT_CORE_PART: &str = "docProps/core.xml";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Read a part's bytes. Part names are matched case-insensitively, as OOXML
/// requires, when an exact match is missing.
pub(crate) fn read_part(archive: &mut Archive, name: &str) -> Result<Vec<u8>> {
    let entry_name = find_entry_name(archive, name)
        .ok_or_else(|| Error::MissingPart(name.to_string()))?;
    let mut entry = archive.by_name(&entry_name)?;
    let mut data = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut data)?;
    Ok(data)
}

/// Read a part as UTF-8 XML text, dropping a leading byte order mark.
pub(crate) fn read_xml_part(archive: &mut Archive, name: &str) -> Result<String> {
    let data = read_part(archive, name)?;
    let text = String::from_utf8(data)
        .map_err(|e| Error::Xml(format!("{} is not valid UTF-8: {}", name, e)))?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

fn find_entry_name(archive: &Archive, name: &str) -> Option<String> {
    if archive.index_for_name(name).is_some() {
        return Some(name.to_string());
    }
    archive
        .file_names()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
        .map(str::to_string)
}

/// Content types declared in `[Content_Types].xml`.
#[derive(Debug, Default)]
pub(crate) struct ContentTypes {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypes {
    pub(crate) fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        let mut types = Self::default();

        for node in doc.root_element().children().filter(|n| n.is_element()) {
            match node.tag_name().name() {
                "Default" => {
                    if let (Some(ext), Some(ct)) =
                        (node.attribute("Extension"), node.attribute("ContentType"))
                    {
                        types.defaults.insert(ext.to_ascii_lowercase(), ct.to_string());
                    }
                }
                "Override" => {
                    if let (Some(name), Some(ct)) =
                        (node.attribute("PartName"), node.attribute("ContentType"))
                    {
                        types
                            .overrides
                            .insert(normalize_part_name(name), ct.to_string());
                    }
                }
                _ => {}
            }
        }

        Ok(types)
    }

    /// Content type of a part (zip entry name, no leading slash).
    pub(crate) fn lookup(&self, part_name: &str) -> &str {
        if let Some(ct) = self.overrides.get(&normalize_part_name(part_name)) {
            return ct;
        }
        part_name
            .rsplit_once('.')
            .and_then(|(_, ext)| self.defaults.get(&ext.to_ascii_lowercase()))
            .map(String::as_str)
            .unwrap_or(FALLBACK_CONTENT_TYPE)
    }
}

fn normalize_part_name(name: &str) -> String {
    name.trim_start_matches('/').to_ascii_lowercase()
}

/// A relationship as written in a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawRelationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub target_mode: TargetMode,
}

pub(crate) fn parse_relationships(xml: &str) -> Result<Vec<RawRelationship>> {
    let doc = roxmltree::Document::parse(xml)?;
    let rels = doc
        .root_element()
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "Relationship")
        .filter_map(|n| {
            let id = n.attribute("Id")?;
            let target = n.attribute("Target")?;
            let target_mode = match n.attribute("TargetMode") {
                Some(mode) if mode.eq_ignore_ascii_case("External") => TargetMode::External,
                _ => TargetMode::Internal,
            };
            Some(RawRelationship {
                id: id.to_string(),
                rel_type: n.attribute("Type").unwrap_or_default().to_string(),
                target: target.to_string(),
                target_mode,
            })
        })
        .collect();
    Ok(rels)
}

/// Path of the relationships part belonging to `part`.
pub(crate) fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the part that declares it.
pub(crate) fn resolve_target(source_part: &str, target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let relative = match target.strip_prefix('/') {
        Some(absolute) => absolute,
        None => {
            if let Some((dir, _)) = source_part.rsplit_once('/') {
                segments.extend(dir.split('/').filter(|s| !s.is_empty()));
            }
            target
        }
    };

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}

/// Locate the main document part through the package relationships.
pub(crate) fn main_document_part(root_rels: &[RawRelationship]) -> String {
    root_rels
        .iter()
        .find(|r| r.rel_type.ends_with(OFFICE_DOCUMENT_REL_SUFFIX))
        .map(|r| resolve_target("", &r.target))
        .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string())
}

/// Locate the core properties part through the package relationships.
pub(crate) fn core_properties_part(root_rels: &[RawRelationship]) -> String {
    root_rels
        .iter()
        .find(|r| r.rel_type.ends_with(CORE_PROPERTIES_REL_SUFFIX))
        .map(|r| resolve_target("", &r.target))
        .unwrap_or_else(|| DEFAULT_CORE_PART.to_string())
}

pub(crate) fn parse_core_properties(xml: &str) -> Result<Metadata> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut metadata = Metadata::default();

    for node in doc.root_element().children().filter(|n| n.is_element()) {
        let Some(value) = node.text().map(str::trim).filter(|t| !t.is_empty()) else {
            continue;
        };
        match node.tag_name().name() {
            "title" => metadata.title = Some(value.to_string()),
            "creator" => metadata.author = Some(value.to_string()),
            "subject" => metadata.subject = Some(value.to_string()),
            "keywords" => metadata.keywords = Some(value.to_string()),
            "lastModifiedBy" => metadata.last_modified_by = Some(value.to_string()),
            "created" => metadata.created = parse_w3cdtf(value),
            "modified" => metadata.modified = parse_w3cdtf(value),
            _ => {}
        }
    }

    Ok(metadata)
}

fn parse_w3cdtf(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="PNG" ContentType="image/png"/>
  <Default Extension="jpeg" ContentType="image/jpeg"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/media/special.bin" ContentType="image/gif"/>
</Types>"#;

    #[test]
    fn test_content_types_lookup() {
        let types = ContentTypes::parse(CONTENT_TYPES).unwrap();
        assert_eq!(types.lookup("word/media/image1.png"), "image/png");
        assert_eq!(types.lookup("word/media/photo.JPEG"), "image/jpeg");
        assert_eq!(types.lookup("word/media/special.bin"), "image/gif");
        assert_eq!(types.lookup("word/media/unknown.emf"), "application/octet-stream");
        assert!(types.lookup("word/document.xml").ends_with("main+xml"));
    }

    #[test]
    fn test_parse_relationships() {
        let xml = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
  <Relationship Type="broken" Target="no-id.xml"/>
</Relationships>"#;
        let rels = parse_relationships(xml).unwrap();
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].id, "rId1");
        assert_eq!(rels[0].target_mode, TargetMode::Internal);
        assert_eq!(rels[1].target_mode, TargetMode::External);
    }

    #[test]
    fn test_rels_path_for() {
        assert_eq!(rels_path_for("word/document.xml"), "word/_rels/document.xml.rels");
        assert_eq!(rels_path_for("document.xml"), "_rels/document.xml.rels");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("word/document.xml", "media/image1.png"),
            "word/media/image1.png"
        );
        assert_eq!(
            resolve_target("word/document.xml", "/word/media/image2.png"),
            "word/media/image2.png"
        );
        assert_eq!(
            resolve_target("word/document.xml", "../customXml/item1.xml"),
            "customXml/item1.xml"
        );
        assert_eq!(resolve_target("", "word/document.xml"), "word/document.xml");
    }

    #[test]
    fn test_main_document_part() {
        let rels = vec![RawRelationship {
            id: "rId1".to_string(),
            rel_type:
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument"
                    .to_string(),
            target: "word/document2.xml".to_string(),
            target_mode: TargetMode::Internal,
        }];
        assert_eq!(main_document_part(&rels), "word/document2.xml");
        assert_eq!(main_document_part(&[]), DEFAULT_MAIN_PART);
    }

    #[test]
    fn test_parse_core_properties() {
        let xml = r#"<cp:coreProperties
    xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
    xmlns:dc="http://purl.org/dc/elements/1.1/"
    xmlns:dcterms="http://purl.org/dc/terms/"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>Quarterly Report</dc:title>
  <dc:creator>Jane Roe</dc:creator>
  <cp:keywords>  </cp:keywords>
  <dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T09:30:00Z</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">not a date</dcterms:modified>
</cp:coreProperties>"#;
        let metadata = parse_core_properties(xml).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Quarterly Report"));
        assert_eq!(metadata.author.as_deref(), Some("Jane Roe"));
        assert!(metadata.keywords.is_none());
        assert_eq!(
            metadata.created.map(|d| d.to_rfc3339()),
            Some("2024-03-01T09:30:00+00:00".to_string())
        );
        assert!(metadata.modified.is_none());
    }
}
