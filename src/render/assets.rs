//! Embedded image resolution.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::Result;
use crate::model::{Document, Relationship};

/// Image subtypes browsers are expected to render from a data URI.
const RENDERABLE_SUBTYPES: [&str; 4] = ["jpeg", "jpg", "png", "gif"];
const FALLBACK_SUBTYPE: &str = "png";

/// Image data URIs keyed by relationship id.
///
/// Built once per document before rendering starts and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct AssetMap {
    uris: HashMap<String, String>,
}

impl AssetMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every image relationship of a document.
    pub fn from_document(doc: &Document) -> Self {
        Self::from_relationships(doc.relationships.values())
    }

    /// Resolve every image relationship in `relationships`.
    ///
    /// Relationships whose part is missing or unusable are logged and left
    /// out of the map.
    pub fn from_relationships<'a>(
        relationships: impl IntoIterator<Item = &'a Relationship>,
    ) -> Self {
        let mut uris = HashMap::new();

        for relationship in relationships.into_iter().filter(|r| r.is_image()) {
            match image_data_uri(relationship) {
                Ok(uri) => {
                    uris.insert(relationship.id.clone(), uri);
                }
                Err(e) => {
                    log::warn!("Skipping image {}: {}", relationship.id, e);
                }
            }
        }

        Self { uris }
    }

    /// Get the data URI for a relationship id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.uris.get(id).map(String::as_str)
    }

    /// Check if a relationship id resolved to an image.
    pub fn contains(&self, id: &str) -> bool {
        self.uris.contains_key(id)
    }

    /// Number of resolved images.
    pub fn len(&self) -> usize {
        self.uris.len()
    }

    /// Check if no image resolved.
    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }
}

fn image_data_uri(relationship: &Relationship) -> Result<String> {
    let part = relationship.payload()?;
    if part.data.is_empty() {
        log::debug!("Image {} has an empty payload", relationship.target);
    }

    let mime = format!("image/{}", image_subtype(&part.content_type));
    Ok(data_uri(&mime, &part.data))
}

/// Image subtype for a content type, falling back to `png` for anything a
/// browser is not expected to decode.
pub fn image_subtype(content_type: &str) -> String {
    let subtype = content_type.rsplit('/').next().unwrap_or_default().trim();
    if RENDERABLE_SUBTYPES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(subtype))
    {
        subtype.to_ascii_lowercase()
    } else {
        FALLBACK_SUBTYPE.to_string()
    }
}

/// Build a base64 data URI.
pub fn data_uri(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(data))
}
