//! Relationship and package part types.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Relationship type URI suffix shared by picture relationships.
const IMAGE_REL_MARKER: &str = "image";

/// One entry of a part's relationship table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship id (e.g. "rId5")
    pub id: String,

    /// Relationship type URI
    pub rel_type: String,

    /// Target as written in the relationships part
    pub target: String,

    /// Whether the target lives inside the package
    pub target_mode: TargetMode,

    /// The resolved target part, if it could be read
    pub part: Option<Part>,
}

impl Relationship {
    /// Create an internal relationship without a loaded part.
    pub fn new(
        id: impl Into<String>,
        rel_type: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            rel_type: rel_type.into(),
            target: target.into(),
            target_mode: TargetMode::Internal,
            part: None,
        }
    }

    /// Create an image relationship with its payload.
    pub fn image(
        id: impl Into<String>,
        target: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self::new(
            id,
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image",
            target,
        )
        .with_part(Part::new(content_type, data))
    }

    /// Attach a loaded part and return self.
    pub fn with_part(mut self, part: Part) -> Self {
        self.part = Some(part);
        self
    }

    /// Check if the relationship type denotes an image.
    pub fn is_image(&self) -> bool {
        self.rel_type.contains(IMAGE_REL_MARKER)
    }

    /// Check if the relationship points outside the package.
    pub fn is_external(&self) -> bool {
        self.target_mode == TargetMode::External
    }

    /// Get the target part's payload.
    pub fn payload(&self) -> Result<&Part> {
        if self.is_external() {
            return Err(Error::ResourceNotFound(format!(
                "{} is an external target ({})",
                self.id, self.target
            )));
        }
        self.part
            .as_ref()
            .ok_or_else(|| Error::ResourceNotFound(format!("{} -> {}", self.id, self.target)))
    }
}

/// Where a relationship target lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMode {
    /// A part inside the package
    #[default]
    Internal,
    /// A URI outside the package
    External,
}

/// A binary package part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Content type from `[Content_Types].xml`
    pub content_type: String,

    /// Raw binary data
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl Part {
    /// Create a new part.
    pub fn new(content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            data,
        }
    }

    /// Get the size of the part data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
