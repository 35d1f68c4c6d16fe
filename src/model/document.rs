//! Document-level types.

use super::{Paragraph, Relationship, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A loaded word-processing document.
///
/// Paragraphs and tables live in their own lists; the body refers to them by
/// stable index so that the two kinds stay interleaved in reading order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Body-level nodes in document order
    pub body: Vec<Block>,

    /// Body paragraphs, indexed by `Block::Paragraph`
    pub paragraphs: Vec<Paragraph>,

    /// Body tables, indexed by `Block::Table`
    pub tables: Vec<Table>,

    /// Relationships of the main document part, keyed by relationship id
    pub relationships: HashMap<String, Relationship>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            body: Vec::new(),
            paragraphs: Vec::new(),
            tables: Vec::new(),
            relationships: HashMap::new(),
        }
    }

    /// Append a paragraph to the body.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Block::Paragraph(self.paragraphs.len()));
        self.paragraphs.push(paragraph);
    }

    /// Append a table to the body.
    pub fn add_table(&mut self, table: Table) {
        self.body.push(Block::Table(self.tables.len()));
        self.tables.push(table);
    }

    /// Append a body node the renderer does not understand.
    pub fn add_unknown(&mut self, tag: impl Into<String>) {
        self.body.push(Block::Unknown(tag.into()));
    }

    /// Register a relationship, replacing any previous one with the same id.
    pub fn add_relationship(&mut self, relationship: Relationship) {
        self.relationships
            .insert(relationship.id.clone(), relationship);
    }

    /// Get a paragraph by its body index.
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    /// Get a table by its body index.
    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    /// Get a relationship by id.
    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationships.get(id)
    }

    /// Number of image relationships in the document.
    pub fn image_count(&self) -> usize {
        self.relationships.values().filter(|r| r.is_image()).count()
    }

    /// Check if the body has no nodes.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Get plain text content of the body, in document order.
    ///
    /// Blocks with no visible text are left out.
    pub fn plain_text(&self) -> String {
        self.body
            .iter()
            .filter_map(|block| match *block {
                Block::Paragraph(i) => self.paragraph(i).map(|p| p.plain_text()),
                Block::Table(i) => self.table(i).map(|t| t.plain_text()),
                Block::Unknown(_) => None,
            })
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A body-level node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Block {
    /// Index into `Document::paragraphs`
    Paragraph(usize),

    /// Index into `Document::tables`
    Table(usize),

    /// Any other element (section properties, bookmarks, content controls, ...)
    Unknown(String),
}

/// Document metadata from the core properties part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Last person to modify the document
    pub last_modified_by: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Check if no property is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
            && self.last_modified_by.is_none()
            && self.created.is_none()
            && self.modified.is_none()
    }
}
