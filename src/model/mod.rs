//! Document model types for word-processing content.
//!
//! This module defines the structural tree the renderer walks: an ordered
//! body of typed nodes, the paragraphs and tables those nodes point at, and
//! the relationship table that links drawings to their binary parts.

mod document;
mod paragraph;
mod resource;
mod table;

pub use document::{Block, Document, Metadata};
pub use paragraph::{Alignment, Anchor, Drawing, Paragraph, Run, TextStyle};
pub use resource::{Part, Relationship, TargetMode};
pub use table::{Table, TableCell, TableRow};
