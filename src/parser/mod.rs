//! DOCX loading module.

mod body;
mod docx_parser;
mod options;
mod package;

pub use docx_parser::DocxParser;
pub use options::ParseOptions;
