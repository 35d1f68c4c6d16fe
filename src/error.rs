//! Error types for docx-html library.

use std::io;
use thiserror::Error;

/// Result type alias for docx-html operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or rendering a document.
///
/// Only top-level conditions are reported through this type. Failures on
/// individual images, anchors or body nodes are logged and absorbed by the
/// renderer.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not an OOXML package.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// The ZIP container could not be read.
    #[error("ZIP container error: {0}")]
    Zip(String),

    /// An XML part could not be parsed.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// A part required to build the document is missing.
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Resource not found in document.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// A selected typeface could not be read.
    #[error("Font read error: {0}")]
    FontRead(String),

    /// Error during rendering (HTML, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::InvalidArchive(_) => Error::UnknownFormat,
            zip::result::ZipError::FileNotFound => Error::MissingPart(err.to_string()),
            _ => Error::Zip(err.to_string()),
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
