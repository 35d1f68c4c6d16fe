//! Parsing options and configuration.

/// Options for loading DOCX packages.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Whether to read the binary payloads of related parts (images, etc.)
    pub extract_resources: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable resource extraction.
    pub fn with_resources(mut self, extract: bool) -> Self {
        self.extract_resources = extract;
        self
    }

    /// Load only the structural tree and relationship table.
    pub fn structure_only(mut self) -> Self {
        self.extract_resources = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            extract_resources: true,
        }
    }
}
