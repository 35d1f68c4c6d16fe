//! Rendering options and configuration.

use std::path::Path;

use super::FontCatalog;

/// Title used when neither the options nor the document provide one.
pub const DEFAULT_TITLE: &str = "Converted Document";

/// Options for rendering a document to HTML.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Title override for the HTML `<title>`
    pub title: Option<String>,

    /// Fonts available for embedding
    pub fonts: FontCatalog,

    /// File name of the font to embed, looked up in `fonts`
    pub font: Option<String>,

    /// Render body blocks in parallel
    pub parallel: bool,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Select a font to embed by file name.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.font = Some(name.into());
        self
    }

    /// Use a prepared font catalog.
    pub fn with_font_catalog(mut self, fonts: FontCatalog) -> Self {
        self.fonts = fonts;
        self
    }

    /// Discover fonts under a directory.
    pub fn with_font_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.fonts = FontCatalog::discover(dir);
        self
    }

    /// Enable or disable parallel rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Render blocks one after another.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            fonts: FontCatalog::default(),
            font: None,
            parallel: true,
            collect_stats: false,
        }
    }
}
