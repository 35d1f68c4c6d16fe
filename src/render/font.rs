//! TrueType font discovery and embedding.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

use super::assets::data_uri;

/// Extension of font files picked up by discovery.
pub const FONT_EXTENSION: &str = "ttf";

/// Page, paragraph, image and table rules shipped with an embedded font.
const LAYOUT_RULES: &str = "\
.page { position: relative; width: 8.5in; margin: 20px auto; padding: 20px; box-sizing: border-box; background-color: white; box-shadow: 0 0 10px rgba(0,0,0,0.1); }
.paragraph { margin: 0; padding: 0; position: relative; }
.image-container { display: inline-block; position: relative; vertical-align: middle; }
img { max-width: 100%; height: auto; display: inline-block; vertical-align: middle; }
table { border-collapse: collapse; width: 100%; margin: 10px 0; }
td, th { border: 1px solid black; padding: 8px; position: relative; }
";

/// Catalog of TrueType fonts keyed by file name.
///
/// Keys are base file names (`Roboto-Regular.ttf`), so two files with the
/// same name in different directories collide; the one visited last wins.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    fonts: BTreeMap<String, PathBuf>,
}

impl FontCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recursively discover `.ttf` files under `root`.
    ///
    /// Hidden directories are not descended into and unreadable entries are
    /// skipped. A missing root yields an empty catalog.
    pub fn discover<P: AsRef<Path>>(root: P) -> Self {
        let mut catalog = Self::new();
        catalog.extend_from(root);
        catalog
    }

    /// Discover fonts under several roots, later roots overriding earlier ones.
    pub fn discover_all<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut catalog = Self::new();
        for root in roots {
            catalog.extend_from(root);
        }
        catalog
    }

    fn extend_from<P: AsRef<Path>>(&mut self, root: P) {
        let root = root.as_ref();
        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping font search entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_file() && is_font_file(entry.path()) {
                let name = entry.file_name().to_string_lossy().into_owned();
                self.insert(name, entry.into_path());
            }
        }
    }

    /// Register a font file under a name.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.fonts.insert(name.into(), path.into());
    }

    /// Look up a font path by file name.
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.fonts.get(name).map(PathBuf::as_path)
    }

    /// Font file names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    /// Iterate over names and paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.fonts
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    /// Number of fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(FONT_EXTENSION))
        .unwrap_or(false)
}

/// Prepend an embedded-font stylesheet to `html`.
///
/// With no font selected, or a name the catalog does not know, the input is
/// returned unchanged. A selected font that cannot be read is an error.
pub fn embed_font(html: String, catalog: &FontCatalog, font_name: Option<&str>) -> Result<String> {
    let Some(name) = font_name else {
        return Ok(html);
    };

    let Some(path) = catalog.get(name) else {
        log::warn!(
            "Font {} not found among {} discovered fonts; output left unstyled",
            name,
            catalog.len()
        );
        return Ok(html);
    };

    let data = std::fs::read(path)
        .map_err(|e| Error::FontRead(format!("{}: {}", path.display(), e)))?;
    log::debug!("Embedding font {} ({} bytes)", path.display(), data.len());

    let mut output = font_stylesheet(&family_name(name), &data);
    output.push_str(&html);
    Ok(output)
}

/// CSS family name for a font file: its name without extension.
pub fn family_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

/// Build the `<style>` block embedding a font as a data URI.
pub fn font_stylesheet(family: &str, data: &[u8]) -> String {
    let family = family.replace('\'', "\\'");
    let mut css = String::from("<style>\n");
    css.push_str(&format!(
        "@font-face {{ font-family: '{}'; src: url({}) format('truetype'); }}\n",
        family,
        data_uri("font/ttf", data)
    ));
    css.push_str(&format!(
        "body {{ font-family: '{}', Arial, sans-serif; margin: 0; padding: 0; background-color: white; }}\n",
        family
    ));
    css.push_str(LAYOUT_RULES);
    css.push_str("</style>\n");
    css
}
