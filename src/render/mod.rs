//! Rendering module for converting documents to HTML and other formats.

mod assets;
mod export;
mod font;
mod html;
mod options;
mod position;
mod result;

pub use assets::{data_uri, image_subtype, AssetMap};
pub use export::{to_json, to_text, JsonFormat};
pub use font::{embed_font, family_name, font_stylesheet, FontCatalog, FONT_EXTENSION};
pub use html::{escape_html, style_declarations, to_html, to_html_with_stats, HtmlRenderer};
pub use options::{RenderOptions, DEFAULT_TITLE};
pub use position::{emu_to_inches, extract_position, Position, EMU_PER_INCH};
pub use result::{ExtractionStats, RenderResult};
