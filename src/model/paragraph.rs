//! Paragraph and run-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph alignment
    pub alignment: Alignment,

    /// Runs in reading order
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with one unstyled run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_run(Run::new(text));
        p
    }

    /// Set alignment and return self.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Add a run.
    pub fn add_run(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Add a run and return self.
    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph carries neither text nor drawings.
    pub fn is_empty(&self) -> bool {
        self.runs
            .iter()
            .all(|r| r.text.trim().is_empty() && r.drawings.is_empty())
    }
}

/// A run of text with consistent styling, possibly carrying drawings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Run {
    /// The text content (may be empty)
    pub text: String,

    /// Explicit run properties
    pub style: TextStyle,

    /// Drawings embedded in the run, in document order
    pub drawings: Vec<Drawing>,
}

impl Run {
    /// Create a new run with no explicit style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Mark the run bold and return self.
    pub fn bold(mut self) -> Self {
        self.style.bold = Some(true);
        self
    }

    /// Mark the run italic and return self.
    pub fn italic(mut self) -> Self {
        self.style.italic = Some(true);
        self
    }

    /// Mark the run underlined and return self.
    pub fn underline(mut self) -> Self {
        self.style.underline = Some(true);
        self
    }

    /// Set the font size in points and return self.
    pub fn size(mut self, points: f32) -> Self {
        self.style.font_size = Some(points);
        self
    }

    /// Attach a drawing and return self.
    pub fn with_drawing(mut self, drawing: Drawing) -> Self {
        self.drawings.push(drawing);
        self
    }
}

/// Run properties as set on the run itself.
///
/// Flags are tri-state: `None` means the property is not set on the run,
/// `Some(false)` means it is explicitly switched off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: Option<bool>,

    /// Italic text
    pub italic: Option<bool>,

    /// Underlined text
    pub underline: Option<bool>,

    /// Font size in points
    pub font_size: Option<f32>,
}

/// An inline drawing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    /// Relationship id of the embedded picture (`a:blip/@r:embed`)
    pub embed: Option<String>,

    /// Floating placement descriptor, absent for inline pictures
    pub anchor: Option<Anchor>,
}

impl Drawing {
    /// Create an inline drawing referencing a relationship id.
    pub fn inline(embed: impl Into<String>) -> Self {
        Self {
            embed: Some(embed.into()),
            anchor: None,
        }
    }

    /// Create an anchored drawing with offsets in EMU.
    pub fn anchored(embed: impl Into<String>, x_emu: i64, y_emu: i64) -> Self {
        Self {
            embed: Some(embed.into()),
            anchor: Some(Anchor::new(x_emu.to_string(), y_emu.to_string())),
        }
    }
}

/// Floating placement of a drawing.
///
/// Offsets are kept as the raw `wp:posOffset` text found in the document;
/// they are interpreted at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Horizontal offset in EMU (`wp:positionH/wp:posOffset`)
    pub horizontal: Option<String>,

    /// Vertical offset in EMU (`wp:positionV/wp:posOffset`)
    pub vertical: Option<String>,
}

impl Anchor {
    /// Create an anchor with both offsets.
    pub fn new(horizontal: impl Into<String>, vertical: impl Into<String>) -> Self {
        Self {
            horizontal: Some(horizontal.into()),
            vertical: Some(vertical.into()),
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified or any other alignment
    Justify,
}

impl Alignment {
    /// Map a `w:jc` value onto an alignment.
    pub fn from_jc(val: &str) -> Self {
        match val {
            "center" => Alignment::Center,
            "right" | "end" => Alignment::Right,
            "both" | "distribute" => Alignment::Justify,
            _ => Alignment::Left,
        }
    }
}
