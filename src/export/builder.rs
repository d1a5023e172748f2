//! Page-layout primitives a document backend implements.

use crate::error::Result;

/// Points per centimetre.
pub const PT_PER_CM: f32 = 72.0 / 2.54;

/// Page size and margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
}

impl PageGeometry {
    /// A4 portrait with 2 cm margins.
    pub fn a4() -> Self {
        Self::new(595.0, 842.0).with_margins(2.0 * PT_PER_CM)
    }

    /// A page without margins.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
        }
    }

    /// Set all four margins.
    pub fn with_margins(mut self, margin: f32) -> Self {
        self.margin_top = margin;
        self.margin_right = margin;
        self.margin_bottom = margin;
        self.margin_left = margin;
        self
    }

    /// Width available for text.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Height available for text.
    pub fn content_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Paragraph-level formatting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphStyle {
    pub alignment: Alignment,
    /// Space above the paragraph in points
    pub space_before: f32,
    /// Space below the paragraph in points
    pub space_after: f32,
    /// Text after a `\t` run is right-aligned at the content edge
    pub right_tab: bool,
    /// Keep on the same page as the following paragraph
    pub keep_with_next: bool,
    /// Rule colour (hex, no `#`) drawn under the paragraph
    pub border_bottom: Option<String>,
}

impl ParagraphStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    pub fn with_right_tab(mut self) -> Self {
        self.right_tab = true;
        self
    }

    pub fn keep_next(mut self, keep: bool) -> Self {
        self.keep_with_next = keep;
        self
    }

    pub fn with_border_bottom(mut self, color: impl Into<String>) -> Self {
        self.border_bottom = Some(color.into());
        self
    }
}

/// Character-level formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    /// Font size in points
    pub size: f32,
    /// Hex colour without `#`; `None` is black
    pub color: Option<String>,
}

impl RunStyle {
    /// Plain text at `size` points.
    pub fn sized(size: f32) -> Self {
        Self {
            bold: false,
            italic: false,
            size,
            color: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn colored(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }
}

impl Default for RunStyle {
    fn default() -> Self {
        Self::sized(11.0)
    }
}

/// Receives the document structure one primitive at a time.
///
/// Calls arrive in reading order: a section, its page geometry, then
/// paragraphs each followed by their runs. A run whose text is exactly `\t`
/// moves the rest of the paragraph to the right tab stop.
pub trait DocumentBuilder: Send {
    /// Start a new section; content after this begins on a fresh page.
    fn add_section(&mut self);

    /// Page geometry for the current section.
    fn set_page_geometry(&mut self, geometry: PageGeometry);

    /// Start a new paragraph.
    fn add_paragraph(&mut self, style: ParagraphStyle);

    /// Append a run of text to the current paragraph.
    fn add_styled_run(&mut self, text: &str, style: RunStyle);

    /// Encode the document.
    fn serialize(self: Box<Self>) -> Result<Vec<u8>>;
}

/// Parse a `RRGGBB` hex colour into 0.0-1.0 components.
pub fn parse_hex_color(hex: &str) -> Option<(f32, f32, f32)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some((channel(0)?, channel(2)?, channel(4)?))
}
