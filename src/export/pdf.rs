//! PDF backend built on `lopdf`.
//!
//! Paragraphs are buffered as they arrive and laid out when the document is
//! serialized, so keep-with-next can look one paragraph ahead. Text uses the
//! four standard Helvetica faces with WinAnsi encoding; no fonts are
//! embedded.

use super::builder::{
    parse_hex_color, Alignment, DocumentBuilder, PageGeometry, ParagraphStyle, RunStyle,
};
use super::metrics::{metrics_for, FontMetricTable};
use super::{DocumentBackend, ExportOptions};
use crate::error::Result;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;

/// Line height as a multiple of the largest font size on the line.
const LINE_SPACING: f32 = 1.2;

/// Gap kept between left text and right-tab text.
const TAB_GAP: f32 = 12.0;

/// Backend producing PDF documents.
#[derive(Debug, Default)]
pub struct PdfBackend;

impl PdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentBackend for PdfBackend {
    fn name(&self) -> &str {
        "pdf"
    }

    fn extension(&self) -> &str {
        "pdf"
    }

    fn mime_type(&self) -> &str {
        "application/pdf"
    }

    fn create_builder(&self, title: &str, options: &ExportOptions) -> Result<Box<dyn DocumentBuilder>> {
        Ok(Box::new(PdfBuilder::new(title, options)))
    }
}

#[derive(Debug, Clone)]
struct Run {
    text: String,
    style: RunStyle,
}

#[derive(Debug, Clone)]
struct Paragraph {
    style: ParagraphStyle,
    runs: Vec<Run>,
}

#[derive(Debug)]
enum Block {
    Section(PageGeometry),
    Paragraph(Paragraph),
}

/// Buffers builder calls and writes a PDF on [`DocumentBuilder::serialize`].
pub struct PdfBuilder {
    title: String,
    author: Option<String>,
    compress: bool,
    default_geometry: PageGeometry,
    blocks: Vec<Block>,
}

impl PdfBuilder {
    /// Create a builder.
    pub fn new(title: &str, options: &ExportOptions) -> Self {
        Self {
            title: title.to_string(),
            author: options.author.clone(),
            compress: options.compress,
            default_geometry: options.geometry,
            blocks: Vec::new(),
        }
    }
}

impl DocumentBuilder for PdfBuilder {
    fn add_section(&mut self) {
        self.blocks.push(Block::Section(self.default_geometry));
    }

    fn set_page_geometry(&mut self, geometry: PageGeometry) {
        match self
            .blocks
            .iter_mut()
            .rev()
            .find_map(|b| match b {
                Block::Section(g) => Some(g),
                _ => None,
            }) {
            Some(g) => *g = geometry,
            None => self.default_geometry = geometry,
        }
    }

    fn add_paragraph(&mut self, style: ParagraphStyle) {
        self.blocks.push(Block::Paragraph(Paragraph {
            style,
            runs: Vec::new(),
        }));
    }

    fn add_styled_run(&mut self, text: &str, style: RunStyle) {
        let run = Run {
            text: text.to_string(),
            style,
        };
        match self.blocks.last_mut() {
            Some(Block::Paragraph(p)) => p.runs.push(run),
            _ => self.blocks.push(Block::Paragraph(Paragraph {
                style: ParagraphStyle::default(),
                runs: vec![run],
            })),
        }
    }

    fn serialize(self: Box<Self>) -> Result<Vec<u8>> {
        let writer = PdfWriter::new(self.compress);
        let mut pages = PageLayout::new(self.default_geometry);

        let paragraphs: Vec<(usize, &Paragraph)> = self
            .blocks
            .iter()
            .enumerate()
            .filter_map(|(i, b)| match b {
                Block::Paragraph(p) => Some((i, p)),
                _ => None,
            })
            .collect();

        for (index, block) in self.blocks.iter().enumerate() {
            match block {
                Block::Section(geometry) => pages.start_section(*geometry),
                Block::Paragraph(paragraph) => {
                    let next = paragraphs
                        .iter()
                        .find(|(i, _)| *i > index)
                        .map(|(_, p)| *p);
                    pages.place(paragraph, next);
                }
            }
        }

        let finished = pages.finish();
        log::debug!("PDF layout: {} page(s)", finished.len());
        writer.write(&finished, &self.title, self.author.as_deref())
    }
}

/// A run of same-styled text positioned on a line.
#[derive(Debug, Clone)]
struct Segment {
    text: String,
    style: RunStyle,
    x: f32,
    width: f32,
}

#[derive(Debug, Default)]
struct Line {
    segments: Vec<Segment>,
    width: f32,
    height: f32,
}

impl Line {
    fn push_word(&mut self, word: &str, style: &RunStyle, space_before: bool) {
        let metrics = metrics_for(style.bold);
        let space = if space_before && !self.segments.is_empty() {
            metrics.measure(" ", style.size)
        } else {
            0.0
        };
        let word_width = metrics.measure(word, style.size);
        self.height = self.height.max(style.size * LINE_SPACING);

        match self.segments.last_mut() {
            Some(last) if last.style == *style => {
                if space > 0.0 {
                    last.text.push(' ');
                }
                last.text.push_str(word);
                last.width += space + word_width;
            }
            _ => self.segments.push(Segment {
                text: word.to_string(),
                style: style.clone(),
                x: self.width + space,
                width: word_width,
            }),
        }
        self.width += space + word_width;
    }
}

enum Piece<'a> {
    Word {
        text: &'a str,
        style: &'a RunStyle,
        space_before: bool,
    },
    Break,
}

/// Split runs into words, remembering whether whitespace preceded each.
fn pieces(runs: &[Run]) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut pending_space = false;
    for run in runs {
        let text = run.text.as_str();
        let mut start: Option<usize> = None;
        for (i, c) in text.char_indices() {
            if !c.is_whitespace() {
                start.get_or_insert(i);
                continue;
            }
            if let Some(s) = start.take() {
                out.push(Piece::Word {
                    text: &text[s..i],
                    style: &run.style,
                    space_before: pending_space,
                });
            }
            if c == '\n' {
                out.push(Piece::Break);
                pending_space = false;
            } else {
                pending_space = true;
            }
        }
        if let Some(s) = start {
            out.push(Piece::Word {
                text: &text[s..],
                style: &run.style,
                space_before: pending_space,
            });
            pending_space = false;
        }
    }
    out
}

/// Greedy word wrap at `max_width` points.
fn wrap(runs: &[Run], max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();

    for piece in pieces(runs) {
        match piece {
            Piece::Break => lines.push(std::mem::take(&mut line)),
            Piece::Word {
                text,
                style,
                space_before,
            } => {
                let metrics = metrics_for(style.bold);
                let word_width = metrics.measure(text, style.size);
                let needed = if space_before && !line.segments.is_empty() {
                    metrics.measure(" ", style.size)
                } else {
                    0.0
                } + word_width;

                if !line.segments.is_empty() && line.width + needed > max_width {
                    lines.push(std::mem::take(&mut line));
                }
                if word_width > max_width {
                    // Too wide for any line: break inside the word
                    let chunks = split_word(text, metrics, style.size, max_width);
                    let last = chunks.len() - 1;
                    for (i, chunk) in chunks.into_iter().enumerate() {
                        line.push_word(chunk, style, false);
                        if i < last {
                            lines.push(std::mem::take(&mut line));
                        }
                    }
                } else {
                    line.push_word(text, style, space_before);
                }
            }
        }
    }
    if !line.segments.is_empty() || lines.is_empty() {
        lines.push(line);
    }

    // Empty lines still take up a line of the paragraph's first run size
    let fallback = runs
        .first()
        .map(|r| r.style.size)
        .unwrap_or(RunStyle::default().size)
        * LINE_SPACING;
    for line in &mut lines {
        if line.height == 0.0 {
            line.height = fallback;
        }
    }
    lines
}

/// Split `text` into pieces no wider than `max_width`, at least one char each.
fn split_word<'a>(
    text: &'a str,
    metrics: &FontMetricTable,
    size: f32,
    max_width: f32,
) -> Vec<&'a str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut width = 0.0;
    let mut buf = [0u8; 4];
    for (i, c) in text.char_indices() {
        let char_width = metrics.measure(c.encode_utf8(&mut buf), size);
        if i > start && width + char_width > max_width {
            chunks.push(&text[start..i]);
            start = i;
            width = 0.0;
        }
        width += char_width;
    }
    chunks.push(&text[start..]);
    chunks
}

/// A laid-out paragraph ready for placement.
struct Laid {
    lines: Vec<Line>,
    /// Right-tab text for the first line
    tab: Option<Line>,
}

impl Laid {
    fn height(&self) -> f32 {
        self.lines.iter().map(|l| l.height).sum()
    }
}

fn lay_out(paragraph: &Paragraph, content_width: f32) -> Laid {
    let split = if paragraph.style.right_tab {
        paragraph.runs.iter().position(|r| r.text == "\t")
    } else {
        None
    };

    let (left, right) = match split {
        Some(i) => (&paragraph.runs[..i], Some(&paragraph.runs[i + 1..])),
        None => (&paragraph.runs[..], None),
    };

    let tab = right
        .map(|runs| wrap(runs, f32::MAX))
        .and_then(|lines| lines.into_iter().next())
        .filter(|l| !l.segments.is_empty());
    let reserved = tab.as_ref().map(|t| t.width + TAB_GAP).unwrap_or(0.0);

    let mut lines = wrap(left, (content_width - reserved).max(content_width / 3.0));
    if let (Some(tab), Some(first)) = (&tab, lines.first_mut()) {
        first.height = first.height.max(tab.height);
    }
    if paragraph.runs.is_empty() {
        lines.iter_mut().for_each(|l| l.height = 0.0);
    }
    Laid { lines, tab }
}

/// One finished page: geometry plus drawing operations.
struct Page {
    geometry: PageGeometry,
    operations: Vec<Operation>,
}

/// Places paragraphs top to bottom, breaking pages as needed.
struct PageLayout {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Vec<Operation>,
    /// Distance from the top margin already used
    used: f32,
    started: bool,
}

impl PageLayout {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Vec::new(),
            used: 0.0,
            started: false,
        }
    }

    fn start_section(&mut self, geometry: PageGeometry) {
        if self.started {
            self.break_page();
        }
        self.geometry = geometry;
    }

    fn break_page(&mut self) {
        let operations = std::mem::take(&mut self.current);
        self.pages.push(Page {
            geometry: self.geometry,
            operations,
        });
        self.used = 0.0;
        self.started = false;
    }

    fn remaining(&self) -> f32 {
        self.geometry.content_height() - self.used
    }

    fn place(&mut self, paragraph: &Paragraph, next: Option<&Paragraph>) {
        let width = self.geometry.content_width();
        let laid = lay_out(paragraph, width);
        let space_before = if self.used > 0.0 {
            paragraph.style.space_before
        } else {
            0.0
        };

        let mut needed = space_before + laid.height();
        if paragraph.style.keep_with_next {
            if let Some(next) = next {
                let next_laid = lay_out(next, width);
                needed += next.style.space_before
                    + next_laid.lines.first().map(|l| l.height).unwrap_or(0.0);
            }
        }
        if self.used > 0.0 && needed > self.remaining() && needed <= self.geometry.content_height() {
            self.break_page();
        }

        self.used += if self.used > 0.0 {
            paragraph.style.space_before
        } else {
            0.0
        };
        self.started = true;

        for (i, line) in laid.lines.iter().enumerate() {
            if self.used > 0.0 && line.height > self.remaining() {
                self.break_page();
                self.started = true;
            }
            self.used += line.height;
            let baseline = self.geometry.height - self.geometry.margin_top - self.used
                + line.height * 0.25;

            let offset = match paragraph.style.alignment {
                Alignment::Left => 0.0,
                Alignment::Center => (width - line.width) / 2.0,
                Alignment::Right => width - line.width,
            };
            self.draw_line(line, self.geometry.margin_left + offset.max(0.0), baseline);

            if i == 0 {
                if let Some(tab) = &laid.tab {
                    let x = self.geometry.margin_left + width - tab.width;
                    self.draw_line(tab, x, baseline);
                }
            }
        }

        if let Some(color) = &paragraph.style.border_bottom {
            self.used += 3.0;
            let y = self.geometry.height - self.geometry.margin_top - self.used;
            self.draw_rule(color, y);
        }
        self.used += paragraph.style.space_after;
    }

    fn draw_line(&mut self, line: &Line, x: f32, baseline: f32) {
        for segment in &line.segments {
            self.current.push(Operation::new("BT", vec![]));
            self.current.push(Operation::new(
                "Tf",
                vec![font_key(&segment.style).into(), segment.style.size.into()],
            ));
            let (r, g, b) = segment
                .style
                .color
                .as_deref()
                .and_then(parse_hex_color)
                .unwrap_or((0.0, 0.0, 0.0));
            self.current
                .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
            self.current.push(Operation::new(
                "Td",
                vec![(x + segment.x).into(), baseline.into()],
            ));
            self.current.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_win_ansi(&segment.text))],
            ));
            self.current.push(Operation::new("ET", vec![]));
        }
    }

    fn draw_rule(&mut self, color: &str, y: f32) {
        let (r, g, b) = parse_hex_color(color).unwrap_or((0.0, 0.0, 0.0));
        let left = self.geometry.margin_left;
        let right = self.geometry.width - self.geometry.margin_right;
        self.current.push(Operation::new("w", vec![0.75f32.into()]));
        self.current
            .push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
        self.current
            .push(Operation::new("m", vec![left.into(), y.into()]));
        self.current
            .push(Operation::new("l", vec![right.into(), y.into()]));
        self.current.push(Operation::new("S", vec![]));
    }

    fn finish(mut self) -> Vec<Page> {
        if self.started || !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        self.pages
    }
}

fn font_key(style: &RunStyle) -> &'static str {
    match (style.bold, style.italic) {
        (false, false) => "F1",
        (true, false) => "F2",
        (false, true) => "F3",
        (true, true) => "F4",
    }
}

/// Encode text for a WinAnsi-encoded simple font.
///
/// Latin-1 maps straight through; the typographic characters WinAnsi adds in
/// 0x80-0x9F are mapped; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

/// Owns the lopdf object graph.
struct PdfWriter {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    compress: bool,
}

impl PdfWriter {
    fn new(compress: bool) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        Self {
            document,
            pages_id,
            resources_id,
            compress,
        }
    }

    fn font(&mut self, base: &str) -> ObjectId {
        self.document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base,
            "Encoding" => "WinAnsiEncoding",
        })
    }

    fn content_stream(&self, content: Content) -> Result<Stream> {
        let bytes = content.encode()?;
        if !self.compress {
            return Ok(Stream::new(dictionary! {}, bytes));
        }
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&bytes)?;
        let compressed = encoder.finish()?;
        Ok(Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed))
    }

    fn write(mut self, pages: &[Page], title: &str, author: Option<&str>) -> Result<Vec<u8>> {
        let regular = self.font("Helvetica");
        let bold = self.font("Helvetica-Bold");
        let oblique = self.font("Helvetica-Oblique");
        let bold_oblique = self.font("Helvetica-BoldOblique");
        self.document.objects.insert(
            self.resources_id,
            Object::Dictionary(dictionary! {
                "Font" => dictionary! {
                    "F1" => regular,
                    "F2" => bold,
                    "F3" => oblique,
                    "F4" => bold_oblique,
                },
            }),
        );

        let mut kids = Vec::with_capacity(pages.len());
        for page in pages {
            let stream = self.content_stream(Content {
                operations: page.operations.clone(),
            })?;
            let content_id = self.document.add_object(stream);
            let g = page.geometry;
            let page_id = self.document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![0.into(), 0.into(), g.width.into(), g.height.into()],
                "Contents" => content_id,
                "Resources" => self.resources_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let created = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
        let mut info = dictionary! {
            "Title" => Object::string_literal(encode_win_ansi(title)),
            "Producer" => Object::string_literal(concat!("resumake ", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(created),
        };
        if let Some(author) = author {
            info.set("Author", Object::string_literal(encode_win_ansi(author)));
        }
        let info_id = self.document.add_object(info);
        self.document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}
