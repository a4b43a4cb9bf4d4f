//! A4 layout and PDF serialization with `lopdf`.
//!
//! Only the two standard Helvetica faces are used, so no fonts are embedded.
//! Text widths are estimated from an average glyph width; that is enough to
//! wrap cells and centre headings without font metrics.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::format::ascii;
use super::{Block, Cell, CellStyle, Report, ReportError};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;
const FOOTER_SIZE: f32 = 9.0;
const LINE_GAP: f32 = 4.0;
const CELL_PADDING: f32 = 5.0;
const SECTION_GAP: f32 = 16.0;

/// Average Helvetica advance width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

type Rgb = (f32, f32, f32);

const ACCENT: Rgb = (52.0 / 255.0, 152.0 / 255.0, 219.0 / 255.0);
const VALUE_FILL: Rgb = (236.0 / 255.0, 240.0 / 255.0, 241.0 / 255.0);
const NOTES_FILL: Rgb = (245.0 / 255.0, 245.0 / 255.0, 245.0 / 255.0);
const WHITE: Rgb = (1.0, 1.0, 1.0);
const BORDER: Rgb = (0.7, 0.7, 0.7);
const INK: Rgb = (0.1, 0.1, 0.1);
const MUTED: Rgb = (0.45, 0.45, 0.45);

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Render `report` to PDF bytes.
pub fn render_pdf(report: &Report) -> Result<Vec<u8>, ReportError> {
    let pages = layout(report);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource() => regular_id,
            Font::Bold.resource() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        PAGE_WIDTH.into(),
        PAGE_HEIGHT.into(),
    ];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Content operations per page.
fn layout(report: &Report) -> Vec<Vec<Operation>> {
    let mut page = PageCursor::new();

    page.title(&report.title);
    for section in &report.sections {
        if let Some(heading) = &section.heading {
            page.heading(heading);
        }
        match &section.block {
            Block::Table(rows) => rows.iter().for_each(|row| page.row(row)),
            Block::Notes(text) => page.notes(text),
        }
        page.y -= SECTION_GAP;
    }
    if let Some(footer) = &report.footer {
        page.footer(footer);
    }

    page.finish()
}

struct PageCursor {
    done: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    /// Distance of the next free line from the bottom edge.
    y: f32,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            done: Vec::new(),
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Start a new page unless `height` still fits above the bottom margin.
    fn reserve(&mut self, height: f32) {
        if self.y - height < MARGIN && !self.ops.is_empty() {
            self.done.push(std::mem::take(&mut self.ops));
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn title(&mut self, title: &str) {
        self.reserve(TITLE_SIZE);
        self.y -= TITLE_SIZE;
        let x = centred_x(title, TITLE_SIZE);
        self.text(x, self.y, Font::Bold, TITLE_SIZE, ACCENT, title);
        self.y -= SECTION_GAP;
    }

    fn heading(&mut self, heading: &str) {
        // Keep a heading on the same page as at least one line under it.
        self.reserve(HEADING_SIZE + LINE_GAP + line_height(BODY_SIZE) + 2.0 * CELL_PADDING);
        self.y -= HEADING_SIZE;
        self.text(MARGIN, self.y, Font::Bold, HEADING_SIZE, INK, heading);
        self.y -= LINE_GAP * 2.0;
    }

    fn row(&mut self, cells: &[Cell]) {
        if cells.is_empty() {
            return;
        }
        let col_width = CONTENT_WIDTH / cells.len() as f32;
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .map(|c| wrap(&c.text, BODY_SIZE, col_width - 2.0 * CELL_PADDING))
            .collect();
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let row_height = lines as f32 * line_height(BODY_SIZE) + 2.0 * CELL_PADDING;

        self.reserve(row_height);
        let top = self.y;

        for (i, (cell, cell_lines)) in cells.iter().zip(&wrapped).enumerate() {
            let x = MARGIN + i as f32 * col_width;
            let (fill, font, colour) = match cell.style {
                CellStyle::Header | CellStyle::Label => (ACCENT, Font::Bold, WHITE),
                CellStyle::Value => (VALUE_FILL, Font::Regular, INK),
            };
            self.rect(x, top - row_height, col_width, row_height, fill, Some(BORDER));

            for (n, line) in cell_lines.iter().enumerate() {
                let baseline = top - CELL_PADDING - BODY_SIZE - n as f32 * line_height(BODY_SIZE) + 1.0;
                self.text(x + CELL_PADDING, baseline, font, BODY_SIZE, colour, line);
            }
        }

        self.y -= row_height;
    }

    fn notes(&mut self, text: &str) {
        for paragraph in text.lines() {
            for line in wrap(paragraph, BODY_SIZE, CONTENT_WIDTH - 2.0 * CELL_PADDING) {
                let height = line_height(BODY_SIZE);
                self.reserve(height);
                self.rect(MARGIN, self.y - height, CONTENT_WIDTH, height, NOTES_FILL, None);
                self.y -= height;
                self.text(MARGIN + CELL_PADDING, self.y + LINE_GAP, Font::Regular, BODY_SIZE, INK, &line);
            }
        }
    }

    fn footer(&mut self, footer: &str) {
        self.reserve(FOOTER_SIZE + SECTION_GAP);
        self.y -= FOOTER_SIZE;
        let x = centred_x(footer, FOOTER_SIZE);
        self.text(x, self.y, Font::Regular, FOOTER_SIZE, MUTED, footer);
    }

    /// Close the last page and stamp page numbers on every page.
    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.done.is_empty() {
            self.done.push(std::mem::take(&mut self.ops));
        }
        let total = self.done.len();
        let mut pages = std::mem::take(&mut self.done);
        for (i, ops) in pages.iter_mut().enumerate() {
            let label = format!("Page {} of {}", i + 1, total);
            let x = PAGE_WIDTH - MARGIN - text_width(&label, FOOTER_SIZE);
            push_text(ops, x, MARGIN / 2.0, Font::Regular, FOOTER_SIZE, MUTED, &label);
        }
        pages
    }

    fn text(&mut self, x: f32, y: f32, font: Font, size: f32, colour: Rgb, text: &str) {
        push_text(&mut self.ops, x, y, font, size, colour, text);
    }

    /// Filled rectangle with its lower-left corner at `(x, y)`, optionally outlined.
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Rgb, border: Option<Rgb>) {
        self.ops.push(colour_op("rg", fill));
        if let Some(border) = border {
            self.ops.push(Operation::new("w", vec![0.5f32.into()]));
            self.ops.push(colour_op("RG", border));
        }
        self.ops.push(Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]));
        self.ops.push(Operation::new(if border.is_some() { "B" } else { "f" }, vec![]));
    }
}

fn push_text(ops: &mut Vec<Operation>, x: f32, y: f32, font: Font, size: f32, colour: Rgb, text: &str) {
    ops.extend([
        colour_op("rg", colour),
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.resource().into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(ascii(text))]),
        Operation::new("ET", vec![]),
    ]);
}

fn colour_op(operator: &str, (r, g, b): Rgb) -> Operation {
    Operation::new(operator, vec![r.into(), g.into(), b.into()])
}

fn line_height(size: f32) -> f32 {
    size + LINE_GAP
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_WIDTH
}

fn centred_x(text: &str, size: f32) -> f32 {
    ((PAGE_WIDTH - text_width(text, size)) / 2.0).max(MARGIN)
}

/// Greedy word wrap to `width` points. Words longer than a line are split.
/// Always returns at least one (possibly empty) line.
fn wrap(text: &str, size: f32, width: f32) -> Vec<String> {
    let max_chars = ((width / (size * AVG_GLYPH_WIDTH)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
