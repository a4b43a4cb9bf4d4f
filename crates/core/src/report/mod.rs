//! Printable inspection reports.
//!
//! A [`Report`] is a plain description of what goes on paper: a title, a run
//! of sections, and a footer. [`render_pdf`] lays it out onto A4 pages.
//! Values are formatted to strings up front with the helpers in [`format`],
//! so rendering never has to deal with missing data.

pub mod format;
mod pdf;

pub use pdf::render_pdf;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// Column heading: white bold text on the accent colour.
    Header,
    /// Field name in a key/value table, drawn like a header.
    Label,
    Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(text: impl Into<String>, style: CellStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Rows of cells; each row divides the page width evenly among its cells.
    Table(Vec<Vec<Cell>>),
    /// Free text, wrapped to the page width.
    Notes(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: Option<String>,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub sections: Vec<Section>,
    pub footer: Option<String>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
            footer: None,
        }
    }

    /// Label/value pairs laid out two per row.
    pub fn key_values(mut self, heading: Option<&str>, pairs: Vec<(&str, String)>) -> Self {
        let rows: Vec<Vec<Cell>> = pairs
            .chunks(2)
            .map(|chunk| {
                chunk
                    .iter()
                    .flat_map(|(label, value)| {
                        [
                            Cell::new(*label, CellStyle::Label),
                            Cell::new(value.clone(), CellStyle::Value),
                        ]
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        self.sections.push(Section {
            heading: heading.map(str::to_string),
            block: Block::Table(rows),
        });
        self
    }

    /// A table with a heading row.
    pub fn grid(mut self, heading: Option<&str>, columns: &[&str], rows: Vec<Vec<String>>) -> Self {
        let mut table = vec![columns
            .iter()
            .map(|c| Cell::new(*c, CellStyle::Header))
            .collect::<Vec<_>>()];
        table.extend(rows.into_iter().map(|row| {
            row.into_iter()
                .map(|v| Cell::new(v, CellStyle::Value))
                .collect::<Vec<_>>()
        }));
        self.sections.push(Section {
            heading: heading.map(str::to_string),
            block: Block::Table(table),
        });
        self
    }

    pub fn notes(mut self, heading: Option<&str>, text: impl Into<String>) -> Self {
        self.sections.push(Section {
            heading: heading.map(str::to_string),
            block: Block::Notes(text.into()),
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    /// Footer stamped with the generation date.
    pub fn generated_on(self, date: chrono::NaiveDate) -> Self {
        self.footer(format!("Generated on: {}", format::date(Some(date))))
    }

    /// Every piece of text in reading order, handy for assertions.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = vec![self.title.as_str()];
        for section in &self.sections {
            if let Some(h) = &section.heading {
                out.push(h);
            }
            match &section.block {
                Block::Table(rows) => out.extend(rows.iter().flatten().map(|c| c.text.as_str())),
                Block::Notes(text) => out.push(text),
            }
        }
        if let Some(f) = &self.footer {
            out.push(f);
        }
        out
    }
}
