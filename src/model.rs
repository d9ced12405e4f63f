//! Data structures describing the logical content of a composed document.
//!
//! Section builders append these values; the PDF renderer in
//! [`crate::builder`] and the text preview in [`crate::text`] turn them into
//! output. Paragraph styles are resolved against the
//! [`StyleRegistry`](crate::style::StyleRegistry) while composing, so a model
//! value never refers to a style name that might be missing later.

use crate::condition::Condition;
use crate::error::{ComposeError, Result};
use crate::richtext::{self, Span};
use crate::style::TextStyle;

/// Horizontal alignment of paragraphs and images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
}

/// Rich text paragraph with a resolved style and alignment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichParagraph {
    spans: Vec<Span>,
    alignment: HorizontalAlignment,
    style: TextStyle,
}

impl RichParagraph {
    /// Creates a left-aligned paragraph in the given style.
    pub fn new(style: TextStyle, spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
            alignment: HorizontalAlignment::Left,
            style,
        }
    }

    /// Returns the spans that make up the paragraph.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Returns the paragraph style.
    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Returns the concatenated text of all spans.
    pub fn text(&self) -> String {
        richtext::plain_text(&self.spans)
    }

    /// Sets the alignment and returns the updated paragraph.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// One table cell holding one or more paragraphs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableCell {
    paragraphs: Vec<RichParagraph>,
}

impl TableCell {
    /// Creates a cell from its paragraphs.
    pub fn new(paragraphs: impl Into<Vec<RichParagraph>>) -> Self {
        Self {
            paragraphs: paragraphs.into(),
        }
    }

    /// Returns the paragraphs of the cell.
    pub fn paragraphs(&self) -> &[RichParagraph] {
        &self.paragraphs
    }

    /// Returns the text of all paragraphs joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(RichParagraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<RichParagraph> for TableCell {
    fn from(paragraph: RichParagraph) -> Self {
        Self::new(vec![paragraph])
    }
}

/// Table row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableRow {
    cells: Vec<TableCell>,
}

impl TableRow {
    /// Creates a row from its cells.
    pub fn new(cells: impl Into<Vec<TableCell>>) -> Self {
        Self {
            cells: cells.into(),
        }
    }

    /// Returns the cells of the row.
    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    /// Returns the text of every cell.
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(TableCell::text).collect()
    }
}

/// Table with a fixed number of columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: usize,
    rows: Vec<TableRow>,
    header_rows: usize,
    bordered: bool,
}

impl Table {
    /// Creates an empty bordered table with `columns` columns.
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            header_rows: 0,
            bordered: true,
        }
    }

    /// Sets whether cell frames are drawn and returns the updated table.
    pub fn with_borders(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    /// Appends a header row.
    ///
    /// Header rows must precede body rows.
    pub fn push_header(&mut self, row: TableRow) -> Result<()> {
        if self.rows.len() != self.header_rows {
            log::warn!("header row appended after body rows; treating it as body");
            return self.push_row(row);
        }
        self.push_row(row)?;
        self.header_rows += 1;
        Ok(())
    }

    /// Appends a body row, rejecting rows whose width differs from the table's.
    pub fn push_row(&mut self, row: TableRow) -> Result<()> {
        if row.cells.len() != self.columns {
            return Err(ComposeError::TableShape {
                expected: self.columns,
                found: row.cells.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of declared columns.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// All rows, header first.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Header rows.
    pub fn header(&self) -> &[TableRow] {
        &self.rows[..self.header_rows]
    }

    /// Body rows.
    pub fn body(&self) -> &[TableRow] {
        &self.rows[self.header_rows..]
    }

    /// Returns whether cell frames are drawn.
    pub fn is_bordered(&self) -> bool {
        self.bordered
    }
}

/// Bulleted list.
#[derive(Clone, Debug, PartialEq)]
pub struct BulletList {
    bullet: String,
    items: Vec<RichParagraph>,
}

impl BulletList {
    /// Creates a list drawn with `bullet`.
    pub fn new(bullet: impl Into<String>, items: impl Into<Vec<RichParagraph>>) -> Self {
        Self {
            bullet: bullet.into(),
            items: items.into(),
        }
    }

    /// Returns the bullet glyph.
    pub fn bullet(&self) -> &str {
        &self.bullet
    }

    /// Returns the list items.
    pub fn items(&self) -> &[RichParagraph] {
        &self.items
    }
}

/// Representation of image sources supported by the content model.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    /// Image loaded from raw bytes.
    Bytes(Vec<u8>),
    /// Image referenced by a file path.
    Path(String),
}

impl ImageSource {
    /// Creates a new in-memory image from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Creates an image sourced from a file path.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }
}

/// Image placed in the document flow.
///
/// The width is stored in millimetres so it maps directly onto the image
/// scaling of the PDF renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBlock {
    source: ImageSource,
    alignment: HorizontalAlignment,
    width_mm: Option<f64>,
}

impl ImageBlock {
    /// Creates a new image block using the provided source.
    pub fn new(source: ImageSource) -> Self {
        Self {
            source,
            alignment: HorizontalAlignment::Left,
            width_mm: None,
        }
    }

    /// Returns the image source.
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Returns the requested rendered width in millimetres, if any.
    pub fn width_mm(&self) -> Option<f64> {
        self.width_mm
    }

    /// Sets the alignment and returns the updated image block.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Constrains the rendered width (in millimetres) and returns the updated block.
    pub fn with_width_mm(mut self, width_mm: impl Into<Option<f64>>) -> Self {
        self.width_mm = width_mm.into();
        self
    }
}

/// Blocks wrapped by a condition for a downstream rendering pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalBlock {
    condition: Condition,
    blocks: Vec<Block>,
    token_style: TextStyle,
}

impl ConditionalBlock {
    /// Wraps `blocks` in `condition`; the tokens are drawn in `token_style`.
    pub fn new(condition: Condition, blocks: Vec<Block>, token_style: TextStyle) -> Self {
        Self {
            condition,
            blocks,
            token_style,
        }
    }

    /// Returns the condition.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Returns the wrapped blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the style the open and close tokens are drawn in.
    pub fn token_style(&self) -> TextStyle {
        self.token_style
    }
}

/// Individual content blocks of a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Styled paragraph content.
    Paragraph(RichParagraph),
    /// Table content.
    Table(Table),
    /// Bulleted list.
    List(BulletList),
    /// Image content.
    Image(ImageBlock),
    /// Conditionally rendered content.
    Conditional(ConditionalBlock),
    /// One empty line of vertical space.
    Spacer,
}

/// Page footer drawn on every page.
#[derive(Clone, Debug, PartialEq)]
pub struct Footer {
    paragraph: RichParagraph,
    page_numbers: bool,
}

impl Footer {
    /// Creates a footer with a centered line and optional page numbers.
    pub fn new(paragraph: RichParagraph, page_numbers: bool) -> Self {
        Self {
            paragraph: paragraph.with_alignment(HorizontalAlignment::Center),
            page_numbers,
        }
    }

    /// Returns the footer line.
    pub fn paragraph(&self) -> &RichParagraph {
        &self.paragraph
    }

    /// Returns whether a page number is drawn under the footer line.
    pub fn has_page_numbers(&self) -> bool {
        self.page_numbers
    }
}

/// Ordered sequence of content blocks plus page furniture.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    title: Option<String>,
    blocks: Vec<Block>,
    footer: Option<Footer>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the document title used for PDF metadata.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Sets the document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Returns the top-level blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    /// Appends a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Returns the footer, if any.
    pub fn footer(&self) -> Option<&Footer> {
        self.footer.as_ref()
    }

    /// Sets the footer, replacing any previous one.
    pub fn set_footer(&mut self, footer: Footer) {
        self.footer = Some(footer);
    }

    /// Visits every block depth first, including blocks nested in conditionals.
    ///
    /// The second callback argument is the nesting depth of conditionals.
    pub fn visit<'a, F>(&'a self, mut visitor: F)
    where
        F: FnMut(&'a Block, usize),
    {
        fn walk<'a, F>(blocks: &'a [Block], depth: usize, visitor: &mut F)
        where
            F: FnMut(&'a Block, usize),
        {
            for block in blocks {
                visitor(block, depth);
                if let Block::Conditional(conditional) = block {
                    walk(conditional.blocks(), depth + 1, visitor);
                }
            }
        }
        walk(&self.blocks, 0, &mut visitor);
    }

    /// Returns every table in document order, including conditional ones.
    pub fn tables(&self) -> Vec<&Table> {
        let mut tables = Vec::new();
        self.visit(|block, _| {
            if let Block::Table(table) = block {
                tables.push(table);
            }
        });
        tables
    }
}
