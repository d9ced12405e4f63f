//! PDF rendering of composed documents.
//!
//! [`PdfBuilder`] holds the page configuration and turns a
//! [`Document`](crate::model::Document) into `genpdf` elements. The footer and
//! page numbers are drawn by a page decorator so they repeat on every page.

use std::path::{Path, PathBuf};

use genpdf::elements::{Break, LinearLayout, Paragraph, TableLayout, UnorderedList};
use genpdf::error::{Error, ErrorKind};
use genpdf::render::Area;
use genpdf::style;
use genpdf::{self, Alignment, Context, Element, Margins, PageDecorator, PaperSize, Position, RenderResult, Size};

use crate::elements::{self, mm_from_f64, mm_to_f64};
use crate::error::{ComposeError, Result};
use crate::fonts;
use crate::model::{Block, BulletList, Document, Footer, HorizontalAlignment, RichParagraph, Table};
use crate::style::TextStyle;

/// Page margin on every side, one inch.
pub const DEFAULT_MARGIN_MM: f64 = 25.4;

/// Base font size in points.
pub const DEFAULT_FONT_SIZE: u8 = 11;

/// Space kept between the body and the footer.
const FOOTER_GAP_MM: f64 = 4.0;
const CELL_PADDING_MM: f64 = 1.0;

impl From<HorizontalAlignment> for Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => Alignment::Left,
            HorizontalAlignment::Center => Alignment::Center,
            HorizontalAlignment::Right => Alignment::Right,
        }
    }
}

/// Rendered PDF bytes.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
}

/// Page configuration for rendering documents to PDF.
#[derive(Clone, Debug)]
pub struct PdfBuilder {
    paper_size: Size,
    margins: Margins,
    font_size: u8,
    font_dir: Option<PathBuf>,
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter.into(),
            margins: Margins::all(mm_from_f64(DEFAULT_MARGIN_MM)),
            font_size: DEFAULT_FONT_SIZE,
            font_dir: None,
        }
    }
}

impl PdfBuilder {
    /// Creates a builder for US Letter pages with one-inch margins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = paper_size.into();
        self
    }

    /// Sets the page margins.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = margins.into();
        self
    }

    /// Sets the base font size in points.
    pub fn with_font_size(mut self, font_size: u8) -> Self {
        self.font_size = font_size;
        self
    }

    /// Loads fonts from `dir` before trying the default locations.
    pub fn with_font_dir(mut self, dir: impl Into<Option<PathBuf>>) -> Self {
        self.font_dir = dir.into();
        self
    }

    /// Returns the explicit font directory, if any.
    pub fn font_dir(&self) -> Option<&Path> {
        self.font_dir.as_deref()
    }

    /// Builds a configured `genpdf` document holding every block of `document`.
    pub fn build(&self, document: &Document) -> Result<genpdf::Document> {
        let family = fonts::font_family(self.font_dir()).map_err(ComposeError::Fonts)?;
        let mut pdf = genpdf::Document::new(family);
        pdf.set_title(document.title().unwrap_or_default());
        pdf.set_paper_size(self.paper_size);
        pdf.set_font_size(self.font_size);
        pdf.set_page_decorator(QuotePageDecorator::new(
            self.margins,
            document.footer().cloned(),
        ));

        for block in document.blocks() {
            pdf.push(block_element(block)?);
        }
        Ok(pdf)
    }

    /// Renders `document` to PDF bytes in memory.
    pub fn render(&self, document: &Document) -> Result<RenderedPdf> {
        let pdf = self.build(document)?;
        let mut bytes = Vec::new();
        pdf.render(&mut bytes)?;
        log::debug!("rendered {} bytes of PDF", bytes.len());
        Ok(RenderedPdf { bytes })
    }
}

fn paragraph_element(paragraph: &RichParagraph) -> impl Element {
    let mut element = Paragraph::default();
    for span in paragraph.spans() {
        element.push(span);
    }
    element.set_alignment(paragraph.alignment().into());
    element.styled(paragraph.style().to_style())
}

fn token_element(token: String, style: TextStyle) -> impl Element {
    let mut element = Paragraph::new(token);
    element.set_alignment(Alignment::Left);
    element.styled(style.to_style())
}

fn list_element(list: &BulletList) -> UnorderedList {
    let mut element = UnorderedList::with_bullet(list.bullet());
    for item in list.items() {
        element.push(paragraph_element(item));
    }
    element
}

fn table_element(table: &Table) -> Result<TableLayout> {
    let mut layout = TableLayout::new(vec![1; table.column_count()]);
    if table.is_bordered() {
        layout.set_cell_decorator(genpdf::elements::FrameCellDecorator::new(true, true, false));
    }
    for row in table.rows() {
        let mut cells = layout.row();
        for cell in row.cells() {
            let mut content = LinearLayout::vertical();
            for paragraph in cell.paragraphs() {
                content.push(paragraph_element(paragraph));
            }
            cells = cells.element(content.padded(Margins::all(mm_from_f64(CELL_PADDING_MM))));
        }
        cells.push()?;
    }
    Ok(layout)
}

/// A type-erased element; `genpdf` only accepts sized elements in `push`.
struct BoxedElement(Box<dyn Element>);

impl BoxedElement {
    fn new(element: impl Element + 'static) -> Self {
        Self(Box::new(element))
    }
}

impl Element for BoxedElement {
    fn render(
        &mut self,
        context: &Context,
        area: Area<'_>,
        style: style::Style,
    ) -> std::result::Result<RenderResult, Error> {
        self.0.render(context, area, style)
    }
}

fn block_element(block: &Block) -> Result<BoxedElement> {
    let element = match block {
        Block::Paragraph(paragraph) => BoxedElement::new(paragraph_element(paragraph)),
        Block::Table(table) => BoxedElement::new(table_element(table)?),
        Block::List(list) => BoxedElement::new(list_element(list)),
        Block::Image(image) => BoxedElement::new(
            elements::image_element(image, image.alignment().into()).map_err(ComposeError::Image)?,
        ),
        Block::Conditional(conditional) => {
            let condition = conditional.condition();
            let mut layout = LinearLayout::vertical();
            layout.push(token_element(condition.open_token(), conditional.token_style()));
            for inner in conditional.blocks() {
                layout.push(block_element(inner)?);
            }
            layout.push(token_element(condition.close_token(), conditional.token_style()));
            BoxedElement::new(layout)
        }
        Block::Spacer => BoxedElement::new(Break::new(1)),
    };
    Ok(element)
}

fn footer_element(footer: &Footer, page: usize) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    if !footer.paragraph().spans().is_empty() {
        layout.push(paragraph_element(footer.paragraph()));
    }
    if footer.has_page_numbers() {
        let mut number = Paragraph::new(format!("Page {page}"));
        number.set_alignment(Alignment::Center);
        layout.push(number.styled(footer.paragraph().style().to_style()));
    }
    layout
}

/// Estimates the height the footer needs at `width`, including the gap above it.
///
/// The contact line is measured in bold so mixed spans never wrap onto more
/// lines than reserved; a wrapped line gets one extra line of slack.
fn footer_height(footer: &Footer, context: &Context, base: style::Style, width: f64) -> f64 {
    let paragraph = footer.paragraph();
    let style = base.and(paragraph.style().to_style());
    let line_height = mm_to_f64(style.line_height(&context.font_cache));

    let mut lines = 0.0;
    if !paragraph.spans().is_empty() {
        let text_width = mm_to_f64(style.bold().str_width(&context.font_cache, &paragraph.text()));
        let wrapped = (text_width / width.max(1.0)).ceil().max(1.0);
        lines += if wrapped > 1.0 { wrapped + 1.0 } else { wrapped };
    }
    if footer.has_page_numbers() {
        lines += 1.0;
    }
    lines * line_height + FOOTER_GAP_MM
}

struct QuotePageDecorator {
    page: usize,
    margins: Margins,
    footer: Option<Footer>,
}

impl QuotePageDecorator {
    fn new(margins: Margins, footer: Option<Footer>) -> Self {
        Self {
            page: 0,
            margins,
            footer,
        }
    }
}

impl PageDecorator for QuotePageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &Context,
        mut area: Area<'a>,
        style: style::Style,
    ) -> std::result::Result<Area<'a>, Error> {
        self.page += 1;
        area.add_margins(self.margins);

        if let Some(footer) = &self.footer {
            let size = area.size();
            let available = size.height;
            let max_height = mm_to_f64(available) / 2.0;
            if max_height <= FOOTER_GAP_MM {
                return Err(Error::new(
                    "Footer height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }
            let wanted = footer_height(footer, context, style, mm_to_f64(size.width));
            let height = mm_from_f64(wanted.min(max_height));
            let gap = mm_from_f64(FOOTER_GAP_MM);

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - height + gap));
            footer_area.set_height(height - gap);
            let mut element = footer_element(footer, self.page);
            let result = element.render(context, footer_area, style)?;
            if result.has_more {
                log::warn!("footer truncated on page {}", self.page);
            }

            area.set_height(available - height);
        }

        Ok(area)
    }
}
