//! Section builders.
//!
//! A [`Composer`] owns the [`Document`] being built and borrows the
//! [`StyleRegistry`] of the current run. Every builder appends one semantic
//! block and returns `&mut Composer` so calls chain with `?`:
//!
//! ```no_run
//! use quote_composer::payload::Payload;
//! use quote_composer::sections::{CompanyHeader, Composer};
//! use quote_composer::style::StyleRegistry;
//!
//! # fn main() -> quote_composer::Result<()> {
//! let styles = StyleRegistry::insurance();
//! let mut composer = Composer::new(&styles);
//! composer
//!     .add_company_header(&CompanyHeader::new("ABC Insurance Company"))?
//!     .add_quote_info(&Payload::new().with("reference", "QT-2024-001"), &Default::default())?;
//! let document = composer.finish();
//! # let _ = document;
//! # Ok(())
//! # }
//! ```
//!
//! Builders never fail for absent fields or unformattable amounts. They render
//! a default, log it and record a [`Notice`]. Only unknown style names and
//! malformed tables abort a build.

mod client;
mod coverage;
mod footer;
mod header;
mod info;
mod premium;
mod signatures;
mod terms;

pub use client::{FieldGroup, PERSONAL_DETAILS, POLICY_DETAILS};
pub use coverage::{policy_notes, CoverageColumn, CoverageItem, CoverageLayout, CoverageSection};
pub use footer::contact_line;
pub use header::{CompanyHeader, Logo, LOGO_WIDTH_MM};
pub use info::{AgentLayout, QuoteInfoLayout};
pub use premium::{PaymentOption, PremiumSummary};
pub use signatures::QUOTE_SIGNATURE_LINES;

use chrono::{Local, NaiveDate};

use crate::condition::Condition;
use crate::error::{Notice, Result};
use crate::model::{Block, ConditionalBlock, Document, HorizontalAlignment, RichParagraph};
use crate::payload::{FieldValue, Payload};
use crate::richtext::Span;
use crate::style::{self, StyleRegistry, TextStyle};

/// Format of the generation date printed by the info builders.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Appends sections to a document in call order.
#[derive(Debug)]
pub struct Composer<'a> {
    styles: &'a StyleRegistry,
    document: Document,
    generated_on: NaiveDate,
    notices: Vec<Notice>,
}

impl<'a> Composer<'a> {
    /// Starts a new document using today's date as the generation date.
    pub fn new(styles: &'a StyleRegistry) -> Self {
        Self {
            styles,
            document: Document::new(),
            generated_on: Local::now().date_naive(),
            notices: Vec::new(),
        }
    }

    /// Overrides the generation date.
    pub fn with_generation_date(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }

    /// Sets the document title used for metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.document.set_title(title);
        self
    }

    /// Returns the style registry of this run.
    pub fn styles(&self) -> &'a StyleRegistry {
        self.styles
    }

    /// Returns the generation date.
    pub fn generated_on(&self) -> NaiveDate {
        self.generated_on
    }

    /// Returns the document built so far.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the non-fatal notices recorded so far.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Finishes composition and hands the document to the caller.
    pub fn finish(self) -> Document {
        if !self.notices.is_empty() {
            log::debug!(
                "document composed with {} notice(s)",
                self.notices.len()
            );
        }
        self.document
    }

    /// Appends a single-span paragraph in the named style.
    pub fn add_heading(
        &mut self,
        style_name: &str,
        text: &str,
        alignment: HorizontalAlignment,
    ) -> Result<&mut Self> {
        let paragraph = self.paragraph(style_name, vec![Span::new(text)])?;
        self.push(Block::Paragraph(paragraph.with_alignment(alignment)));
        Ok(self)
    }

    /// Appends a paragraph built from `spans` in the named style.
    pub fn add_paragraph(
        &mut self,
        style_name: &str,
        spans: Vec<Span>,
        alignment: HorizontalAlignment,
    ) -> Result<&mut Self> {
        let paragraph = self.paragraph(style_name, spans)?;
        self.push(Block::Paragraph(paragraph.with_alignment(alignment)));
        Ok(self)
    }

    /// Appends one `Label: value` line per entry, labels in bold.
    pub fn add_labelled_lines(
        &mut self,
        style_name: &str,
        lines: &[(&str, FieldValue)],
    ) -> Result<&mut Self> {
        for (label, value) in lines {
            let paragraph = self.labelled(style_name, label, self.field_span(value))?;
            self.push(Block::Paragraph(paragraph));
        }
        Ok(self)
    }

    /// Appends an empty line.
    pub fn add_spacer(&mut self) -> &mut Self {
        self.push(Block::Spacer);
        self
    }

    /// Wraps everything `build` appends in a conditional block.
    ///
    /// The condition is recorded, not evaluated. The open and close tokens are
    /// drawn in the prompt style.
    pub fn add_conditional<F>(&mut self, condition: Condition, build: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let token_style = self.style(style::PROMPT)?;
        let outer = std::mem::take(self.document.blocks_mut());
        let built = build(self);
        let inner = std::mem::replace(self.document.blocks_mut(), outer);
        built?;
        self.push(Block::Conditional(ConditionalBlock::new(
            condition,
            inner,
            token_style,
        )));
        Ok(self)
    }

    pub(crate) fn push(&mut self, block: Block) {
        self.document.push(block);
    }

    pub(crate) fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub(crate) fn style(&self, name: &str) -> Result<TextStyle> {
        self.styles.get(name)
    }

    pub(crate) fn paragraph(&self, style_name: &str, spans: Vec<Span>) -> Result<RichParagraph> {
        Ok(RichParagraph::new(self.style(style_name)?, spans))
    }

    pub(crate) fn labelled(
        &self,
        style_name: &str,
        label: &str,
        value: Span,
    ) -> Result<RichParagraph> {
        self.paragraph(style_name, vec![Span::new(format!("{label}: ")).bold(), value])
    }

    /// Span showing a field as plain text.
    pub(crate) fn field_span(&self, value: &FieldValue) -> Span {
        Span::from_field(value, value.text())
    }

    /// Span showing a field as currency, falling back to its raw text.
    pub(crate) fn currency_span(&mut self, value: &FieldValue) -> Span {
        let rendered = match value.currency_text() {
            Ok(text) => text,
            Err(raw) => {
                log::debug!("currency formatting failed for {raw:?}; rendering raw value");
                self.notices.push(Notice::FormatFallback { raw: raw.clone() });
                raw
            }
        };
        Span::from_field(value, rendered)
    }

    /// Looks up `label`, substituting `default` when it is absent.
    pub(crate) fn lookup(&mut self, payload: &Payload, label: &str, default: &str) -> FieldValue {
        match payload.get(label) {
            Some(value) => value.clone(),
            None => {
                log::debug!("payload field {label:?} missing; rendering {default:?}");
                self.notices.push(Notice::MissingFieldDefault {
                    field: label.to_owned(),
                    default: default.to_owned(),
                });
                FieldValue::from(default)
            }
        }
    }

    pub(crate) fn generation_date_text(&self) -> String {
        self.generated_on.format(DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComposeError;

    #[test]
    fn unknown_style_aborts_the_builder() {
        let styles = StyleRegistry::new();
        let mut composer = Composer::new(&styles);
        let err = composer
            .add_heading("Header Style", "ABC", HorizontalAlignment::Center)
            .unwrap_err();
        assert!(matches!(err, ComposeError::UnknownStyle(name) if name == "Header Style"));
        assert!(composer.document().blocks().is_empty());
    }

    #[test]
    fn conditional_wraps_only_inner_blocks() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        composer.add_spacer();
        composer
            .add_conditional(Condition::equals("status", "active"), |inner| {
                inner.add_heading(style::NORMAL, "Active", HorizontalAlignment::Left)?;
                Ok(())
            })
            .unwrap();
        composer.add_spacer();

        let document = composer.finish();
        assert_eq!(document.blocks().len(), 3);
        match &document.blocks()[1] {
            Block::Conditional(conditional) => {
                assert_eq!(conditional.blocks().len(), 1);
                assert_eq!(conditional.condition().field(), "status");
            }
            other => panic!("expected conditional block, got {other:?}"),
        }
    }

    #[test]
    fn failed_conditional_restores_outer_blocks() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        composer.add_spacer();
        let result = composer.add_conditional(Condition::equals("a", "b"), |inner| {
            inner.add_spacer();
            inner.add_heading("missing", "x", HorizontalAlignment::Left)?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(composer.document().blocks(), &[Block::Spacer]);
    }

    #[test]
    fn lookup_records_missing_fields() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        let value = composer.lookup(&Payload::new(), "Phone", crate::payload::MISSING_FIELD);
        assert_eq!(value.text(), "N/A");
        assert_eq!(
            composer.notices(),
            &[Notice::MissingFieldDefault {
                field: "Phone".into(),
                default: "N/A".into()
            }]
        );
    }
}
