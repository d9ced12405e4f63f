use serde::Deserialize;

use crate::error::Result;
use crate::model::{Block, HorizontalAlignment, Table, TableCell, TableRow};
use crate::payload::{FieldValue, Payload};
use crate::richtext::Span;
use crate::style;

use super::Composer;

/// One payment plan shown next to the premium breakdown.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PaymentOption {
    pub term: String,
    pub description: String,
}

impl PaymentOption {
    pub fn new(term: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            description: description.into(),
        }
    }
}

/// Premium breakdown and payment options.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PremiumSummary {
    /// Signed amounts by label; discounts are negative.
    pub breakdown: Payload,
    pub payment_options: Vec<PaymentOption>,
}

impl Composer<'_> {
    /// Appends "Premium Summary" as a bordered two-column table.
    ///
    /// The left cell lists the breakdown as currency, the right cell the
    /// payment options.
    pub fn add_premium_summary(&mut self, summary: &PremiumSummary) -> Result<&mut Self> {
        self.add_heading(style::SUBHEADER, "Premium Summary", HorizontalAlignment::Left)?;

        let mut breakdown =
            vec![self.paragraph(style::NORMAL, vec![Span::new("Premium Breakdown").bold()])?];
        for (label, amount) in summary.breakdown.iter() {
            let span = self.currency_span(amount);
            breakdown.push(self.labelled(style::NORMAL, label, span)?);
        }

        let mut options =
            vec![self.paragraph(style::NORMAL, vec![Span::new("Payment Options").bold()])?];
        for option in &summary.payment_options {
            options.push(self.labelled(
                style::NORMAL,
                &option.term,
                Span::new(option.description.as_str()),
            )?);
        }

        let mut table = Table::new(2);
        table.push_row(TableRow::new(vec![
            TableCell::new(breakdown),
            TableCell::new(options),
        ]))?;
        self.push(Block::Table(table));
        Ok(self.add_spacer())
    }

    /// Appends "Premium Summary" with a single total and payment terms line.
    pub fn add_total_premium(
        &mut self,
        total: &FieldValue,
        payment_terms: &FieldValue,
    ) -> Result<&mut Self> {
        self.add_heading(style::SUBHEADER, "Premium Summary", HorizontalAlignment::Left)?;
        let total = self.currency_span(total);
        let total = self.labelled(style::NORMAL, "Total Premium", total)?;
        self.push(Block::Paragraph(total));
        let terms = self.field_span(payment_terms);
        let terms = self.labelled(style::NORMAL, "Payment Terms", terms)?;
        self.push(Block::Paragraph(terms));
        Ok(self.add_spacer())
    }
}
