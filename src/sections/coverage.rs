use serde::Deserialize;

use crate::error::Result;
use crate::model::{Block, HorizontalAlignment, Table, TableCell, TableRow};
use crate::payload::FieldValue;
use crate::richtext::Span;
use crate::style;

use super::Composer;

/// One row of the coverage table.
///
/// Deserializes from `{"type", "amount", "deductible", "premium"}`; a missing
/// type is empty and missing amounts are zero.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CoverageItem {
    #[serde(rename = "type", default = "empty_field")]
    pub coverage_type: FieldValue,
    #[serde(default = "zero_field")]
    pub amount: FieldValue,
    #[serde(default = "zero_field")]
    pub deductible: FieldValue,
    #[serde(default = "zero_field")]
    pub premium: FieldValue,
}

fn empty_field() -> FieldValue {
    FieldValue::from("")
}

fn zero_field() -> FieldValue {
    FieldValue::from(0_i64)
}

impl CoverageItem {
    pub fn new(
        coverage_type: impl Into<FieldValue>,
        amount: impl Into<FieldValue>,
        deductible: impl Into<FieldValue>,
        premium: impl Into<FieldValue>,
    ) -> Self {
        Self {
            coverage_type: coverage_type.into(),
            amount: amount.into(),
            deductible: deductible.into(),
            premium: premium.into(),
        }
    }

    /// Fill-in row of the quote template.
    pub fn placeholder() -> Self {
        Self::new(
            FieldValue::placeholder("Coverage Type"),
            FieldValue::placeholder("Amount"),
            FieldValue::placeholder("Deductible"),
            FieldValue::placeholder("Premium"),
        )
    }

    fn field(&self, column: CoverageColumn) -> &FieldValue {
        match column {
            CoverageColumn::Type => &self.coverage_type,
            CoverageColumn::Amount => &self.amount,
            CoverageColumn::Deductible => &self.deductible,
            CoverageColumn::Premium => &self.premium,
        }
    }
}

/// Item field shown in a coverage table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverageColumn {
    Type,
    Amount,
    Deductible,
    Premium,
}

impl CoverageColumn {
    /// Whether the column goes through the currency formatter.
    pub fn is_monetary(self) -> bool {
        !matches!(self, Self::Type)
    }
}

/// Header titles and item fields of a coverage table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoverageLayout {
    columns: &'static [(&'static str, CoverageColumn)],
    header_style: &'static str,
}

impl CoverageLayout {
    pub const STANDARD: Self = Self {
        columns: &[
            ("Coverage Type", CoverageColumn::Type),
            ("Amount", CoverageColumn::Amount),
            ("Deductible", CoverageColumn::Deductible),
            ("Premium", CoverageColumn::Premium),
        ],
        header_style: style::TABLE,
    };

    pub const ANNUAL: Self = Self {
        columns: &[
            ("Coverage Type", CoverageColumn::Type),
            ("Coverage Amount", CoverageColumn::Amount),
            ("Deductible", CoverageColumn::Deductible),
            ("Annual Premium", CoverageColumn::Premium),
        ],
        header_style: style::TABLE,
    };

    pub const SUMMARY: Self = Self {
        columns: &[
            ("Coverage Type", CoverageColumn::Type),
            ("Coverage Amount", CoverageColumn::Amount),
            ("Premium", CoverageColumn::Premium),
        ],
        header_style: style::TABLE,
    };

    /// Policy layout; headers are drawn in the section style.
    pub const LIMITS: Self = Self {
        columns: &[
            ("Coverage Type", CoverageColumn::Type),
            ("Limit", CoverageColumn::Amount),
            ("Deductible", CoverageColumn::Deductible),
        ],
        header_style: style::SECTION,
    };

    pub fn columns(&self) -> &'static [(&'static str, CoverageColumn)] {
        self.columns
    }

    pub fn titles(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(title, _)| *title).collect()
    }
}

impl Default for CoverageLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Heading, overview line and layout of a coverage section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageSection {
    heading: String,
    heading_style: &'static str,
    policy_type: Option<String>,
    layout: CoverageLayout,
}

impl CoverageSection {
    /// Creates a section with a subheader heading and the standard layout.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            heading_style: style::SUBHEADER,
            policy_type: None,
            layout: CoverageLayout::STANDARD,
        }
    }

    /// Coverage section of a detailed quote: `<type> Coverage Details`, the
    /// overview note of that policy type and the annual layout.
    pub fn for_policy_type(policy_type: &str) -> Self {
        Self::new(format!("{policy_type} Coverage Details"))
            .with_policy_notes(policy_type)
            .with_layout(CoverageLayout::ANNUAL)
    }

    pub fn with_heading_style(mut self, heading_style: &'static str) -> Self {
        self.heading_style = heading_style;
        self
    }

    /// Adds a `Coverage Overview:` line with the notes of `policy_type`.
    pub fn with_policy_notes(mut self, policy_type: impl Into<String>) -> Self {
        self.policy_type = Some(policy_type.into());
        self
    }

    pub fn with_layout(mut self, layout: CoverageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> CoverageLayout {
        self.layout
    }
}

/// Overview note printed above the coverage table of a policy type.
pub fn policy_notes(policy_type: &str) -> &'static str {
    match policy_type {
        "Auto" => "Coverage applies to listed vehicles only. Additional drivers must be registered.",
        "Home" => "Coverage based on property evaluation and risk assessment.",
        "Life" => "Coverage subject to medical examination and history review.",
        "Business" => "Coverage applies to declared business activities and locations.",
        _ => "Standard terms and conditions apply.",
    }
}

impl Composer<'_> {
    /// Appends "Coverage Details" and a standard coverage table.
    pub fn add_coverage_details(&mut self, items: &[CoverageItem]) -> Result<&mut Self> {
        self.add_coverage_section(&CoverageSection::new("Coverage Details"), items)
    }

    /// Appends a coverage heading, the optional overview line and a bordered
    /// table with a bold header row and one row per item.
    ///
    /// Monetary cells are formatted as currency; values that do not parse as
    /// numbers are rendered unchanged.
    pub fn add_coverage_section(
        &mut self,
        section: &CoverageSection,
        items: &[CoverageItem],
    ) -> Result<&mut Self> {
        self.add_heading(section.heading_style, &section.heading, HorizontalAlignment::Left)?;

        if let Some(policy_type) = &section.policy_type {
            let paragraph = self.labelled(
                style::NORMAL,
                "Coverage Overview",
                Span::new(policy_notes(policy_type)),
            )?;
            self.push(Block::Paragraph(paragraph));
        }

        let layout = section.layout;
        let mut table = Table::new(layout.columns.len());

        let header = layout
            .titles()
            .into_iter()
            .map(|title| {
                self.paragraph(layout.header_style, vec![Span::new(title).bold()])
                    .map(TableCell::from)
            })
            .collect::<Result<Vec<_>>>()?;
        table.push_header(TableRow::new(header))?;

        for item in items {
            let mut cells = Vec::with_capacity(layout.columns.len());
            for &(_, column) in layout.columns {
                let value = item.field(column);
                let span = if column.is_monetary() {
                    self.currency_span(value)
                } else {
                    self.field_span(value)
                };
                cells.push(TableCell::from(self.paragraph(style::TABLE, vec![span])?));
            }
            table.push_row(TableRow::new(cells))?;
        }

        self.push(Block::Table(table));
        Ok(self.add_spacer())
    }
}
