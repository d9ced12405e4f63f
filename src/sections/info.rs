use crate::error::Result;
use crate::model::{Block, HorizontalAlignment};
use crate::payload::{FieldValue, Payload};
use crate::style;

use super::Composer;

/// Where the agent sub-block of the quote information goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentLayout {
    /// Continues the quote lines as "Insurance Agent", "Agent License", "Contact".
    Inline,
    /// Separate section under its own heading with "Name", "License Number", "Contact".
    Section(String),
}

/// Presentation of [`Composer::add_quote_info`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteInfoLayout {
    /// Optional heading above the quote lines.
    pub heading: Option<String>,
    /// Placement of the agent sub-block.
    pub agent: AgentLayout,
}

impl Default for QuoteInfoLayout {
    fn default() -> Self {
        Self {
            heading: None,
            agent: AgentLayout::Inline,
        }
    }
}

impl QuoteInfoLayout {
    /// Layout of the fillable quote template: headed sections for quote and agent.
    pub fn sectioned() -> Self {
        Self {
            heading: Some("QUOTE INFORMATION".to_owned()),
            agent: AgentLayout::Section("AGENT INFORMATION".to_owned()),
        }
    }
}

impl Composer<'_> {
    /// Appends the quote reference block.
    ///
    /// Reads `reference` (default `TBD`), `valid_until` (default `N/A`) and the
    /// optional nested `agent` mapping with `name`, `license` and `contact`.
    /// The generation date is the composer's date, never a payload field.
    pub fn add_quote_info(&mut self, quote: &Payload, layout: &QuoteInfoLayout) -> Result<&mut Self> {
        if let Some(heading) = &layout.heading {
            self.add_heading(style::SUBHEADER, heading, HorizontalAlignment::Left)?;
        }

        let reference = self.lookup(quote, "reference", "TBD");
        let valid_until = self.lookup(quote, "valid_until", crate::payload::MISSING_FIELD);
        let generated = FieldValue::from(self.generation_date_text());
        self.add_labelled_lines(
            style::NORMAL,
            &[
                ("Quote Reference", reference),
                ("Date Generated", generated),
                ("Valid Until", valid_until),
            ],
        )?;

        if let Some(agent) = quote.get("agent") {
            let agent = match agent {
                FieldValue::Placeholder(path) => Payload::new()
                    .with_placeholder("name", format!("{path}.name"))
                    .with_placeholder("license", format!("{path}.license"))
                    .with_placeholder("contact", format!("{path}.contact")),
                literal => literal.as_payload().unwrap_or_default(),
            };
            self.add_agent_info(&agent, &layout.agent)?;
        }

        if layout.heading.is_none() {
            self.add_spacer();
        }
        Ok(self)
    }

    /// Appends the agent block on its own.
    ///
    /// Reads `name`, `license` and `contact`, each defaulting to an empty value.
    pub fn add_agent_info(&mut self, agent: &Payload, layout: &AgentLayout) -> Result<&mut Self> {
        let name = self.lookup(agent, "name", "");
        let license = self.lookup(agent, "license", "");
        let contact = self.lookup(agent, "contact", "");

        match layout {
            AgentLayout::Inline => {
                self.push(Block::Spacer);
                self.add_labelled_lines(
                    style::NORMAL,
                    &[
                        ("Insurance Agent", name),
                        ("Agent License", license),
                        ("Contact", contact),
                    ],
                )?;
            }
            AgentLayout::Section(heading) => {
                self.add_heading(style::SUBHEADER, heading, HorizontalAlignment::Left)?;
                self.add_labelled_lines(
                    style::NORMAL,
                    &[
                        ("Name", name),
                        ("License Number", license),
                        ("Contact", contact),
                    ],
                )?;
            }
        }
        Ok(self)
    }

    /// Appends a heading followed by one bold-labelled line per payload entry.
    pub fn add_detail_lines(
        &mut self,
        heading_style: &str,
        heading: &str,
        details: &Payload,
    ) -> Result<&mut Self> {
        self.add_heading(heading_style, heading, HorizontalAlignment::Left)?;
        for (label, value) in details.iter() {
            let span = self.field_span(value);
            let paragraph = self.labelled(style::NORMAL, label, span)?;
            self.push(Block::Paragraph(paragraph));
        }
        Ok(self)
    }
}
