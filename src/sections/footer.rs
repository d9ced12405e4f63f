use crate::error::Result;
use crate::model::Footer;
use crate::payload::FieldValue;
use crate::richtext::Span;
use crate::style;

use super::Composer;

const SEPARATOR: &str = " | ";

/// Joins contact parts into one footer line separated by ` | `.
///
/// Each part is a label prefix and a field, e.g. `("Tel: ", phone)`.
pub fn contact_line(parts: &[(&str, FieldValue)]) -> Vec<Span> {
    let mut spans = Vec::with_capacity(parts.len() * 3);
    for (index, (prefix, value)) in parts.iter().enumerate() {
        if index > 0 {
            spans.push(Span::new(SEPARATOR));
        }
        if !prefix.is_empty() {
            spans.push(Span::new(*prefix));
        }
        spans.push(Span::from_field(value, value.text()));
    }
    spans
}

impl Composer<'_> {
    /// Sets the page footer: a centered contact line and, when
    /// `page_numbers` is set, a `Page N` line on every page.
    ///
    /// Replaces any footer set earlier.
    pub fn add_footer(&mut self, contact: Vec<Span>, page_numbers: bool) -> Result<&mut Self> {
        let paragraph = self.paragraph(style::TABLE, contact)?;
        self.document_mut()
            .set_footer(Footer::new(paragraph, page_numbers));
        Ok(self)
    }
}
