use crate::error::Result;
use crate::model::HorizontalAlignment;
use crate::style;

use super::Composer;

/// Signature block of the fillable quote template.
pub const QUOTE_SIGNATURE_LINES: [&str; 5] = [
    "_________________________    ______________",
    "Client Signature             Date",
    "",
    "_________________________    ______________",
    "Agent Signature             Date",
];

impl Composer<'_> {
    /// Appends a heading and the given lines verbatim. Empty lines become
    /// spacers.
    pub fn add_signature_lines<T: AsRef<str>>(
        &mut self,
        heading: &str,
        lines: &[T],
    ) -> Result<&mut Self> {
        self.add_heading(style::SUBHEADER, heading, HorizontalAlignment::Left)?;
        for line in lines {
            match line.as_ref() {
                "" => {
                    self.add_spacer();
                }
                text => {
                    self.add_heading(style::NORMAL, text, HorizontalAlignment::Left)?;
                }
            }
        }
        Ok(self)
    }
}
