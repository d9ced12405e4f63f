use crate::error::Result;
use crate::model::{Block, HorizontalAlignment, Table, TableCell, TableRow};
use crate::payload::{FieldValue, Payload, MISSING_FIELD};
use crate::richtext::Span;
use crate::style;

use super::Composer;

/// Titled column of client fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldGroup {
    /// Bold line at the top of the column.
    pub title: &'static str,
    /// Payload labels shown in the column, in order.
    pub fields: &'static [&'static str],
}

/// Personal details column of the client block.
pub const PERSONAL_DETAILS: FieldGroup = FieldGroup {
    title: "Personal Details",
    fields: &["Name", "Date of Birth", "Address", "Phone", "Email"],
};

/// Policy column of the client block.
pub const POLICY_DETAILS: FieldGroup = FieldGroup {
    title: "Policy Information",
    fields: &["Policy Type", "Current Provider", "Claims History", "Risk Level"],
};

impl Composer<'_> {
    /// Appends "Client Information" as a two-column block of personal and
    /// policy details. Absent fields render as `N/A`.
    pub fn add_client_info(&mut self, client: &Payload) -> Result<&mut Self> {
        self.add_client_columns("Client Information", client, &[PERSONAL_DETAILS, POLICY_DETAILS])
    }

    /// Appends a heading and one borderless column per field group.
    pub fn add_client_columns(
        &mut self,
        heading: &str,
        client: &Payload,
        groups: &[FieldGroup],
    ) -> Result<&mut Self> {
        self.add_heading(style::SUBHEADER, heading, HorizontalAlignment::Left)?;

        let mut cells = Vec::with_capacity(groups.len());
        for group in groups {
            let mut paragraphs =
                vec![self.paragraph(style::NORMAL, vec![Span::new(group.title).bold()])?];
            for field in group.fields {
                let value = self.lookup(client, field, MISSING_FIELD);
                let span = self.field_span(&value);
                paragraphs.push(self.labelled(style::NORMAL, field, span)?);
            }
            cells.push(TableCell::new(paragraphs));
        }

        let mut table = Table::new(groups.len()).with_borders(false);
        table.push_row(TableRow::new(cells))?;
        self.push(Block::Table(table));
        Ok(self.add_spacer())
    }

    /// Appends a heading and one `Label: value` line per payload entry, in
    /// payload order.
    pub fn add_client_listing(&mut self, heading: &str, client: &Payload) -> Result<&mut Self> {
        self.add_heading(style::SUBHEADER, heading, HorizontalAlignment::Left)?;
        for (label, value) in client.iter() {
            let span = self.field_span(value);
            let paragraph = self.labelled(style::NORMAL, label, span)?;
            self.push(Block::Paragraph(paragraph));
        }
        Ok(self.add_spacer())
    }

    /// Appends a bordered two-column table with one `Label:` / value row per
    /// payload entry.
    pub fn add_label_value_table(&mut self, rows: &Payload) -> Result<&mut Self> {
        self.push_label_value_table(rows.iter())
    }

    /// Appends a heading in `heading_style`, a label/value table and a spacer.
    ///
    /// Used for policy, policyholder, premium and payment tables.
    pub fn add_field_table(
        &mut self,
        heading_style: &str,
        heading: &str,
        rows: &Payload,
    ) -> Result<&mut Self> {
        self.add_heading(heading_style, heading, HorizontalAlignment::Left)?;
        self.push_label_value_table(rows.iter())?;
        Ok(self.add_spacer())
    }

    /// Like [`Composer::add_field_table`], but rows are given in order and
    /// labels may repeat, as in signature blocks with several `Date` rows.
    pub fn add_field_rows(
        &mut self,
        heading_style: &str,
        heading: &str,
        rows: &[(&str, FieldValue)],
    ) -> Result<&mut Self> {
        self.add_heading(heading_style, heading, HorizontalAlignment::Left)?;
        self.push_label_value_table(rows.iter().map(|(label, value)| (*label, value)))?;
        Ok(self.add_spacer())
    }

    fn push_label_value_table<'v>(
        &mut self,
        rows: impl Iterator<Item = (&'v str, &'v FieldValue)>,
    ) -> Result<&mut Self> {
        let mut table = Table::new(2);
        for (label, value) in rows {
            let label = self.paragraph(style::NORMAL, vec![Span::new(format!("{label}:"))])?;
            let value = self.paragraph(style::NORMAL, vec![self.field_span(value)])?;
            table.push_row(TableRow::new(vec![label.into(), value.into()]))?;
        }
        self.push(Block::Table(table));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleRegistry;

    #[test]
    fn missing_client_fields_render_sentinel() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        let client = Payload::new().with("Name", "John Doe");
        composer.add_client_info(&client).unwrap();

        let document = composer.finish();
        let table = document.tables()[0];
        assert!(!table.is_bordered());
        let row = &table.rows()[0];
        let personal = row.cells()[0].text();
        assert!(personal.starts_with("Personal Details\nName: John Doe\n"));
        assert!(personal.contains("Phone: N/A"));
        assert!(row.cells()[1].text().contains("Risk Level: N/A"));
    }

    #[test]
    fn listing_follows_payload_order() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        let client = Payload::new()
            .with("Name", "John Doe")
            .with("Policy Type", "Auto Insurance");
        composer.add_client_listing("Client Information", &client).unwrap();
        let texts: Vec<_> = composer
            .document()
            .blocks()
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph(p) => Some(p.text()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            [
                "Client Information",
                "Name: John Doe",
                "Policy Type: Auto Insurance"
            ]
        );
    }

    #[test]
    fn field_table_has_one_row_per_entry() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        let rows = Payload::new()
            .with_placeholder("Policy Number", "policy_number")
            .with_placeholder("Date Issued", "issue_date")
            .with("Insurance Representative", FieldValue::from("________________________"));
        composer
            .add_field_table(style::SECTION, "Policy Information", &rows)
            .unwrap();
        let document = composer.finish();
        let table = document.tables()[0];
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[0].texts(), ["Policy Number:", "{policy_number}"]);
        assert_eq!(
            table.rows()[2].texts(),
            ["Insurance Representative:", "________________________"]
        );
    }

    #[test]
    fn field_rows_keep_repeated_labels() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        composer
            .add_field_rows(
                style::HEADER,
                "Declarations and Signatures",
                &[
                    ("Date", FieldValue::placeholder("representative_signature_date")),
                    ("Date", FieldValue::placeholder("policyholder_signature_date")),
                ],
            )
            .unwrap();
        let document = composer.finish();
        let table = document.tables()[0];
        assert_eq!(table.rows().len(), 2);
        assert_eq!(
            table.rows()[1].texts(),
            ["Date:", "{policyholder_signature_date}"]
        );
    }
}
