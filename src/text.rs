//! Plain-text preview of a composed document.
//!
//! The preview shows the same content the PDF renderer draws, one paragraph per
//! line. Placeholders appear as their `{path}` tokens and conditional blocks as
//! their open and close tokens, so a template can be reviewed without fonts.
//! Page numbers are left out.

use crate::model::{Block, Document, Table};

const CELL_SEPARATOR: &str = " | ";

/// Renders `document` as plain text.
pub fn to_text(document: &Document) -> String {
    let mut lines = Vec::new();
    write_blocks(document.blocks(), &mut lines);
    if let Some(footer) = document.footer() {
        let contact = footer.paragraph().text();
        if !contact.is_empty() {
            lines.push(String::new());
            lines.push(contact);
        }
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn write_blocks(blocks: &[Block], lines: &mut Vec<String>) {
    for block in blocks {
        match block {
            Block::Paragraph(paragraph) => lines.push(paragraph.text()),
            Block::Table(table) => write_table(table, lines),
            Block::List(list) => {
                for item in list.items() {
                    lines.push(format!("{} {}", list.bullet(), item.text()));
                }
            }
            Block::Image(_) => lines.push("[image]".to_owned()),
            Block::Conditional(conditional) => {
                lines.push(conditional.condition().open_token());
                write_blocks(conditional.blocks(), lines);
                lines.push(conditional.condition().close_token());
            }
            Block::Spacer => lines.push(String::new()),
        }
    }
}

fn write_table(table: &Table, lines: &mut Vec<String>) {
    for row in table.rows() {
        // Multi-paragraph cells are flattened onto one line.
        let cells: Vec<String> = row
            .cells()
            .iter()
            .map(|cell| cell.text().replace('\n', "; "))
            .collect();
        lines.push(cells.join(CELL_SEPARATOR));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::model::HorizontalAlignment;
    use crate::payload::Payload;
    use crate::richtext::Span;
    use crate::sections::Composer;
    use crate::style::{self, StyleRegistry};

    #[test]
    fn conditional_tokens_wrap_their_content() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        composer
            .add_conditional(Condition::equals("status", "active"), |inner| {
                inner.add_heading(
                    style::NORMAL,
                    "Your policy is currently active and in force.",
                    HorizontalAlignment::Left,
                )?;
                Ok(())
            })
            .unwrap();
        let text = to_text(&composer.finish());
        assert_eq!(
            text,
            "{#status == \"active\"}\n\
             Your policy is currently active and in force.\n\
             {/status == \"active\"}\n"
        );
    }

    #[test]
    fn tables_and_footer_are_flattened() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        composer
            .add_label_value_table(&Payload::new().with_placeholder("Policy Number", "policy_number"))
            .unwrap()
            .add_footer(vec![Span::new("ABC Insurance Company")], true)
            .unwrap();
        let text = to_text(&composer.finish());
        assert_eq!(
            text,
            "Policy Number: | {policy_number}\n\nABC Insurance Company\n"
        );
    }
}
