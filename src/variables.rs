//! Fields a composed template expects from its data.
//!
//! Placeholders and conditions are walked in document order. A placeholder
//! outside every conditional block must be supplied; one that only appears
//! inside conditional blocks, like the fields a condition tests, may be
//! absent because the substitution pass can drop the whole block.

use serde_json::Value;

use crate::error::{ComposeError, Result};
use crate::model::{Block, Document, RichParagraph};

/// Value shape suggested by a field's name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
}

impl FieldKind {
    fn infer(path: &str) -> Self {
        let name = path.to_lowercase();
        if name.contains("date") {
            Self::Date
        } else if ["amount", "total", "premium", "limit", "discount"]
            .iter()
            .any(|hint| name.contains(hint))
        {
            Self::Number
        } else {
            Self::Text
        }
    }

    /// Lower-case name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
        }
    }
}

/// One field referenced by a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateField {
    pub path: String,
    pub required: bool,
    pub kind: FieldKind,
}

#[derive(Default)]
struct Collector {
    fields: Vec<TemplateField>,
}

impl Collector {
    fn record(&mut self, path: &str, required: bool) {
        match self.fields.iter_mut().find(|field| field.path == path) {
            Some(field) => field.required |= required,
            None => self.fields.push(TemplateField {
                path: path.to_owned(),
                required,
                kind: FieldKind::infer(path),
            }),
        }
    }

    fn paragraph(&mut self, paragraph: &RichParagraph, required: bool) {
        for span in paragraph.spans() {
            if let Some(path) = span.field() {
                self.record(path, required);
            }
        }
    }

    fn block(&mut self, block: &Block, depth: usize) {
        let required = depth == 0;
        match block {
            Block::Paragraph(paragraph) => self.paragraph(paragraph, required),
            Block::Table(table) => {
                for cell in table.rows().iter().flat_map(|row| row.cells()) {
                    for paragraph in cell.paragraphs() {
                        self.paragraph(paragraph, required);
                    }
                }
            }
            Block::List(list) => {
                for item in list.items() {
                    self.paragraph(item, required);
                }
            }
            Block::Conditional(conditional) => {
                self.record(conditional.condition().field(), false);
            }
            Block::Image(_) | Block::Spacer => {}
        }
    }
}

/// Lists the fields referenced by `document` in order of first appearance.
pub fn template_fields(document: &Document) -> Vec<TemplateField> {
    let mut collector = Collector::default();
    document.visit(|block, depth| collector.block(block, depth));
    if let Some(footer) = document.footer() {
        collector.paragraph(footer.paragraph(), true);
    }
    collector.fields
}

fn resolve<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(value) = data.get(path) {
        return Some(value);
    }
    path.split('.')
        .try_fold(data, |current, segment| current.get(segment))
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    }
}

/// Returns the required fields of `document` that `data` does not supply.
///
/// Absent, null and blank string values count as missing. Dotted paths walk
/// nested objects unless `data` has a key with the literal dotted name.
pub fn missing_fields(document: &Document, data: &Value) -> Vec<String> {
    template_fields(document)
        .into_iter()
        .filter(|field| field.required && is_blank(resolve(data, &field.path)))
        .map(|field| field.path)
        .collect()
}

/// Fails with [`ComposeError::MissingFields`] when `data` lacks a required field.
pub fn validate(document: &Document, data: &Value) -> Result<()> {
    let missing = missing_fields(document, data);
    if missing.is_empty() {
        Ok(())
    } else {
        log::debug!("template data is missing {} field(s)", missing.len());
        Err(ComposeError::MissingFields(missing))
    }
}
