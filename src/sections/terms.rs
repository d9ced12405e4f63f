use crate::error::Result;
use crate::model::{Block, BulletList, HorizontalAlignment};
use crate::payload::FieldValue;
use crate::richtext::Span;
use crate::style;

use super::Composer;

const TERMS_INTRO: &str = "By accepting this quote, you agree to the following terms:";

impl Composer<'_> {
    /// Appends the terms block and, when `disclaimers` is non-empty, an
    /// "Important Disclaimers" block.
    pub fn add_terms_and_conditions<T: AsRef<str>>(
        &mut self,
        terms: &[T],
        disclaimers: &[T],
    ) -> Result<&mut Self> {
        self.add_heading(style::SUBHEADER, "Terms and Conditions", HorizontalAlignment::Left)?;
        self.add_heading(style::NORMAL, TERMS_INTRO, HorizontalAlignment::Left)?;
        self.add_bullets("•", terms)?;

        if !disclaimers.is_empty() {
            self.add_heading(style::SUBHEADER, "Important Disclaimers", HorizontalAlignment::Left)?;
            self.add_heading(style::NORMAL, "Please note:", HorizontalAlignment::Left)?;
            self.add_bullets("*", disclaimers)?;
        }

        Ok(self.add_spacer())
    }

    /// Appends a "Terms and Conditions" heading and a bulleted list without
    /// an introduction.
    pub fn add_terms_list<T: AsRef<str>>(&mut self, terms: &[T]) -> Result<&mut Self> {
        self.add_heading(style::SUBHEADER, "Terms and Conditions", HorizontalAlignment::Left)?;
        self.add_bullets("•", terms)?;
        Ok(self.add_spacer())
    }

    /// Appends a heading followed by a single field paragraph.
    ///
    /// Placeholders are drawn in the prompt style.
    pub fn add_prompt_section(
        &mut self,
        heading_style: &str,
        heading: &str,
        body: &FieldValue,
    ) -> Result<&mut Self> {
        self.add_heading(heading_style, heading, HorizontalAlignment::Left)?;
        let body_style = if body.is_placeholder() {
            style::PROMPT
        } else {
            style::NORMAL
        };
        let span = self.field_span(body);
        self.add_paragraph(body_style, vec![span], HorizontalAlignment::Left)
    }

    fn add_bullets<T: AsRef<str>>(&mut self, bullet: &str, items: &[T]) -> Result<()> {
        let items = items
            .iter()
            .map(|item| self.paragraph(style::NORMAL, vec![Span::new(item.as_ref())]))
            .collect::<Result<Vec<_>>>()?;
        self.push(Block::List(BulletList::new(bullet, items)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleRegistry;

    fn lists(composer: &Composer<'_>) -> Vec<(String, Vec<String>)> {
        composer
            .document()
            .blocks()
            .iter()
            .filter_map(|block| match block {
                Block::List(list) => Some((
                    list.bullet().to_owned(),
                    list.items().iter().map(|item| item.text()).collect(),
                )),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn disclaimers_are_optional() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        let none: [&str; 0] = [];
        composer
            .add_terms_and_conditions(&["Coverage begins upon receipt of first payment"], &none)
            .unwrap();
        let lists = lists(&composer);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].0, "•");
        assert!(!composer.document().blocks().iter().any(|block| matches!(
            block,
            Block::Paragraph(p) if p.text() == "Important Disclaimers"
        )));
    }

    #[test]
    fn disclaimers_use_asterisks() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        composer
            .add_terms_and_conditions(
                &["30-day notice required for policy cancellation"],
                &["This quote is not a binding contract"],
            )
            .unwrap();
        let lists = lists(&composer);
        assert_eq!(lists[1].0, "*");
        assert_eq!(lists[1].1, ["This quote is not a binding contract"]);
    }

    #[test]
    fn prompt_section_uses_prompt_style_for_placeholders() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        composer
            .add_prompt_section(
                style::SUBHEADER,
                "TERMS AND CONDITIONS",
                &FieldValue::placeholder("Standard Terms and Conditions"),
            )
            .unwrap();
        match &composer.document().blocks()[1] {
            Block::Paragraph(paragraph) => {
                assert_eq!(paragraph.text(), "{Standard Terms and Conditions}");
                assert!(paragraph.style().is_italic());
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }
}
