use crate::error::Result;
use crate::model::{Block, HorizontalAlignment, ImageBlock, ImageSource};
use crate::payload::FieldValue;
use crate::richtext::Span;
use crate::style;

use super::Composer;

/// Logo width on the page.
pub const LOGO_WIDTH_MM: f64 = 50.8;

/// Logo shown above the company name.
#[derive(Clone, Debug, PartialEq)]
pub enum Logo {
    /// Image data or file drawn in the document.
    Image(ImageSource),
    /// Fill-in prompt such as `{Company Logo}`.
    Placeholder(String),
}

/// Company header payload.
#[derive(Clone, Debug, PartialEq)]
pub struct CompanyHeader {
    name: FieldValue,
    name_style: &'static str,
    license: Option<FieldValue>,
    logo: Option<Logo>,
    title: Option<String>,
}

impl CompanyHeader {
    /// Creates a header showing `name` in the header style.
    pub fn new(name: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            name_style: style::HEADER,
            license: None,
            logo: None,
            title: None,
        }
    }

    /// Draws the name in another registered style.
    pub fn with_name_style(mut self, name_style: &'static str) -> Self {
        self.name_style = name_style;
        self
    }

    /// Adds a licence or registration line.
    pub fn with_license(mut self, license: impl Into<FieldValue>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Adds a logo above the name.
    pub fn with_logo(mut self, logo: impl Into<Option<Logo>>) -> Self {
        self.logo = logo.into();
        self
    }

    /// Adds a title line above everything else.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Composer<'_> {
    /// Appends the centered company header.
    ///
    /// A header without a logo simply skips the image.
    pub fn add_company_header(&mut self, header: &CompanyHeader) -> Result<&mut Self> {
        if let Some(title) = &header.title {
            self.add_heading(style::HEADER, title, HorizontalAlignment::Center)?;
        }

        match &header.logo {
            Some(Logo::Image(source)) => self.push(Block::Image(
                ImageBlock::new(source.clone())
                    .with_alignment(HorizontalAlignment::Center)
                    .with_width_mm(LOGO_WIDTH_MM),
            )),
            Some(Logo::Placeholder(path)) => {
                self.add_paragraph(
                    style::PROMPT,
                    vec![Span::placeholder(path.as_str())],
                    HorizontalAlignment::Center,
                )?;
            }
            None => {}
        }

        let name_style = if header.name.is_placeholder() {
            style::PROMPT
        } else {
            header.name_style
        };
        let mut name = self.field_span(&header.name);
        if !header.name.is_placeholder() {
            name = name.bold();
        }
        self.add_paragraph(name_style, vec![name], HorizontalAlignment::Center)?;

        match &header.license {
            Some(license @ FieldValue::Placeholder(_)) => {
                let span = self.field_span(license);
                self.add_paragraph(style::PROMPT, vec![span], HorizontalAlignment::Center)?;
            }
            Some(license) => {
                let spans = vec![
                    Span::new("Licensed Insurance Provider - "),
                    self.field_span(license),
                ];
                self.add_paragraph(style::NORMAL, spans, HorizontalAlignment::Center)?;
            }
            None => {}
        }

        Ok(self.add_spacer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::style::StyleRegistry;

    fn paragraph_texts(blocks: &[Block]) -> Vec<String> {
        blocks
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph(paragraph) => Some(paragraph.text()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn literal_header_with_license() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        composer
            .add_company_header(
                &CompanyHeader::new("ABC Insurance Company").with_license("INS-2024-123456"),
            )
            .unwrap();
        let document = composer.finish();
        assert_eq!(
            paragraph_texts(document.blocks()),
            [
                "ABC Insurance Company",
                "Licensed Insurance Provider - INS-2024-123456"
            ]
        );
        assert!(matches!(document.blocks().last(), Some(Block::Spacer)));
    }

    #[test]
    fn missing_logo_is_skipped() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        composer
            .add_company_header(&CompanyHeader::new("ABC"))
            .unwrap();
        let document = composer.finish();
        assert!(!document
            .blocks()
            .iter()
            .any(|block| matches!(block, Block::Image(_))));
    }

    #[test]
    fn image_logo_is_centered_and_sized() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        composer
            .add_company_header(
                &CompanyHeader::new("ABC")
                    .with_logo(Logo::Image(ImageSource::from_path("logo.png"))),
            )
            .unwrap();
        let document = composer.finish();
        match &document.blocks()[0] {
            Block::Image(image) => {
                assert_eq!(image.alignment(), HorizontalAlignment::Center);
                assert_eq!(image.width_mm(), Some(LOGO_WIDTH_MM));
            }
            other => panic!("expected logo first, got {other:?}"),
        }
    }

    #[test]
    fn placeholder_header_uses_prompts() {
        let styles = StyleRegistry::insurance();
        let mut composer = Composer::new(&styles);
        composer
            .add_company_header(
                &CompanyHeader::new(FieldValue::placeholder("Company Name"))
                    .with_title("INSURANCE QUOTE")
                    .with_logo(Logo::Placeholder("Company Logo".into()))
                    .with_license(FieldValue::placeholder("Company License Number")),
            )
            .unwrap();
        let document = composer.finish();
        assert_eq!(
            paragraph_texts(document.blocks()),
            [
                "INSURANCE QUOTE",
                "{Company Logo}",
                "{Company Name}",
                "{Company License Number}"
            ]
        );
    }
}
