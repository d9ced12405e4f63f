use std::io::Cursor;

use chrono::NaiveDate;
use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb};
use quote_composer::builder::PdfBuilder;
use quote_composer::documents::{self, DocumentKind};
use quote_composer::fonts;
use quote_composer::model::{Block, Document, HorizontalAlignment, ImageBlock, ImageSource};
use quote_composer::payload::FieldValue;
use quote_composer::sections::{contact_line, CompanyHeader, Composer, Logo};
use quote_composer::style::{self, StyleRegistry};
use quote_composer::ComposeError;
use sha2::{Digest, Sha256};

const SKIP_HINT: &str =
    "fonts missing. Set QUOTE_COMPOSER_FONTS_DIR or install the Liberation Sans family.";

fn sample(kind: DocumentKind) -> Document {
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    documents::compose(kind, None, date).expect("compose sample document")
}

fn render(kind: DocumentKind) -> Option<Vec<u8>> {
    if !fonts::default_fonts_available() {
        return None;
    }

    let bytes = PdfBuilder::new()
        .render(&sample(kind))
        .expect("render sample pdf")
        .bytes;

    Some(bytes)
}

/// Metadata that changes between runs: dates, document IDs and producer.
const VOLATILE: &[(&[u8], &[u8])] = &[
    (b"/CreationDate(", b")"),
    (b"/ModDate(", b")"),
    (b"/ID[", b"]"),
    (b"/Producer(", b")"),
    (b"<xmp:CreateDate>", b"</xmp:CreateDate>"),
    (b"<xmp:ModifyDate>", b"</xmp:ModifyDate>"),
    (b"<xmp:MetadataDate>", b"</xmp:MetadataDate>"),
    (b"<xmpMM:DocumentID>", b"</xmpMM:DocumentID>"),
    (b"<xmpMM:InstanceID>", b"</xmpMM:InstanceID>"),
    (b"<xmpMM:VersionID>", b"</xmpMM:VersionID>"),
];

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Zeroes every volatile value while keeping delimiters and whitespace, so the
/// byte length is unchanged.
fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    let mut data = bytes.to_vec();
    for &(start, end) in VOLATILE {
        let mut offset = 0;
        while let Some(found) = find(&data[offset..], start) {
            let from = offset + found + start.len();
            let Some(length) = find(&data[from..], end) else {
                break;
            };
            for byte in &mut data[from..from + length] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = from + length + end.len();
        }
    }
    data
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    let digest = Sha256::digest(&normalized);
    digest.into()
}

#[test]
fn every_kind_renders_a_pdf() {
    for kind in DocumentKind::ALL {
        let Some(bytes) = render(kind) else {
            eprintln!("Skipping every_kind_renders_a_pdf: {SKIP_HINT}");
            return;
        };
        assert!(bytes.starts_with(b"%PDF"), "{kind} did not render a PDF header");
    }
}

#[test]
fn rendering_is_deterministic() {
    let Some(bytes_a) = render(DocumentKind::ConditionalPolicyTemplate) else {
        eprintln!("Skipping rendering_is_deterministic: {SKIP_HINT}");
        return;
    };
    let Some(bytes_b) = render(DocumentKind::ConditionalPolicyTemplate) else {
        eprintln!("Skipping rendering_is_deterministic: {SKIP_HINT}");
        return;
    };

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");

    let hash_a = normalized_hash(&bytes_a);
    let hash_b = normalized_hash(&bytes_b);

    assert_eq!(
        hash_a, hash_b,
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn undecodable_image_is_an_image_error() {
    if !fonts::default_fonts_available() {
        eprintln!("Skipping undecodable_image_is_an_image_error: {SKIP_HINT}");
        return;
    }
    let mut document = sample(DocumentKind::BasicQuote);
    document.push(Block::Image(ImageBlock::new(ImageSource::from_bytes(
        b"not an image".to_vec(),
    ))));
    let err = PdfBuilder::new().render(&document).unwrap_err();
    assert!(matches!(err, ComposeError::Image(_)), "unexpected error: {err}");
}

#[test]
fn missing_font_directory_falls_back_or_fails_with_fonts_error() {
    let builder = PdfBuilder::new().with_font_dir(std::path::PathBuf::from("/nonexistent/fonts"));
    match builder.render(&sample(DocumentKind::BasicQuote)) {
        Ok(rendered) => assert!(!rendered.bytes.is_empty()),
        Err(err) => assert!(matches!(err, ComposeError::Fonts(_)), "unexpected error: {err}"),
    }
}

fn logo_png() -> Vec<u8> {
    let buffer = ImageBuffer::from_fn(240, 80, |x, _| Rgb([0u8, (x % 256) as u8, 102]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("encode logo");
    bytes
}

fn compose_with_header(header: &CompanyHeader, styles: &StyleRegistry) -> Document {
    let mut composer = Composer::new(styles);
    composer
        .add_company_header(header)
        .expect("header")
        .add_heading(style::HEADER, "Insurance Quote", HorizontalAlignment::Center)
        .expect("heading")
        .add_footer(
            contact_line(&[
                ("", FieldValue::from("ABC Insurance Company")),
                ("Tel: ", FieldValue::from("(555) 123-4567")),
                ("Email: ", FieldValue::from("quotes@abc-insurance.example")),
            ]),
            true,
        )
        .expect("footer");
    composer.finish()
}

#[test]
fn logo_header_and_numbered_footer_render() {
    if !fonts::default_fonts_available() {
        eprintln!("Skipping logo_header_and_numbered_footer_render: {SKIP_HINT}");
        return;
    }
    let styles = StyleRegistry::insurance();
    let header = CompanyHeader::new("ABC Insurance Company").with_license("INS-2024-123456");

    let with_logo = compose_with_header(
        &header
            .clone()
            .with_logo(Logo::Image(ImageSource::from_bytes(logo_png()))),
        &styles,
    );
    assert!(matches!(with_logo.blocks()[0], Block::Image(_)));
    assert!(with_logo.footer().is_some_and(|footer| footer.has_page_numbers()));
    let logo_bytes = PdfBuilder::new().render(&with_logo).expect("render with logo").bytes;
    assert!(logo_bytes.starts_with(b"%PDF"));

    let plain = compose_with_header(&header, &styles);
    let plain_bytes = PdfBuilder::new().render(&plain).expect("render without logo").bytes;
    assert!(
        logo_bytes.len() > plain_bytes.len(),
        "the embedded logo should add image data to the PDF"
    );
}
