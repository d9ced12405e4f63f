use chrono::NaiveDate;

use crate::error::Result;
use crate::model::Document;
use crate::payload::{FieldValue, Payload};
use crate::richtext::Span;
use crate::sections::{CompanyHeader, Composer, CoverageItem, CoverageLayout, CoverageSection};
use crate::style::StyleRegistry;

const DEFAULT_COMPANY: &str = "ABC Insurance Company";

const TERMS: [&str; 4] = [
    "Coverage begins upon receipt of first payment",
    "30-day notice required for cancellation",
    "Claims must be reported within 24 hours of incident",
    "Deductibles apply per incident",
];

/// Composes the basic quote.
///
/// Coverage amounts are already formatted strings here and are printed as
/// given.
pub fn compose_basic_quote(
    styles: &StyleRegistry,
    company: Option<&str>,
    date: NaiveDate,
) -> Result<Document> {
    let company = company.unwrap_or(DEFAULT_COMPANY);
    let mut composer = Composer::new(styles)
        .with_generation_date(date)
        .with_title(format!("{company} Quote"));

    let quote = Payload::new()
        .with("reference", "QT-2024-001")
        .with("valid_until", "2024-12-31");

    let client = Payload::new()
        .with("Name", "John Doe")
        .with("Address", "123 Main Street, Anytown, ST 12345")
        .with("Phone", "(555) 555-5555")
        .with("Email", "john.doe@email.com")
        .with("Policy Type", "Auto Insurance");

    let coverage = [
        CoverageItem::new("Liability Coverage", "$300,000", "", "$800"),
        CoverageItem::new("Collision Coverage", "$50,000", "", "$400"),
        CoverageItem::new("Comprehensive", "$50,000", "", "$300"),
    ];

    let footer = vec![Span::new(format!(
        "{company} | Phone: (800) 555-0123 | Email: support@abcinsurance.com"
    ))];

    composer
        .add_company_header(&CompanyHeader::new(company))?
        .add_quote_info(&quote, &Default::default())?
        .add_client_listing("Client Information", &client)?
        .add_coverage_section(
            &CoverageSection::new("Coverage Details").with_layout(CoverageLayout::SUMMARY),
            &coverage,
        )?
        .add_terms_list(&TERMS)?
        .add_total_premium(
            &FieldValue::from(1500.0),
            &FieldValue::from("Monthly payments of $125.00"),
        )?
        .add_footer(footer, false)?;

    Ok(composer.finish())
}
