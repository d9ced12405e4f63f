use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::model::{Document, ImageSource};
use crate::payload::{FieldValue, Payload};
use crate::sections::{
    contact_line, CompanyHeader, Composer, CoverageItem, CoverageSection, Logo, PaymentOption,
    PremiumSummary, QuoteInfoLayout,
};
use crate::style::StyleRegistry;

/// Company details shown in the quote header and footer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub license_number: Option<String>,
    pub phone: String,
    pub email: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: "Insurance Company".to_owned(),
            license_number: None,
            phone: String::new(),
            email: String::new(),
        }
    }
}

/// Input of the detailed quote, readable from JSON.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuoteData {
    pub company: CompanyInfo,
    /// Logo image file drawn above the company name.
    pub logo: Option<PathBuf>,
    /// `reference`, `valid_until` and a nested `agent` mapping.
    pub quote: Payload,
    pub client: Payload,
    /// Selects the coverage heading and overview note, e.g. `Auto`.
    pub policy_type: String,
    pub coverage: Vec<CoverageItem>,
    pub premium: PremiumSummary,
    pub terms: Vec<String>,
    pub disclaimers: Vec<String>,
    pub page_numbers: bool,
}

impl Default for QuoteData {
    fn default() -> Self {
        Self {
            company: CompanyInfo::default(),
            logo: None,
            quote: Payload::new(),
            client: Payload::new(),
            policy_type: "Auto".to_owned(),
            coverage: Vec::new(),
            premium: PremiumSummary::default(),
            terms: Vec::new(),
            disclaimers: Vec::new(),
            page_numbers: true,
        }
    }
}

impl QuoteData {
    /// Sample auto insurance quote.
    pub fn sample() -> Self {
        let company = CompanyInfo {
            name: "ABC Insurance Company".to_owned(),
            license_number: Some("INS-2024-123456".to_owned()),
            phone: "(800) 555-0123".to_owned(),
            email: "quotes@abcinsurance.com".to_owned(),
        };

        let quote = Payload::new()
            .with("reference", "QT-2024-001")
            .with("valid_until", "2024-12-31")
            .with(
                "agent",
                FieldValue::literal(json!({
                    "name": "Jane Smith",
                    "license": "AG123456",
                    "contact": "(555) 555-5555"
                })),
            );

        let client = Payload::new()
            .with("Name", "John Doe")
            .with("Date of Birth", "1980-01-15")
            .with("Address", "123 Main Street, Anytown, ST 12345")
            .with("Phone", "(555) 555-5555")
            .with("Email", "john.doe@email.com")
            .with("Policy Type", "Auto Insurance")
            .with("Current Provider", "Previous Insurance Co")
            .with("Claims History", "No claims in past 5 years")
            .with("Risk Level", "Low");

        let coverage = vec![
            CoverageItem::new("Liability - Bodily Injury", 300_000_i64, 0_i64, 800_i64),
            CoverageItem::new("Liability - Property Damage", 100_000_i64, 0_i64, 400_i64),
            CoverageItem::new("Collision Coverage", 50_000_i64, 500_i64, 600_i64),
            CoverageItem::new("Comprehensive Coverage", 50_000_i64, 250_i64, 300_i64),
            CoverageItem::new("Personal Injury Protection", 25_000_i64, 0_i64, 200_i64),
        ];

        let premium = PremiumSummary {
            breakdown: Payload::new()
                .with("Base Premium", 2300_i64)
                .with("Safe Driver Discount", -230_i64)
                .with("Multi-Policy Discount", -115_i64)
                .with("Policy Fees", 45_i64),
            payment_options: vec![
                PaymentOption::new("Annual", "Single payment of $2,000 (Save 10%)"),
                PaymentOption::new("Semi-Annual", "Two payments of $1,050"),
                PaymentOption::new("Monthly", "Twelve payments of $183.33"),
            ],
        };

        let terms = [
            "Coverage begins upon receipt of first payment",
            "This quote is based on the information provided and subject to verification",
            "30-day notice required for policy cancellation",
            "Claims must be reported within 24 hours of incident",
            "Coverage is subject to policy terms, conditions, and exclusions",
            "Deductibles apply per incident as specified in coverage details",
            "Premium rates are subject to change based on underwriting review",
            "All coverage limits are on a per-occurrence basis unless otherwise specified",
        ];

        let disclaimers = [
            "This quote is not a binding contract and is subject to underwriting review",
            "Rates may change based on final verification of provided information",
            "Additional fees may apply based on state regulations and payment method",
            "Coverage exclusions may apply. Please refer to policy documents for complete details",
            "This quote assumes all provided information is accurate and complete",
        ];

        Self {
            company,
            logo: None,
            quote,
            client,
            policy_type: "Auto".to_owned(),
            coverage,
            premium,
            terms: terms.map(str::to_owned).to_vec(),
            disclaimers: disclaimers.map(str::to_owned).to_vec(),
            page_numbers: true,
        }
    }
}

/// Composes the detailed quote from `data`.
pub fn compose_quote(styles: &StyleRegistry, data: &QuoteData, date: NaiveDate) -> Result<Document> {
    let company = &data.company;
    let mut composer = Composer::new(styles)
        .with_generation_date(date)
        .with_title(format!("{} Insurance Quote", company.name));

    let mut header = CompanyHeader::new(company.name.as_str());
    if let Some(license) = &company.license_number {
        header = header.with_license(license.as_str());
    }
    if let Some(logo) = &data.logo {
        header = header.with_logo(Logo::Image(ImageSource::from_path(
            logo.to_string_lossy().into_owned(),
        )));
    }

    let footer = contact_line(&[
        ("", FieldValue::from(company.name.as_str())),
        ("Tel: ", FieldValue::from(company.phone.as_str())),
        ("Email: ", FieldValue::from(company.email.as_str())),
    ]);

    composer
        .add_company_header(&header)?
        .add_quote_info(&data.quote, &QuoteInfoLayout::default())?
        .add_client_info(&data.client)?
        .add_coverage_section(
            &CoverageSection::for_policy_type(&data.policy_type),
            &data.coverage,
        )?
        .add_terms_and_conditions(&data.terms, &data.disclaimers)?
        .add_premium_summary(&data.premium)?
        .add_footer(footer, data.page_numbers)?;

    Ok(composer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::to_text;

    #[test]
    fn sample_quote_reads_like_the_printed_quote() {
        let styles = StyleRegistry::insurance();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let document = compose_quote(&styles, &QuoteData::sample(), date).unwrap();
        let text = to_text(&document);
        assert!(text.starts_with(
            "ABC Insurance Company\nLicensed Insurance Provider - INS-2024-123456\n"
        ));
        assert!(text.contains("Date Generated: 2024-03-05\n"));
        assert!(text.contains("Insurance Agent: Jane Smith\n"));
        assert!(text.contains("Auto Coverage Details\n"));
        assert!(text.contains("* This quote assumes all provided information is accurate and complete\n"));
        assert!(text.ends_with(
            "ABC Insurance Company | Tel: (800) 555-0123 | Email: quotes@abcinsurance.com\n"
        ));
        assert_eq!(document.title(), Some("ABC Insurance Company Insurance Quote"));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let data: QuoteData = serde_json::from_str(
            r#"{"company": {"name": "Acme"}, "coverage": [{"type": "Roadside", "premium": "call"}]}"#,
        )
        .unwrap();
        assert_eq!(data.policy_type, "Auto");
        assert!(data.page_numbers);
        let styles = StyleRegistry::insurance();
        let document =
            compose_quote(&styles, &data, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
        let coverage = document.tables()[1];
        assert_eq!(
            coverage.body()[0].texts(),
            ["Roadside", "$0.00", "$0.00", "call"]
        );
    }
}
