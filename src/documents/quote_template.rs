use chrono::NaiveDate;

use crate::error::Result;
use crate::model::{Document, HorizontalAlignment};
use crate::payload::{FieldValue, Payload};
use crate::richtext::Span;
use crate::sections::{
    contact_line, AgentLayout, CompanyHeader, Composer, CoverageItem, CoverageSection, Logo,
    QuoteInfoLayout, QUOTE_SIGNATURE_LINES,
};
use crate::style::{self, StyleRegistry};

const COVERAGE_ROWS: usize = 5;

/// Composes the fillable quote template.
///
/// Every value is a `{...}` prompt except the generation date, which is the
/// date the template was produced.
pub fn compose_quote_template(
    styles: &StyleRegistry,
    company: Option<&str>,
    date: NaiveDate,
) -> Result<Document> {
    let mut composer = Composer::new(styles)
        .with_generation_date(date)
        .with_title("Insurance Quote Template");

    let company_name = match company {
        Some(name) => FieldValue::from(name),
        None => FieldValue::placeholder("Company Name"),
    };
    let header = CompanyHeader::new(company_name)
        .with_title("INSURANCE QUOTE")
        .with_logo(Logo::Placeholder("Company Logo".to_owned()))
        .with_license(FieldValue::placeholder("Company License Number"));

    let quote = Payload::new()
        .with_placeholder("reference", "Quote Reference Number")
        .with_placeholder("valid_until", "Validity Date");

    let agent = Payload::new()
        .with_placeholder("name", "Agent Full Name")
        .with_placeholder("license", "Agent License Number")
        .with_placeholder("contact", "Agent Phone and Email");

    let client = Payload::new()
        .with_placeholder("Full Name", "Client's Full Legal Name")
        .with_placeholder("Date of Birth", "MM/DD/YYYY")
        .with_placeholder("Address", "Complete Mailing Address")
        .with_placeholder("Phone Number", "Primary Contact Number")
        .with_placeholder("Email", "Email Address")
        .with_placeholder("Occupation", "Current Occupation")
        .with_placeholder("Current Insurance", "Current Provider if any")
        .with_placeholder("Policy Type", "Requested Policy Type");

    let premium = Payload::new()
        .with_placeholder("Base Premium", "Base Premium Amount")
        .with_placeholder("Discounts", "List of Applied Discounts")
        .with_placeholder("Additional Fees", "Additional Fees")
        .with_placeholder("Total Annual Premium", "Total Premium Amount");

    let payment = Payload::new()
        .with_placeholder("Annual", "Annual Payment Details")
        .with_placeholder("Semi-Annual", "Semi-Annual Payment Details")
        .with_placeholder("Monthly", "Monthly Payment Details");

    let coverage = vec![CoverageItem::placeholder(); COVERAGE_ROWS];

    let footer = contact_line(&[
        ("", FieldValue::placeholder("Company Name")),
        ("", FieldValue::placeholder("Phone")),
        ("", FieldValue::placeholder("Email")),
        ("", FieldValue::placeholder("Website")),
    ]);

    composer
        .add_company_header(&header)?
        .add_quote_info(&quote, &QuoteInfoLayout::sectioned())?
        .add_agent_info(&agent, &AgentLayout::Section("AGENT INFORMATION".to_owned()))?
        .add_heading(style::SUBHEADER, "CLIENT INFORMATION", HorizontalAlignment::Left)?
        .add_paragraph(
            style::NORMAL,
            vec![Span::new("Personal Details").bold()],
            HorizontalAlignment::Left,
        )?
        .add_label_value_table(&client)?
        .add_spacer()
        .add_coverage_section(&CoverageSection::new("COVERAGE DETAILS"), &coverage)?
        .add_field_table(style::SUBHEADER, "PREMIUM SUMMARY", &premium)?
        .add_field_table(style::SUBHEADER, "PAYMENT OPTIONS", &payment)?
        .add_prompt_section(
            style::SUBHEADER,
            "TERMS AND CONDITIONS",
            &FieldValue::placeholder("Standard Terms and Conditions"),
        )?
        .add_signature_lines("AUTHORIZATION", &QUOTE_SIGNATURE_LINES)?
        .add_footer(footer, false)?;

    Ok(composer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::template_fields;

    fn template() -> Document {
        let styles = StyleRegistry::insurance();
        compose_quote_template(&styles, None, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .unwrap()
    }

    #[test]
    fn coverage_has_five_prompt_rows() {
        let document = template();
        let coverage = document
            .tables()
            .into_iter()
            .find(|table| table.header().len() == 1)
            .unwrap();
        assert_eq!(coverage.body().len(), 5);
        assert!(coverage
            .body()
            .iter()
            .all(|row| row.texts() == ["{Coverage Type}", "{Amount}", "{Deductible}", "{Premium}"]));
    }

    #[test]
    fn prompts_are_listed_as_fields() {
        let fields = template_fields(&template());
        let paths: Vec<_> = fields.iter().map(|field| field.path.as_str()).collect();
        assert_eq!(&paths[..3], ["Company Logo", "Company Name", "Company License Number"]);
        assert!(paths.contains(&"Agent Phone and Email"));
        assert!(paths.contains(&"Website"));
        assert!(fields.iter().all(|field| field.required));
    }

    #[test]
    fn company_override_replaces_name_prompt() {
        let styles = StyleRegistry::insurance();
        let document = compose_quote_template(
            &styles,
            Some("Acme Mutual"),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        )
        .unwrap();
        let text = crate::text::to_text(&document);
        assert!(text.starts_with("INSURANCE QUOTE\n{Company Logo}\nAcme Mutual\n"));
    }
}
