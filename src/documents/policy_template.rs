use crate::condition::Condition;
use crate::error::Result;
use crate::model::{Document, HorizontalAlignment};
use crate::payload::{FieldValue, Payload};
use crate::sections::{CompanyHeader, Composer, CoverageItem, CoverageLayout, CoverageSection};
use crate::style::{self, StyleRegistry};

const DEFAULT_COMPANY: &str = "Sample Insurance Co.";
const SIGNATURE_LINE: &str = "________________________";

/// Threshold of `coverage_limit_number` that unlocks the VIP notice.
pub const VIP_COVERAGE_LIMIT: f64 = 500_000.0;

fn company_line(composer: &mut Composer<'_>, company: Option<&str>) -> Result<()> {
    let header = CompanyHeader::new(company.unwrap_or(DEFAULT_COMPANY)).with_name_style(style::COMPANY);
    composer.add_company_header(&header)?;
    Ok(())
}

fn policyholder_rows() -> Payload {
    Payload::new()
        .with_placeholder("Full Name", "full_name")
        .with_placeholder("Address", "address")
        .with_placeholder("City, State, ZIP", "city_state_zip")
        .with_placeholder("Phone", "phone_number")
        .with_placeholder("Email", "email_address")
        .with_placeholder("Date of Birth", "date_of_birth")
}

fn signature_rows() -> [(&'static str, FieldValue); 4] {
    [
        ("Insurance Representative", FieldValue::from(SIGNATURE_LINE)),
        ("Date", FieldValue::placeholder("representative_signature_date")),
        ("Policyholder Signature", FieldValue::from(SIGNATURE_LINE)),
        ("Date", FieldValue::placeholder("policyholder_signature_date")),
    ]
}

/// Composes the policy template with plain placeholder tables.
pub fn compose_policy_template(styles: &StyleRegistry, company: Option<&str>) -> Result<Document> {
    let mut composer = Composer::new(styles).with_title("Insurance Policy Document");
    company_line(&mut composer, company)?;

    let policy = Payload::new()
        .with_placeholder("Policy Number", "policy_number")
        .with_placeholder("Date Issued", "issue_date")
        .with_placeholder("Effective Date", "effective_date")
        .with_placeholder("Expiration Date", "expiration_date")
        .with_placeholder("Policy Type", "policy_type");

    let coverage = [CoverageItem::new(
        FieldValue::placeholder("coverage_description"),
        FieldValue::placeholder("coverage_limit"),
        FieldValue::placeholder("deductible_amount"),
        "",
    )];

    composer
        .add_heading(style::HEADER, "Insurance Policy Document", HorizontalAlignment::Center)?
        .add_field_table(style::HEADER, "Policy Information", &policy)?
        .add_field_table(style::HEADER, "Policyholder Information", &policyholder_rows())?
        .add_coverage_section(
            &CoverageSection::new("Coverage Details")
                .with_heading_style(style::HEADER)
                .with_layout(CoverageLayout::LIMITS),
            &coverage,
        )?
        .add_prompt_section(
            style::HEADER,
            "Terms and Conditions",
            &FieldValue::placeholder("terms_and_conditions"),
        )?
        .add_field_rows(style::HEADER, "Declarations and Signatures", &signature_rows())?
        .add_footer(Vec::new(), true)?;

    Ok(composer.finish())
}

/// Composes the policy template whose title, coverage, discount, status and
/// VIP sections are conditional blocks.
pub fn compose_conditional_policy_template(
    styles: &StyleRegistry,
    company: Option<&str>,
) -> Result<Document> {
    let mut composer = Composer::new(styles).with_title("Insurance Policy Document");
    company_line(&mut composer, company)?;

    for (policy_type, title) in [
        ("auto", "Automobile Insurance Policy"),
        ("home", "Homeowner's Insurance Policy"),
        ("life", "Life Insurance Policy"),
    ] {
        composer.add_conditional(Condition::equals("policy_type", policy_type), |inner| {
            inner.add_heading(style::HEADER, title, HorizontalAlignment::Center)?;
            Ok(())
        })?;
    }

    let policy = Payload::new()
        .with_placeholder("Policy Number", "policy_number")
        .with_placeholder("Issue Date", "issue_date")
        .with_placeholder("Effective Date", "effective_date")
        .with_placeholder("Expiration Date", "expiration_date")
        .with_placeholder("Policy Status", "status")
        .with_placeholder("Annual Premium", "premiumDetails.annualPremium")
        .with_placeholder("Payment Frequency", "premiumDetails.paymentFrequency");

    composer
        .add_field_table(style::HEADER, "Policy Information", &policy)?
        .add_field_table(style::HEADER, "Policyholder Information", &policyholder_rows())?
        .add_heading(style::HEADER, "Coverage Details", HorizontalAlignment::Left)?;

    add_coverage_variants(&mut composer)?;
    add_premium_information(&mut composer)?;
    add_status_messages(&mut composer)?;

    composer
        .add_conditional(
            Condition::at_least("coverage_limit_number", VIP_COVERAGE_LIMIT),
            |inner| {
                inner.add_heading(
                    style::NORMAL,
                    "As a premium policyholder, you have access to our VIP support line: \
                     1-800-VIP-SUPPORT",
                    HorizontalAlignment::Left,
                )?;
                Ok(())
            },
        )?
        .add_spacer()
        .add_field_rows(style::HEADER, "Declarations and Signatures", &signature_rows())?
        .add_footer(Vec::new(), true)?;

    Ok(composer.finish())
}

fn add_coverage_variants(composer: &mut Composer<'_>) -> Result<()> {
    composer.add_conditional(Condition::equals("policy_type", "auto"), |inner| {
        let vehicle = Payload::new()
            .with_placeholder("Make", "coverageDetails.vehicleInfo.make")
            .with_placeholder("Model", "coverageDetails.vehicleInfo.model")
            .with_placeholder("Year", "coverageDetails.vehicleInfo.year")
            .with_placeholder("VIN", "coverageDetails.vehicleInfo.vin");
        let coverage = Payload::new()
            .with_placeholder("Liability Coverage", "coverage_limit")
            .with_placeholder("Collision Deductible", "deductible_amount");
        inner
            .add_detail_lines(style::NORMAL, "Vehicle Information:", &vehicle)?
            .add_detail_lines(style::NORMAL, "Coverage:", &coverage)?;
        Ok(())
    })?;

    composer.add_conditional(Condition::equals("policy_type", "home"), |inner| {
        let property = Payload::new()
            .with_placeholder("Construction Year", "coverageDetails.propertyInfo.constructionYear")
            .with_placeholder("Square Feet", "coverageDetails.propertyInfo.squareFeet")
            .with_placeholder("Construction Type", "coverageDetails.propertyInfo.constructionType");
        let coverage = Payload::new()
            .with_placeholder("Dwelling Coverage", "coverage_limit")
            .with_placeholder("Personal Property", "coverageDetails.personalPropertyLimit");
        inner
            .add_detail_lines(style::NORMAL, "Property Information:", &property)?
            .add_detail_lines(style::NORMAL, "Coverage:", &coverage)?;
        Ok(())
    })?;

    composer.add_conditional(Condition::equals("policy_type", "life"), |inner| {
        let coverage = Payload::new()
            .with_placeholder("Death Benefit", "coverage_limit")
            .with_placeholder("Coverage Type", "coverage_description")
            .with_placeholder("Term Length", "coverageDetails.termLength");
        inner.add_detail_lines(style::NORMAL, "Coverage Details:", &coverage)?;
        Ok(())
    })?;

    Ok(())
}

fn add_premium_information(composer: &mut Composer<'_>) -> Result<()> {
    let premium = Payload::new()
        .with_placeholder("Annual Premium", "premiumDetails.annualPremium")
        .with_placeholder("Payment Frequency", "premiumDetails.paymentFrequency")
        .with_placeholder("Next Payment Due", "premiumDetails.nextPaymentDue");
    composer.add_detail_lines(style::SECTION, "Premium Information", &premium)?;
    composer.add_conditional(
        Condition::greater_than("premiumDetails.discount", 0.0),
        |inner| {
            inner.add_labelled_lines(
                style::NORMAL,
                &[("Applied Discount", FieldValue::placeholder("premiumDetails.discount"))],
            )?;
            Ok(())
        },
    )?;
    Ok(())
}

fn add_status_messages(composer: &mut Composer<'_>) -> Result<()> {
    composer.add_heading(style::SECTION, "Policy Status", HorizontalAlignment::Left)?;
    for (status, message) in [
        ("active", "Your policy is currently active and in force."),
        ("pending", "Your policy is pending activation. Please contact our office."),
        ("expired", "Your policy has expired. Please contact us immediately."),
    ] {
        composer.add_conditional(Condition::equals("status", status), |inner| {
            inner.add_heading(style::NORMAL, message, HorizontalAlignment::Left)?;
            Ok(())
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::text::to_text;
    use crate::variables::template_fields;

    #[test]
    fn plain_template_has_policy_tables() {
        let styles = StyleRegistry::insurance();
        let document = compose_policy_template(&styles, Some("Acme Insurance Corporation")).unwrap();
        let tables = document.tables();
        assert_eq!(tables[0].rows()[0].texts(), ["Policy Number:", "{policy_number}"]);
        assert_eq!(tables[1].rows().len(), 6);
        assert_eq!(
            tables[2].header()[0].texts(),
            ["Coverage Type", "Limit", "Deductible"]
        );
        assert_eq!(
            tables[2].body()[0].texts(),
            ["{coverage_description}", "{coverage_limit}", "{deductible_amount}"]
        );
        assert_eq!(tables[3].rows()[1].texts(), ["Date:", "{representative_signature_date}"]);
        assert_eq!(tables[3].rows()[3].texts(), ["Date:", "{policyholder_signature_date}"]);
        assert!(to_text(&document).starts_with("Acme Insurance Corporation\n"));
        match &document.blocks()[0] {
            Block::Paragraph(company) => {
                assert_eq!(company.style(), styles.get(style::COMPANY).unwrap());
                assert!(company.spans()[0].is_bold());
            }
            other => panic!("expected company line first, got {other:?}"),
        }
        assert!(document.footer().unwrap().has_page_numbers());
    }

    #[test]
    fn auto_sections_share_one_token_pair() {
        let styles = StyleRegistry::insurance();
        let document = compose_conditional_policy_template(&styles, None).unwrap();
        let mut auto_blocks = 0;
        document.visit(|block, _| {
            if let Block::Conditional(conditional) = block {
                let condition = conditional.condition();
                if condition.field() == "policy_type" && condition.expression().ends_with("\"auto\"") {
                    auto_blocks += 1;
                    assert_eq!(condition.open_token(), "{#policy_type == \"auto\"}");
                    assert_eq!(condition.close_token(), "{/policy_type == \"auto\"}");
                }
            }
        });
        assert_eq!(auto_blocks, 2);
    }

    #[test]
    fn conditional_fields_are_optional() {
        let styles = StyleRegistry::insurance();
        let document = compose_conditional_policy_template(&styles, None).unwrap();
        let fields = template_fields(&document);
        let find = |path: &str| fields.iter().find(|field| field.path == path).unwrap();
        assert!(find("policy_number").required);
        assert!(!find("coverage_limit").required);
        assert!(!find("coverageDetails.vehicleInfo.vin").required);
        assert!(!find("coverage_limit_number").required);
        assert!(!find("premiumDetails.discount").required);
        assert!(find("premiumDetails.annualPremium").required);
    }

    #[test]
    fn preview_shows_thresholds_plainly() {
        let styles = StyleRegistry::insurance();
        let document = compose_conditional_policy_template(&styles, None).unwrap();
        let text = to_text(&document);
        assert!(text.contains("{#premiumDetails.discount > 0}\nApplied Discount: {premiumDetails.discount}\n{/premiumDetails.discount > 0}\n"));
        assert!(text.contains("{#coverage_limit_number >= 500000}\n"));
    }
}
