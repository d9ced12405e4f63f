//! Catalogue of the insurance documents this crate ships.
//!
//! Each kind composes a complete document from its own sample data: a basic
//! quote, a detailed quote, a fillable quote template and two policy
//! templates for a downstream substitution pass.

mod basic_quote;
mod policy_template;
mod quote;
mod quote_template;

pub use basic_quote::compose_basic_quote;
pub use policy_template::{compose_conditional_policy_template, compose_policy_template};
pub use quote::{compose_quote, CompanyInfo, QuoteData};
pub use quote_template::compose_quote_template;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::Document;
use crate::output::{timestamped_path, DocumentWriter};
use crate::style::StyleRegistry;

/// Document variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Short quote with a listed client block and a single premium total.
    BasicQuote,
    /// Detailed quote with agent, coverage overview, disclaimers and payment options.
    Quote,
    /// Quote with `{...}` prompts in place of every value.
    QuoteTemplate,
    /// Policy document with placeholder tables.
    PolicyTemplate,
    /// Policy document with sections conditional on policy type, status and limits.
    ConditionalPolicyTemplate,
}

impl DocumentKind {
    /// Every kind, in generation order.
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::BasicQuote,
        DocumentKind::Quote,
        DocumentKind::QuoteTemplate,
        DocumentKind::PolicyTemplate,
        DocumentKind::ConditionalPolicyTemplate,
    ];

    /// Command-line name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::BasicQuote => "basic-quote",
            DocumentKind::Quote => "quote",
            DocumentKind::QuoteTemplate => "quote-template",
            DocumentKind::PolicyTemplate => "policy-template",
            DocumentKind::ConditionalPolicyTemplate => "conditional-policy-template",
        }
    }

    /// File stem used for generated output.
    pub fn stem(self) -> &'static str {
        match self {
            DocumentKind::BasicQuote => "insurance_quote",
            DocumentKind::Quote => "enhanced_insurance_quote",
            DocumentKind::QuoteTemplate => "insurance_quote_template",
            DocumentKind::PolicyTemplate => "insurance_policy_template",
            DocumentKind::ConditionalPolicyTemplate => "insurance_template",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.name() == value)
            .ok_or_else(|| format!("unknown document kind '{value}'"))
    }
}

/// Composes `kind` with its sample data.
///
/// `company` replaces the sample company name; for the quote template it
/// replaces the `{Company Name}` prompt in the header.
pub fn compose(kind: DocumentKind, company: Option<&str>, date: NaiveDate) -> Result<Document> {
    let styles = StyleRegistry::insurance();
    match kind {
        DocumentKind::BasicQuote => compose_basic_quote(&styles, company, date),
        DocumentKind::Quote => {
            let mut data = QuoteData::sample();
            if let Some(company) = company {
                data.company.name = company.to_owned();
            }
            compose_quote(&styles, &data, date)
        }
        DocumentKind::QuoteTemplate => compose_quote_template(&styles, company, date),
        DocumentKind::PolicyTemplate => compose_policy_template(&styles, company),
        DocumentKind::ConditionalPolicyTemplate => {
            compose_conditional_policy_template(&styles, company)
        }
    }
}

/// Renders every kind into `dir` under timestamped names.
pub fn generate_all(dir: impl AsRef<Path>, writer: &DocumentWriter) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let today = chrono::Local::now().date_naive();
    let mut written = Vec::with_capacity(DocumentKind::ALL.len());
    for kind in DocumentKind::ALL {
        let document = compose(kind, None, today)?;
        let path = writer.save(&document, timestamped_path(dir, kind.stem()))?;
        log::info!("generated {kind} at {}", path.display());
        written.push(path);
    }
    Ok(written)
}
