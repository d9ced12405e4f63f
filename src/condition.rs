//! Conditions attached to conditional blocks.
//!
//! The composer only records conditions; a downstream templating engine
//! evaluates them. Renderers serialize a [`Condition`] into the paired
//! `{#expr}` / `{/expr}` tokens from the same value, so the two tags always
//! carry the identical expression.

use std::fmt;

/// Boolean expression over a payload field.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// `field == "literal"`
    Equals {
        /// Dotted field path.
        field: String,
        /// Literal compared against.
        value: String,
    },
    /// `field > number`
    GreaterThan {
        /// Dotted field path.
        field: String,
        /// Exclusive lower bound.
        threshold: f64,
    },
    /// `field >= number`
    AtLeast {
        /// Dotted field path.
        field: String,
        /// Inclusive lower bound.
        threshold: f64,
    },
}

impl Condition {
    /// Creates an equality condition.
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a strict numeric comparison.
    pub fn greater_than(field: impl Into<String>, threshold: f64) -> Self {
        Self::GreaterThan {
            field: field.into(),
            threshold,
        }
    }

    /// Creates an inclusive numeric comparison.
    pub fn at_least(field: impl Into<String>, threshold: f64) -> Self {
        Self::AtLeast {
            field: field.into(),
            threshold,
        }
    }

    /// Returns the field path the condition reads.
    pub fn field(&self) -> &str {
        match self {
            Self::Equals { field, .. }
            | Self::GreaterThan { field, .. }
            | Self::AtLeast { field, .. } => field,
        }
    }

    /// Returns the expression text, e.g. `policy_type == "auto"`.
    pub fn expression(&self) -> String {
        self.to_string()
    }

    /// Returns the opening token, e.g. `{#policy_type == "auto"}`.
    pub fn open_token(&self) -> String {
        format!("{{#{self}}}")
    }

    /// Returns the closing token, e.g. `{/policy_type == "auto"}`.
    pub fn close_token(&self) -> String {
        format!("{{/{self}}}")
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals { field, value } => {
                write!(f, "{field} == \"")?;
                for ch in value.chars() {
                    if matches!(ch, '"' | '\\') {
                        f.write_str("\\")?;
                    }
                    write!(f, "{ch}")?;
                }
                f.write_str("\"")
            }
            Self::GreaterThan { field, threshold } => write!(f, "{field} > {threshold}"),
            Self::AtLeast { field, threshold } => write!(f, "{field} >= {threshold}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_tokens_pair_up() {
        let condition = Condition::equals("policy_type", "auto");
        assert_eq!(condition.open_token(), "{#policy_type == \"auto\"}");
        assert_eq!(condition.close_token(), "{/policy_type == \"auto\"}");
        assert_eq!(condition.open_token()[2..], condition.close_token()[2..]);
    }

    #[test]
    fn numeric_thresholds_render_without_fraction() {
        assert_eq!(
            Condition::greater_than("premiumDetails.discount", 0.0).expression(),
            "premiumDetails.discount > 0"
        );
        assert_eq!(
            Condition::at_least("coverage_limit_number", 500000.0).expression(),
            "coverage_limit_number >= 500000"
        );
        assert_eq!(Condition::at_least("ratio", 0.5).expression(), "ratio >= 0.5");
    }

    #[test]
    fn quotes_in_literals_are_escaped() {
        let condition = Condition::equals("note", "say \"hi\"");
        assert_eq!(condition.expression(), r#"note == "say \"hi\"""#);
    }
}
