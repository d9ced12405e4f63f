//! US-dollar currency formatting with a raw-text fallback.

use serde_json::Value;

/// Formats `amount` as `$1,234.56`, negative amounts as `-$230.00`.
///
/// Returns `None` for non-finite input and for amounts too large to count in
/// whole cents.
pub fn format_amount(amount: f64) -> Option<String> {
    let scaled = (amount.abs() * 100.0).round();
    if !scaled.is_finite() || scaled >= u128::MAX as f64 {
        return None;
    }

    let cents = scaled as u128;
    let dollars = group_thousands(&(cents / 100).to_string());
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    Some(format!("{sign}${dollars}.{:02}", cents % 100))
}

/// Formats a payload value as currency.
///
/// Numbers and numeric strings are formatted; anything else comes back as
/// `Err` carrying the raw text the caller should render instead.
pub fn format_value(value: &Value) -> Result<String, String> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .and_then(format_amount)
        .ok_or_else(|| raw_text(value))
}

/// Renders a value the way it would appear verbatim in a document.
pub fn raw_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_with_grouping_and_cents() {
        assert_eq!(format_amount(300000.0).unwrap(), "$300,000.00");
        assert_eq!(format_amount(1500.0).unwrap(), "$1,500.00");
        assert_eq!(format_amount(183.333).unwrap(), "$183.33");
        assert_eq!(format_amount(0.0).unwrap(), "$0.00");
        assert_eq!(format_amount(1234567.891).unwrap(), "$1,234,567.89");
    }

    #[test]
    fn negative_amounts_keep_their_sign() {
        assert_eq!(format_amount(-230.0).unwrap(), "-$230.00");
        assert_eq!(format_amount(-1150.5).unwrap(), "-$1,150.50");
        assert_eq!(format_amount(-0.001).unwrap(), "$0.00");
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        assert!(format_amount(f64::NAN).is_none());
        assert!(format_amount(f64::INFINITY).is_none());
    }

    #[test]
    fn amounts_beyond_whole_cents_fall_back_to_raw_text() {
        assert!(format_amount(1e40).is_none());
        assert!(format_amount(-1e40).is_none());
        assert!(format_amount(f64::MAX).is_none());
        assert_eq!(format_value(&json!("1e40")).unwrap_err(), "1e40");
        assert_eq!(format_amount(1e15).unwrap(), "$1,000,000,000,000,000.00");
    }

    #[test]
    fn numeric_strings_are_formatted() {
        assert_eq!(format_value(&json!(" 2300 ")).unwrap(), "$2,300.00");
        assert_eq!(format_value(&json!(45)).unwrap(), "$45.00");
    }

    #[test]
    fn non_numeric_values_fall_back_to_raw_text() {
        assert_eq!(format_value(&json!("$300,000")).unwrap_err(), "$300,000");
        assert_eq!(format_value(&json!("TBD")).unwrap_err(), "TBD");
        assert_eq!(format_value(&json!(true)).unwrap_err(), "true");
        assert_eq!(format_value(&Value::Null).unwrap_err(), "");
    }
}
