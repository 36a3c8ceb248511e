//! MXN currency formatting for the dashboard views.
//!
//! Mirrors the `es-MX` locale output of the tables and charts: `$` prefix,
//! comma thousands separators, exactly two fraction digits. A source value
//! that cannot be read as a number formats as `$0.00` — the display layer
//! never shows a placeholder string for money, unlike the server-side
//! reshapers which substitute `"0.00"` for missing prices. The two layers
//! stay intentionally distinct.

/// Coerces a JSON value to a monetary amount.
///
/// Numbers pass through; strings are trimmed and parsed as base-10 floats;
/// anything else (null, objects, unparseable strings) coerces to `0.0`.
/// Never returns NaN or infinity.
#[must_use]
pub fn parse_money(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Formats an amount as an MXN currency string with two fraction digits.
///
/// `1234.5` renders as `"$1,234.50"`. Non-finite input renders as `"$0.00"`.
#[must_use]
pub fn format_mxn(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let negative = value < 0.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    let sign = if negative && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{frac:02}", group_thousands(whole))
}

/// Inserts comma separators every three digits from the right.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(char::from(*b));
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn format_mxn_two_fraction_digits() {
        assert_eq!(format_mxn(1234.5), "$1,234.50");
        assert_eq!(format_mxn(3.5), "$3.50");
        assert_eq!(format_mxn(0.0), "$0.00");
    }

    #[test]
    fn format_mxn_groups_thousands() {
        assert_eq!(format_mxn(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_mxn(999.99), "$999.99");
        assert_eq!(format_mxn(1000.0), "$1,000.00");
    }

    #[test]
    fn format_mxn_rounds_half_away_from_zero() {
        assert_eq!(format_mxn(12.345), "$12.35");
        assert_eq!(format_mxn(-12.345), "-$12.35");
    }

    #[test]
    fn format_mxn_negative_zero_has_no_sign() {
        assert_eq!(format_mxn(-0.001), "$0.00");
    }

    #[test]
    fn format_mxn_non_finite_is_zero() {
        assert_eq!(format_mxn(f64::NAN), "$0.00");
        assert_eq!(format_mxn(f64::INFINITY), "$0.00");
    }

    #[test]
    fn parse_money_reads_numbers_and_numeric_strings() {
        assert_eq!(parse_money(&json!(3.5)), 3.5);
        assert_eq!(parse_money(&json!("3.5")), 3.5);
        assert_eq!(parse_money(&json!(" 12.00 ")), 12.0);
    }

    #[test]
    fn parse_money_falls_back_to_zero() {
        assert_eq!(parse_money(&json!(null)), 0.0);
        assert_eq!(parse_money(&json!("Sin Costo")), 0.0);
        assert_eq!(parse_money(&json!({})), 0.0);
        assert_eq!(parse_money(&json!("")), 0.0);
    }

    #[test]
    fn non_numeric_source_formats_as_currency_zero() {
        // The display layer renders unparseable money as $0.00, not a
        // placeholder string.
        assert_eq!(format_mxn(parse_money(&json!("Sin Costo"))), "$0.00");
    }
}
