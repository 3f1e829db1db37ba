//! Shared money-parsing helpers used by every primitive that reads an
//! amount off the page.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a captured monetary token (`"$1,234.56"`, `"1234.56"`,
/// `"-5.00"`, `"(5.00)"`) into a `Decimal`, stripping currency symbols,
/// thousands separators, and accounting-style parens for negatives.
/// Returns `None` for anything that doesn't parse cleanly — malformed
/// captures are discarded, never surfaced as an error.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let negative_parens = trimmed.starts_with('(') && trimmed.ends_with(')');
    let inner = if negative_parens {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    let cleaned: String = inner
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() || cleaned == "-" || cleaned == "." {
        return None;
    }

    let mut value = Decimal::from_str(&cleaned).ok()?;
    if negative_parens {
        value = -value.abs();
    }
    Some(value)
}

/// Round to 4 decimal places, matching the monetary-result
/// invariant for line items.
#[must_use]
pub fn round4(value: Decimal) -> Decimal {
    value.round_dp(4)
}

/// Never returns a negative amount for labels where a negative reading
/// would indicate a mis-scan (e.g. a labeled subtotal, tax, or total).
/// Used only by [`extract_labeled_amount`](crate::primitives::labeled_amount::extract_labeled_amount);
/// callers reading a signed value (the vertical-form line-item strategy)
/// call [`parse_amount`] directly instead.
#[must_use]
pub fn parse_positive_amount(raw: &str) -> Option<Decimal> {
    parse_amount(raw).filter(|v| *v >= Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_currency_prefixed_amount() {
        assert_eq!(parse_amount("$1,234.56"), Some(dec!(1234.56)));
    }

    #[test]
    fn parses_bare_decimal() {
        assert_eq!(parse_amount("62.50"), Some(dec!(62.50)));
    }

    #[test]
    fn parses_negative_amount() {
        assert_eq!(parse_amount("-$5.00"), Some(dec!(-5.00)));
    }

    #[test]
    fn parses_accounting_style_negative() {
        assert_eq!(parse_amount("(5.00)"), Some(dec!(-5.00)));
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("N/A"), None);
        assert_eq!(parse_amount("-"), None);
    }

    #[test]
    fn positive_amount_rejects_negative() {
        assert_eq!(parse_positive_amount("-$5.00"), None);
        assert_eq!(parse_positive_amount("$5.00"), Some(dec!(5.00)));
    }

    #[test]
    fn round4_truncates_to_four_places() {
        assert_eq!(round4(dec!(1.123456)), dec!(1.1235));
    }
}
