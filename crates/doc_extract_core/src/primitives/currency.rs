//! C3 — `detect_currency`.

use once_cell::sync::Lazy;
use regex::Regex;

/// An ordered (pattern, ISO-4217 code) table. Order matters: broader
/// matches (`$` alone) must come after narrower ones (`A$`) so a
/// document carrying `A$50.00` is read as AUD, not USD.
static CURRENCY_TABLE: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"A\$|AUD").unwrap(), "AUD"),
        (Regex::new(r"C\$|CAD").unwrap(), "CAD"),
        (Regex::new(r"NZ\$|NZD").unwrap(), "NZD"),
        (Regex::new(r"HK\$|HKD").unwrap(), "HKD"),
        (Regex::new(r"£|GBP").unwrap(), "GBP"),
        (Regex::new(r"€|EUR").unwrap(), "EUR"),
        (Regex::new(r"¥|JPY").unwrap(), "JPY"),
        (Regex::new(r"₹|INR").unwrap(), "INR"),
        (Regex::new(r"\$|USD").unwrap(), "USD"),
    ]
});

/// Scans the text against the ordered currency table, defaulting to
/// `"USD"` when nothing matches.
#[must_use]
pub fn detect_currency(text: &str) -> String {
    for (pattern, code) in CURRENCY_TABLE.iter() {
        if pattern.is_match(text) {
            return (*code).to_string();
        }
    }
    "USD".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_aud_before_falling_through_to_bare_dollar() {
        assert_eq!(detect_currency("Total A$50.00"), "AUD");
    }

    #[test]
    fn detects_eur_symbol() {
        assert_eq!(detect_currency("Total \u{20AC}50.00"), "EUR");
    }

    #[test]
    fn defaults_to_usd_when_no_signal() {
        assert_eq!(detect_currency("Total 50.00"), "USD");
    }

    #[test]
    fn bare_dollar_sign_is_usd() {
        assert_eq!(detect_currency("Total $50.00"), "USD");
    }
}
