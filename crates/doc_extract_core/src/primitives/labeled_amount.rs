//! C3 — `extract_labeled_amount`.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::patterns::TOTALS_KEYWORD_LINE;
use crate::primitives::amounts::parse_positive_amount;

static PAREN_QUALIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\([^()]*\)").unwrap());
static AMOUNT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$€£]?\s?-?\d{1,3}(?:,\d{3})*(?:\.\d{1,2})?").unwrap());

/// Finds a monetary value associated with `label_pattern`.
///
/// Phase (a): same line as the label, skipping over an intermediary
/// parenthesized qualifier such as `(8%)`. Phase (b): if the label sits
/// alone on its line, look ahead up to `lookahead` lines for a standalone
/// amount, giving up at the first totals-keyword line encountered first.
#[must_use]
pub fn extract_labeled_amount(lines: &[&str], label_pattern: &Regex, lookahead: usize) -> Option<Decimal> {
    for (idx, line) in lines.iter().enumerate() {
        let Some(m) = label_pattern.find(line) else { continue };
        let mut rest = &line[m.end()..];

        if let Some(qualifier) = PAREN_QUALIFIER.find(rest) {
            rest = &rest[qualifier.end()..];
        }

        if let Some(tok) = AMOUNT_TOKEN.find(rest) {
            if let Some(value) = parse_positive_amount(tok.as_str()) {
                return Some(value);
            }
        }

        // Label alone on its line: scan ahead for a standalone amount.
        if rest.trim().is_empty() {
            for next in lines.iter().skip(idx + 1).take(lookahead) {
                if TOTALS_KEYWORD_LINE.is_match(next) {
                    break;
                }
                if let Some(tok) = AMOUNT_TOKEN.find(next) {
                    if tok.as_str().trim() == next.trim() {
                        if let Some(value) = parse_positive_amount(tok.as_str()) {
                            return Some(value);
                        }
                    }
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn label(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn finds_same_line_amount() {
        let text = "Subtotal: $120.00";
        let lines: Vec<&str> = text.lines().collect();
        let pattern = label(r"(?i)subtotal[:\s]*");
        assert_eq!(extract_labeled_amount(&lines, &pattern, 4), Some(dec!(120.00)));
    }

    #[test]
    fn skips_parenthesized_qualifier_before_amount() {
        let text = "Tax (8%): $9.60";
        let lines: Vec<&str> = text.lines().collect();
        let pattern = label(r"(?i)tax\s*");
        assert_eq!(extract_labeled_amount(&lines, &pattern, 4), Some(dec!(9.60)));
    }

    #[test]
    fn scans_ahead_when_label_is_alone_on_its_line() {
        let text = "Subtotal\n\n$120.00";
        let lines: Vec<&str> = text.lines().collect();
        let pattern = label(r"(?i)^subtotal$");
        assert_eq!(extract_labeled_amount(&lines, &pattern, 4), Some(dec!(120.00)));
    }

    #[test]
    fn multiline_scan_stops_at_totals_keyword() {
        let text = "Subtotal\nTax: $9.60\n$120.00";
        let lines: Vec<&str> = text.lines().collect();
        let pattern = label(r"(?i)^subtotal$");
        assert_eq!(extract_labeled_amount(&lines, &pattern, 4), None);
    }

    #[test]
    fn returns_none_when_label_not_found() {
        let text = "Item A $5.00";
        let lines: Vec<&str> = text.lines().collect();
        let pattern = label(r"(?i)subtotal[:\s]*");
        assert_eq!(extract_labeled_amount(&lines, &pattern, 4), None);
    }
}
