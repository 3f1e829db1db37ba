//! C5 strategy 2 — multi-line items.

use rust_decimal::Decimal;

use doc_extract_models::Part;

use crate::patterns::{SKU_LABELED, TOTALS_KEYWORD_LINE};
use crate::primitives::parse_line_item;

fn is_description_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && !trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed.chars().any(char::is_alphabetic)
        && !TOTALS_KEYWORD_LINE.is_match(trimmed)
}

/// Parses every body line independently; a successful parse may consume
/// one following pure-alphabetic description line and/or one following
/// `SKU`-labeled line.
#[must_use]
pub fn extract(body: &[&str], default_tax_pct: Option<Decimal>) -> Option<Vec<Part>> {
    let mut parts = Vec::new();
    let mut idx = 0;
    while idx < body.len() {
        let line = body[idx];
        let Some(mut part) = parse_line_item(line, default_tax_pct) else {
            idx += 1;
            continue;
        };

        let mut consumed = 0;
        if idx + 1 + consumed < body.len() && is_description_line(body[idx + 1 + consumed]) {
            part.description = Some(body[idx + 1 + consumed].trim().to_string());
            consumed += 1;
        }
        if idx + 1 + consumed < body.len() {
            if let Some(caps) = SKU_LABELED.captures(body[idx + 1 + consumed]) {
                if part.sku.is_none() {
                    part.sku = Some(caps[1].to_string());
                }
                consumed += 1;
            }
        }

        parts.push(part);
        idx += 1 + consumed;
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn attaches_description_and_sku_lines() {
        let body = vec![
            "Widget A  2  10.00  20.00",
            "Heavy duty steel bracket",
            "SKU: WDG-001",
        ];
        let parts = extract(&body, None).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].total_amount, dec!(20.00));
        assert_eq!(parts[0].description.as_deref(), Some("Heavy duty steel bracket"));
        assert_eq!(parts[0].sku.as_deref(), Some("WDG-001"));
    }

    #[test]
    fn parses_independent_lines_without_attachments() {
        let body = vec!["Widget A  2  10.00  20.00", "Widget B  1  5.00  5.00"];
        let parts = extract(&body, None).unwrap();
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn returns_none_when_nothing_parses() {
        let body = vec!["Subtotal $20.00"];
        assert!(extract(&body, None).is_none());
    }
}
