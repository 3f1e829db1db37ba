//! C5 strategy 1 — column-aligned table.

use rust_decimal::Decimal;

use doc_extract_models::Part;

use crate::patterns::{PURE_CODE_SEGMENT, TOTALS_KEYWORD_LINE};
use crate::primitives::parse_line_item;

const TABLE_HEADER_KEYWORDS: &[&str] = &[
    "description", "item", "qty", "quantity", "part", "sku", "unit price", "amount", "total",
    "rate",
];

fn has_header_keywords(line: &str) -> bool {
    let lowered = line.to_lowercase();
    TABLE_HEADER_KEYWORDS.iter().filter(|kw| lowered.contains(*kw)).count() >= 2
}

fn is_description_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && !trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed.chars().any(char::is_alphabetic)
        && !TOTALS_KEYWORD_LINE.is_match(trimmed)
}

/// Requires a header row with ≥2 table-header keywords; absent that,
/// this strategy yields nothing and the caller falls through to the
/// next one.
#[must_use]
pub fn extract(body: &[&str], default_tax_pct: Option<Decimal>) -> Option<Vec<Part>> {
    let header_idx = body.iter().position(|l| has_header_keywords(l))?;

    let mut parts = Vec::new();
    let mut idx = header_idx + 1;
    while idx < body.len() {
        let line = body[idx];
        if TOTALS_KEYWORD_LINE.is_match(line) {
            break;
        }

        let Some(mut part) = parse_line_item(line, default_tax_pct) else {
            idx += 1;
            continue;
        };

        if let Some(code) = PURE_CODE_SEGMENT.find(line.trim()) {
            if part.sku.is_none() {
                part.part_number = Some(code.as_str().to_string());
            }
        }

        if idx + 1 < body.len() && is_description_line(body[idx + 1]) {
            part.description = Some(body[idx + 1].trim().to_string());
            idx += 1;
        }

        parts.push(part);
        idx += 1;
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}
