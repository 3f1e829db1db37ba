//! C5 strategy 4 — per-line heuristic fallback.
//!
//! No attachment of trailing description/SKU lines, unlike the
//! multi-line strategy that precedes it — this is the plain
//! `parse_line_item` applied line-by-line, nothing more.

use rust_decimal::Decimal;

use doc_extract_models::Part;

use crate::primitives::parse_line_item;

#[must_use]
pub fn extract(body: &[&str], default_tax_pct: Option<Decimal>) -> Option<Vec<Part>> {
    let parts: Vec<Part> = body
        .iter()
        .filter_map(|line| parse_line_item(line, default_tax_pct))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}
