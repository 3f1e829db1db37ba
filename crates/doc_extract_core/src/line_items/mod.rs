//! C5 — line-item extraction.
//!
//! Five strategies, tried in strict order; the first to return a
//! non-empty list wins. The whole-document fallback (5) only ever runs
//! once none of the layout-aware strategies (1-4) found anything.

pub mod column_table;
pub mod heuristic;
pub mod multi_line;
pub mod vertical_form;

use rust_decimal::Decimal;

use doc_extract_models::Part;

/// The result of running the C5 strategy chain: the parts found, and
/// whether it took the whole-document fallback (strategy 5) to find
/// them — the assembler surfaces that as a warning.
pub struct LineItemResult {
    pub parts: Vec<Part>,
    pub used_whole_document_fallback: bool,
}

#[must_use]
pub fn extract_parts(
    all_lines: &[&str],
    body: &[&str],
    default_tax_pct: Option<Decimal>,
) -> LineItemResult {
    if let Some(parts) = column_table::extract(body, default_tax_pct) {
        return LineItemResult {
            parts,
            used_whole_document_fallback: false,
        };
    }

    if let Some(parts) = multi_line::extract(body, default_tax_pct) {
        return LineItemResult {
            parts,
            used_whole_document_fallback: false,
        };
    }

    if let Some(parts) = vertical_form::extract(all_lines) {
        return LineItemResult {
            parts,
            used_whole_document_fallback: false,
        };
    }

    if let Some(parts) = heuristic::extract(body, default_tax_pct) {
        return LineItemResult {
            parts,
            used_whole_document_fallback: false,
        };
    }

    let parts = heuristic::extract(all_lines, default_tax_pct).unwrap_or_default();
    let used_whole_document_fallback = !parts.is_empty();
    LineItemResult {
        parts,
        used_whole_document_fallback,
    }
}
