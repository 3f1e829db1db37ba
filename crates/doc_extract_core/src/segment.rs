//! C4 — the document segmenter.
//!
//! Splits the normalized, non-empty line array into header/body/footer
//! regions by keyword scanning, never by layout coordinates (OCR text
//! carries none).

use crate::config::ParserConfig;
use crate::patterns::{BODY_START_KEYWORD_LINE, TOTALS_KEYWORD_LINE};

const TABLE_HEADER_KEYWORDS: &[&str] = &[
    "description", "item", "qty", "quantity", "part", "sku", "unit price", "amount", "total",
    "rate",
];

/// The three regions a segmented document splits into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    pub header: &'a [&'a str],
    pub body: &'a [&'a str],
    pub footer: &'a [&'a str],
    /// `true` when no body-start keyword line was found within the scan
    /// limit and the header boundary fell back to a fixed line number.
    /// The assembler surfaces this as a warning when it also had to take
    /// the whole-document line-item fallback.
    pub header_used_fallback: bool,
}

/// Finds the header/body and body/footer boundaries and slices `lines`
/// into three regions accordingly.
#[must_use]
pub fn segment<'a>(lines: &'a [&'a str], config: &ParserConfig) -> Segments<'a> {
    let (header_end, header_used_fallback) = find_header_end(lines, config);
    let footer_start = find_footer_start(lines, config).max(header_end);

    Segments {
        header: &lines[..header_end],
        body: &lines[header_end..footer_start],
        footer: &lines[footer_start..],
        header_used_fallback,
    }
}

fn find_header_end(lines: &[&str], config: &ParserConfig) -> (usize, bool) {
    let scan_limit = config.header_scan_limit.min(lines.len());
    for (idx, line) in lines.iter().enumerate().take(scan_limit) {
        if BODY_START_KEYWORD_LINE.is_match(line) || has_multiple_table_header_keywords(line) {
            return (idx, false);
        }
    }
    (config.header_fallback_line.min(lines.len()), true)
}

fn has_multiple_table_header_keywords(line: &str) -> bool {
    let lowered = line.to_lowercase();
    TABLE_HEADER_KEYWORDS.iter().filter(|kw| lowered.contains(*kw)).count() >= 2
}

fn find_footer_start(lines: &[&str], config: &ParserConfig) -> usize {
    let total = lines.len();
    #[allow(clippy::cast_precision_loss)]
    let scan_from = (total as f64 * config.footer_start_fraction).ceil() as usize;

    for (idx, line) in lines.iter().enumerate().skip(scan_from) {
        if TOTALS_KEYWORD_LINE.is_match(line) {
            return idx;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let fallback_fraction = (total as f64 * config.footer_fallback_fraction).floor() as usize;
    let fallback_tail = total.saturating_sub(config.footer_fallback_tail);
    fallback_fraction.max(fallback_tail).min(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn header_ends_at_body_start_keyword() {
        let text = "ACME Corp\n123 Main St\nDescription  Qty  Price\nWidget A  1  10.00\nTotal  10.00";
        let lines = lines_of(text);
        let config = ParserConfig::default();
        let segments = segment(&lines, &config);
        assert_eq!(segments.header, &["ACME Corp", "123 Main St"]);
    }

    #[test]
    fn header_falls_back_to_configured_line_when_no_keyword_found() {
        let text = (0..20)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let lines: Vec<&str> = text.lines().collect();
        let config = ParserConfig::default();
        let segments = segment(&lines, &config);
        assert_eq!(segments.header.len(), config.header_fallback_line);
    }

    #[test]
    fn footer_starts_at_totals_keyword_past_the_start_fraction() {
        let text = "Header\nDescription  Qty  Price\nWidget A  1  10.00\nSubtotal  10.00\nTax  0.80";
        let lines = lines_of(text);
        let config = ParserConfig::default();
        let segments = segment(&lines, &config);
        assert!(segments.footer.iter().any(|l| l.starts_with("Subtotal")));
    }

    #[test]
    fn three_regions_cover_every_line_exactly_once() {
        let text = "A\nB\nDescription Qty\nC\nD\nTotal 10.00\nE";
        let lines = lines_of(text);
        let config = ParserConfig::default();
        let segments = segment(&lines, &config);
        let reassembled: Vec<&str> = segments
            .header
            .iter()
            .chain(segments.body.iter())
            .chain(segments.footer.iter())
            .copied()
            .collect();
        assert_eq!(reassembled, lines);
    }
}
