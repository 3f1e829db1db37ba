//! Tunable thresholds used throughout the crate, gathered in one place.
//!
//! The core reads no environment variables and no files — there is no
//! loader for this struct on purpose. It exists purely so the crate's
//! literal thresholds (header scan cap, footer split, math-validation
//! tolerance, confidence weights) have one documented home instead of
//! being scattered as magic numbers across modules, following the same
//! settings-struct shape used for tunables elsewhere in this codebase.

/// Parser and confidence-engine thresholds. `ParserConfig::default()`
/// encodes this crate's literal default values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParserConfig {
    /// How many lines from the top the header-end scan will consider
    /// before giving up and ending the header at `header_fallback_line`.
    pub header_scan_limit: usize,
    /// Header end when no body-start marker is found within the scan
    /// limit.
    pub header_fallback_line: usize,
    /// Footer starts no earlier than this fraction of the document.
    pub footer_start_fraction: f64,
    /// Fallback footer-start fraction when no totals keyword is found.
    pub footer_fallback_fraction: f64,
    /// Fallback footer start as `total_lines - this`, combined with
    /// `footer_fallback_fraction` via `max()`.
    pub footer_fallback_tail: usize,
    /// Line-item math-validation tolerance, as a fraction of the total
    /// (`0.05` = 5%).
    pub math_tolerance: f64,
    /// Number of leading characters of lowercased text considered by
    /// language detection.
    pub language_scan_chars: usize,
    /// Number of lines to look ahead for a multi-line labeled amount.
    pub multiline_amount_lookahead: usize,
    /// Confidence engine sub-score weights; must sum to 1.0.
    pub confidence_weights: ConfidenceWeights,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceWeights {
    pub ocr: f64,
    pub fields: f64,
    pub numeric: f64,
    pub doc_type: f64,
    pub keyword: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            ocr: 0.15,
            fields: 0.35,
            numeric: 0.20,
            doc_type: 0.15,
            keyword: 0.15,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_scan_limit: 25,
            header_fallback_line: 8,
            footer_start_fraction: 0.35,
            footer_fallback_fraction: 0.75,
            footer_fallback_tail: 15,
            math_tolerance: 0.05,
            language_scan_chars: 800,
            multiline_amount_lookahead: 4,
            confidence_weights: ConfidenceWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_weights_sum_to_one() {
        let w = ConfidenceWeights::default();
        let sum = w.ocr + w.fields + w.numeric + w.doc_type + w.keyword;
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
