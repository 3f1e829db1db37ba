//! C1 — the pattern library.
//!
//! A small, stable set of named regular expressions shared across the
//! primitive extractors. Each is compiled exactly once, at first use, via
//! `once_cell::sync::Lazy` and reused for the lifetime of the process —
//! there is no per-`parse()` compilation cost and no parser-instance state
//! to thread through call sites.
//!
//! Patterns here are intentionally bounded: no nested quantifiers over
//! overlapping alternations, so matching stays linear in input length
//! regardless of content (see the crate's concurrency/resource notes).

use once_cell::sync::Lazy;
use regex::Regex;

fn compiled(field: &'static str, pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("pattern table: invalid pattern for {field}: {e}"))
}

/// International or local phone number with mandatory separators.
/// Separators are `[ .-]`, not `[\s.-]` — `\s` matches `\n`, which would
/// let a match span a line break.
pub static PHONE: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "PHONE",
        r"(?:\+?\d{1,3}[ .-]?)?\(?\d{2,4}\)?[ .-]\d{3,4}[ .-]\d{3,4}(?:[ .-]\d{2,4})?",
    )
});

pub static EMAIL: Lazy<Regex> =
    Lazy::new(|| compiled("EMAIL", r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"));

pub static URL: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "URL",
        r"(?:https?://)?(?:www\.)?[A-Za-z0-9][A-Za-z0-9-]*(?:\.[A-Za-z0-9-]+)+(?:/[^\s]*)?",
    )
});

pub static DATE_ISO: Lazy<Regex> =
    Lazy::new(|| compiled("DATE_ISO", r"\b(\d{4})[-/](\d{1,2})[-/](\d{1,2})\b"));

/// Generic numeric date with 2-4 digit year; day/month order is resolved
/// by the caller per the ambiguous-date heuristic (day-first, see dates.rs).
pub static DATE_NUMERIC: Lazy<Regex> =
    Lazy::new(|| compiled("DATE_NUMERIC", r"\b(\d{1,2})[-/](\d{1,2})[-/](\d{2,4})\b"));

const MONTH_ALTERNATION: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";

/// `Month DD, YYYY` / `Month DD YYYY`.
pub static DATE_LONG: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "DATE_LONG",
        &format!(r"(?i)\b({MONTH_ALTERNATION})\.?\s+(\d{{1,2}}),?\s+(\d{{4}})\b"),
    )
});

/// `DD Month YYYY`.
pub static DATE_LONG_REV: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "DATE_LONG_REV",
        &format!(r"(?i)\b(\d{{1,2}})\s+({MONTH_ALTERNATION})\.?,?\s+(\d{{4}})\b"),
    )
});

/// Currency-prefixed monetary amount, e.g. `$1,234.56`, `-$5.00`.
pub static AMOUNT: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "AMOUNT",
        r"-?[$€£]\s?\d{1,3}(?:,\d{3})*(?:\.\d{1,2})?|-?\d{1,3}(?:,\d{3})*(?:\.\d{1,2})?\s?(?:USD|EUR|GBP|AUD|CAD)",
    )
});

/// Bare decimal amount (no currency marker), with optional thousands
/// separators.
pub static AMOUNT_BARE: Lazy<Regex> =
    Lazy::new(|| compiled("AMOUNT_BARE", r"-?\d{1,3}(?:,\d{3})*(?:\.\d{1,4})?"));

pub static TAX_PERCENT: Lazy<Regex> =
    Lazy::new(|| compiled("TAX_PERCENT", r"\b(\d{1,2}(?:\.\d{1,2})?)\s?%"));

/// Australian Business Number: 11 digits, conventionally grouped 2-3-3-3.
pub static ABN: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "ABN",
        r"(?i)\bABN\b[:\s]*?(\d{2}\s?\d{3}\s?\d{3}\s?\d{3})",
    )
});

/// Australian Company Number: 9 digits, grouped 3-3-3.
pub static ACN: Lazy<Regex> =
    Lazy::new(|| compiled("ACN", r"(?i)\bACN\b[:\s]*?(\d{3}\s?\d{3}\s?\d{3})"));

pub static GST_AU: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "GST_AU",
        r"(?i)\bGST\s*(?:No\.?|Number|#)?\s*[:\s]*?(\d{2}\s?\d{3}\s?\d{3}\s?\d{3})",
    )
});

/// US Employer Identification Number: `NN-NNNNNNN`.
pub static EIN: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "EIN",
        r"(?i)\b(?:EIN|Tax\s*ID)\b[:\s]*?(\d{2}-\d{7})",
    )
});

/// EU-style VAT number: 2-letter country prefix + 8-12 alphanumerics.
pub static VAT: Lazy<Regex> =
    Lazy::new(|| compiled("VAT", r"(?i)\bVAT\b[:\s#]*?([A-Z]{2}\s?[A-Z0-9]{8,12})"));

/// Indian GSTIN: 15-character alphanumeric.
pub static GSTIN: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "GSTIN",
        r"(?i)\bGSTIN\b[:\s]*?(\d{2}[A-Z]{5}\d{4}[A-Z]\d[A-Z]\d[A-Z])",
    )
});

/// `SKU|PN|MPN|Part|Item` + code, label captured separately from value.
pub static SKU_LABELED: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "SKU_LABELED",
        r"(?i)\b(?:SKU|PN|MPN|Part(?:\s*(?:No\.?|#|Number))?|Item\s*(?:No\.?|#)?)\s*[:#]?\s*([A-Za-z0-9][\w-]{2,})",
    )
});

/// Tri-segment hyphenated product code, e.g. `90-27-3325`.
pub static SKU_BARE: Lazy<Regex> =
    Lazy::new(|| compiled("SKU_BARE", r"\b([A-Za-z0-9]{2,6}-[A-Za-z0-9]{2,6}-[A-Za-z0-9]{2,6})\b"));

/// A pure alphanumeric code segment, at least 3 chars, with at least one
/// digit — used by the column extractor to pull a `part_number` out of a
/// line that also carries a separate alphabetic name.
pub static PURE_CODE_SEGMENT: Lazy<Regex> =
    Lazy::new(|| compiled("PURE_CODE_SEGMENT", r"^[\dA-Z][\w\-/.]{2,}$"));

pub static US_ZIP: Lazy<Regex> = Lazy::new(|| compiled("US_ZIP", r"\b\d{5}(?:-\d{4})?\b"));

pub static US_ZIP_PLUS4: Lazy<Regex> = Lazy::new(|| compiled("US_ZIP_PLUS4", r"^\d{5}-\d{4}$"));

/// `City, ST 12345` — loose US city/state/zip line.
pub static US_CITY_STATE_ZIP: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "US_CITY_STATE_ZIP",
        r"([A-Za-z][A-Za-z .'-]*),\s*([A-Z]{2})\s+(\d{5}(?:-\d{4})?)",
    )
});

/// `City STATE 4digits` — Australian suburb/state/postcode.
pub static AU_SUBURB_STATE_POSTCODE: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "AU_SUBURB_STATE_POSTCODE",
        r"([A-Za-z][A-Za-z .'-]*)\s+(NSW|VIC|QLD|WA|SA|TAS|ACT|NT)\s+(\d{4})\b",
    )
});

/// Leading row-number prefix on a line-item row, e.g. `"1."`, `"3)"`.
pub static LEADING_ROW_NUMBER: Lazy<Regex> =
    Lazy::new(|| compiled("LEADING_ROW_NUMBER", r"^\s*\d+[.)\s]+"));

/// Shared totals-keyword vocabulary used by both the segmenter (to find
/// the footer boundary) and `extract_labeled_amount`'s multi-line scan
/// (to know when to give up looking ahead).
pub static TOTALS_KEYWORD_LINE: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "TOTALS_KEYWORD_LINE",
        r"(?i)\b(?:sub\s*total|subtotal|total|tax|gst|vat|shipping|discount|balance|amount\s+due|net\s+amount|gross\s+amount|grand\s+total)\b",
    )
});

/// Body-start keywords the segmenter scans for to find the header/body
/// boundary.
pub static BODY_START_KEYWORD_LINE: Lazy<Regex> = Lazy::new(|| {
    compiled(
        "BODY_START_KEYWORD_LINE",
        r"(?i)\b(?:description|item|qty|quantity|part\s*(?:no\.?|#)?|sku|unit\s*price|amount|total|bill\s+to|ship\s+to|customer|product|service|particular|rate|no\.?)\b",
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_does_not_cross_newline() {
        let text = "555\n123-4567";
        assert!(PHONE.find(text).is_none());
    }

    #[test]
    fn amount_matches_currency_prefixed_values() {
        assert!(AMOUNT.is_match("$1,234.56"));
        assert!(AMOUNT.is_match("-$5.00"));
    }

    #[test]
    fn sku_bare_matches_tri_segment_code() {
        assert!(SKU_BARE.is_match("90-27-3325"));
    }

    #[test]
    fn abn_captures_grouped_digits() {
        let caps = ABN.captures("ABN: 51 824 753 556").unwrap();
        assert_eq!(&caps[1], "51 824 753 556");
    }

    #[test]
    fn us_zip_plus4_shape_is_exact() {
        assert!(US_ZIP_PLUS4.is_match("29651-1500"));
        assert!(!US_ZIP_PLUS4.is_match("296511500"));
    }
}
