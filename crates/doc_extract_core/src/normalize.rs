//! C2 — the OCR-text normalizer.
//!
//! Repairs the handful of OCR artifacts the primitive extractors would
//! otherwise choke on, without altering the text's semantics or its line
//! count. Every transform below is applied in the order given in the
//! order given below; later transforms never reintroduce a pattern an earlier
//! transform already fixed, which is what makes the whole pipeline
//! idempotent (see `tests::idempotent_on_*` and the crate's proptest
//! suite).

use once_cell::sync::Lazy;
use regex::Regex;

static DOLLAR_L_OR_I: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$[lI](\d)").unwrap());
static DIGIT_O_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)[Oo](\d)").unwrap());
static S_AS_DOLLAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|\s)S(\d+\.\d{2})").unwrap());
static SPACE_TAB_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static SPLIT_THOUSANDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d) (\d{3})\b").unwrap());

const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Repeatedly applies `DIGIT_O_DIGIT` until a pass makes no further change.
/// A single `replace_all` is non-overlapping, so a chain like `"1o2o3"`
/// only fixes its first `o` in one pass (`"102o3"`) — looping to a fixed
/// point is what keeps [`normalize`] idempotent on arbitrarily long chains.
fn repair_digit_o_digit(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = DIGIT_O_DIGIT.replace_all(&current, "${1}0$2");
        if next == current {
            return current;
        }
        current = next.into_owned();
    }
}

/// Repair frequent OCR artifacts. Never changes the number of `\n`
/// characters in the input, so line indices computed on the result stay
/// valid for every downstream stage (segmenter, line-item extractors).
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut text = raw.to_string();

    text = DOLLAR_L_OR_I.replace_all(&text, "$$1$1").into_owned();
    text = repair_digit_o_digit(&text);
    text = S_AS_DOLLAR.replace_all(&text, "$1$$$2").into_owned();
    text = SPACE_TAB_RUNS.replace_all(&text, "  ").into_owned();
    text = SPLIT_THOUSANDS.replace_all(&text, "$1$2").into_owned();
    text = text.replace(['\u{2013}', '\u{2014}'], "-");
    text.retain(|c| !ZERO_WIDTH.contains(&c));

    // `split('\n')` (not `.lines()`) is deliberate: `.lines()` special-cases
    // a trailing newline by not emitting a final empty segment, which would
    // silently drop it on rejoin and violate the newline-count invariant.
    text.split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixes_l_and_i_mistaken_for_dollar_digit() {
        assert_eq!(normalize("$l5.00"), "$15.00");
        assert_eq!(normalize("$I2.50"), "$12.50");
    }

    #[test]
    fn fixes_o_mistaken_for_zero_in_numeric_run() {
        assert_eq!(normalize("1O2"), "102");
        assert_eq!(normalize("3o4"), "304");
    }

    #[test]
    fn fixes_s_mistaken_for_dollar() {
        assert_eq!(normalize(" S12.34"), " $12.34");
        assert_eq!(normalize("Total S99.00"), "Total $99.00");
    }

    #[test]
    fn collapses_space_and_tab_runs_to_two_spaces() {
        assert_eq!(normalize("Qty     Price"), "Qty  Price");
        assert_eq!(normalize("Qty\t\t\tPrice"), "Qty  Price");
    }

    #[test]
    fn preserves_single_space() {
        assert_eq!(normalize("Qty Price"), "Qty Price");
    }

    #[test]
    fn removes_ocr_inserted_space_in_monetary_values() {
        assert_eq!(normalize("1 234.56"), "1234.56");
        assert_eq!(normalize("Total 1 234,"), "Total 1234,");
        assert_eq!(normalize("1 234"), "1234");
    }

    #[test]
    fn leaves_longer_numeric_runs_alone() {
        // Four digits after the split point means it wasn't a 3-digit
        // thousands-group artifact in the first place.
        assert_eq!(normalize("1 2345"), "1 2345");
    }

    #[test]
    fn replaces_en_and_em_dash_with_hyphen() {
        assert_eq!(normalize("2024\u{2013}01\u{2013}15"), "2024-01-15");
        assert_eq!(normalize("Net 30\u{2014}Due"), "Net 30-Due");
    }

    #[test]
    fn strips_zero_width_characters() {
        assert_eq!(normalize("Invoice\u{200B}Number"), "InvoiceNumber");
        assert_eq!(normalize("\u{FEFF}ACME"), "ACME");
    }

    #[test]
    fn trims_trailing_whitespace_per_line() {
        assert_eq!(normalize("line one   \nline two\t"), "line one\nline two");
    }

    #[test]
    fn never_changes_newline_count() {
        let raw = "a\n\nb  \nc\t\n";
        assert_eq!(
            normalize(raw).matches('\n').count(),
            raw.matches('\n').count()
        );
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "$l5.00 for 1O2 widgets",
            " S12.34\nTotal   S99.00",
            "1 234.56 items\n\n",
            "2024\u{2013}01\u{2013}15  spaced\u{200B}out",
        ];
        for s in samples {
            let once = normalize(s);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn fixes_a_chain_of_digit_o_digit_in_one_normalize_call() {
        assert_eq!(normalize("1o2o3o4"), "1020304");
    }

    use proptest::prelude::*;

    fn arbitrary_document_text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                "[A-Za-z ]{3,20}",
                "[0-9]{1,6}",
                "\\$[0-9]{1,4}\\.[0-9]{2}",
                "[A-Za-z]{2,8}: [A-Za-z0-9 ]{1,10}",
                "[0-9oO]{3,10}",
            ],
            0..20,
        )
        .prop_map(|lines| lines.join("\n"))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn normalize_is_idempotent(text in arbitrary_document_text()) {
            let once = normalize(&text);
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_preserves_newline_count(text in arbitrary_document_text()) {
            let normalized = normalize(&text);
            prop_assert_eq!(
                normalized.matches('\n').count(),
                text.matches('\n').count()
            );
        }
    }
}
