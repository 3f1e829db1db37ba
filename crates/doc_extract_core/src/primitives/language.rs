//! C3 — `detect_language`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Stopword sets for the supported languages. Checked in this
/// fixed order; the first language whose stopwords cross the hit
/// threshold wins.
static SPANISH_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:factura|total|fecha|cliente|pago|impuesto|número)\b").unwrap()
});
static FRENCH_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:facture|total|date|client|paiement|taxe|numéro)\b").unwrap()
});
static GERMAN_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:rechnung|gesamt|datum|kunde|zahlung|steuer|nummer)\b").unwrap()
});
static ITALIAN_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:fattura|totale|data|cliente|pagamento|imposta|numero)\b").unwrap()
});

const MIN_HITS: usize = 2;

/// Scans the leading `scan_chars` characters of the document for
/// language-specific stopwords, defaulting to `"en"` when nothing
/// clears the minimum-hit threshold for another language.
#[must_use]
pub fn detect_language(text: &str, scan_chars: usize) -> String {
    let window: String = text.chars().take(scan_chars).collect();

    let candidates: [(&Regex, &str); 4] = [
        (&SPANISH_WORDS, "es"),
        (&FRENCH_WORDS, "fr"),
        (&GERMAN_WORDS, "de"),
        (&ITALIAN_WORDS, "it"),
    ];

    for (pattern, code) in candidates {
        if pattern.find_iter(&window).count() >= MIN_HITS {
            return code.to_string();
        }
    }

    "en".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_spanish_from_stopwords() {
        let text = "Factura No. 123\nFecha: 2024-01-15\nCliente: Acme";
        assert_eq!(detect_language(text, 800), "es");
    }

    #[test]
    fn detects_german_from_stopwords() {
        let text = "Rechnung Nr. 123\nDatum: 15.01.2024\nKunde: Acme GmbH";
        assert_eq!(detect_language(text, 800), "de");
    }

    #[test]
    fn defaults_to_english() {
        let text = "Invoice #123\nDate: 2024-01-15\nCustomer: Acme Inc";
        assert_eq!(detect_language(text, 800), "en");
    }

    #[test]
    fn single_stray_foreign_word_does_not_flip_language() {
        let text = "Invoice #123\nNote: pago pending approval\nCustomer: Acme";
        assert_eq!(detect_language(text, 800), "en");
    }

    #[test]
    fn only_scans_within_the_configured_window() {
        let filler = "x".repeat(800);
        let text = format!("{filler}\nFactura Fecha Cliente");
        assert_eq!(detect_language(&text, 800), "en");
    }
}
