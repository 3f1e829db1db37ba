//! C7 — the confidence engine: a five-factor composite score over a
//! finished [`Record`] and the raw text it was built from.
//!
//! A plain struct carrying the score breakdown, computed by a pure
//! function with no instance state to thread through call sites.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug_span;

use doc_extract_models::{DocumentType, Record};

use crate::config::ConfidenceWeights;
use crate::primitives::doc_type::{classify_document_type, keywords_for};

/// The five sub-scores plus the weighted overall, each in `[0, 1]` and
/// rounded to 4 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceScore {
    pub overall: f64,
    pub ocr: f64,
    pub fields: f64,
    pub numeric: f64,
    pub doc_type: f64,
    pub keyword: f64,
}

/// Namespacing unit struct; `score` is also exposed as a free function for
/// callers that don't want to name the type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer;

impl Scorer {
    #[must_use]
    pub fn score(
        record: &Record,
        raw_text: &str,
        ocr_conf: Option<f64>,
        claimed_type: Option<DocumentType>,
    ) -> ConfidenceScore {
        score(record, raw_text, ocr_conf, claimed_type)
    }
}

/// The public entry point: `score(record, raw_text, ocr_conf,
/// claimed_type)`, weighted by the default sub-score
/// weights. Never fails; absent inputs fall back to the neutral value
/// documented for each sub-score rather than propagating an error — the
/// confidence engine never fails.
#[must_use]
pub fn score(
    record: &Record,
    raw_text: &str,
    ocr_conf: Option<f64>,
    claimed_type: Option<DocumentType>,
) -> ConfidenceScore {
    score_with_weights(record, raw_text, ocr_conf, claimed_type, ConfidenceWeights::default())
}

/// As [`score`], but with caller-supplied sub-score weights — the
/// `ParserConfig`-driven ambient-config counterpart for callers who tune
/// `ConfidenceWeights` away from its defaults.
#[must_use]
pub fn score_with_weights(
    record: &Record,
    raw_text: &str,
    ocr_conf: Option<f64>,
    claimed_type: Option<DocumentType>,
    weights: ConfidenceWeights,
) -> ConfidenceScore {
    let span = debug_span!("confidence_score");
    let _enter = span.enter();

    let ocr = round4(ocr_sub_score(raw_text, ocr_conf));
    let fields = round4(fields_sub_score(record));
    let numeric = round4(numeric_sub_score(record));
    let doc_type = round4(doc_type_sub_score(raw_text, claimed_type));
    let keyword = round4(keyword_sub_score(record, raw_text));

    let overall = round4(
        weights.ocr * ocr
            + weights.fields * fields
            + weights.numeric * numeric
            + weights.doc_type * doc_type
            + weights.keyword * keyword,
    );

    ConfidenceScore {
        overall,
        ocr,
        fields,
        numeric,
        doc_type,
        keyword,
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// `0.6 · provider_conf + 0.4 · min(word_count/50, 1)`. A missing
/// provider confidence is treated as the neutral `0.5`.
fn ocr_sub_score(raw_text: &str, ocr_conf: Option<f64>) -> f64 {
    let provider_conf = ocr_conf.unwrap_or(0.5);
    let word_count = raw_text.split_whitespace().count();
    #[allow(clippy::cast_precision_loss)]
    let word_ratio = (word_count as f64 / 50.0).min(1.0);
    0.6 * provider_conf + 0.4 * word_ratio
}

const REQUIRED_FIELD_COUNT: f64 = 6.0;
const BONUS_WEIGHT: f64 = 0.5;
const BONUS_FIELD_COUNT: f64 = 3.0;

/// Ratio of populated required fields, with 0.5-weighted bonuses for
/// supplier email, supplier phone, and buyer name.
fn fields_sub_score(record: &Record) -> f64 {
    let required = [
        !record.supplier.name.trim().is_empty(),
        record.transaction.invoice_number.is_some(),
        record.transaction.invoice_date.is_some(),
        !record.transaction.currency.trim().is_empty(),
        record.totals.grand_total > Decimal::ZERO,
        !record.parts.is_empty(),
    ];
    let required_hits = required.iter().filter(|hit| **hit).count() as f64;

    let bonuses = [
        record.supplier.contact.email.is_some(),
        record.supplier.contact.phone.is_some(),
        record.buyer.name.is_some(),
    ];
    let bonus_hits = bonuses.iter().filter(|hit| **hit).count() as f64;

    let achieved = required_hits + BONUS_WEIGHT * bonus_hits;
    let possible = REQUIRED_FIELD_COUNT + BONUS_WEIGHT * BONUS_FIELD_COUNT;
    achieved / possible
}

/// Reconstructs the grand total from its parts and compares against the
/// extracted value. Neutral `0.5` when there is nothing to reconstruct
/// from, or when `grand_total` is `0`.
fn numeric_sub_score(record: &Record) -> f64 {
    if record.parts.is_empty() && record.totals.subtotal.is_none() && record.totals.total_tax.is_none() {
        return 0.5;
    }

    let grand_total = record.totals.grand_total;
    if grand_total == Decimal::ZERO {
        return 0.5;
    }

    let part_sum = record.parts_total();
    let subtotal = record.totals.subtotal.unwrap_or(part_sum);
    let reconstructed = subtotal
        + record.totals.total_tax.unwrap_or(Decimal::ZERO)
        + record.totals.shipping_cost.unwrap_or(Decimal::ZERO)
        + record.totals.tip.unwrap_or(Decimal::ZERO)
        + record.totals.service_charge.unwrap_or(Decimal::ZERO)
        - record.totals.discount.unwrap_or(Decimal::ZERO);

    let delta = ((reconstructed - grand_total) / grand_total).abs();
    let delta = delta.to_f64().unwrap_or(1.0);

    if delta < 0.01 {
        1.0
    } else if delta < 0.05 {
        0.8
    } else if delta < 0.15 {
        0.6
    } else {
        0.3
    }
}

/// `1.0` if the caller's claimed type matches the independently detected
/// type, `0.7` if one's name contains the other's, else `0.3`. A missing
/// claim is a missing input, scored at the neutral `0.5`.
fn doc_type_sub_score(raw_text: &str, claimed_type: Option<DocumentType>) -> f64 {
    let Some(claimed) = claimed_type else { return 0.5 };
    let detected = classify_document_type(raw_text);

    if claimed == detected {
        1.0
    } else if claimed.as_str().contains(detected.as_str()) || detected.as_str().contains(claimed.as_str()) {
        0.7
    } else {
        0.3
    }
}

/// Fraction of the resolved document type's keyword list present in the
/// lowercased text. `0.5` when the type carries no keyword list (e.g.
/// `Generic`).
fn keyword_sub_score(record: &Record, raw_text: &str) -> f64 {
    let Some(keywords) = keywords_for(record.metadata.document_type) else {
        return 0.5;
    };
    let lowered = raw_text.to_lowercase();
    #[allow(clippy::cast_precision_loss)]
    let hits = keywords.iter().filter(|kw| lowered.contains(*kw)).count() as f64;
    #[allow(clippy::cast_precision_loss)]
    let total = keywords.len() as f64;
    hits / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_extract_models::{Metadata, Part, Supplier, Totals, Transaction};
    use rust_decimal_macros::dec;

    fn blank_record() -> Record {
        Record {
            supplier: Supplier::default(),
            buyer: doc_extract_models::Buyer::default(),
            transaction: Transaction::default(),
            parts: Vec::new(),
            totals: Totals::default(),
            metadata: Metadata {
                document_type: DocumentType::Generic,
                confidence_score: 0.0,
                extraction_timestamp: chrono::DateTime::from_timestamp(0, 0).unwrap(),
                language_detected: "en".to_string(),
                ocr_provider: None,
                ai_provider_used: None,
                processing_time_ms: None,
                warnings: Vec::new(),
            },
            raw_text: None,
        }
    }

    #[test]
    fn all_sub_scores_and_overall_stay_within_bounds() {
        let record = blank_record();
        let result = score(&record, "", None, None);
        for value in [result.overall, result.ocr, result.fields, result.numeric, result.doc_type, result.keyword] {
            assert!((0.0..=1.0).contains(&value), "{value} out of bounds");
        }
    }

    #[test]
    fn numeric_is_neutral_with_nothing_to_reconstruct() {
        let record = blank_record();
        let result = score(&record, "", None, None);
        assert_eq!(result.numeric, 0.5);
    }

    #[test]
    fn numeric_rewards_an_exact_reconstruction() {
        let mut record = blank_record();
        record.parts.push(Part::new("Widget".to_string(), dec!(100.00)));
        record.totals.grand_total = dec!(100.00);
        let result = score(&record, "", None, None);
        assert_eq!(result.numeric, 1.0);
    }

    #[test]
    fn doc_type_is_neutral_without_a_claimed_hint() {
        let record = blank_record();
        let result = score(&record, "", None, None);
        assert_eq!(result.doc_type, 0.5);
    }

    #[test]
    fn doc_type_matches_the_claimed_hint() {
        let mut record = blank_record();
        record.metadata.document_type = DocumentType::Invoice;
        let result = score(&record, "plain text with no keywords", None, Some(DocumentType::Invoice));
        assert_eq!(result.doc_type, 1.0);
    }

    #[test]
    fn keyword_is_neutral_for_generic_type() {
        let record = blank_record();
        let result = score(&record, "some unrelated text", None, None);
        assert_eq!(result.keyword, 0.5);
    }

    #[test]
    fn fields_rewards_populated_required_and_bonus_fields() {
        let mut record = blank_record();
        record.supplier.name = "Acme Corp".to_string();
        record.supplier.contact.email = Some("ap@acme.test".to_string());
        let result = score(&record, "", None, None);
        assert!(result.fields > 0.0);
    }
}
