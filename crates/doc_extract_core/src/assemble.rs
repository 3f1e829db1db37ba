//! C6 — the assembler: normalize → segment → classify → build
//! supplier/buyer/transaction/parts/totals → assemble a [`Record`].

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug_span, warn};

use doc_extract_models::{Metadata, Record, Totals};

use crate::line_items::extract_parts;
use crate::normalize::normalize;
use crate::options::ParseOptions;
use crate::primitives::{
    build_buyer, build_supplier, classify_document_type, detect_currency, detect_language,
    extract_dates, extract_labeled_amount, extract_tax_information, parse_amount,
};
use crate::segment::segment;

static INVOICE_NUMBER_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:invoice\s*(?:no\.?|#|number)|tax\s*invoice\s*(?:no\.?|#)|inv\s*[#:]|einvoice\s*[#:])\s*").unwrap()
});
static PO_NUMBER_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:PO\s*#|P\.O\.#|Purchase\s*Order\s*(?:No\.?|#|Number))\s*").unwrap()
});
static QUOTE_NUMBER_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:quote\s*(?:no\.?|#|number))\s*").unwrap());
static PAYMENT_MODE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bpayment\s*(?:mode|method)\s*[:\s]*").unwrap());
static PAYMENT_TERMS_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bpayment\s*terms\s*[:\s]*").unwrap());
// `regex` has no lookaround, so the "payment, but not payment terms"
// exclusion is done by plain post-match filtering below rather than as
// a single pattern.
static PAYMENT_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bpayment\b").unwrap());
static STARTS_WITH_TERMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*terms\b").unwrap());
static LABEL_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[:\s]*").unwrap());
static VALUE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9][\w/-]{1,}").unwrap());

/// Everything after a label up to the end of its line, trimmed. Unlike
/// `VALUE_TOKEN`, this does not stop at the first space — it's for
/// phrase-valued fields like `payment_mode`/`payment_terms` ("Net 30",
/// "Wire Transfer"), where a single token would truncate the value.
fn phrase_value(text_after_label: &str) -> Option<String> {
    let line_end = text_after_label.find('\n').unwrap_or(text_after_label.len());
    let candidate = text_after_label[..line_end].trim();
    if candidate.is_empty() {
        None
    } else {
        Some(candidate.to_string())
    }
}
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2}:\d{2}(?::\d{2})?\s?(?:AM|PM)?)\b").unwrap());

const GRAND_TOTAL_LABEL_1: &str = r"(?i)\b(?:grand\s*total|total\s*amount\s*due|total\s*due)\b[:\s]*";
const GRAND_TOTAL_LABEL_2: &str = r"(?i)\b(?:amount\s*due|balance\s*due)\b[:\s]*";
const GRAND_TOTAL_LABEL_3: &str = r"(?i)\bamount\s*:\s*";
const GRAND_TOTAL_LABEL_4: &str = r"(?i)\btotal\b[:\s]*";

const SUBTOTAL_LABEL: &str = r"(?i)\b(?:sub\s*total|subtotal)\b[:\s]*";
const TAX_LABEL: &str = r"(?i)\btotal\s*(?:gst|tax|vat)\b[:\s]*";
const ANY_TAX_LABEL: &str = r"(?i)\b(?:gst|tax|vat)\b[:\s]*";
const SHIPPING_LABEL: &str = r"(?i)\b(?:shipping|freight|delivery)(?:\s*cost)?\b[:\s]*";
const DISCOUNT_LABEL: &str = r"(?i)\bdiscount\b[:\s]*";
const TIP_LABEL: &str = r"(?i)\btip\b[:\s]*";
const SERVICE_CHARGE_LABEL: &str = r"(?i)\bservice\s*charge\b[:\s]*";
const AMOUNT_PAID_LABEL: &str = r"(?i)\b(?:amount\s*paid|paid)\b[:\s]*";
const BALANCE_DUE_LABEL: &str = r"(?i)\bbalance\s*due\b[:\s]*";
const POS_PCT_LABEL: &str = r"(?i)\bPCT\b.*?%";

/// Runs the full extraction pipeline and assembles a [`Record`].
#[must_use]
pub fn parse(raw_text: &str, options: &ParseOptions) -> Record {
    let config = options.config();
    let span = debug_span!("parse", bytes = raw_text.len());
    let _enter = span.enter();

    let normalized = normalize(raw_text);
    let lines: Vec<&str> = normalized.lines().filter(|l| !l.trim().is_empty()).collect();
    let mut warnings = Vec::new();

    let segments = segment(&lines, &config);

    let header_block = segments.header.join("\n");
    let footer_block = segments.footer.join("\n");

    let detected_type = classify_document_type(&normalized);
    let document_type = options.document_type.unwrap_or(detected_type);

    let supplier_name_hint = segments.header.first().map(|l| l.trim());
    let mut supplier = build_supplier(supplier_name_hint, &header_block);
    let full_text_tax = extract_tax_information(&normalized);
    supplier.tax_information = match (supplier.tax_information.take(), full_text_tax) {
        (Some(a), Some(b)) => Some(a.merged_with(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    };

    let buyer = build_buyer(&normalized).unwrap_or_default();

    let dates = extract_dates(&lines);
    let currency = detect_currency(&normalized);
    let language = options
        .language
        .clone()
        .unwrap_or_else(|| detect_language(&normalized, config.language_scan_chars));

    let invoice_number = extract_labeled_token(
        &lines,
        &INVOICE_NUMBER_LABEL,
        config.multiline_amount_lookahead,
        &mut warnings,
        "invoice number",
    );
    let (purchase_order_number, po_used_fallback) =
        extract_po_number(&lines, config.multiline_amount_lookahead);
    if po_used_fallback {
        warn!("PO number required the multi-line fallback");
        warnings.push("PO number required the multi-line fallback".to_string());
    }
    let quote_number = QUOTE_NUMBER_LABEL
        .find(&normalized)
        .and_then(|m| VALUE_TOKEN.find(&normalized[m.end()..]))
        .map(|m| m.as_str().to_string());
    let payment_mode = PAYMENT_MODE_LABEL
        .find(&normalized)
        .and_then(|m| phrase_value(&normalized[m.end()..]))
        .or_else(|| find_payment_value_excluding_terms(&normalized));
    let payment_terms = PAYMENT_TERMS_LABEL
        .find(&normalized)
        .and_then(|m| phrase_value(&normalized[m.end()..]));
    let transaction_time = TIME_PATTERN.captures(&normalized).map(|c| c[1].to_string());

    let transaction = doc_extract_models::Transaction {
        invoice_number,
        purchase_order_number,
        quote_number,
        invoice_date: dates.invoice_date,
        due_date: dates.due_date,
        transaction_date: dates.transaction_date,
        transaction_time,
        payment_mode,
        payment_terms,
        currency,
    };

    let default_tax_pct = None;
    let line_item_result = extract_parts(&lines, segments.body, default_tax_pct);
    if line_item_result.used_whole_document_fallback {
        warn!("line items salvaged via whole-document fallback");
        warnings.push("line items salvaged via whole-document fallback".to_string());
    }
    if segments.header_used_fallback && line_item_result.used_whole_document_fallback {
        warn!("segmenter could not find a header row");
        warnings.push("segmenter could not find a header row".to_string());
    }
    if line_item_result.parts.iter().any(|p| p.positional_fallback) {
        warn!("math-validation pair not found; positional fallback used");
        warnings.push("math-validation pair not found; positional fallback used".to_string());
    }

    let totals = extract_totals(&footer_block, &normalized, &line_item_result.parts, &mut warnings);

    let metadata = Metadata {
        document_type,
        confidence_score: 0.0,
        extraction_timestamp: chrono::Utc::now(),
        language_detected: language,
        ocr_provider: None,
        ai_provider_used: None,
        processing_time_ms: None,
        warnings,
    };

    Record {
        supplier,
        buyer,
        transaction,
        parts: line_item_result.parts,
        totals,
        metadata,
        raw_text: Some(raw_text.to_string()),
    }
}

fn extract_labeled_token(
    lines: &[&str],
    label: &Regex,
    lookahead: usize,
    warnings: &mut Vec<String>,
    field_name: &str,
) -> Option<String> {
    for line in lines {
        let Some(m) = label.find(line) else { continue };
        let rest = &line[m.end()..];
        if let Some(tok) = VALUE_TOKEN.find(rest) {
            return Some(tok.as_str().to_string());
        }
    }

    // Multi-line fallback: a line consisting of only the label, followed
    // within `lookahead` lines by a line matching the value shape.
    for (idx, line) in lines.iter().enumerate() {
        let Some(m) = label.find(line) else { continue };
        if !line[m.end()..].trim().is_empty() {
            continue;
        }
        for candidate in lines.iter().skip(idx + 1).take(lookahead) {
            if let Some(tok) = VALUE_TOKEN.find(candidate) {
                if tok.as_str() == candidate.trim() {
                    warn!(field_name, "required the multi-line fallback");
                    warnings.push(format!("{field_name} required the multi-line fallback"));
                    return Some(tok.as_str().to_string());
                }
            }
        }
    }

    None
}

/// Fallback for `payment_mode` when no explicit "mode"/"method" label is
/// present: a bare "Payment:" label is a reasonable stand-in, but
/// "Payment Terms:" is a different field and must be excluded. Walks
/// every `payment` occurrence and skips any immediately followed by
/// "terms".
fn find_payment_value_excluding_terms(text: &str) -> Option<String> {
    for m in PAYMENT_WORD.find_iter(text) {
        let rest = &text[m.end()..];
        if STARTS_WITH_TERMS.is_match(rest) {
            continue;
        }
        let sep_end = LABEL_SEPARATOR.find(rest).map_or(0, |sm| sm.end());
        if let Some(value) = phrase_value(&rest[sep_end..]) {
            return Some(value);
        }
    }
    None
}

/// The PO-number contract: the label pattern must never itself capture
/// the literal word "Number" as the value — only a genuine alphanumeric
/// token following it.
fn extract_po_number(lines: &[&str], lookahead: usize) -> (Option<String>, bool) {
    for line in lines {
        let Some(m) = PO_NUMBER_LABEL.find(line) else { continue };
        let rest = &line[m.end()..];
        if let Some(tok) = VALUE_TOKEN.find(rest) {
            if !tok.as_str().eq_ignore_ascii_case("number") {
                return (Some(tok.as_str().to_string()), false);
            }
        }
    }

    for (idx, line) in lines.iter().enumerate() {
        let Some(m) = PO_NUMBER_LABEL.find(line) else { continue };
        if !line[m.end()..].trim().is_empty() {
            continue;
        }
        for candidate in lines.iter().skip(idx + 1).take(lookahead) {
            if let Some(tok) = VALUE_TOKEN.find(candidate) {
                if tok.as_str() == candidate.trim() && !tok.as_str().eq_ignore_ascii_case("number") {
                    return (Some(tok.as_str().to_string()), true);
                }
            }
        }
    }

    (None, false)
}

fn extract_totals(
    footer_block: &str,
    full_text: &str,
    parts: &[doc_extract_models::Part],
    warnings: &mut Vec<String>,
) -> Totals {
    let footer_lines: Vec<&str> = footer_block.lines().collect();
    let full_lines: Vec<&str> = full_text.lines().collect();

    let labeled_in = |pattern: &str, lines: &[&str]| {
        let regex = Regex::new(pattern).expect("totals label pattern is valid");
        extract_labeled_amount(lines, &regex, 4)
    };

    let part_sum: Decimal = parts.iter().map(|p| p.total_amount).sum();

    let subtotal = labeled_in(SUBTOTAL_LABEL, &footer_lines)
        .or_else(|| labeled_in(SUBTOTAL_LABEL, &full_lines))
        .or(if parts.is_empty() { None } else { Some(part_sum) });

    let total_tax = pos_style_tax(full_text)
        .or_else(|| labeled_in(TAX_LABEL, &footer_lines))
        .or_else(|| labeled_in(TAX_LABEL, &full_lines))
        .or_else(|| labeled_in(ANY_TAX_LABEL, &footer_lines))
        .or_else(|| labeled_in(ANY_TAX_LABEL, &full_lines));

    let shipping_cost = labeled_in(SHIPPING_LABEL, &footer_lines).or_else(|| labeled_in(SHIPPING_LABEL, &full_lines));
    let discount = labeled_in(DISCOUNT_LABEL, &footer_lines).or_else(|| labeled_in(DISCOUNT_LABEL, &full_lines));
    let tip = labeled_in(TIP_LABEL, &footer_lines).or_else(|| labeled_in(TIP_LABEL, &full_lines));
    let service_charge =
        labeled_in(SERVICE_CHARGE_LABEL, &footer_lines).or_else(|| labeled_in(SERVICE_CHARGE_LABEL, &full_lines));
    let amount_paid = labeled_in(AMOUNT_PAID_LABEL, &footer_lines).or_else(|| labeled_in(AMOUNT_PAID_LABEL, &full_lines));
    let balance_due = labeled_in(BALANCE_DUE_LABEL, &footer_lines).or_else(|| labeled_in(BALANCE_DUE_LABEL, &full_lines));

    let grand_total = labeled_in(GRAND_TOTAL_LABEL_1, &footer_lines)
        .or_else(|| labeled_in(GRAND_TOTAL_LABEL_1, &full_lines))
        .or_else(|| labeled_in(GRAND_TOTAL_LABEL_2, &footer_lines))
        .or_else(|| labeled_in(GRAND_TOTAL_LABEL_2, &full_lines))
        .or_else(|| labeled_in(GRAND_TOTAL_LABEL_3, &footer_lines))
        .or_else(|| labeled_in(GRAND_TOTAL_LABEL_3, &full_lines))
        .or_else(|| footer_only_bare_total(&footer_lines))
        .or(subtotal)
        .unwrap_or(Decimal::ZERO);

    if grand_total == Decimal::ZERO {
        warn!("no grand total could be derived");
        warnings.push("no grand total could be derived".to_string());
    }

    Totals {
        grand_total,
        subtotal,
        total_tax,
        shipping_cost,
        discount,
        tip,
        service_charge,
        amount_paid,
        balance_due,
    }
}

/// Footer-only, word-boundary `total` match — deliberately never
/// searched against the whole text, so a line-item row's own `Total`
/// column header can't be picked up as the grand total. A header-only
/// total is a known, accepted miss (see design notes).
fn footer_only_bare_total(footer_lines: &[&str]) -> Option<Decimal> {
    let pattern = Regex::new(GRAND_TOTAL_LABEL_4).expect("valid pattern");
    extract_labeled_amount(footer_lines, &pattern, 4)
}

/// POS-style `PCT ... %` pattern where the next two standalone amounts
/// are subtotal and tax; the smaller of the two is taken as tax.
fn pos_style_tax(text: &str) -> Option<Decimal> {
    let pct_label = Regex::new(POS_PCT_LABEL).expect("valid pattern");
    let m = pct_label.find(text)?;
    let rest = &text[m.end()..];
    let amounts: Vec<Decimal> = rest
        .lines()
        .filter_map(|l| parse_amount(l.trim()))
        .take(2)
        .collect();
    if amounts.len() < 2 {
        return None;
    }
    Some(amounts[0].min(amounts[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn empty_input_yields_a_record_with_zero_grand_total() {
        let record = parse("", &opts());
        assert_eq!(record.totals.grand_total, Decimal::ZERO);
        assert!(record.parts.is_empty());
    }

    #[test]
    fn po_number_contract_never_captures_the_word_number() {
        let text = "Purchase Order Number\nPO-55219\n";
        let record = parse(text, &opts());
        assert_eq!(record.transaction.purchase_order_number.as_deref(), Some("PO-55219"));
    }

    #[test]
    fn invoice_number_same_line_label() {
        let text = "INVOICE\nInvoice Number: INV-1001\nBill To: Acme";
        let record = parse(text, &opts());
        assert_eq!(record.transaction.invoice_number.as_deref(), Some("INV-1001"));
    }

    #[test]
    fn currency_defaults_to_usd_without_a_symbol() {
        let record = parse("Item A 5.00\nTotal 5.00", &opts());
        assert_eq!(record.transaction.currency, "USD");
    }

    #[test]
    fn grand_total_prefers_grand_total_label_over_bare_total() {
        let text = "Description  Qty  Price\nWidget  1  10.00\nTotal  10.00\nGrand Total: 10.00";
        let record = parse(text, &opts());
        assert_eq!(record.totals.grand_total, Decimal::new(1000, 2));
    }
}
