//! C3 — `parse_line_item`: the ten-step single-line item parser shared
//! by every C5 line-item strategy.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use doc_extract_models::Part;

use crate::patterns::{LEADING_ROW_NUMBER, SKU_BARE, SKU_LABELED, TAX_PERCENT};
use crate::primitives::amounts::round4;

/// A bare or percent-suffixed numeric token, with its byte offset so
/// candidates can be matched back up against the original line for name
/// extraction.
static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d{1,3}(?:,\d{3})*(?:\.\d+)?%?").unwrap());

static SUMMARY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:sub\s*total|total|tax|gst|vat|hst|shipping|discount|balance|amount\s+due|paid|change)\b",
    )
    .unwrap()
});

const TABLE_HEADER_KEYWORDS: &[&str] = &[
    "description", "item", "qty", "quantity", "part", "sku", "unit price", "amount", "total",
    "rate",
];

const MAX_TOTAL: i64 = 9_999_999;
const MAX_SMALL_INT: i64 = 10_000;
const MATH_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 2); // 0.05

struct Token {
    value: Decimal,
    is_percent: bool,
}

/// Parses a single already-segmented line into a [`Part`], or `None`
/// when the line is a summary/header row or carries no usable total.
#[must_use]
pub fn parse_line_item(line: &str, default_tax_pct: Option<Decimal>) -> Option<Part> {
    if is_summary_line(line) || is_bare_header_row(line) {
        return None;
    }

    // Stripped once, up front: a leading row number ("1.", "3)") is part
    // of neither the name nor the numeric-token disambiguation, so it
    // must not leak into either.
    let line = LEADING_ROW_NUMBER.replace(line, "");
    let line = line.as_ref();

    let tokens = numeric_tokens(line);
    if tokens.is_empty() {
        return None;
    }

    let percent_tokens: Vec<&Token> = tokens.iter().filter(|t| t.is_percent).collect();
    let plain_tokens: Vec<&Token> = tokens.iter().filter(|t| !t.is_percent).collect();

    let tax_percentage = percent_tokens
        .first()
        .map(|t| t.value)
        .or_else(|| {
            TAX_PERCENT
                .captures(line)
                .and_then(|c| c[1].parse::<Decimal>().ok())
        })
        .or(default_tax_pct);

    let total_token = plain_tokens.last()?;
    let total_amount = total_token.value;
    if total_amount <= Decimal::ZERO || total_amount > Decimal::from(MAX_TOTAL) {
        return None;
    }

    let sku = SKU_LABELED
        .captures(line)
        .map(|c| c[1].to_string())
        .or_else(|| SKU_BARE.captures(line).map(|c| c[1].to_string()));

    let item_name = candidate_name(line, sku.as_deref())?;

    let remaining: Vec<&Token> = plain_tokens[..plain_tokens.len() - 1].to_vec();

    let (quantity, unit_price, leftover_as_tax, bare_tax_percentage, positional_fallback) =
        disambiguate_quantity_and_price(&remaining, total_amount);

    let tax_percentage = tax_percentage.or(bare_tax_percentage);
    let tax_amount_from_leftover = leftover_as_tax;

    let mut part = Part::new(item_name, round4(total_amount));
    part.sku = sku;
    part.quantity = quantity.unwrap_or(Decimal::ONE);
    part.positional_fallback = positional_fallback;

    if let Some(p) = unit_price {
        part.unit_price = Some(round4(p));
    } else if part.quantity > Decimal::ZERO {
        part.unit_price = Some(round4(total_amount / part.quantity));
    }

    part.tax_percentage = tax_percentage;
    part.tax_amount = tax_amount_from_leftover.map(round4).or_else(|| {
        tax_percentage.map(|pct| {
            let price = part.unit_price.unwrap_or(Decimal::ZERO);
            round4(part.quantity * price * pct / Decimal::ONE_HUNDRED)
        })
    });

    Some(part)
}

fn is_summary_line(line: &str) -> bool {
    SUMMARY_LINE.is_match(line)
}

fn is_bare_header_row(line: &str) -> bool {
    if line.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    let lowered = line.to_lowercase();
    TABLE_HEADER_KEYWORDS.iter().filter(|kw| lowered.contains(*kw)).count() >= 2
}

/// A numeric token is only a candidate quantity/price/total/percentage if
/// it isn't a digit run embedded in an alphanumeric word (`M12`, `75mm`):
/// `regex` has no lookaround, so adjacency is checked against the
/// surrounding characters after the fact.
fn numeric_tokens(line: &str) -> Vec<Token> {
    NUMERIC_TOKEN
        .find_iter(line)
        .filter(|m| {
            let before_ok = line[..m.start()]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphabetic());
            let after_ok = line[m.end()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphabetic());
            before_ok && after_ok
        })
        .filter_map(|m| {
            let raw = m.as_str();
            let is_percent = raw.ends_with('%');
            let cleaned = raw.trim_end_matches('%').replace(',', "");
            cleaned
                .parse::<Decimal>()
                .ok()
                .map(|value| Token { value, is_percent })
        })
        .collect()
}

/// Split on runs of 2+ spaces (the column separator the normalizer
/// preserves), pick the first segment with a 2-letter alphabetic run; if
/// none qualifies, strip the trailing numeric cluster from the whole
/// line instead. Then remove an embedded SKU and any leading row number.
fn candidate_name(line: &str, sku: Option<&str>) -> Option<String> {
    static COLUMN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());
    static TWO_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{2,}").unwrap());
    static TRAILING_NUMERIC_CLUSTER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[\s,.$%\d-]+$").unwrap());

    let mut name = COLUMN_SPLIT
        .split(line)
        .find(|seg| TWO_LETTERS.is_match(seg))
        .map(str::to_string)
        .unwrap_or_else(|| TRAILING_NUMERIC_CLUSTER.replace(line, "").trim().to_string());

    if let Some(sku) = sku {
        name = name.replace(sku, "");
    }
    name = LEADING_ROW_NUMBER.replace(&name, "").trim().to_string();

    if name.is_empty() || !TWO_LETTERS.is_match(&name) {
        None
    } else {
        Some(name)
    }
}

/// Finds the `(quantity_index, price_index, relative_error)` whose
/// product lands closest to `target`, scanning every ordered pair in
/// `tokens`.
fn best_pair(tokens: &[&Token], target: Decimal, denom: Decimal) -> Option<(usize, usize, Decimal)> {
    let mut best: Option<(usize, usize, Decimal)> = None;
    for (i, q) in tokens.iter().enumerate() {
        for (j, p) in tokens.iter().enumerate() {
            if i == j {
                continue;
            }
            let error = ((q.value * p.value) - target).abs() / denom;
            let improves = match best {
                Some((_, _, best_err)) => error < best_err,
                None => true,
            };
            if improves {
                best = Some((i, j, error));
            }
        }
    }
    best
}

/// Step 7: disambiguate quantity/unit_price from the numeric tokens
/// preceding the total. Returns `(quantity, unit_price, leftover_for_tax,
/// bare_tax_percentage, positional_fallback)`.
fn disambiguate_quantity_and_price(
    remaining: &[&Token],
    total: Decimal,
) -> (Option<Decimal>, Option<Decimal>, Option<Decimal>, Option<Decimal>, bool) {
    let denom = if total > Decimal::ZERO { total } else { Decimal::ONE };

    if remaining.len() >= 2 {
        if let Some((qi, pi, error)) = best_pair(remaining, total, denom) {
            if error < MATH_TOLERANCE {
                let leftover = remaining
                    .iter()
                    .enumerate()
                    .find(|(idx, _)| *idx != qi && *idx != pi)
                    .map(|(_, t)| t.value);
                return (Some(remaining[qi].value), Some(remaining[pi].value), leftover, None, false);
            }
        }
    }

    // `total` may be tax-inclusive: the token immediately before it can be
    // a leftover tax amount, and the one before that a bare (unsuffixed)
    // tax percentage, with quantity/price validating against the
    // resulting pre-tax subtotal rather than `total` itself.
    if remaining.len() >= 3 {
        let tax_amount_candidate = remaining[remaining.len() - 1];
        let pretax_subtotal = total - tax_amount_candidate.value;
        let rest = &remaining[..remaining.len() - 1];
        let pretax_denom = if pretax_subtotal > Decimal::ZERO {
            pretax_subtotal
        } else {
            Decimal::ONE
        };

        if let Some((qi, pi, error)) = best_pair(rest, pretax_subtotal, pretax_denom) {
            if error < MATH_TOLERANCE {
                let bare_tax_percentage = rest
                    .iter()
                    .enumerate()
                    .find(|(idx, _)| *idx != qi && *idx != pi)
                    .map(|(_, t)| t.value)
                    .filter(|v| *v >= Decimal::ZERO && *v <= Decimal::ONE_HUNDRED);
                return (
                    Some(rest[qi].value),
                    Some(rest[pi].value),
                    Some(tax_amount_candidate.value),
                    bare_tax_percentage,
                    false,
                );
            }
        }
    }

    if remaining.len() >= 2 {
        // No validating pair in either stage above: positional fallback.
        let quantity = remaining
            .iter()
            .find(|t| is_plausible_quantity(t.value))
            .map(|t| t.value);
        let unit_price = remaining
            .iter()
            .rev()
            .find(|t| quantity != Some(t.value))
            .map(|t| t.value);
        return (quantity, unit_price, None, None, true);
    }

    if remaining.len() == 1 {
        let value = remaining[0].value;
        if is_plausible_quantity(value) && total / value >= Decimal::new(1, 2) {
            return (Some(value), Some(total / value), None, None, false);
        }
        return (None, Some(value), None, None, false);
    }

    (None, None, None, None, false)
}

fn is_plausible_quantity(value: Decimal) -> bool {
    value > Decimal::ZERO && value.fract().is_zero() && value < Decimal::from(MAX_SMALL_INT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_summary_line() {
        assert!(parse_line_item("Subtotal: $120.00", None).is_none());
        assert!(parse_line_item("Sales Tax $9.60", None).is_none());
    }

    #[test]
    fn rejects_header_row_with_no_digits() {
        assert!(parse_line_item("Description  Qty  Unit Price  Amount", None).is_none());
    }

    #[test]
    fn parses_quantity_price_total_line() {
        let part = parse_line_item("Widget A  2  10.00  20.00", None).unwrap();
        assert_eq!(part.item_name, "Widget A");
        assert_eq!(part.quantity, dec!(2));
        assert_eq!(part.unit_price, Some(dec!(10.00)));
        assert_eq!(part.total_amount, dec!(20.00));
        assert!(!part.positional_fallback);
    }

    #[test]
    fn single_token_treated_as_unit_price_when_not_plausible_quantity() {
        let part = parse_line_item("Service Fee  49.99", None).unwrap();
        assert_eq!(part.unit_price, Some(dec!(49.99)));
        assert_eq!(part.quantity, dec!(1));
    }

    #[test]
    fn rejects_total_exceeding_cap() {
        assert!(parse_line_item("Widget  1  10000000  10000000", None).is_none());
    }

    #[test]
    fn rejects_zero_or_negative_total() {
        assert!(parse_line_item("Widget  1  0.00  0.00", None).is_none());
    }

    #[test]
    fn extracts_tax_percentage_from_percent_token() {
        let part = parse_line_item("Widget  2  10.00  8%  20.00", None).unwrap();
        assert_eq!(part.tax_percentage, Some(dec!(8)));
    }

    #[test]
    fn derives_unit_price_when_missing_and_quantity_known() {
        let part = parse_line_item("Bulk Item  4  40.00", None).unwrap();
        assert_eq!(part.quantity, dec!(4));
        assert_eq!(part.unit_price, Some(dec!(10.00)));
    }

    #[test]
    fn strips_leading_row_number_from_name() {
        let part = parse_line_item("1. Widget A  2  10.00  20.00", None).unwrap();
        assert_eq!(part.item_name, "Widget A");
    }

    #[test]
    fn math_validated_row_with_tax_inclusive_total_and_embedded_digits() {
        let part = parse_line_item("Hex Bolt M12 x 75mm   200   0.85   10   17.00   187.00", None).unwrap();
        assert_eq!(part.quantity, dec!(200));
        assert_eq!(part.unit_price, Some(dec!(0.85)));
        assert_eq!(part.tax_percentage, Some(dec!(10)));
        assert_eq!(part.tax_amount, Some(dec!(17.00)));
        assert_eq!(part.total_amount, dec!(187.00));
        assert!(!part.positional_fallback);
    }
}
