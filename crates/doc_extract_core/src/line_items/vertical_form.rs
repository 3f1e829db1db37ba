//! C5 strategy 3 — vertical form (POS/thermal-receipt layout, each field
//! on its own line).

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use doc_extract_models::Part;

use crate::primitives::amounts::{parse_amount, round4};

const LABELS: &[(&str, &str)] = &[
    ("part number", "part_number"),
    ("description", "description"),
    ("price", "price"),
    ("net", "net"),
    ("total", "total"),
    ("core deposit", "core_deposit"),
    ("qty", "qty"),
];

static INLINE_QTY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*qty\s*[:#]\s*(\d+)\s*$").unwrap());
static STANDALONE_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-?[$€£]?\s?\d{1,3}(?:,\d{3})*(?:\.\d{1,2})?\s*$").unwrap());

fn label_key(line: &str) -> Option<&'static str> {
    let lowered = line.trim().to_lowercase();
    LABELS
        .iter()
        .find(|(text, _)| lowered == *text || lowered.starts_with(&format!("{text}:")))
        .map(|(_, key)| *key)
}

fn is_alphabetic_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && !trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed.chars().any(char::is_alphabetic)
}

struct Captured {
    value: String,
    line_idx: usize,
}

/// Recognizes a vertical, one-field-per-line layout. Requires at least
/// two distinct collected labels and at least one of `description` or
/// `part_number` to emit anything; otherwise returns `None` so the next
/// strategy gets a turn.
#[must_use]
pub fn extract(lines: &[&str]) -> Option<Vec<Part>> {
    let mut collected: std::collections::HashMap<&'static str, Captured> =
        std::collections::HashMap::new();

    let mut first_label_idx = None;
    let mut last_label_idx = None;
    let mut used_lines: std::collections::HashSet<usize> = std::collections::HashSet::new();

    for (idx, line) in lines.iter().enumerate() {
        if let Some(caps) = INLINE_QTY.captures(line) {
            collected.entry("qty").or_insert(Captured {
                value: caps[1].to_string(),
                line_idx: idx,
            });
            used_lines.insert(idx);
            first_label_idx.get_or_insert(idx);
            last_label_idx = Some(idx);
            continue;
        }

        let Some(key) = label_key(line) else { continue };

        // Inline `Label: value` on the same line.
        if let Some(colon) = line.find(':') {
            let value = line[colon + 1..].trim();
            if !value.is_empty() {
                collected.entry(key).or_insert(Captured {
                    value: value.to_string(),
                    line_idx: idx,
                });
                used_lines.insert(idx);
                first_label_idx.get_or_insert(idx);
                last_label_idx = Some(idx);
                continue;
            }
        }

        // Bare label line: the next non-empty line is the value.
        if let Some((value_idx, value_line)) = lines
            .iter()
            .enumerate()
            .skip(idx + 1)
            .find(|(_, l)| !l.trim().is_empty())
        {
            collected.entry(key).or_insert(Captured {
                value: value_line.trim().to_string(),
                line_idx: value_idx,
            });
            used_lines.insert(idx);
            used_lines.insert(value_idx);
            first_label_idx.get_or_insert(idx);
            last_label_idx = Some(value_idx);
        }
    }

    if collected.len() < 2 {
        return None;
    }
    if !collected.contains_key("description") && !collected.contains_key("part_number") {
        return None;
    }

    let description = collected.get("description").map(|c| c.value.clone()).or_else(|| {
        let (start, end) = (first_label_idx?, last_label_idx?);
        let part_number_idx = collected.get("part_number").map(|c| c.line_idx);
        lines[start..=end]
            .iter()
            .enumerate()
            .find(|(offset, l)| {
                let idx = start + offset;
                Some(idx) != part_number_idx && !used_lines.contains(&idx) && is_alphabetic_line(l)
            })
            .map(|(_, l)| l.trim().to_string())
    });

    let part_number = collected.get("part_number").map(|c| c.value.clone());
    let total_amount = collected
        .get("total")
        .and_then(|c| parse_amount(&c.value))
        .or_else(|| collected.get("net").and_then(|c| parse_amount(&c.value)))
        .unwrap_or(Decimal::ZERO);
    let unit_price = collected.get("price").and_then(|c| parse_amount(&c.value));
    let quantity = collected
        .get("qty")
        .and_then(|c| parse_amount(&c.value))
        .filter(|q| *q > Decimal::ZERO)
        .unwrap_or(Decimal::ONE);

    let item_name = description
        .clone()
        .or_else(|| part_number.clone())
        .unwrap_or_else(|| "Item".to_string());

    let mut main = Part::new(item_name, round4(total_amount));
    main.description = description;
    main.part_number = part_number;
    main.quantity = quantity;
    main.unit_price = unit_price.map(round4);

    let mut parts = vec![main];

    if let Some(deposit) = collected.get("core_deposit") {
        let deposit_qty = parse_amount(&deposit.value);
        let looks_like_quantity = deposit_qty.is_some_and(|q| q <= Decimal::TWO);

        let deposit_amount = if looks_like_quantity {
            collected.get("total").and_then(|total| {
                lines
                    .iter()
                    .skip(total.line_idx + 1)
                    .filter(|l| STANDALONE_AMOUNT.is_match(l))
                    .find_map(|l| parse_amount(l).filter(|amt| *amt >= Decimal::TWO))
            })
        } else {
            deposit_qty
        };

        if let Some(amount) = deposit_amount {
            parts.push(Part::new("Core Deposit".to_string(), round4(amount)));
        }
    }

    Some(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_vertical_label_value_pairs() {
        let lines = vec![
            "Part Number",
            "90-27-3325",
            "Description",
            "Brake Pad Set",
            "Price",
            "45.00",
            "Total",
            "45.00",
        ];
        let parts = extract(&lines).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].part_number.as_deref(), Some("90-27-3325"));
        assert_eq!(parts[0].description.as_deref(), Some("Brake Pad Set"));
        assert_eq!(parts[0].total_amount, dec!(45.00));
    }

    #[test]
    fn recognizes_inline_qty() {
        let lines = vec!["Part Number", "90-27-3325", "Qty: 3", "Total", "135.00"];
        let parts = extract(&lines).unwrap();
        assert_eq!(parts[0].quantity, dec!(3));
    }

    #[test]
    fn core_deposit_as_low_quantity_rescans_for_standalone_amount() {
        let lines = vec![
            "Part Number",
            "BATT-12",
            "Description",
            "Car Battery",
            "Total",
            "120.00",
            "Core Deposit",
            "1",
            "15.00",
        ];
        let parts = extract(&lines).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].item_name, "Core Deposit");
        assert_eq!(parts[1].total_amount, dec!(15.00));
    }

    #[test]
    fn returns_none_with_fewer_than_two_labels() {
        let lines = vec!["Total", "45.00"];
        assert!(extract(&lines).is_none());
    }

    #[test]
    fn returns_none_without_description_or_part_number() {
        let lines = vec!["Price", "45.00", "Total", "45.00"];
        assert!(extract(&lines).is_none());
    }
}
