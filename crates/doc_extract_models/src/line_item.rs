//! A single line item (goods or services row) on a document.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invariants (enforced by the extractors that build a `Part`, not by this
/// type): `total_amount >= 0`; when both `unit_price` and `quantity` are
/// known, `|quantity * unit_price - total_amount| <= 5% of total_amount`
/// unless `positional_fallback` is set, in which case the math-validation
/// pair search failed and the value was assigned heuristically instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub item_name: String,
    pub total_amount: Decimal,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub part_number: Option<String>,
    pub manufacturer_part_number: Option<String>,
    pub unit: Option<String>,
    pub unit_price: Option<Decimal>,
    /// Defaults to `1` when not derivable from the line.
    pub quantity: Decimal,
    pub discount: Option<Decimal>,
    pub tax_percentage: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    /// Set when quantity/unit_price could not be validated against
    /// `total_amount` by the `q * p ≈ total` pairing search and a
    /// positional heuristic was used instead. Surfaces as an assembler
    /// warning.
    pub positional_fallback: bool,
}

impl Part {
    /// A minimal part with just a name and total, all other fields at
    /// their spec-mandated defaults.
    #[must_use]
    pub fn new(item_name: String, total_amount: Decimal) -> Self {
        Self {
            item_name,
            total_amount,
            description: None,
            sku: None,
            part_number: None,
            manufacturer_part_number: None,
            unit: None,
            unit_price: None,
            quantity: Decimal::ONE,
            discount: None,
            tax_percentage: None,
            tax_amount: None,
            positional_fallback: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_defaults_quantity_to_one() {
        let part = Part::new("Widget A".to_string(), dec!(62.50));
        assert_eq!(part.quantity, dec!(1));
        assert!(!part.positional_fallback);
    }
}
