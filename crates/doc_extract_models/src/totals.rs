//! The totals block: grand total plus the amounts that compose it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `grand_total` defaults to `0` when no value could be derived at all;
/// every other field is absent, never zero, when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub grand_total: Decimal,
    pub subtotal: Option<Decimal>,
    pub total_tax: Option<Decimal>,
    pub shipping_cost: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub tip: Option<Decimal>,
    pub service_charge: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub balance_due: Option<Decimal>,
}

impl Default for Totals {
    fn default() -> Self {
        Self {
            grand_total: Decimal::ZERO,
            subtotal: None,
            total_tax: None,
            shipping_cost: None,
            discount: None,
            tip: None,
            service_charge: None,
            amount_paid: None,
            balance_due: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grand_total_is_zero() {
        assert_eq!(Totals::default().grand_total, Decimal::ZERO);
    }
}
