//! Transaction metadata: document numbers, dates, payment terms, currency.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Document-level transaction metadata. `currency` defaults to `"USD"`
/// when no currency symbol or code is present in the source text; every
/// other field is absent rather than empty/zero when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub invoice_number: Option<String>,
    pub purchase_order_number: Option<String>,
    pub quote_number: Option<String>,
    /// ISO `YYYY-MM-DD` when a numeric or long-form date was derivable.
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub transaction_date: Option<NaiveDate>,
    /// Original OCR-captured form (e.g. `"09:45 AM"`) — no canonical time
    /// zone is knowable from text alone, so this stays a display string.
    pub transaction_time: Option<String>,
    pub payment_mode: Option<String>,
    pub payment_terms: Option<String>,
    /// ISO-4217, uppercase. Defaults to `"USD"`.
    pub currency: String,
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            invoice_number: None,
            purchase_order_number: None,
            quote_number: None,
            invoice_date: None,
            due_date: None,
            transaction_date: None,
            transaction_time: None,
            payment_mode: None,
            payment_terms: None,
            currency: "USD".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_currency_is_usd() {
        assert_eq!(Transaction::default().currency, "USD");
    }
}
