//! The canonical output record.

use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;
use crate::party::{Buyer, Supplier};
use crate::line_item::Part;
use crate::totals::Totals;
use crate::transaction::Transaction;

/// The composed result of one `parse()` call. Immutable once produced —
/// there is no method on `Record` that mutates it in place; a caller who
/// wants a revised confidence score builds a new `Metadata` and assigns
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub supplier: Supplier,
    pub buyer: Buyer,
    pub transaction: Transaction,
    #[serde(alias = "line_items")]
    pub parts: Vec<Part>,
    pub totals: Totals,
    pub metadata: Metadata,
    pub raw_text: Option<String>,
}

impl Record {
    /// Sum of `total_amount` across every line item.
    #[must_use]
    pub fn parts_total(&self) -> rust_decimal::Decimal {
        self.parts.iter().map(|p| p.total_amount).sum()
    }

    /// A clone with `extraction_timestamp` pinned to the Unix epoch, so two
    /// records produced moments apart from identical input compare equal.
    /// Intended for tests exercising the determinism property.
    #[must_use]
    pub fn with_timestamp_zeroed(&self) -> Self {
        let mut clone = self.clone();
        clone.metadata.extraction_timestamp =
            chrono::DateTime::from_timestamp(0, 0).expect("unix epoch is a valid timestamp");
        clone
    }
}
