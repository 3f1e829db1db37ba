//! Supplier and buyer value types.

use serde::{Deserialize, Serialize};

use crate::address::{Address, Contact, Coordinates};
use crate::tax::TaxInformation;

/// The issuing party of a document. `name` may be empty when no supplier
/// block could be isolated; it is never absent, matching the source
/// behavior of always returning a (possibly blank) supplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub address: Address,
    pub contact: Contact,
    pub tax_information: Option<TaxInformation>,
    pub coordinates: Option<Coordinates>,
}

/// The receiving party of a document. Every field is optional: a buyer
/// block is frequently absent (e.g. POS receipts have no named customer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    pub name: Option<String>,
    pub address: Option<Address>,
    pub contact: Option<Contact>,
}
