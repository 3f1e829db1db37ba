//! Document Extraction Models
//!
//! Shared value types produced by `doc_extract_core`: the canonical
//! `Record` and everything that composes it (supplier, buyer, transaction,
//! line items, totals, extraction metadata).
//!
//! This crate has no external integration dependencies and serves as the
//! foundation `doc_extract_core` builds its parsing and scoring logic on.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::unwrap_used)]

pub mod address;
pub mod errors;
pub mod line_item;
pub mod metadata;
pub mod party;
pub mod record;
pub mod tax;
pub mod totals;
pub mod transaction;

pub use address::{Address, Contact, Coordinates};
pub use errors::{ExtractionError, ExtractionResult};
pub use line_item::Part;
pub use metadata::{DocumentType, Metadata};
pub use party::{Buyer, Supplier};
pub use record::Record;
pub use tax::TaxInformation;
pub use totals::Totals;
pub use transaction::Transaction;
