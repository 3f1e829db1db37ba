//! C3 — primitive extractors built atop C1 (patterns) and C2 (normalizer).

pub mod address;
pub mod amounts;
pub mod currency;
pub mod dates;
pub mod doc_type;
pub mod labeled_amount;
pub mod language;
pub mod line_item;
pub mod party;
pub mod tax;

pub use address::parse_address;
pub use amounts::{parse_amount, parse_positive_amount, round4};
pub use currency::detect_currency;
pub use dates::{extract_dates, ExtractedDates};
pub use doc_type::classify_document_type;
pub use labeled_amount::extract_labeled_amount;
pub use language::detect_language;
pub use line_item::parse_line_item;
pub use party::{build_buyer, build_supplier};
pub use tax::extract_tax_information;
