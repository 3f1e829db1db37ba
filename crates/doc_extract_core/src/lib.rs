//! Document Extraction Core
//!
//! The rule-based parser and confidence engine: C1 through C7 of the
//! business-document extraction engine. Two public entry points —
//! [`parse`] assembles a canonical [`Record`] from raw OCR text;
//! [`score`] computes the five-factor confidence score over a finished
//! `Record`. Both are pure, total functions: no shared state, no I/O, no
//! panics on well-formed UTF-8 input.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::unwrap_used)]

mod assemble;
mod config;
mod confidence;
mod line_items;
mod normalize;
mod options;
mod patterns;
mod primitives;
mod segment;

pub use config::{ConfidenceWeights, ParserConfig};
pub use confidence::{score, score_with_weights, ConfidenceScore, Scorer};
pub use options::ParseOptions;

pub use doc_extract_models::{
    Address, Buyer, Contact, Coordinates, DocumentType, ExtractionError, ExtractionResult,
    Metadata, Part, Record, Supplier, TaxInformation, Totals, Transaction,
};

/// Runs the full extraction pipeline (normalize → segment → classify →
/// assemble) and returns a canonical [`Record`]. Total on well-formed
/// UTF-8: there is no input for which this panics.
#[must_use]
pub fn parse(raw_text: &str, options: &ParseOptions) -> Record {
    assemble::parse(raw_text, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_score_compose() {
        let text = "ACME Corp\nInvoice Number: INV-1\nDescription  Qty  Price\nWidget  1  10.00\nGrand Total: 10.00";
        let record = parse(text, &ParseOptions::default());
        let result = score(&record, text, None, None);
        assert!((0.0..=1.0).contains(&result.overall));
    }
}
