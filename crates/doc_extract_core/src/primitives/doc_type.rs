//! C3 — `classify_document_type`.

use doc_extract_models::DocumentType;

/// Curated keyword sets, in the table's canonical (tie-breaking) order.
/// Kept alongside [`keywords_for`] so the confidence engine's Keyword
/// sub-score can reuse the exact same lists.
const TYPE_TABLE: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::Invoice,
        &["invoice", "bill to", "invoice number", "invoice date", "amount due"],
    ),
    (
        DocumentType::Receipt,
        &["receipt", "cash", "change due", "thank you for", "cashier", "register"],
    ),
    (
        DocumentType::PurchaseOrder,
        &["purchase order", "po number", "po#", "vendor", "ship to", "requested by"],
    ),
    (
        DocumentType::WorkOrder,
        &["work order", "technician", "labor", "job number", "service request"],
    ),
    (
        DocumentType::Bill,
        &["statement of account", "bill", "account number", "previous balance"],
    ),
    (
        DocumentType::Statement,
        &["statement", "account summary", "closing balance", "opening balance"],
    ),
    (
        DocumentType::Quote,
        &["quote", "quotation", "estimate", "valid until", "proposal"],
    ),
    (
        DocumentType::Cmms,
        &["work order", "asset", "maintenance", "downtime", "meter reading"],
    ),
    (
        DocumentType::SupplierDocument,
        &["supplier", "vendor statement", "remittance"],
    ),
    (
        DocumentType::Contract,
        &["agreement", "contract", "terms and conditions", "party of the first part"],
    ),
];

/// Keyword scoring over the lowercased text: each document type's
/// keyword set scores the number of keywords present; the highest
/// score wins, ties broken by the table's insertion order above.
/// `Generic` iff every type scores zero.
#[must_use]
pub fn classify_document_type(text: &str) -> DocumentType {
    let lowered = text.to_lowercase();

    let mut best = DocumentType::Generic;
    let mut best_score = 0usize;

    for (doc_type, keywords) in TYPE_TABLE {
        let score = keywords.iter().filter(|kw| lowered.contains(*kw)).count();
        if score > best_score {
            best_score = score;
            best = *doc_type;
        }
    }

    best
}

/// The keyword list backing a document type's classification score, for
/// reuse by the confidence engine's Keyword sub-score. `None` for types
/// with no curated list (there are none today, but the contract is kept
/// open per the confidence engine's "0.5 if the type has no keyword
/// list" rule).
#[must_use]
pub fn keywords_for(doc_type: DocumentType) -> Option<&'static [&'static str]> {
    TYPE_TABLE
        .iter()
        .find(|(t, _)| *t == doc_type)
        .map(|(_, kws)| *kws)
}
