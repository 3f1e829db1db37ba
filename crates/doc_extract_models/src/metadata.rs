//! Document classification and extraction-run metadata.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The classified (or caller-asserted) kind of document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    Receipt,
    PurchaseOrder,
    WorkOrder,
    Bill,
    Statement,
    Quote,
    Cmms,
    SupplierDocument,
    Contract,
    Generic,
}

impl DocumentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Receipt => "receipt",
            Self::PurchaseOrder => "purchase_order",
            Self::WorkOrder => "work_order",
            Self::Bill => "bill",
            Self::Statement => "statement",
            Self::Quote => "quote",
            Self::Cmms => "cmms",
            Self::SupplierDocument => "supplier_document",
            Self::Contract => "contract",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a caller-supplied document-type hint does not match
/// any known variant. The assembler treats this the same as no hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDocumentType(pub String);

impl fmt::Display for UnknownDocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown document type: {}", self.0)
    }
}

impl std::error::Error for UnknownDocumentType {}

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "invoice" => Ok(Self::Invoice),
            "receipt" => Ok(Self::Receipt),
            "purchase_order" | "po" => Ok(Self::PurchaseOrder),
            "work_order" => Ok(Self::WorkOrder),
            "bill" => Ok(Self::Bill),
            "statement" => Ok(Self::Statement),
            "quote" | "quotation" => Ok(Self::Quote),
            "cmms" => Ok(Self::Cmms),
            "supplier_document" => Ok(Self::SupplierDocument),
            "contract" => Ok(Self::Contract),
            "generic" => Ok(Self::Generic),
            other => Err(UnknownDocumentType(other.to_string())),
        }
    }
}

/// Per-extraction-run metadata: classification, confidence, timing, and
/// any warnings the assembler recorded along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub document_type: DocumentType,
    /// In `[0, 1]`.
    pub confidence_score: f64,
    pub extraction_timestamp: DateTime<Utc>,
    /// BCP-47 tag, e.g. `"en"`.
    pub language_detected: String,
    pub ocr_provider: Option<String>,
    pub ai_provider_used: Option<String>,
    pub processing_time_ms: Option<u64>,
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_round_trips_through_str() {
        for dt in [
            DocumentType::Invoice,
            DocumentType::Receipt,
            DocumentType::PurchaseOrder,
            DocumentType::WorkOrder,
            DocumentType::Bill,
            DocumentType::Statement,
            DocumentType::Quote,
            DocumentType::Cmms,
            DocumentType::SupplierDocument,
            DocumentType::Contract,
            DocumentType::Generic,
        ] {
            assert_eq!(dt.as_str().parse::<DocumentType>().unwrap(), dt);
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert!("not_a_type".parse::<DocumentType>().is_err());
    }

    #[test]
    fn from_str_is_case_and_separator_insensitive() {
        assert_eq!(
            "Purchase Order".parse::<DocumentType>().unwrap(),
            DocumentType::PurchaseOrder
        );
        assert_eq!("PO".parse::<DocumentType>().unwrap(), DocumentType::PurchaseOrder);
    }
}
