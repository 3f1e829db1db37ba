//! Jurisdiction-specific tax and business identifiers.

use serde::{Deserialize, Serialize};

/// At most one value is populated per jurisdiction in practice, but the
/// type does not enforce that — a document can legitimately carry both a
/// GST number and an ABN, for instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInformation {
    pub tax_id: Option<String>,
    pub gst_number: Option<String>,
    pub vat_number: Option<String>,
    pub ein: Option<String>,
    pub abn_number: Option<String>,
    pub acn_number: Option<String>,
}

impl TaxInformation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tax_id.is_none()
            && self.gst_number.is_none()
            && self.vat_number.is_none()
            && self.ein.is_none()
            && self.abn_number.is_none()
            && self.acn_number.is_none()
    }

    /// Merge another partial record in, preferring values already present
    /// on `self`. Used when sequential pattern passes (ABN, ACN, GST, EIN,
    /// VAT, GSTIN) each contribute at most one field.
    #[must_use]
    pub fn merged_with(mut self, other: Self) -> Self {
        self.tax_id = self.tax_id.or(other.tax_id);
        self.gst_number = self.gst_number.or(other.gst_number);
        self.vat_number = self.vat_number.or(other.vat_number);
        self.ein = self.ein.or(other.ein);
        self.abn_number = self.abn_number.or(other.abn_number);
        self.acn_number = self.acn_number.or(other.acn_number);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_existing_values() {
        let a = TaxInformation {
            tax_id: Some("12-3456789".to_string()),
            ..TaxInformation::default()
        };
        let b = TaxInformation {
            tax_id: Some("should-not-win".to_string()),
            abn_number: Some("51 824 753 556".to_string()),
            ..TaxInformation::default()
        };
        let merged = a.merged_with(b);
        assert_eq!(merged.tax_id.as_deref(), Some("12-3456789"));
        assert_eq!(merged.abn_number.as_deref(), Some("51 824 753 556"));
    }

    #[test]
    fn empty_default_is_empty() {
        assert!(TaxInformation::default().is_empty());
    }
}
