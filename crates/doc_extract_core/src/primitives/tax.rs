//! C3 — `extract_tax_information`.

use doc_extract_models::TaxInformation;

use crate::patterns::{ABN, ACN, EIN, GSTIN, GST_AU, VAT};

/// Applies ABN, ACN, GST_AU, EIN, VAT, GSTIN in sequence, merging
/// whatever each finds. Returns `None` when nothing matched at all.
#[must_use]
pub fn extract_tax_information(text: &str) -> Option<TaxInformation> {
    let mut info = TaxInformation::default();

    if let Some(caps) = ABN.captures(text) {
        info.abn_number = Some(caps[1].to_string());
    }
    if let Some(caps) = ACN.captures(text) {
        info.acn_number = Some(caps[1].to_string());
    }
    if let Some(caps) = GST_AU.captures(text) {
        info.gst_number = Some(caps[1].to_string());
    }
    if let Some(caps) = EIN.captures(text) {
        info.tax_id = Some(caps[1].to_string());
        info.ein = Some(caps[1].to_string());
    }
    if let Some(caps) = VAT.captures(text) {
        info.vat_number = Some(caps[1].to_string());
    }
    if let Some(caps) = GSTIN.captures(text) {
        // GSTIN shares the "GST number" concept but is a distinct
        // jurisdiction's identifier; only fill gst_number if GST_AU
        // didn't already claim it.
        if info.gst_number.is_none() {
            info.gst_number = Some(caps[1].to_string());
        }
    }

    if info.is_empty() {
        None
    } else {
        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_abn_and_acn() {
        let text = "ABN: 51 824 753 556\nACN: 824 753 556";
        let info = extract_tax_information(text).unwrap();
        assert_eq!(info.abn_number.as_deref(), Some("51 824 753 556"));
        assert_eq!(info.acn_number.as_deref(), Some("824 753 556"));
    }

    #[test]
    fn extracts_ein() {
        let text = "EIN: 12-3456789";
        let info = extract_tax_information(text).unwrap();
        assert_eq!(info.tax_id.as_deref(), Some("12-3456789"));
        assert_eq!(info.ein.as_deref(), Some("12-3456789"));
    }

    #[test]
    fn extracts_vat() {
        let text = "VAT: GB123456789";
        let info = extract_tax_information(text).unwrap();
        assert_eq!(info.vat_number.as_deref(), Some("GB123456789"));
    }

    #[test]
    fn returns_none_when_nothing_matches() {
        assert!(extract_tax_information("Invoice #123\nTotal $50.00").is_none());
    }

    #[test]
    fn gst_au_takes_precedence_over_gstin_for_gst_number() {
        let text = "GST No: 51 824 753 556";
        let info = extract_tax_information(text).unwrap();
        assert_eq!(info.gst_number.as_deref(), Some("51 824 753 556"));
    }
}
