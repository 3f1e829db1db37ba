//! Postal address and contact-channel value types.

use serde::{Deserialize, Serialize};

/// A postal address parsed from a multi-line OCR block.
///
/// Invariant: `full_address` is `Some` whenever any other component is
/// `Some`. Use [`Address::from_components`] to build one so the invariant
/// holds by construction instead of by caller discipline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    /// ISO-3166 alpha-2 country code where derivable (e.g. `"US"`, `"AU"`).
    pub country: Option<String>,
    pub full_address: Option<String>,
}

impl Address {
    /// Build an address from its parts, deriving `full_address` as the
    /// comma-joined list of non-empty components.
    #[must_use]
    pub fn from_components(
        street: Option<String>,
        city: Option<String>,
        state: Option<String>,
        postal_code: Option<String>,
        country: Option<String>,
    ) -> Self {
        let full_address = Self::join_components(&[
            street.as_deref(),
            city.as_deref(),
            state.as_deref(),
            postal_code.as_deref(),
        ]);

        Self {
            street,
            city,
            state,
            postal_code,
            country,
            full_address,
        }
    }

    /// An address carrying only a flattened string, as produced for a
    /// buyer block that never breaks cleanly into components.
    #[must_use]
    pub fn from_full_address(full_address: String) -> Self {
        Self {
            full_address: Some(full_address),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_address.is_none()
    }

    fn join_components(parts: &[Option<&str>]) -> Option<String> {
        let joined = parts
            .iter()
            .filter_map(|p| p.filter(|s| !s.trim().is_empty()))
            .collect::<Vec<_>>()
            .join(", ");

        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

/// Phone/email/website reachability for a supplier or buyer.
///
/// Invariant (enforced by the extractor, not this type): a populated
/// `phone` contains at least 7 digits once separators are stripped, spans
/// no newline, and never matches the US ZIP+4 shape `\d{5}-\d{4}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl Contact {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.website.is_none()
    }
}

/// Geographic coordinates for a supplier location.
///
/// Never populated by this crate: OCR text alone carries no geocoding
/// signal. The field exists so a caller who layers geocoding on top of a
/// `Supplier.address` has somewhere canonical to put the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
