//! C3 — `build_supplier` and `build_buyer`.

use once_cell::sync::Lazy;
use regex::Regex;

use doc_extract_models::{Buyer, Contact, Supplier};

use crate::patterns::{EMAIL, PHONE, URL};
use crate::primitives::address::parse_address;
use crate::primitives::tax::extract_tax_information;

const BUYER_LABELS: &[&str] = &["Bill To", "Customer Name", "Customer", "Sold To", "Ship To"];

static BUYER_LABEL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:Bill\s+To|Customer\s+Name|Customer|Sold\s+To|Ship\s+To)\b").unwrap()
});

static BUYER_INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:Bill\s+To|Customer\s+Name|Customer|Sold\s+To|Ship\s+To)[:.]\s+(.+\S)\s*$").unwrap()
});

static ATTN_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*attn(?:ention)?[:.]\s*").unwrap());

/// A run of 8+ consecutive digits in the *original* string disqualifies a
/// phone candidate — that shape is characteristic of a store ID or
/// document number, not a formatted phone.
static LONG_DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{8,}").unwrap());

/// Builds the issuing-party record from a name hint (usually the first
/// non-empty header line) and the header text block.
#[must_use]
pub fn build_supplier(name_hint: Option<&str>, header_block: &str) -> Supplier {
    let name = name_hint.unwrap_or("").trim().to_string();
    let contact = extract_contact(header_block);
    let address = parse_address(header_block).unwrap_or_default();
    let tax_information = extract_tax_information(header_block);

    Supplier {
        name,
        address,
        contact,
        tax_information,
        coordinates: None,
    }
}

fn extract_contact(block: &str) -> Contact {
    let email = EMAIL.find(block).map(|m| m.as_str().to_string());
    let website = URL
        .find(block)
        .filter(|m| !m.as_str().contains('@'))
        .map(|m| m.as_str().to_string());

    let phone = select_phone_candidate(block);

    Contact {
        phone,
        email,
        website,
    }
}

/// A formatted candidate (carries `()-. ` and ≥10 digits, with no run of
/// 8+ consecutive digits in the source) wins over a bare digit run. This
/// keeps store IDs and document numbers like `20231120` from being read
/// as phones.
fn select_phone_candidate(block: &str) -> Option<String> {
    PHONE
        .find_iter(block)
        .map(|m| m.as_str())
        .filter(|candidate| {
            let digits = candidate.chars().filter(char::is_ascii_digit).count();
            let formatted = candidate.chars().any(|c| "()-. ".contains(c));
            formatted && digits >= 10 && !LONG_DIGIT_RUN.is_match(candidate)
        })
        .next()
        .or_else(|| {
            PHONE
                .find_iter(block)
                .map(|m| m.as_str())
                .find(|candidate| {
                    let digits = candidate.chars().filter(char::is_ascii_digit).count();
                    digits >= 7 && !LONG_DIGIT_RUN.is_match(candidate)
                })
        })
        .map(ToString::to_string)
}

/// Isolates the buyer block and builds a (possibly partial) [`Buyer`].
/// Returns `None` when no buyer label line is found at all.
#[must_use]
pub fn build_buyer(text: &str) -> Option<Buyer> {
    let lines: Vec<&str> = text.lines().collect();
    let label_idx = lines.iter().position(|l| BUYER_LABEL_LINE.is_match(l))?;

    let name = if let Some(caps) = BUYER_INLINE.captures(lines[label_idx]) {
        Some(strip_attn(&caps[1]))
    } else {
        lines[(label_idx + 1)..]
            .iter()
            .find(|l| !l.trim().is_empty() && !BUYER_LABEL_LINE.is_match(l))
            .map(|l| strip_attn(l.trim()))
    };

    let block: String = lines
        .iter()
        .skip(label_idx)
        .take(5)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    let address = parse_address(&block);
    let contact = {
        let c = extract_contact(&block);
        if c.is_empty() {
            None
        } else {
            Some(c)
        }
    };

    if name.is_none() && address.is_none() && contact.is_none() {
        return None;
    }

    Some(Buyer {
        name,
        address,
        contact,
    })
}

fn strip_attn(line: &str) -> String {
    ATTN_PREFIX.replace(line, "").trim().to_string()
}
