//! C3 — `parse_address`.

use once_cell::sync::Lazy;
use regex::Regex;

use doc_extract_models::Address;

use crate::patterns::{AU_SUBURB_STATE_POSTCODE, US_CITY_STATE_ZIP, US_ZIP};

const AU_STATES: &[&str] = &["NSW", "VIC", "QLD", "WA", "SA", "TAS", "ACT", "NT"];

/// Curated country-name → ISO-3166 alpha-2 map. The bare token `au` is
/// deliberately excluded (it false-positives on words like "auto").
static COUNTRY_NAMES: &[(&str, &str)] = &[
    ("united states", "US"),
    ("usa", "US"),
    ("australia", "AU"),
    ("united kingdom", "GB"),
    ("canada", "CA"),
    ("new zealand", "NZ"),
    ("germany", "DE"),
    ("france", "FR"),
    ("spain", "ES"),
    ("italy", "IT"),
];

static STREET_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\s+\S").unwrap());

/// Extracts street, city, state/region, postal code, and country from a
/// multi-line address block. `full_address` is always the comma-joined
/// non-empty components when any component was found.
#[must_use]
pub fn parse_address(block: &str) -> Option<Address> {
    let lines: Vec<&str> = block.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        return None;
    }
    let lowered = block.to_lowercase();

    let mut city = None;
    let mut state = None;
    let mut postal_code = None;
    let mut country = None;

    let mut au_signal = false;
    let mut us_signal = false;

    if let Some(caps) = AU_SUBURB_STATE_POSTCODE.captures(block) {
        city = Some(caps[1].trim().to_string());
        state = Some(caps[2].to_string());
        postal_code = Some(caps[3].to_string());
        country = Some("AU".to_string());
        au_signal = true;
    }

    for (name, code) in COUNTRY_NAMES {
        if *name == "au" {
            continue;
        }
        if lowered.contains(name) {
            country = Some((*code).to_string());
            if *code == "AU" {
                au_signal = true;
            }
            break;
        }
    }

    if let Some(caps) = US_CITY_STATE_ZIP.captures(block) {
        let candidate_state = caps[2].to_string();
        let is_au_state = AU_STATES.contains(&candidate_state.as_str());
        if !is_au_state {
            us_signal = true;
            if city.is_none() {
                city = Some(caps[1].trim().to_string());
            }
            if !au_signal {
                state = Some(candidate_state);
                postal_code = Some(caps[3].to_string());
            }
        }
    } else if let Some(m) = US_ZIP.find(block) {
        us_signal = true;
        if postal_code.is_none() {
            postal_code = Some(m.as_str().to_string());
        }
    }

    // Both AU and US signals present, and the captured state isn't an AU
    // state: US wins.
    if au_signal && us_signal {
        if let Some(ref s) = state {
            if !AU_STATES.contains(&s.as_str()) {
                country = Some("US".to_string());
            }
        }
    }

    let street = lines
        .iter()
        .find(|l| STREET_LINE.is_match(l) && l.len() > 5)
        .map(|l| (*l).to_string());

    let address = Address::from_components(street, city, state, postal_code, country);
    if address.is_empty() {
        None
    } else {
        Some(address)
    }
}
