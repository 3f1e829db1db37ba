//! C3 — `extract_dates`: labeled invoice/due/transaction dates.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::patterns::{DATE_ISO, DATE_LONG, DATE_LONG_REV, DATE_NUMERIC};

static DUE_DATE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:due\s+date|payment\s+due|pay\s+by)\b").unwrap());
static TRANSACTION_DATE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:transaction|sale|purchase|order)\s+date\b").unwrap());
static INVOICE_DATE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:invoice\s+date|date\s+issued|issued|date)\b").unwrap());

/// The three labeled dates an assembler cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractedDates {
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub transaction_date: Option<NaiveDate>,
}

/// Looks up the three labeled dates. Ambiguous `MM/DD/YYYY` vs
/// `DD/MM/YYYY` numeric dates are resolved day-first regardless of the
/// first component's value — see [`resolve_numeric_date`] for why both
/// branches of the rule land on the same answer; this is a preserved,
/// documented quirk (see `DESIGN.md`), not a bug.
#[must_use]
pub fn extract_dates(lines: &[&str]) -> ExtractedDates {
    let due_date = find_labeled_date(lines, &DUE_DATE_LABEL, |_| true);
    let transaction_date = find_labeled_date(lines, &TRANSACTION_DATE_LABEL, |_| true);
    // The bare "date" alternative in the invoice-date label list would
    // otherwise also fire on "Due Date: ..." / "Order Date: ..." lines,
    // so those are excluded here rather than claimed twice.
    let invoice_date = find_labeled_date(lines, &INVOICE_DATE_LABEL, |line| {
        !DUE_DATE_LABEL.is_match(line) && !TRANSACTION_DATE_LABEL.is_match(line)
    });

    ExtractedDates {
        invoice_date,
        due_date,
        transaction_date,
    }
}

fn find_labeled_date(
    lines: &[&str],
    label: &Regex,
    accept_line: impl Fn(&str) -> bool,
) -> Option<NaiveDate> {
    for line in lines {
        if !accept_line(line) {
            continue;
        }
        let Some(m) = label.find(line) else { continue };
        if let Some(date) = parse_any_date_token(&line[m.end()..]) {
            return Some(date);
        }
        // Label and value occasionally swap order on noisy OCR lines.
        if let Some(date) = parse_any_date_token(&line[..m.start()]) {
            return Some(date);
        }
    }
    None
}

/// Try every known date shape against a fragment of text, in the order
/// the pattern library is documented: ISO, then long-form (both
/// orientations), then ambiguous numeric.
#[must_use]
pub fn parse_any_date_token(fragment: &str) -> Option<NaiveDate> {
    if let Some(caps) = DATE_ISO.captures(fragment) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_LONG.captures(fragment) {
        let month = parse_month_name(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_LONG_REV.captures(fragment) {
        let day: u32 = caps[1].parse().ok()?;
        let month = parse_month_name(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_NUMERIC.captures(fragment) {
        let a: u32 = caps[1].parse().ok()?;
        let b: u32 = caps[2].parse().ok()?;
        let year = expand_two_digit_year(&caps[3])?;
        return resolve_numeric_date(a, b, year);
    }

    None
}

fn expand_two_digit_year(raw: &str) -> Option<i32> {
    let value: i32 = raw.parse().ok()?;
    if raw.len() <= 2 {
        Some(2000 + value)
    } else {
        Some(value)
    }
}

/// The ambiguous-date heuristic: "first component > 12 ⇒ day-first;
/// otherwise assume day-first (international bias)". Both branches choose
/// day-first, so the result is day-first unconditionally — kept verbatim
/// rather than "fixed" to US month-first convention; see `DESIGN.md`.
fn resolve_numeric_date(first: u32, second: u32, year: i32) -> Option<NaiveDate> {
    // Both branches of the rule ("first > 12 ⇒ day-first; otherwise also
    // day-first") resolve to the same assignment: day is always the first
    // component, month the second. A deliberately preserved quirk, not a
    // simplification bug.
    let (day, month) = (first, second);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_month_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let month = match &lower[..3.min(lower.len())] {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
