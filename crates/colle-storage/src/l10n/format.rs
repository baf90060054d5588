//! Locale-aware rendering of money, dates, and phone numbers.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use super::Language;

/// Non-breaking space used by the French money format for digit grouping and
/// before the currency symbol.
const NBSP: char = '\u{a0}';

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_FR: [&str; 12] = [
    "janv.", "f\u{e9}vr.", "mars", "avr.", "mai", "juin", "juil.", "ao\u{fb}t", "sept.", "oct.",
    "nov.", "d\u{e9}c.",
];

/// Renders a dollar amount for on-screen copy.
///
/// English puts the symbol first with comma grouping (`$1,234.56`); French
/// groups with non-breaking spaces, uses a decimal comma, and trails the
/// symbol after a non-breaking space (`1 234,56 $`).
pub fn format_currency(amount: Decimal, language: Language, precision: u32) -> String {
    let rounded = amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative();
    let text = format!("{:.*}", precision as usize, rounded.abs());
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + 6);
    if negative {
        out.push('-');
    }
    match language {
        Language::En => {
            out.push('$');
            push_grouped(&mut out, whole, ',');
            if let Some(fraction) = fraction {
                out.push('.');
                out.push_str(fraction);
            }
        }
        Language::Fr => {
            push_grouped(&mut out, whole, NBSP);
            if let Some(fraction) = fraction {
                out.push(',');
                out.push_str(fraction);
            }
            out.push(NBSP);
            out.push('$');
        }
    }
    out
}

/// Renders a dollar amount for a document form field.
///
/// Always two decimals with a period separator and no grouping, regardless of
/// the document language, so filled values stay machine-comparable.
pub fn format_money_for_document(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Normalizes a ten-digit North American phone number to `AAA-BBB-CCCC`.
///
/// A leading country code `1` is dropped. Any other shape is returned as
/// typed (trimmed), never rejected.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let national = match digits.strip_prefix('1') {
        Some(rest) if digits.len() == 11 => rest,
        _ => digits.as_str(),
    };
    if national.len() == 10 {
        format!("{}-{}-{}", &national[..3], &national[3..6], &national[6..])
    } else {
        raw.trim().to_string()
    }
}

/// Renders a calendar date as `17 Oct 2025` / `17 oct. 2025`.
pub fn format_date(date: NaiveDate, language: Language) -> String {
    let months = match language {
        Language::En => &MONTHS_EN,
        Language::Fr => &MONTHS_FR,
    };
    format!(
        "{} {} {}",
        date.day(),
        months[date.month0() as usize],
        date.year()
    )
}

/// Renders an inclusive date span, e.g. `17 Oct 2025 \u{2013} 26 Apr 2026`.
pub fn format_date_range(start: NaiveDate, end: NaiveDate, language: Language) -> String {
    format!(
        "{} \u{2013} {}",
        format_date(start, language),
        format_date(end, language)
    )
}

fn push_grouped(out: &mut String, digits: &str, separator: char) {
    let len = digits.len();
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
}
