//! Numeric field cleaning.
//!
//! Inventory exports write concentrations and densities as free text:
//! `< 5 %`, `0,8`, `5-10%`. Cleaning strips the percent and comparison
//! symbols and collapses anything holding a hyphen or en dash to `0.0`, so
//! `-5` counts as a range too. Otherwise the first run of digits
//! and separators is parsed with `,` accepted as decimal separator. A run
//! with more than one separator (`1.000,5`) is rejected rather than cut short.

use std::sync::LazyLock;

use chem_model::{Diagnostic, DiagnosticCode, NumericKind};
use regex::Regex;

/// Digits and decimal separators, starting at a digit or a leading separator.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,]?[0-9][0-9.,]*").expect("Invalid number regex"));

fn is_dash(ch: char) -> bool {
    matches!(ch, '-' | '–')
}

/// A cleaned value and the diagnostic raised while cleaning, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedNumber {
    pub value: Option<f64>,
    pub diagnostic: Option<Diagnostic>,
}

impl CleanedNumber {
    fn parsed(value: f64) -> Self {
        Self {
            value: Some(value),
            diagnostic: None,
        }
    }

    fn failed(code: DiagnosticCode, message: String) -> Self {
        Self {
            value: None,
            diagnostic: Some(Diagnostic::new(code, message)),
        }
    }
}

fn strip_symbols(text: &str) -> String {
    text.chars()
        .filter(|ch| !matches!(ch, '%' | '<' | '>'))
        .collect()
}

/// Clean a free-text numeric value.
pub fn clean_number(raw: Option<&str>) -> CleanedNumber {
    let Some(raw) = raw else {
        return CleanedNumber::failed(DiagnosticCode::NotText, "invalid: not text".to_string());
    };
    let original = raw.trim();
    let stripped = strip_symbols(original);

    if stripped.contains(is_dash) {
        return CleanedNumber {
            value: Some(0.0),
            diagnostic: Some(Diagnostic::new(
                DiagnosticCode::RangeCollapsed,
                format!("range detected in '{original}', set to 0"),
            )),
        };
    }

    let Some(found) = NUMBER.find(&stripped) else {
        return CleanedNumber::failed(
            DiagnosticCode::UnrecognizedNumber,
            format!("unrecognized format: '{original}'"),
        );
    };
    let separators = found.as_str().matches(['.', ',']).count();
    if separators > 1 {
        return CleanedNumber::failed(
            DiagnosticCode::UnrecognizedNumber,
            format!("unrecognized format: ambiguous separators in '{original}'"),
        );
    }
    match found.as_str().replace(',', ".").parse::<f64>() {
        Ok(value) => CleanedNumber::parsed(value),
        Err(_) => CleanedNumber::failed(
            DiagnosticCode::UnrecognizedNumber,
            format!("unrecognized format: invalid number in '{original}'"),
        ),
    }
}

/// Clean a value and flag it when it falls outside `expected`.
///
/// Out-of-range values are kept, not clamped.
pub fn clean_in_range(raw: Option<&str>, expected: Option<(f64, f64)>) -> CleanedNumber {
    let cleaned = clean_number(raw);
    let (Some(value), Some((low, high))) = (cleaned.value, expected) else {
        return cleaned;
    };
    if cleaned.diagnostic.is_none() && !(low..=high).contains(&value) {
        return CleanedNumber {
            value: Some(value),
            diagnostic: Some(Diagnostic::new(
                DiagnosticCode::OutOfRange,
                format!("value out of expected range [{low}, {high}]: {value}"),
            )),
        };
    }
    cleaned
}

/// Clean a designated numeric field according to its kind.
pub fn clean_field(raw: Option<&str>, kind: NumericKind) -> CleanedNumber {
    clean_in_range(raw, kind.expected_range())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_symbols_before_parsing() {
        assert_eq!(clean_number(Some("< 5 %")).value, Some(5.0));
        assert_eq!(clean_number(Some(">99.5%")).value, Some(99.5));
    }

    #[test]
    fn comma_is_a_decimal_separator() {
        let cleaned = clean_number(Some("0,789 g/cm³"));
        assert_eq!(cleaned.value, Some(0.789));
        assert_eq!(cleaned.diagnostic, None);
    }

    #[test]
    fn any_dash_collapses_to_zero() {
        for raw in ["-5", "ca. 5-", "5 – 10"] {
            let cleaned = clean_number(Some(raw));
            assert_eq!(cleaned.value, Some(0.0), "{raw}");
            assert_eq!(
                cleaned.diagnostic.map(|d| d.code),
                Some(DiagnosticCode::RangeCollapsed),
                "{raw}"
            );
        }
    }

    #[test]
    fn grouped_number_is_rejected_not_truncated() {
        let cleaned = clean_number(Some("1.000,5"));
        assert_eq!(cleaned.value, None);
        assert_eq!(
            cleaned.diagnostic.map(|d| d.code),
            Some(DiagnosticCode::UnrecognizedNumber)
        );
    }

    #[test]
    fn leading_separator_is_kept() {
        assert_eq!(clean_number(Some("ca. ,5 %")).value, Some(0.5));
    }
}
