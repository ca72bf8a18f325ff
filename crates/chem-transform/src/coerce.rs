//! Cell value coercion.

use chem_model::RawRow;

/// Canonical text of a raw cell: trimmed, or empty for null-like input.
///
/// Total: every input maps to a string.
pub fn coerce(value: Option<&str>) -> String {
    match value {
        Some(text) => text.trim().to_string(),
        None => String::new(),
    }
}

/// Coerced value of a named column; absent columns coerce to empty.
pub fn coerce_cell(row: &RawRow, column: &str) -> String {
    coerce(row.get(column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn null_and_blank_are_empty() {
        assert_eq!(coerce(None), "");
        assert_eq!(coerce(Some("")), "");
        assert_eq!(coerce(Some(" \t ")), "");
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(coerce(Some("  4.2 ")), "4.2");
        assert_eq!(coerce(Some("Raum 12")), "Raum 12");
    }

    proptest! {
        #[test]
        fn coercion_is_idempotent(value in ".*") {
            let once = coerce(Some(&value));
            prop_assert_eq!(coerce(Some(&once)), once.clone());
            prop_assert_eq!(once.trim(), once.as_str());
        }
    }
}
