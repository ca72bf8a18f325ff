//! Hazard flag aggregation.

use chem_model::RawRow;

use crate::coerce::coerce_cell;

/// True when any hazard indicator column holds a value.
pub fn aggregate_hazard(row: &RawRow, columns: &[String]) -> bool {
    columns
        .iter()
        .any(|column| !coerce_cell(row, column).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chem_model::CellValue;
    use proptest::prelude::*;

    fn columns() -> Vec<String> {
        ["H-Sätze", "EUH-Sätze", "P-Sätze", "CMR"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn any_non_empty_indicator_flags_row() {
        let row = RawRow::new(2)
            .with_cell("H-Sätze", "  ")
            .with_cell("CMR", "K1B");
        assert!(aggregate_hazard(&row, &columns()));
    }

    #[test]
    fn blank_and_missing_indicators_do_not_flag() {
        let row = RawRow::new(2)
            .with_cell("H-Sätze", "")
            .with_cell("P-Sätze", CellValue::Missing);
        assert!(!aggregate_hazard(&row, &columns()));
        assert!(!aggregate_hazard(&row, &[]));
    }

    proptest! {
        #[test]
        fn adding_a_value_never_clears_the_flag(
            value in "[A-Za-z0-9 ]{0,8}",
            extra in "[A-Z][0-9]{3}",
        ) {
            let row = RawRow::new(2).with_cell("H-Sätze", value.as_str());
            let before = aggregate_hazard(&row, &columns());
            let row = row.with_cell("CMR", extra.as_str());
            prop_assert!(aggregate_hazard(&row, &columns()));
            prop_assert!(before <= aggregate_hazard(&row, &columns()));
        }
    }
}
