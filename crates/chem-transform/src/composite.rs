//! Multi-column derived fields.

use chem_model::{Diagnostic, DiagnosticCode, NoteOptions, RawRow};

use crate::coerce::{coerce, coerce_cell};
use crate::staged::Staged;

/// Join the non-empty values of `columns` in order.
///
/// Each empty column raises a warning and contributes nothing. The result is
/// `None` when every column is empty, so the field is omitted rather than
/// set to an empty string.
pub fn build_composite(
    row: &RawRow,
    columns: &[String],
    separator: &str,
) -> Staged<Option<String>> {
    let mut parts = Vec::with_capacity(columns.len());
    let mut diagnostics = Vec::new();
    for column in columns {
        let value = coerce_cell(row, column);
        if value.is_empty() {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticCode::MissingCompositePart,
                    format!("missing value for column '{column}'"),
                )
                .with_column(column.as_str()),
            );
            continue;
        }
        parts.push(value);
    }
    let joined = if parts.is_empty() {
        None
    } else {
        Some(parts.join(separator))
    };
    Staged::new(joined, diagnostics)
}

/// Render the notes text from the note columns present in the sheet.
///
/// Columns missing from the sheet are skipped; empty cells render as the
/// missing marker so the note keeps its fixed shape.
pub fn build_notes(row: &RawRow, options: &NoteOptions) -> String {
    options
        .columns
        .iter()
        .filter(|column| row.contains(column))
        .map(|column| {
            let value = coerce(row.get(column));
            if value.is_empty() {
                format!("{column}: {}", options.missing_marker)
            } else {
                format!("{column}: {value}")
            }
        })
        .collect::<Vec<_>>()
        .join(&options.separator)
}
