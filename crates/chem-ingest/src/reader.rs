//! Spreadsheet row reading.
//!
//! The reader exposes the first worksheet as a [`SourceTable`]: the first
//! non-empty row is the header and every cell is rendered as text, so no type
//! inference leaks into the transformation rules.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use chem_model::{CellValue, RawRow, SourceTable};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Source of tables for the batch pipeline.
pub trait TableReader {
    fn read_table(&self, path: &Path) -> Result<SourceTable>;
}

/// Reads `.xlsx` workbooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReader;

impl TableReader for XlsxReader {
    fn read_table(&self, path: &Path) -> Result<SourceTable> {
        read_xlsx_table(path)
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Render one cell as text; empty, error and non-finite cells are null.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::Float(value) if !value.is_finite() => CellValue::Missing,
        Data::String(value) => CellValue::Text(value.trim_matches('\u{feff}').to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::String(value) => value.trim().is_empty(),
        other => matches!(cell_value(other), CellValue::Missing),
    })
}

/// Read the first worksheet of an `.xlsx` workbook.
pub fn read_xlsx_table(path: &Path) -> Result<SourceTable> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|source| IngestError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    // Absolute 0-based sheet row of the first row in the used range
    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows = range
        .rows()
        .enumerate()
        .filter(|(_, row)| !is_blank_row(row));

    let Some((_, header_row)) = rows.next() else {
        return Ok(SourceTable::default());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header(&cell.to_string()))
        .collect();

    let mut table = SourceTable::new(headers.clone());
    for (offset, record) in rows {
        let mut row = RawRow::new(first_row + offset + 1);
        for (idx, header) in headers.iter().enumerate() {
            if header.is_empty() || row.contains(header) {
                continue;
            }
            let value = record.get(idx).map_or(CellValue::Missing, cell_value);
            row.cells.insert(header.clone(), value);
        }
        table.push_row(row);
    }

    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.len(),
        "read worksheet"
    );
    Ok(table)
}
