#![deny(unsafe_code)]

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Missing,
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            Self::Missing => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, Self::from)
    }
}

/// One source row, addressable by column name.
///
/// `line` is the 1-based line in the source sheet (the header is line 1) and
/// only serves diagnostics.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RawRow {
    pub line: usize,
    pub cells: BTreeMap<String, CellValue>,
}

impl RawRow {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            cells: BTreeMap::new(),
        }
    }

    /// Builder used by readers and tests.
    #[must_use]
    pub fn with_cell(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column.to_string(), value.into());
        self
    }

    /// Whether the column exists in the source sheet, even if the cell is null.
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Raw text of a cell; `None` when the column is absent or the cell is null.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(CellValue::as_text)
    }
}

/// A fully read sheet: header names plus rows in source order.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl SourceTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
