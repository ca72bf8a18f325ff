//! Tests for the xlsx table reader.

use std::path::Path;

use chem_ingest::{IngestError, TableReader, XlsxReader, read_xlsx_table};
use rust_xlsxwriter::Workbook;

fn write_inventory(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let headers = ["Umgang-Id", "Organisationseinheit", " Raum-Nr ", "Konzentration"];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *header)
            .expect("write header");
    }
    sheet.write_number(1, 0, 7.0).expect("write id");
    sheet.write_string(1, 1, "4.2").expect("write unit");
    sheet.write_string(1, 2, "E.12").expect("write room");
    sheet.write_string(1, 3, "5-10%").expect("write concentration");
    // Row 3 is left blank and must be skipped.
    sheet.write_string(3, 0, "0123").expect("write id");
    sheet.write_number(3, 3, 0.25).expect("write concentration");
    workbook.save(path).expect("save workbook");
}

#[test]
fn reads_rows_as_text_with_source_lines() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("inventory.xlsx");
    write_inventory(&path);

    let table = XlsxReader.read_table(&path).expect("read table");
    assert_eq!(
        table.headers,
        vec!["Umgang-Id", "Organisationseinheit", "Raum-Nr", "Konzentration"]
    );
    assert_eq!(table.len(), 2);

    let first = &table.rows[0];
    assert_eq!(first.line, 2);
    assert_eq!(first.get("Umgang-Id"), Some("7"));
    assert_eq!(first.get("Organisationseinheit"), Some("4.2"));
    assert_eq!(first.get("Raum-Nr"), Some("E.12"));
    assert_eq!(first.get("Konzentration"), Some("5-10%"));

    let second = &table.rows[1];
    assert_eq!(second.line, 4);
    assert_eq!(second.get("Umgang-Id"), Some("0123"));
    assert!(second.contains("Organisationseinheit"));
    assert_eq!(second.get("Organisationseinheit"), None);
    assert_eq!(second.get("Konzentration"), Some("0.25"));
}

#[test]
fn unreadable_workbook_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "not a zip archive").expect("write file");

    let error = read_xlsx_table(&path).expect_err("broken workbook");
    assert!(matches!(error, IngestError::Workbook { .. }));
    assert!(error.to_string().contains("broken.xlsx"));
}

#[test]
fn empty_sheet_yields_empty_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("empty.xlsx");
    let mut workbook = Workbook::new();
    let _ = workbook.add_worksheet();
    workbook.save(&path).expect("save workbook");

    let table = read_xlsx_table(&path).expect("read table");
    assert!(table.headers.is_empty());
    assert!(table.is_empty());
}
