//! Tests for input file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use chem_ingest::{IngestError, expand_inputs, is_supported, list_input_files};
use chem_model::FileOptions;

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "placeholder").expect("write file");
    path
}

#[test]
fn lists_supported_files_sorted() {
    let dir = tempfile::tempdir().expect("temp dir");
    let _ = touch(dir.path(), "b_inventory.xlsx");
    let _ = touch(dir.path(), "a_inventory.XLSX");
    let _ = touch(dir.path(), "notes.csv");
    let _ = touch(dir.path(), "~$a_inventory.xlsx");
    fs::create_dir(dir.path().join("nested.xlsx")).expect("create dir");

    let files = list_input_files(dir.path(), &FileOptions::default()).expect("list files");
    let names: Vec<_> = files
        .iter()
        .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
        .collect();
    assert_eq!(names, vec!["a_inventory.XLSX", "b_inventory.xlsx"]);
}

#[test]
fn missing_directory_is_an_error() {
    let error = list_input_files(Path::new("no/such/dir"), &FileOptions::default())
        .expect_err("missing dir");
    assert!(matches!(error, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn explicit_files_are_kept_even_when_unsupported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let csv = touch(dir.path(), "export.csv");
    let xlsx = touch(dir.path(), "export.xlsx");
    let sub = dir.path().join("more");
    fs::create_dir(&sub).expect("create dir");
    let nested = touch(&sub, "inventory.xlsx");

    let files = expand_inputs(
        &[csv.clone(), sub.clone(), xlsx.clone()],
        &FileOptions::default(),
    )
    .expect("expand");
    assert_eq!(files, vec![csv, nested, xlsx]);
}

#[test]
fn extension_check_is_case_insensitive() {
    let options = FileOptions::default();
    assert!(is_supported(Path::new("Inventar.XLSX"), &options));
    assert!(!is_supported(Path::new("Inventar.xls"), &options));
    assert!(!is_supported(Path::new("Inventar"), &options));
}
