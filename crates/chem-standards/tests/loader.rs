//! Tests for parser profile loading and validation.

use std::path::Path;

use chem_model::{ColumnMapping, NumericKind, ParserProfile, ResponsibleSource};
use chem_standards::{
    StandardsError, builtin_profile, load_profile, parse_profile, profile_to_toml,
    validate_profile,
};

#[test]
fn loads_profile_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("profile.toml");
    std::fs::write(
        &path,
        r#"
[identity]
responsible_source = "coordinator"

[[mapping]]
source = "Reinheit"
target = "purity"

[numeric]
purity = "percentage"
"#,
    )
    .expect("write profile");

    let profile = load_profile(&path).expect("load profile");
    assert_eq!(
        profile.identity.responsible_source,
        ResponsibleSource::Coordinator
    );
    assert_eq!(profile.responsible_column(), "Gefahrstoffkoordinator*in");
    assert_eq!(profile.mapping, vec![ColumnMapping::new("Reinheit", "purity")]);
    assert_eq!(profile.numeric_kind("purity"), Some(NumericKind::Percentage));
    assert_eq!(profile.numeric_kind("concentration"), None);
}

#[test]
fn missing_file_reports_path() {
    let error = load_profile(Path::new("does/not/exist.toml")).expect_err("missing file");
    assert!(matches!(error, StandardsError::Io { .. }));
    assert!(error.to_string().contains("does/not/exist.toml"));
}

#[test]
fn malformed_toml_is_rejected() {
    let error = parse_profile("[code\npad_width = 4", Path::new("broken.toml"))
        .expect_err("malformed toml");
    assert!(matches!(error, StandardsError::Toml { .. }));
}

#[test]
fn zero_pad_width_is_rejected() {
    let profile = ParserProfile::default().with_pad_width(0);
    let error = validate_profile(&profile).expect_err("zero width");
    assert!(matches!(error, StandardsError::InvalidProfile { .. }));
}

#[test]
fn responsible_column_names_are_configurable() {
    let profile = parse_profile(
        "[identity]\nresponsible_source = \"coordinator\"\ncoordinator_column = \"GSK\"\n",
        Path::new("identity.toml"),
    )
    .expect("identity profile");
    assert_eq!(profile.responsible_column(), "GSK");
    assert_eq!(profile.identity.applicant_column, "AntragstellerIn");
}

#[test]
fn selected_responsible_column_must_be_named() {
    let mut profile = ParserProfile::default();
    profile.identity.coordinator_column = " ".to_string();
    assert!(validate_profile(&profile).is_ok());

    let profile = profile.with_responsible_source(ResponsibleSource::Coordinator);
    let error = validate_profile(&profile).expect_err("blank column");
    assert!(matches!(error, StandardsError::InvalidProfile { .. }));
}

#[test]
fn allow_list_entries_must_be_codes() {
    let mut profile = ParserProfile::default();
    profile.product_category.allowed.push("Reinigungsmittel".to_string());
    let error = validate_profile(&profile).expect_err("bad code");
    assert!(matches!(
        error,
        StandardsError::InvalidCategoryCode { code } if code == "Reinigungsmittel"
    ));
}

#[test]
fn mapping_cannot_target_derived_fields() {
    let mut profile = ParserProfile::default();
    profile.mapping.push(ColumnMapping::new("Bemerkung", "notes"));
    let error = validate_profile(&profile).expect_err("reserved target");
    assert!(matches!(error, StandardsError::ReservedTarget { target } if target == "notes"));
}

#[test]
fn duplicate_targets_are_rejected() {
    let mut profile = ParserProfile::default();
    profile.mapping.push(ColumnMapping::new("Name", "name"));
    let error = validate_profile(&profile).expect_err("duplicate target");
    assert!(matches!(error, StandardsError::DuplicateTarget { target } if target == "name"));
}

#[test]
fn numeric_fields_must_be_mapped() {
    let mut profile = ParserProfile::default();
    profile.mapping.retain(|mapping| mapping.target != "density");
    let error = validate_profile(&profile).expect_err("unmapped numeric");
    assert!(matches!(
        error,
        StandardsError::UnmappedNumericField { target } if target == "density"
    ));
}

#[test]
fn profile_survives_toml_rendering() {
    let profile = builtin_profile().expect("builtin profile");
    let text = profile_to_toml(&profile).expect("render toml");
    let reparsed = parse_profile(&text, Path::new("rendered.toml")).expect("reparse");
    assert_eq!(reparsed, profile);
}
