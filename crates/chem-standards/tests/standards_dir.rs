//! Tests for the `CHEM_STANDARDS_DIR` override.
//!
//! Kept in its own test binary because it mutates the process environment.

use chem_standards::{
    PROFILE_FILE_NAME, STANDARDS_ENV_VAR, StandardsError, builtin_profile, load_default_profile,
};

#[test]
#[allow(unsafe_code)]
fn default_profile_follows_standards_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(
        dir.path().join(PROFILE_FILE_NAME),
        "[code]\nprefix = \"LAB\"\npad_width = 6\n",
    )
    .expect("write profile");

    // SAFETY: this binary runs no other test that reads the environment.
    unsafe { std::env::set_var(STANDARDS_ENV_VAR, dir.path()) };
    let overridden = load_default_profile();

    let empty = tempfile::tempdir().expect("empty dir");
    unsafe { std::env::set_var(STANDARDS_ENV_VAR, empty.path()) };
    let missing = load_default_profile();

    unsafe { std::env::set_var(STANDARDS_ENV_VAR, "") };
    let blank = load_default_profile();

    unsafe { std::env::remove_var(STANDARDS_ENV_VAR) };
    let unset = load_default_profile();

    let overridden = overridden.expect("override profile");
    assert_eq!(overridden.code.prefix, "LAB");
    assert_eq!(overridden.code.pad_width, 6);

    let error = missing.expect_err("profile missing from override dir");
    assert!(matches!(error, StandardsError::Io { .. }));

    let builtin = builtin_profile().expect("builtin profile");
    assert_eq!(blank.expect("blank override"), builtin);
    assert_eq!(unset.expect("no override"), builtin);
}
