//! Standards directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "CHEM_STANDARDS_DIR";

/// File name of the parser profile inside the standards directory.
pub const PROFILE_FILE_NAME: &str = "profile.toml";

/// Get the standards directory override, if one is configured.
///
/// The built-in profile is used when this returns `None`.
pub fn standards_override() -> Option<PathBuf> {
    std::env::var_os(STANDARDS_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Path of the parser profile under a standards directory.
pub fn profile_path(root: &std::path::Path) -> PathBuf {
    root.join(PROFILE_FILE_NAME)
}
