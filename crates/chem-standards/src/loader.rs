//! Loading and validation of parser profiles.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use chem_model::ParserProfile;
use regex::Regex;
use tracing::debug;

use crate::error::StandardsError;
use crate::paths::{profile_path, standards_override};

/// Profile shipped with the workspace under `standards/profile.toml`.
const BUILTIN_PROFILE: &str = include_str!("../../../standards/profile.toml");

/// A complete allow-list entry: `PC`, digits, at most one trailing letter.
static CATEGORY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^PC[0-9]+[A-Z]?$").expect("Invalid category code regex"));

/// Parse and validate a profile from TOML text.
///
/// `origin` only labels errors.
pub fn parse_profile(text: &str, origin: &Path) -> Result<ParserProfile, StandardsError> {
    let profile: ParserProfile = toml::from_str(text).map_err(|source| StandardsError::Toml {
        path: origin.to_path_buf(),
        source,
    })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Load and validate a profile file.
pub fn load_profile(path: &Path) -> Result<ParserProfile, StandardsError> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let profile = parse_profile(&text, path)?;
    debug!(path = %path.display(), mappings = profile.mapping.len(), "loaded parser profile");
    Ok(profile)
}

/// Load the profile from `CHEM_STANDARDS_DIR` when set, else the built-in one.
pub fn load_default_profile() -> Result<ParserProfile, StandardsError> {
    match standards_override() {
        Some(root) => load_profile(&profile_path(&root)),
        None => builtin_profile(),
    }
}

/// The built-in profile, independent of the environment.
pub fn builtin_profile() -> Result<ParserProfile, StandardsError> {
    parse_profile(BUILTIN_PROFILE, Path::new("<builtin>/profile.toml"))
}

/// Render a profile back to TOML.
pub fn profile_to_toml(profile: &ParserProfile) -> Result<String, StandardsError> {
    Ok(toml::to_string_pretty(profile)?)
}

/// Check the cross-table constraints serde cannot express.
pub fn validate_profile(profile: &ParserProfile) -> Result<(), StandardsError> {
    if profile.code.pad_width == 0 {
        return Err(StandardsError::invalid("code.pad_width must be at least 1"));
    }
    if profile.columns.handling_id.trim().is_empty() {
        return Err(StandardsError::invalid(
            "columns.handling_id must name a column",
        ));
    }
    if profile.columns.organizational_unit.trim().is_empty() {
        return Err(StandardsError::invalid(
            "columns.organizational_unit must name a column",
        ));
    }
    if profile.columns.product_category.trim().is_empty() {
        return Err(StandardsError::invalid(
            "columns.product_category must name a column",
        ));
    }
    if profile.responsible_column().trim().is_empty() {
        return Err(StandardsError::invalid(
            "identity must name the selected responsible column",
        ));
    }
    if profile.files.extensions.is_empty() {
        return Err(StandardsError::invalid(
            "files.extensions must list at least one extension",
        ));
    }

    for code in &profile.product_category.allowed {
        if !CATEGORY_CODE.is_match(code.trim()) {
            return Err(StandardsError::InvalidCategoryCode { code: code.clone() });
        }
    }

    let mut targets = BTreeSet::new();
    for mapping in &profile.mapping {
        let target = mapping.target.as_str();
        if ParserProfile::DERIVED_FIELDS.contains(&target) {
            return Err(StandardsError::ReservedTarget {
                target: target.to_string(),
            });
        }
        if !targets.insert(target) {
            return Err(StandardsError::DuplicateTarget {
                target: target.to_string(),
            });
        }
    }

    for target in profile.numeric.keys() {
        if !targets.contains(target.as_str()) {
            return Err(StandardsError::UnmappedNumericField {
                target: target.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profile_matches_defaults() {
        let profile = builtin_profile().expect("builtin profile");
        assert_eq!(profile, ParserProfile::default());
    }

    #[test]
    fn partial_profile_uses_defaults() {
        let profile = parse_profile("[code]\npad_width = 6\n", Path::new("partial.toml"))
            .expect("partial profile");
        assert_eq!(profile.code.pad_width, 6);
        assert_eq!(profile.code.prefix, "CHEM");
        assert_eq!(profile.columns.handling_id, "Umgang-Id");
    }
}
