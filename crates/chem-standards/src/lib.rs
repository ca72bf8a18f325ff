#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod paths;

pub use crate::error::StandardsError;
pub use crate::loader::{
    builtin_profile, load_default_profile, load_profile, parse_profile, profile_to_toml,
    validate_profile,
};
pub use crate::paths::{PROFILE_FILE_NAME, STANDARDS_ENV_VAR};
