#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML profile {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize profile: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid profile: {message}")]
    InvalidProfile { message: String },

    #[error("invalid product category code in allow-list: {code}")]
    InvalidCategoryCode { code: String },

    #[error("duplicate mapping target: {target}")]
    DuplicateTarget { target: String },

    #[error("mapping target {target} collides with a derived field")]
    ReservedTarget { target: String },

    #[error("numeric field {target} is not a mapping target")]
    UnmappedNumericField { target: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidProfile {
            message: message.into(),
        }
    }
}
