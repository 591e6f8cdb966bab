//! AM-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, AmError>;

/// Top-level error type for asset manifest generation.
#[derive(Debug, Error)]
pub enum AmError {
    #[error("[AM-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[AM-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[AM-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[AM-2001] invalid asset matcher for {asset}")]
    NoMatch { asset: String },

    #[error("[AM-2002] unable to find name for {asset}")]
    MissingName { asset: String },

    #[error("[AM-2003] unable to find extension for {asset}")]
    MissingExtension { asset: String },

    #[error("[AM-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[AM-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[AM-3003] emitted filename is not valid UTF-8: {path}")]
    NonUtf8Name { path: PathBuf },
}

impl AmError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "AM-1001",
            Self::MissingConfig { .. } => "AM-1002",
            Self::ConfigParse { .. } => "AM-1003",
            Self::NoMatch { .. } => "AM-2001",
            Self::MissingName { .. } => "AM-2002",
            Self::MissingExtension { .. } => "AM-2003",
            Self::Serialization { .. } => "AM-2101",
            Self::Io { .. } => "AM-3002",
            Self::NonUtf8Name { .. } => "AM-3003",
        }
    }

    /// Whether the failure came from applying the asset matcher to one filename.
    #[must_use]
    pub const fn is_matcher_error(&self) -> bool {
        matches!(
            self,
            Self::NoMatch { .. } | Self::MissingName { .. } | Self::MissingExtension { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Convenience constructor for configuration validation failures.
    #[must_use]
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }
}

impl From<serde_json::Error> for AmError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for AmError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
