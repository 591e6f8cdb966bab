//! Configuration system: TOML file + CLI overrides + fail-fast validation.

#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::errors::{AmError, Result};

/// Loosely-typed configuration as read from a file or assembled from flags.
///
/// Nothing here is validated. [`ManifestOptions::from_raw`] turns it into the
/// immutable options used by the plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawManifestConfig {
    #[serde(alias = "output_file", skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    #[serde(alias = "public_path", skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,
    /// Anything other than a boolean is treated as unset.
    #[serde(
        alias = "no_hash",
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub no_hash: Option<bool>,
    /// Anything other than a boolean is treated as unset.
    #[serde(
        alias = "exclude_source_maps",
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub exclude_source_maps: Option<bool>,
    #[serde(alias = "asset_matcher", skip_serializing_if = "Option::is_none")]
    pub asset_matcher: Option<String>,
}

impl RawManifestConfig {
    /// Read a TOML config file. The path must exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AmError::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|source| AmError::io(path, source))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            output_file: overrides.output_file.or(self.output_file),
            public_path: overrides.public_path.or(self.public_path),
            no_hash: overrides.no_hash.or(self.no_hash),
            exclude_source_maps: overrides.exclude_source_maps.or(self.exclude_source_maps),
            asset_matcher: overrides.asset_matcher.or(self.asset_matcher),
        }
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Strict(bool),
        Other(IgnoredAny),
    }

    Ok(match Lenient::deserialize(deserializer)? {
        Lenient::Strict(value) => Some(value),
        Lenient::Other(_) => None,
    })
}

/// Validated, immutable manifest options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestOptions {
    output_file: PathBuf,
    public_path: String,
    no_hash: bool,
    exclude_source_maps: bool,
    asset_matcher: Option<String>,
}

impl ManifestOptions {
    /// Required fields only; everything else takes its default.
    pub fn new(output_file: impl Into<PathBuf>, public_path: impl Into<String>) -> Result<Self> {
        let output_file = output_file.into();
        let public_path = public_path.into();

        if output_file.as_os_str().is_empty() {
            return Err(AmError::invalid_config("output file required"));
        }
        if public_path.is_empty() {
            return Err(AmError::invalid_config("public path required"));
        }

        Ok(Self {
            output_file,
            public_path,
            no_hash: false,
            exclude_source_maps: true,
            asset_matcher: None,
        })
    }

    pub fn from_raw(raw: RawManifestConfig) -> Result<Self> {
        let output_file = raw
            .output_file
            .ok_or_else(|| AmError::invalid_config("output file required"))?;
        let public_path = raw
            .public_path
            .ok_or_else(|| AmError::invalid_config("public path required"))?;

        let mut options = Self::new(output_file, public_path)?;
        if let Some(no_hash) = raw.no_hash {
            options.no_hash = no_hash;
        }
        if let Some(exclude) = raw.exclude_source_maps {
            options.exclude_source_maps = exclude;
        }
        // An empty pattern counts as "not supplied".
        options.asset_matcher = raw.asset_matcher.filter(|pattern| !pattern.is_empty());
        Ok(options)
    }

    #[must_use]
    pub fn with_no_hash(mut self, no_hash: bool) -> Self {
        self.no_hash = no_hash;
        self
    }

    #[must_use]
    pub fn with_exclude_source_maps(mut self, exclude: bool) -> Self {
        self.exclude_source_maps = exclude;
        self
    }

    #[must_use]
    pub fn with_asset_matcher(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        self.asset_matcher = (!pattern.is_empty()).then_some(pattern);
        self
    }

    #[must_use]
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    #[must_use]
    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    #[must_use]
    pub const fn no_hash(&self) -> bool {
        self.no_hash
    }

    #[must_use]
    pub const fn exclude_source_maps(&self) -> bool {
        self.exclude_source_maps
    }

    /// User-supplied matcher pattern, if any.
    #[must_use]
    pub fn asset_matcher(&self) -> Option<&str> {
        self.asset_matcher.as_deref()
    }
}
