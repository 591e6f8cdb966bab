//! Regex-backed asset matcher with the built-in hashed / unhashed patterns.

#![allow(missing_docs)]

use regex::Regex;

use crate::core::config::ManifestOptions;
use crate::core::errors::{AmError, Result};
use crate::matcher::{AssetMatcher, AssetParts};

/// `bundle.js`, `bundle.min.js`. Character classes spell out both cases so the
/// match stays ASCII-only.
pub const UNHASHED_PATTERN: &str =
    r"^(?P<name>[0-9A-Za-z_-]+)\.(?P<ext>(?:[A-Za-z]+\.?){1,2})$";

/// `bundle.a1b2c3.js`, `bundle.a1b2c3.min.js`.
pub const HASHED_PATTERN: &str =
    r"^(?P<name>[0-9A-Za-z_-]+)\.(?P<hash>[0-9A-Za-z]+)\.(?P<ext>(?:[A-Za-z]+\.?){1,2})$";

const REQUIRED_GROUPS: [&str; 2] = ["name", "ext"];

/// Asset matcher over a compiled regex with `name`, optional `hash`, and `ext`
/// named groups.
#[derive(Debug, Clone)]
pub struct RegexAssetMatcher {
    regex: Regex,
}

impl RegexAssetMatcher {
    /// Compile a user pattern. It must declare `name` and `ext` groups.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|err| {
            AmError::invalid_config(format!("invalid asset matcher {pattern:?}: {err}"))
        })?;

        let declared: Vec<&str> = regex.capture_names().flatten().collect();
        for group in REQUIRED_GROUPS {
            if !declared.contains(&group) {
                return Err(AmError::invalid_config(format!(
                    "asset matcher {pattern:?} has no named group `{group}`"
                )));
            }
        }

        Ok(Self { regex })
    }

    /// Built-in pattern for filenames that carry a content hash.
    pub fn hashed() -> Result<Self> {
        Self::new(HASHED_PATTERN)
    }

    /// Built-in pattern for filenames without a content hash.
    pub fn unhashed() -> Result<Self> {
        Self::new(UNHASHED_PATTERN)
    }

    /// The user's pattern when given, otherwise the built-in one picked by `no_hash`.
    pub fn for_options(options: &ManifestOptions) -> Result<Self> {
        match options.asset_matcher() {
            Some(pattern) => Self::new(pattern),
            None if options.no_hash() => Self::unhashed(),
            None => Self::hashed(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl AssetMatcher for RegexAssetMatcher {
    fn captures(&self, filename: &str) -> Option<AssetParts> {
        let caps = self.regex.captures(filename)?;
        let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        Some(AssetParts {
            name: group("name").unwrap_or_default(),
            hash: group("hash"),
            ext: group("ext").unwrap_or_default(),
        })
    }

    fn describe(&self) -> String {
        format!("regex {}", self.regex.as_str())
    }
}
