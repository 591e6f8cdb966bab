//! Asset name normalization: recover the stable logical name of a hashed build
//! artifact, or decide that the artifact is left out of the manifest.

use std::fmt;

use crate::core::config::ManifestOptions;
use crate::core::errors::{AmError, Result};
use crate::matcher::AssetMatcher;
use crate::matcher::patterns::RegexAssetMatcher;

const SOURCE_MAP_SUFFIX: &str = ".map";

/// Outcome of normalizing one emitted filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedName {
    /// `"<name>.<ext>"` with the hash removed.
    Logical(String),
    /// Source map dropped by policy.
    Omit,
}

impl NormalizedName {
    /// The logical name, or `None` for [`NormalizedName::Omit`].
    #[must_use]
    pub fn logical(&self) -> Option<&str> {
        match self {
            Self::Logical(name) => Some(name),
            Self::Omit => None,
        }
    }
}

/// Applies an [`AssetMatcher`] and the source-map policy to emitted filenames.
pub struct NameNormalizer {
    matcher: Box<dyn AssetMatcher>,
    exclude_source_maps: bool,
}

impl fmt::Debug for NameNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameNormalizer")
            .field("matcher", &self.matcher.describe())
            .field("exclude_source_maps", &self.exclude_source_maps)
            .finish()
    }
}

impl NameNormalizer {
    pub fn new(matcher: impl AssetMatcher + 'static, exclude_source_maps: bool) -> Self {
        Self {
            matcher: Box::new(matcher),
            exclude_source_maps,
        }
    }

    /// Compile the matcher the options call for.
    pub fn from_options(options: &ManifestOptions) -> Result<Self> {
        let matcher = RegexAssetMatcher::for_options(options)?;
        Ok(Self::new(matcher, options.exclude_source_maps()))
    }

    /// Normalize one emitted filename.
    ///
    /// A filename the matcher rejects, or one whose `name` or `ext` capture is
    /// empty, is an error: it means the matcher is wrong for this build.
    pub fn normalize(&self, filename: &str) -> Result<NormalizedName> {
        let parts = self
            .matcher
            .captures(filename)
            .ok_or_else(|| AmError::NoMatch {
                asset: filename.to_string(),
            })?;

        if parts.name.is_empty() {
            return Err(AmError::MissingName {
                asset: filename.to_string(),
            });
        }
        if parts.ext.is_empty() {
            return Err(AmError::MissingExtension {
                asset: filename.to_string(),
            });
        }

        if self.exclude_source_maps && is_source_map(&parts.ext) {
            return Ok(NormalizedName::Omit);
        }

        Ok(NormalizedName::Logical(format!("{}.{}", parts.name, parts.ext)))
    }
}

fn is_source_map(ext: &str) -> bool {
    ext.to_ascii_lowercase().ends_with(SOURCE_MAP_SUFFIX)
}
