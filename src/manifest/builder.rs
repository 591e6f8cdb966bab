//! Turns one build's emitted filenames into a sealed [`Manifest`].

use indexmap::IndexMap;

use crate::core::config::ManifestOptions;
use crate::core::errors::Result;
use crate::core::paths::join_public_path;
use crate::manifest::Manifest;
use crate::matcher::normalizer::{NameNormalizer, NormalizedName};

/// Result of one manifest build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub manifest: Manifest,
    /// Emitted filenames dropped by the source-map policy, in input order.
    pub omitted: Vec<String>,
}

/// Stateless manifest builder; every call starts from an empty asset map.
#[derive(Debug)]
pub struct ManifestBuilder {
    public_path: String,
    normalizer: NameNormalizer,
}

impl ManifestBuilder {
    pub fn new(public_path: impl Into<String>, normalizer: NameNormalizer) -> Self {
        Self {
            public_path: public_path.into(),
            normalizer,
        }
    }

    pub fn from_options(options: &ManifestOptions) -> Result<Self> {
        Ok(Self::new(
            options.public_path(),
            NameNormalizer::from_options(options)?,
        ))
    }

    #[must_use]
    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    /// Build a manifest from filenames in the order the build tool emitted them.
    ///
    /// A later filename with the same logical name replaces the earlier path.
    /// The first matcher error aborts the whole build.
    pub fn build<I, S>(&self, filenames: I) -> Result<BuildReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut assets = IndexMap::new();
        let mut omitted = Vec::new();

        for filename in filenames {
            let filename = filename.as_ref();
            match self.normalizer.normalize(filename)? {
                NormalizedName::Logical(name) => {
                    assets.insert(name, join_public_path(&self.public_path, filename));
                }
                NormalizedName::Omit => omitted.push(filename.to_string()),
            }
        }

        let manifest = Manifest::seal(self.public_path.clone(), assets)?;
        Ok(BuildReport { manifest, omitted })
    }
}
