//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use asset_manifest::prelude::*;
//! ```

// Core
pub use crate::core::config::{ManifestOptions, RawManifestConfig};
pub use crate::core::errors::{AmError, Result};

// Matching
pub use crate::matcher::normalizer::{NameNormalizer, NormalizedName};
pub use crate::matcher::patterns::RegexAssetMatcher;
pub use crate::matcher::{AssetMatcher, AssetParts};

// Manifest
pub use crate::manifest::Manifest;
pub use crate::manifest::builder::{BuildReport, ManifestBuilder};
pub use crate::manifest::writer::{FsManifestWriter, ManifestWriter};

// Plugin
pub use crate::plugin::AssetManifestPlugin;
pub use crate::plugin::host::{BuildHost, BuildOutput, ManualBuildHost};
