#![forbid(unsafe_code)]

//! Asset manifest generator: a build post-processing step that maps stable,
//! hash-free asset names to the public paths a build actually emitted.
//!
//! Pipeline:
//! 1. **Matcher**: split each emitted filename into name / hash / extension
//! 2. **Normalizer**: drop the hash, or leave source maps out entirely
//! 3. **Manifest**: collect `name → publicPath/filename`, fingerprint, write
//!
//! # Library usage
//!
//! ```rust,no_run
//! use asset_manifest::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let options = ManifestOptions::new("dist/manifest.json", "/static/")?;
//! let mut host = ManualBuildHost::new();
//! AssetManifestPlugin::new(options)?.apply(&mut host);
//! host.complete(&BuildOutput::new(["bundle.abc123.js"]))?;
//! # Ok(())
//! # }
//! ```

pub mod prelude;

pub mod core;
pub mod logger;
pub mod manifest;
pub mod matcher;
pub mod plugin;
