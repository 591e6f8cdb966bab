//! Manifest model, builder, fingerprint and writer.

pub mod builder;
pub mod fingerprint;
pub mod writer;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::errors::Result;

/// The JSON document consumers read: logical name → public path.
///
/// Serialized field order is `publicPath`, `assets`, `hash`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub public_path: String,
    /// Insertion-ordered; an overwritten key keeps its first position.
    pub assets: IndexMap<String, String>,
    /// Fingerprint of the compact `{publicPath, assets}` serialization.
    pub hash: String,
}

/// The fingerprinted part of a manifest, i.e. everything except `hash`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestBody<'a> {
    public_path: &'a str,
    assets: &'a IndexMap<String, String>,
}

impl Manifest {
    /// Seal a body by computing its fingerprint.
    pub fn seal(public_path: String, assets: IndexMap<String, String>) -> Result<Self> {
        let hash = body_fingerprint(&public_path, &assets)?;
        Ok(Self {
            public_path,
            assets,
            hash,
        })
    }

    /// Whether `hash` still matches `publicPath` and `assets`.
    pub fn verify(&self) -> Result<bool> {
        Ok(body_fingerprint(&self.public_path, &self.assets)? == self.hash)
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Public path of a logical asset name.
    #[must_use]
    pub fn resolve(&self, logical_name: &str) -> Option<&str> {
        self.assets.get(logical_name).map(String::as_str)
    }
}

fn body_fingerprint(public_path: &str, assets: &IndexMap<String, String>) -> Result<String> {
    let canonical = serde_json::to_string(&ManifestBody {
        public_path,
        assets,
    })?;
    Ok(fingerprint::fingerprint(canonical.as_bytes()))
}
