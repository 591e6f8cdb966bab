//! Asset name matching: pluggable matcher seam, regex default, name normalizer.

pub mod normalizer;
pub mod patterns;

/// Parts recovered from one emitted filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetParts {
    /// Stable logical name. Empty when the group did not participate.
    pub name: String,
    /// Content hash, when the pattern captures one.
    pub hash: Option<String>,
    /// Extension, possibly multi-segment (`min.js`, `js.map`).
    pub ext: String,
}

/// Anything that can split an emitted filename into name / hash / extension.
///
/// Returning `None` means the filename does not fit the pattern at all.
pub trait AssetMatcher: Send + Sync {
    /// Split `filename` into its parts, or `None` when it does not match.
    fn captures(&self, filename: &str) -> Option<AssetParts>;

    /// Human-readable description used in diagnostics.
    fn describe(&self) -> String {
        "custom matcher".to_string()
    }
}

impl<F> AssetMatcher for F
where
    F: Fn(&str) -> Option<AssetParts> + Send + Sync,
{
    fn captures(&self, filename: &str) -> Option<AssetParts> {
        self(filename)
    }
}
