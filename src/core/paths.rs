//! Shared path manipulation utilities.

use std::path::{Component, Path, PathBuf};

/// Join an emitted asset filename onto the public path.
///
/// Behaves like a node-style path join: the asset is always appended (a leading
/// platform separator on it does not reset the path), repeated separators
/// collapse, `.` segments vanish and `..` consumes the previous segment. A URL prefix such as
/// `http://cdn/` therefore comes out as `http:/cdn/<asset>`.
pub fn join_public_path(public_path: &str, asset: &str) -> String {
    let relative_asset = asset.trim_start_matches(std::path::is_separator);
    let joined = Path::new(public_path).join(relative_asset);
    let normalized = normalize_syntactic(&joined);
    if normalized.as_os_str().is_empty() {
        return ".".to_string();
    }
    normalized.to_string_lossy().into_owned()
}

fn normalize_syntactic(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(..) | Component::RootDir | Component::Normal(_) => {
                components.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `..` at the root stays at the root.
                Some(Component::RootDir | Component::Prefix(..)) => {}
                _ => components.push(component),
            },
        }
    }
    components.into_iter().collect()
}
