//! Persisting a serialized manifest.

#![allow(missing_docs)]

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::errors::{AmError, Result};

/// Destination for a fully serialized manifest.
pub trait ManifestWriter {
    /// Replace whatever is at `path` with `contents`.
    fn write(&mut self, path: &Path, contents: &str) -> Result<()>;
}

/// Writes to the filesystem through a sibling temp file and an atomic rename,
/// so readers see either the previous manifest or the new one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsManifestWriter;

impl ManifestWriter for FsManifestWriter {
    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| AmError::io(parent, source))?;
        }

        replace_via_temp(path, |file| file.write_all(contents.as_bytes()))
    }
}

/// Fill `path`'s temp sibling with `fill`, then rename it over `path`.
/// The temp file never outlives a failure.
fn replace_via_temp<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let tmp_path = temp_sibling(path);
    let filled = File::create(&tmp_path).and_then(|mut file| {
        fill(&mut file)?;
        file.sync_all()
    });
    if let Err(source) = filled {
        let _ = fs::remove_file(&tmp_path);
        return Err(AmError::io(&tmp_path, source));
    }
    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(AmError::io(path, source));
    }
    Ok(())
}

/// Keeps every write in memory; handy for dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryManifestWriter {
    pub writes: Vec<(PathBuf, String)>,
}

impl MemoryManifestWriter {
    #[must_use]
    pub fn last(&self) -> Option<&(PathBuf, String)> {
        self.writes.last()
    }
}

impl ManifestWriter for MemoryManifestWriter {
    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.writes.push((path.to_path_buf(), contents.to_string()));
        Ok(())
    }
}

/// `manifest.json` → `manifest.json.tmp`.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_file_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("manifest.json");
        FsManifestWriter.write(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(!temp_sibling(&path).exists());
    }

    #[test]
    fn overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let mut writer = FsManifestWriter;
        writer.write(&path, "first build, longer contents").unwrap();
        writer.write(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn unwritable_destination_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = FsManifestWriter
            .write(&blocker.join("manifest.json"), "{}")
            .unwrap_err();
        assert_eq!(err.code(), "AM-3002");
    }

    #[test]
    fn interrupted_write_removes_temp_and_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        FsManifestWriter.write(&path, "previous").unwrap();

        let err = replace_via_temp(&path, |file| {
            file.write_all(b"{\"publicPath\":")?;
            Err(io::Error::other("device full"))
        })
        .unwrap_err();

        assert_eq!(err.code(), "AM-3002");
        assert!(!temp_sibling(&path).exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
    }

    #[test]
    fn memory_writer_records_each_write() {
        let mut writer = MemoryManifestWriter::default();
        writer.write(Path::new("a.json"), "1").unwrap();
        writer.write(Path::new("a.json"), "2").unwrap();
        assert_eq!(writer.writes.len(), 2);
        assert_eq!(writer.last().map(|(_, c)| c.as_str()), Some("2"));
    }
}
