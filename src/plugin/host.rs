//! Build-host seam: how a build tool hands its emitted files to the plugin.

#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use crate::core::errors::{AmError, Result};

/// Filenames one completed build emitted, in the host's order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    assets: Vec<String>,
}

impl BuildOutput {
    pub fn new<I, S>(assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            assets: assets.into_iter().map(Into::into).collect(),
        }
    }

    /// Regular files directly under `dir`, sorted by name.
    /// A filename that is not valid UTF-8 is an error.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|source| AmError::io(dir, source))?;
        let mut assets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| AmError::io(dir, source))?;
            let file_type = entry
                .file_type()
                .map_err(|source| AmError::io(entry.path(), source))?;
            if file_type.is_file() {
                let name = entry
                    .file_name()
                    .into_string()
                    .map_err(|_| AmError::NonUtf8Name { path: entry.path() })?;
                assets.push(name);
            }
        }
        assets.sort();
        Ok(Self { assets })
    }

    #[must_use]
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Callback run once per completed build.
pub type DoneHandler = Box<dyn FnMut(&BuildOutput) -> Result<()>>;

/// A build tool that can notify subscribers when a build completes.
pub trait BuildHost {
    /// Register `handler` for every future build-completion event.
    fn on_done(&mut self, handler: DoneHandler);
}

/// Minimal host: the caller decides when a build is complete.
#[derive(Default)]
pub struct ManualBuildHost {
    handlers: Vec<DoneHandler>,
}

impl ManualBuildHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the build-completion event. Stops at the first failing handler.
    pub fn complete(&mut self, output: &BuildOutput) -> Result<()> {
        for handler in &mut self.handlers {
            handler(output)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl BuildHost for ManualBuildHost {
    fn on_done(&mut self, handler: DoneHandler) {
        self.handlers.push(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn from_dir_lists_sorted_regular_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vendor.2.js"), "").unwrap();
        fs::write(dir.path().join("app.1.js"), "").unwrap();
        fs::create_dir(dir.path().join("chunks")).unwrap();

        let output = BuildOutput::from_dir(dir.path()).unwrap();
        assert_eq!(output.assets(), ["app.1.js", "vendor.2.js"]);
    }

    #[test]
    fn from_dir_missing_directory_is_io_error() {
        let err = BuildOutput::from_dir(Path::new("/nonexistent/asset-manifest/dist")).unwrap_err();
        assert_eq!(err.code(), "AM-3002");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn from_dir_rejects_non_utf8_filenames() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.1.js"), "").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.1.js")), "").unwrap();

        let err = BuildOutput::from_dir(dir.path()).unwrap_err();
        assert_eq!(err.code(), "AM-3003");
        assert!(matches!(err, AmError::NonUtf8Name { ref path } if path.starts_with(dir.path())));
    }

    #[test]
    fn manual_host_fires_every_handler_per_completion() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut host = ManualBuildHost::new();
        let sink = Rc::clone(&seen);
        host.on_done(Box::new(move |output: &BuildOutput| {
            sink.borrow_mut().push(output.len());
            Ok(())
        }));

        host.complete(&BuildOutput::new(["a.1.js"])).unwrap();
        host.complete(&BuildOutput::new(["a.1.js", "b.2.js"])).unwrap();
        assert_eq!(*seen.borrow(), [1, 2]);
        assert_eq!(host.handler_count(), 1);
    }

    #[test]
    fn manual_host_propagates_handler_errors() {
        let mut host = ManualBuildHost::new();
        host.on_done(Box::new(|_: &BuildOutput| Err(AmError::invalid_config("boom"))));
        assert!(host.complete(&BuildOutput::default()).is_err());
    }
}
