//! Build-tool integration: subscribe to build completion and write the manifest.

pub mod host;

use std::time::Instant;

use crate::core::config::{ManifestOptions, RawManifestConfig};
use crate::core::errors::Result;
use crate::logger::jsonl::{EventType, JsonlWriter, LogEntry, Severity};
use crate::manifest::builder::{BuildReport, ManifestBuilder};
use crate::manifest::writer::{FsManifestWriter, ManifestWriter};
use crate::matcher::normalizer::NormalizedName;

use self::host::{BuildHost, BuildOutput};

/// Writes an asset manifest every time the host finishes a build.
///
/// Construction validates the options and compiles the matcher, so a bad
/// configuration fails before any build runs.
#[derive(Debug)]
pub struct AssetManifestPlugin {
    options: ManifestOptions,
    builder: ManifestBuilder,
    activity_log: Option<JsonlWriter>,
}

impl AssetManifestPlugin {
    pub fn new(options: ManifestOptions) -> Result<Self> {
        let builder = ManifestBuilder::from_options(&options)?;
        Ok(Self {
            options,
            builder,
            activity_log: None,
        })
    }

    pub fn from_raw(raw: RawManifestConfig) -> Result<Self> {
        Self::new(ManifestOptions::from_raw(raw)?)
    }

    /// Record every manifest event to a JSONL activity log.
    #[must_use]
    pub fn with_activity_log(mut self, log: JsonlWriter) -> Self {
        self.activity_log = Some(log);
        self
    }

    #[must_use]
    pub fn options(&self) -> &ManifestOptions {
        &self.options
    }

    /// Logical name of one emitted filename, hash removed.
    pub fn unhash_asset(&self, asset: &str) -> Result<NormalizedName> {
        self.builder.normalizer().normalize(asset)
    }

    /// Build the manifest without writing or logging anything.
    pub fn build(&self, output: &BuildOutput) -> Result<BuildReport> {
        self.builder.build(output.assets())
    }

    /// Build the manifest and log it as a preview; nothing is written.
    pub fn preview(&mut self, output: &BuildOutput) -> Result<BuildReport> {
        let started = Instant::now();
        let result = self.build(output);
        self.record(EventType::ManifestPreviewed, output, &result, started);
        result
    }

    /// Build, serialize and hand the manifest to `writer`.
    ///
    /// Any failure leaves the destination untouched.
    pub fn emit(
        &mut self,
        output: &BuildOutput,
        writer: &mut dyn ManifestWriter,
    ) -> Result<BuildReport> {
        let started = Instant::now();
        let result = self.build(output).and_then(|report| {
            let json = report.manifest.to_json_pretty()?;
            writer.write(self.options.output_file(), &json)?;
            Ok(report)
        });
        self.record(EventType::ManifestWritten, output, &result, started);
        result
    }

    /// Subscribe to build completion on `host`, writing to the filesystem.
    pub fn apply(self, host: &mut dyn BuildHost) {
        self.apply_with_writer(host, FsManifestWriter);
    }

    /// Subscribe to build completion on `host` with a custom writer.
    pub fn apply_with_writer<W>(mut self, host: &mut dyn BuildHost, mut writer: W)
    where
        W: ManifestWriter + 'static,
    {
        host.on_done(Box::new(move |output: &BuildOutput| {
            self.emit(output, &mut writer).map(|_| ())
        }));
    }

    fn record(
        &mut self,
        event: EventType,
        output: &BuildOutput,
        result: &Result<BuildReport>,
        started: Instant,
    ) {
        let Some(log) = self.activity_log.as_mut() else {
            return;
        };

        let mut entry = match result {
            Ok(report) => {
                let mut entry = LogEntry::new(event, Severity::Info);
                entry.assets = Some(report.manifest.assets.len());
                entry.omitted = Some(report.omitted.len());
                entry.hash = Some(report.manifest.hash.clone());
                entry
            }
            Err(error) => LogEntry::failure(error),
        };
        entry.output_file = Some(self.options.output_file().display().to_string());
        entry.emitted = Some(output.len());
        entry.duration_ms = Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX));
        log.write_entry(&entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::AmError;
    use crate::logger::jsonl::JsonlConfig;
    use crate::manifest::Manifest;
    use crate::manifest::writer::MemoryManifestWriter;
    use crate::plugin::host::ManualBuildHost;
    use std::fs;
    use std::path::Path;

    fn options() -> ManifestOptions {
        ManifestOptions::new("manifest.json", "/static/").unwrap()
    }

    #[test]
    fn construction_fails_fast_on_bad_matcher() {
        let err = AssetManifestPlugin::new(options().with_asset_matcher("(?P<name>\\w+)"))
            .unwrap_err();
        assert!(matches!(err, AmError::InvalidConfig { .. }));
    }

    #[test]
    fn construction_fails_without_required_fields() {
        assert!(AssetManifestPlugin::from_raw(RawManifestConfig::default()).is_err());
    }

    #[test]
    fn unhash_asset_follows_options() {
        let plugin = AssetManifestPlugin::new(options()).unwrap();
        assert_eq!(
            plugin.unhash_asset("app.a1b2c3.js").unwrap(),
            NormalizedName::Logical("app.js".to_string())
        );
        assert_eq!(
            plugin.unhash_asset("app.a1b2c3.js.map").unwrap(),
            NormalizedName::Omit
        );
    }

    #[cfg(unix)]
    #[test]
    fn emit_writes_pretty_manifest_to_output_file() {
        let mut plugin = AssetManifestPlugin::new(options()).unwrap();
        let mut writer = MemoryManifestWriter::default();
        let report = plugin
            .emit(&BuildOutput::new(["bundle.abc123.js"]), &mut writer)
            .unwrap();

        let (path, contents) = writer.last().unwrap();
        assert_eq!(path, Path::new("manifest.json"));
        assert!(contents.starts_with("{\n  \"publicPath\": \"/static/\","));
        let parsed = Manifest::from_json(contents).unwrap();
        assert_eq!(parsed, report.manifest);
        assert_eq!(
            parsed.resolve("bundle.js"),
            Some("/static/bundle.abc123.js")
        );
    }

    #[test]
    fn failed_build_writes_nothing() {
        let mut plugin = AssetManifestPlugin::new(options()).unwrap();
        let mut writer = MemoryManifestWriter::default();
        let err = plugin
            .emit(&BuildOutput::new(["app.1.js", "not-hashed.js"]), &mut writer)
            .unwrap_err();
        assert_eq!(err.code(), "AM-2001");
        assert!(writer.writes.is_empty());
    }

    #[test]
    fn apply_subscribes_and_rewrites_on_every_build() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("manifest.json");
        let plugin =
            AssetManifestPlugin::new(ManifestOptions::new(&out, "/static/").unwrap()).unwrap();
        let mut host = ManualBuildHost::new();
        plugin.apply(&mut host);

        host.complete(&BuildOutput::new(["a.1.js", "b.2.js"])).unwrap();
        host.complete(&BuildOutput::new(["c.3.js"])).unwrap();

        let manifest = Manifest::from_json(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(manifest.assets.len(), 1);
        assert!(manifest.assets.contains_key("c.js"));
    }

    #[test]
    fn activity_log_records_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("activity.jsonl");
        let mut plugin = AssetManifestPlugin::new(options())
            .unwrap()
            .with_activity_log(JsonlWriter::open(JsonlConfig::new(&log_path)));
        let mut writer = MemoryManifestWriter::default();

        plugin
            .emit(&BuildOutput::new(["a.1.js", "a.1.js.map"]), &mut writer)
            .unwrap();
        plugin
            .emit(&BuildOutput::new(["oops"]), &mut writer)
            .unwrap_err();

        let lines: Vec<serde_json::Value> = fs::read_to_string(&log_path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "manifest_written");
        assert_eq!(lines[0]["emitted"], 2);
        assert_eq!(lines[0]["assets"], 1);
        assert_eq!(lines[0]["omitted"], 1);
        assert_eq!(lines[1]["event"], "manifest_failed");
        assert_eq!(lines[1]["error_code"], "AM-2001");
    }
}
