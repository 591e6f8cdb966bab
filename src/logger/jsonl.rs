//! JSONL activity log: one self-contained JSON object per manifest event.
//!
//! Lines are assembled in memory and written with a single `write_all` so a
//! tailing process never sees a partial line.
//!
//! Degradation chain:
//! 1. Primary file path
//! 2. Fallback path
//! 3. stderr with `[AM-JSONL]` prefix
//! 4. Silent discard (a logging failure never fails a build)

#![allow(missing_docs)]

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{AmError, Result};

/// Severity level for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Critical,
}

/// Manifest lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ManifestWritten,
    ManifestPreviewed,
    ManifestFailed,
}

/// A single JSONL log entry; only `ts`, `event` and `severity` are always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    pub event: EventType,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    /// Number of filenames the build tool emitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emitted: Option<usize>,
    /// Number of entries in the manifest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<usize>,
    /// Number of source maps left out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omitted: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LogEntry {
    /// Create a new entry stamped with the current UTC time.
    pub fn new(event: EventType, severity: Severity) -> Self {
        Self {
            ts: format_utc_now(),
            event,
            severity,
            output_file: None,
            emitted: None,
            assets: None,
            omitted: None,
            hash: None,
            duration_ms: None,
            error_code: None,
            error_message: None,
        }
    }

    /// Critical entry describing a failed build.
    pub fn failure(error: &AmError) -> Self {
        Self {
            error_code: Some(error.code().to_string()),
            error_message: Some(error.to_string()),
            ..Self::new(EventType::ManifestFailed, Severity::Critical)
        }
    }
}

/// Degradation state of the JSONL writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Normal,
    Fallback,
    Stderr,
    Discard,
}

/// Configuration for the JSONL writer.
#[derive(Debug, Clone)]
pub struct JsonlConfig {
    pub path: PathBuf,
    /// Optional fallback path (e.g. on a different filesystem).
    pub fallback_path: Option<PathBuf>,
}

impl JsonlConfig {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fallback_path: None,
        }
    }
}

/// Append-only JSONL log writer with multi-level fallback.
#[derive(Debug)]
pub struct JsonlWriter {
    config: JsonlConfig,
    writer: Option<BufWriter<File>>,
    state: WriterState,
}

impl JsonlWriter {
    /// Open the log file. Falls through the degradation chain on failure.
    pub fn open(config: JsonlConfig) -> Self {
        let mut w = Self {
            config,
            writer: None,
            state: WriterState::Discard,
        };
        w.try_open_primary();
        w
    }

    /// Write and flush one entry as a single JSONL line.
    pub fn write_entry(&mut self, entry: &LogEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(json) => format!("{json}\n"),
            Err(e) => {
                let _ = writeln!(io::stderr(), "[AM-JSONL] serialize error: {e}");
                return;
            }
        };
        self.write_line(&line);
    }

    /// Current degradation state.
    pub fn state(&self) -> &str {
        match self.state {
            WriterState::Normal => "normal",
            WriterState::Fallback => "fallback",
            WriterState::Stderr => "stderr",
            WriterState::Discard => "discard",
        }
    }

    fn write_line(&mut self, line: &str) {
        match self.state {
            WriterState::Normal | WriterState::Fallback => {
                let written = self
                    .writer
                    .as_mut()
                    .is_some_and(|w| w.write_all(line.as_bytes()).and_then(|()| w.flush()).is_ok());
                if !written {
                    self.degrade();
                    self.write_line(line); // retry at next level
                }
            }
            WriterState::Stderr => {
                let _ = write!(io::stderr(), "[AM-JSONL] {line}");
            }
            WriterState::Discard => {}
        }
    }

    fn try_open_primary(&mut self) {
        match open_append(&self.config.path) {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                self.state = WriterState::Normal;
            }
            Err(_) => self.try_open_fallback(),
        }
    }

    fn try_open_fallback(&mut self) {
        let Some(fb) = &self.config.fallback_path else {
            self.state = WriterState::Stderr;
            let _ = writeln!(
                io::stderr(),
                "[AM-JSONL] primary path failed and no fallback configured, using stderr"
            );
            return;
        };
        match open_append(fb) {
            Ok(file) => {
                let _ = writeln!(
                    io::stderr(),
                    "[AM-JSONL] primary path failed, using fallback: {}",
                    fb.display()
                );
                self.writer = Some(BufWriter::new(file));
                self.state = WriterState::Fallback;
            }
            Err(_) => {
                self.state = WriterState::Stderr;
                let _ = writeln!(
                    io::stderr(),
                    "[AM-JSONL] both primary and fallback paths failed, using stderr"
                );
            }
        }
    }

    fn degrade(&mut self) {
        self.writer = None;
        match self.state {
            WriterState::Normal => self.try_open_fallback(),
            WriterState::Fallback => {
                self.state = WriterState::Stderr;
                let _ = writeln!(io::stderr(), "[AM-JSONL] fallback write failed, using stderr");
            }
            WriterState::Stderr => self.state = WriterState::Discard,
            WriterState::Discard => {}
        }
    }
}

/// Open or create a file for appending, creating parent directories.
fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AmError::io(parent, source))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AmError::io(path, source))
}

fn format_utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
