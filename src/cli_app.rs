//! Top-level CLI definition and dispatch.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use colored::{Colorize, control};
use serde_json::{Value, json};
use thiserror::Error;

use asset_manifest::core::config::RawManifestConfig;
use asset_manifest::core::errors::AmError;
use asset_manifest::logger::jsonl::{JsonlConfig, JsonlWriter};
use asset_manifest::manifest::builder::BuildReport;
use asset_manifest::manifest::writer::FsManifestWriter;
use asset_manifest::plugin::AssetManifestPlugin;
use asset_manifest::plugin::host::BuildOutput;

/// Write a JSON manifest mapping hash-free asset names to their public paths.
#[derive(Debug, Parser)]
#[command(
    name = "asset-manifest",
    author,
    version,
    about = "Asset manifest generator for hashed build output",
    long_about = None
)]
pub struct Cli {
    /// TOML config file (outputFile, publicPath, noHash, excludeSourceMaps, assetMatcher).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Where to write the manifest.
    #[arg(short, long, value_name = "PATH")]
    output_file: Option<PathBuf>,
    /// Prefix joined onto every emitted filename.
    #[arg(short, long, value_name = "PREFIX")]
    public_path: Option<String>,
    /// Emitted filenames carry no content hash.
    #[arg(long)]
    no_hash: bool,
    /// Keep source maps in the manifest.
    #[arg(long)]
    keep_source_maps: bool,
    /// Regex with `name`, `ext` and optional `hash` named groups.
    #[arg(long, value_name = "REGEX")]
    asset_matcher: Option<String>,
    /// Build output directory; its regular files are the emitted assets.
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
    /// Emitted filenames, in build order (after any --dir entries).
    #[arg(value_name = "FILE")]
    files: Vec<String>,
    /// Append activity events to this JSONL file.
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
    /// Print the manifest instead of writing it.
    #[arg(long)]
    dry_run: bool,
    /// Force JSON output mode.
    #[arg(long)]
    json: bool,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input.
    #[error("{0}")]
    User(String),
    /// Configuration or manifest failure.
    #[error(transparent)]
    Manifest(#[from] AmError),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Resolve configuration, collect the build output and emit the manifest.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    let mut plugin = AssetManifestPlugin::from_raw(resolve_config(cli)?)?;
    if let Some(log) = &cli.log {
        plugin = plugin.with_activity_log(JsonlWriter::open(JsonlConfig::new(log)));
    }

    let output = collect_build_output(cli)?;
    let report = if cli.dry_run {
        plugin.preview(&output)?
    } else {
        plugin.emit(&output, &mut FsManifestWriter)?
    };

    match output_mode(cli) {
        OutputMode::Human => print_human(cli, &plugin, &report),
        OutputMode::Json => write_json_line(&summary_json(cli, &plugin, &report)?),
    }
}

/// Config file first, then command-line flags on top.
fn resolve_config(cli: &Cli) -> Result<RawManifestConfig, CliError> {
    let file = match &cli.config {
        Some(path) => RawManifestConfig::load(path)?,
        None => RawManifestConfig::default(),
    };
    Ok(file.merge(flag_overrides(cli)))
}

fn flag_overrides(cli: &Cli) -> RawManifestConfig {
    RawManifestConfig {
        output_file: cli.output_file.clone(),
        public_path: cli.public_path.clone(),
        no_hash: cli.no_hash.then_some(true),
        exclude_source_maps: cli.keep_source_maps.then_some(false),
        asset_matcher: cli.asset_matcher.clone(),
    }
}

fn collect_build_output(cli: &Cli) -> Result<BuildOutput, CliError> {
    let mut assets: Vec<String> = match &cli.dir {
        Some(dir) => BuildOutput::from_dir(dir)?.assets().to_vec(),
        None => Vec::new(),
    };
    assets.extend(cli.files.iter().cloned());

    if cli.dir.is_none() && assets.is_empty() {
        return Err(CliError::User(
            "no build output: pass FILE arguments or --dir".to_string(),
        ));
    }
    Ok(BuildOutput::new(assets))
}

fn print_human(
    cli: &Cli,
    plugin: &AssetManifestPlugin,
    report: &BuildReport,
) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    if cli.dry_run {
        writeln!(stdout, "{}", report.manifest.to_json_pretty()?)?;
        return Ok(());
    }

    writeln!(
        stdout,
        "{} {} ({} assets, {} source maps omitted, hash {})",
        "wrote".green().bold(),
        plugin.options().output_file().display(),
        report.manifest.assets.len(),
        report.omitted.len(),
        report.manifest.hash
    )?;
    Ok(())
}

fn summary_json(
    cli: &Cli,
    plugin: &AssetManifestPlugin,
    report: &BuildReport,
) -> Result<Value, CliError> {
    Ok(json!({
        "command": "manifest",
        "dry_run": cli.dry_run,
        "output_file": plugin.options().output_file().display().to_string(),
        "assets": report.manifest.assets.len(),
        "omitted": report.omitted,
        "hash": report.manifest.hash,
        "manifest": serde_json::to_value(&report.manifest)?,
    }))
}

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    resolve_output_mode(cli.json, io::stdout().is_terminal())
}

fn resolve_output_mode(json_flag: bool, stdout_is_tty: bool) -> OutputMode {
    if json_flag || !stdout_is_tty {
        OutputMode::Json
    } else {
        OutputMode::Human
    }
}
