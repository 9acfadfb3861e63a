//! CLI command implementations.
//!
//! Each command is implemented in its own module with a `run` function
//! that handles the command logic.

pub mod config;
pub mod demo;
pub mod list;
pub mod parse;
pub mod render;
pub mod tui;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, ExportFlags, GroupSelector};
use crate::config::Config;
use crate::error::{Result, ViewerError};
use crate::export::{export_to_file, export_to_writer, ExportFormat, ExportOptions, Report};
use crate::store::TrajectoryStore;

/// Trajectory root from the argument, falling back to the config.
#[must_use]
pub fn resolve_root(arg: Option<&PathBuf>, config: &Config) -> PathBuf {
    arg.cloned().unwrap_or_else(|| config.store.root.clone())
}

/// Store position picked by `--index` or `--name`, defaulting to the first.
pub fn select_position(store: &TrajectoryStore, selector: &GroupSelector) -> Result<usize> {
    if store.is_empty() {
        return Err(ViewerError::GroupNotFound {
            selector: format!("any group under {}", store.root().display()),
        });
    }
    match (&selector.name, selector.index) {
        (Some(name), _) => store
            .position_of(name)
            .ok_or_else(|| ViewerError::GroupNotFound {
                selector: name.clone(),
            }),
        (None, Some(index)) => store.require(index).map(|_| index),
        (None, None) => Ok(0),
    }
}

/// Output format: `--format`, then the `--out` extension, then the config.
pub fn resolve_format(flags: &ExportFlags, config: &Config) -> Result<ExportFormat> {
    if let Some(format) = flags.format {
        return Ok(format.into());
    }
    let from_extension = flags
        .out
        .as_deref()
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str())
        .and_then(ExportFormat::from_str);
    match from_extension {
        Some(format) => Ok(format),
        None => config.export_format(),
    }
}

/// Config export options with command-line overrides applied.
#[must_use]
pub fn resolve_options(flags: &ExportFlags, config: &Config) -> ExportOptions {
    let mut options = config.export_options();
    if flags.no_reasoning {
        options.include_reasoning = false;
    }
    if flags.no_raw_segments {
        options.include_raw_segments = false;
    }
    if flags.diff {
        options.show_diff = true;
    }
    if flags.truncate.is_some() {
        options.truncate_at = flags.truncate;
    }
    if flags.light {
        options.dark_theme = false;
    }
    options
}

/// Export `report` to `--out` or stdout as configured.
pub fn write_report(cli: &Cli, config: &Config, flags: &ExportFlags, report: &Report) -> Result<()> {
    let format = resolve_format(flags, config)?;
    let options = resolve_options(flags, config);

    match &flags.out {
        Some(path) => {
            export_to_file(report, path, format, &options)?;
            if !cli.quiet {
                eprintln!(
                    "Exported {} steps to {}",
                    report.step_count(),
                    path.display()
                );
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = io::BufWriter::new(stdout.lock());
            export_to_writer(report, format, &mut writer, &options)?;
            writer.flush()?;
        }
    }
    Ok(())
}
