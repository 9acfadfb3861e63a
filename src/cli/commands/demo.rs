//! Demo command implementation.
//!
//! Renders an uploaded evaluation file, one step per record.

use tracing::info;

use crate::cli::{Cli, DemoArgs};
use crate::config::Config;
use crate::error::Result;
use crate::evaluation;
use crate::export::Report;

use super::write_report;

/// Run the demo command.
pub fn run(cli: &Cli, config: &Config, args: &DemoArgs) -> Result<()> {
    let records = evaluation::load(&args.file)?;
    let title = args.title.clone().unwrap_or_else(|| {
        args.file
            .file_name()
            .map_or_else(|| "evaluation".to_string(), |n| n.to_string_lossy().into_owned())
    });

    let report = Report::from_records(title, &records);
    info!(records = records.len(), "Rendering evaluation file");

    write_report(cli, config, &args.export, &report)
}
