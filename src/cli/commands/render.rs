//! Render command implementation.
//!
//! Exports one trajectory group, with its success and failed transcripts as
//! report sections.

use tracing::info;

use crate::cli::{Cli, OutcomeArg, RenderArgs};
use crate::config::Config;
use crate::error::Result;
use crate::export::Report;
use crate::store::TrajectoryStore;

use super::{resolve_root, select_position, write_report};

/// Run the render command.
pub fn run(cli: &Cli, config: &Config, args: &RenderArgs) -> Result<()> {
    let root = resolve_root(args.root.as_ref(), config);
    let store = TrajectoryStore::load(&root)?;
    let position = select_position(&store, &args.group)?;
    let group = store.require(position)?;

    let outcome = args
        .outcome
        .unwrap_or_else(|| OutcomeArg::from(config.store.default_outcome));
    let report = Report::from_group(group, outcome.outcomes());
    info!(
        group = %group.name,
        position,
        steps = report.step_count(),
        "Rendering trajectory group"
    );

    write_report(cli, config, &args.export, &report)
}
