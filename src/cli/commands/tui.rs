//! TUI launcher command.
//!
//! Opens either a trajectory root or an evaluation file in the terminal
//! browser.

use crate::cli::{Cli, TuiArgs};
use crate::config::Config;
use crate::error::Result;

/// Run the TUI command.
pub fn run(_cli: &Cli, config: &Config, args: &TuiArgs) -> Result<()> {
    #[cfg(feature = "tui")]
    {
        use crate::evaluation;
        use crate::store::TrajectoryStore;
        use crate::tui::{self, TuiOptions, ViewSource};

        use super::{resolve_root, select_position};

        let (source, start) = match &args.demo {
            Some(file) => {
                let records = evaluation::load(file)?;
                let title = file
                    .file_name()
                    .map_or_else(|| "evaluation".to_string(), |n| n.to_string_lossy().into_owned());
                (ViewSource::Evaluation { title, records }, 0)
            }
            None => {
                let root = resolve_root(args.root.as_ref(), config);
                let store = TrajectoryStore::load(&root)?;
                let start = if store.is_empty() {
                    0
                } else {
                    select_position(&store, &args.group)?
                };
                (ViewSource::Store(store), start)
            }
        };

        let options = TuiOptions {
            start,
            outcome: args.outcome.unwrap_or(config.store.default_outcome),
            theme: args
                .theme
                .clone()
                .unwrap_or_else(|| config.display.theme.clone()),
            collapse_reasoning: config.display.collapse_reasoning,
            unicode: config.display.unicode && !args.ascii,
        };
        tui::run(source, options)
    }

    #[cfg(not(feature = "tui"))]
    {
        let _ = (config, args);
        Err(crate::error::ViewerError::unsupported(
            "TUI feature not enabled. Rebuild with --features tui",
        ))
    }
}
