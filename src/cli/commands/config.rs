//! Config command implementation.
//!
//! Shows the effective configuration and writes a starter file.

use std::path::PathBuf;

use crate::cli::{Cli, ConfigAction, ConfigArgs, OutputFormat};
use crate::config::{default_config_path, Config};
use crate::error::{Result, ViewerError};

/// Run the config command.
pub fn run(cli: &Cli, config: &Config, args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, config),
        ConfigAction::Path => {
            println!("{}", target_path(cli)?.display());
            Ok(())
        }
        ConfigAction::Init { force } => init_config(cli, *force),
    }
}

/// Print the merged configuration.
fn show_config(cli: &Cli, config: &Config) -> Result<()> {
    match cli.effective_output() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        _ => print!("{}", config.to_toml()?),
    }
    Ok(())
}

/// `--config` if given, else the default user location.
fn target_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}

fn init_config(cli: &Cli, force: bool) -> Result<()> {
    let path = target_path(cli)?;
    if path.exists() && !force {
        return Err(ViewerError::InvalidArgument {
            name: "init".to_string(),
            reason: format!("{} already exists (use --force to overwrite)", path.display()),
        });
    }

    Config::default().save_to(&path)?;
    if !cli.quiet {
        println!("Wrote default configuration to {}", path.display());
    }
    Ok(())
}
