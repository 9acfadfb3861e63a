//! trajview: parse and browse agent execution trajectories.

use std::process::ExitCode;

use trajview::cli;

fn main() -> ExitCode {
    // Logging is initialized by cli::run from --log-level and --log-format.
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");

            if std::env::var("RUST_BACKTRACE").is_ok() {
                let mut source = std::error::Error::source(&e);
                while let Some(cause) = source {
                    eprintln!("Caused by: {cause}");
                    source = cause.source();
                }
            }

            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
