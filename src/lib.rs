//! trajview: parse and browse agent execution trajectories.
//!
//! An agent run is recorded as plain-text transcripts in which the model's
//! reasoning, its tool invocations, and the results of shell commands are
//! marked up inline:
//!
//! ```text
//! <think>The test fails because ...</think>
//! <function=str_replace_editor>
//! <parameter=old_str>a + b</parameter>
//! <parameter=new_str>a - b</parameter>
//! </function>
//! [Current working directory: /repo]
//! [Execution time: 0.4s]
//! [Command finished with exit code 0]
//! ```
//!
//! This crate splits such text into typed [`model::Block`]s, loads
//! `traj<N>/{success,failed}/*.txt` trees into a navigable
//! [`store::TrajectoryStore`], reads uploaded evaluation files, and renders
//! everything as Markdown, plain text, HTML, JSON, or an interactive
//! terminal view.
//!
//! # Example
//!
//! ```rust
//! use trajview::model::Block;
//! use trajview::parser::parse;
//!
//! let blocks = parse("<think>check the docs</think>Done.");
//! assert!(matches!(blocks[0], Block::Reasoning(_)));
//! assert_eq!(blocks[1].as_text(), Some("Done."));
//! ```
//!
//! # Architecture
//!
//! - [`parser`]: Tag recognition and block extraction
//! - [`model`]: Blocks, parameters, transcripts and groups
//! - [`store`]: Trajectory root loading and wrapping navigation
//! - [`evaluation`]: Evaluation file (upload mode) loading
//! - [`export`]: Report building and output formats
//! - [`cli`]: Command-line interface
//! - [`tui`]: Terminal user interface
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod model;
pub mod parser;
pub mod store;
#[cfg(feature = "tui")]
pub mod tui;
pub mod util;

pub use error::{Result, ViewerError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Result, ViewerError};
    pub use crate::evaluation::EvaluationRecord;
    pub use crate::export::{ExportFormat, ExportOptions, Report};
    pub use crate::model::{Block, Outcome, ParameterView, TrajectoryGroup};
    pub use crate::parser::parse;
    pub use crate::store::{Direction, NavigationState, TrajectoryStore};
}
