//! Evaluation files (upload mode).
//!
//! An evaluation file is an ordered list of records, each with at least a
//! `role` and a `content` string. Two encodings are accepted:
//!
//! - a JSON array of objects
//! - JSON Lines, one object per line (blank lines skipped)
//!
//! Extra fields on a record are ignored. A file either loads completely or
//! fails with [`ViewerError::Format`]; there is no partial ingestion.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Result, ViewerError};
use crate::model::Block;
use crate::parser;

/// One step of an evaluation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Speaker of this step (e.g. `assistant`, `user`, `tool`).
    pub role: String,
    /// Raw transcript text of this step.
    pub content: String,
}

impl EvaluationRecord {
    /// Parse this record's content into blocks.
    #[must_use]
    pub fn blocks(&self) -> Vec<Block> {
        parser::parse(&self.content)
    }
}

/// Load an evaluation file from disk.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load(path: impl AsRef<Path>) -> Result<Vec<EvaluationRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ViewerError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => ViewerError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ViewerError::format(path, format!("unreadable: {e}")),
    })?;

    let records = from_str(&content).map_err(|e| match e {
        ViewerError::Format {
            message, source, ..
        } => ViewerError::Format {
            path: path.to_path_buf(),
            message,
            source,
        },
        other => other,
    })?;

    debug!(records = records.len(), "Loaded evaluation file");
    Ok(records)
}

/// Decode evaluation records from a string.
///
/// Content whose first non-whitespace character is `[` is read as a JSON
/// array; anything else as JSON Lines. Errors carry an empty path.
pub fn from_str(content: &str) -> Result<Vec<EvaluationRecord>> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(content).map_err(|e| {
            ViewerError::format_with_source("", format!("invalid JSON array: {e}"), e)
        });
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|e| {
                ViewerError::format_with_source("", format!("line {}: {e}", idx + 1), e)
            })
        })
        .collect()
}
