//! Trajectory groups and their transcripts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The raw text of one agent turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Source file name (used for labels only).
    pub name: String,
    /// Full transcript text.
    pub text: String,
}

impl Transcript {
    /// Create a transcript.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Which side of a trajectory group a transcript belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Transcripts from `success/`.
    #[default]
    Success,
    /// Transcripts from `failed/`.
    Failed,
}

impl Outcome {
    /// Both outcomes, success first.
    pub const ALL: [Self; 2] = [Self::Success, Self::Failed];

    /// Subdirectory name holding this outcome's transcripts.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }

    /// The other outcome.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Success => Self::Failed,
            Self::Failed => Self::Success,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" | "succeeded" | "ok" => Ok(Self::Success),
            "failed" | "failure" | "fail" => Ok(Self::Failed),
            other => Err(format!("unknown outcome '{other}'")),
        }
    }
}

/// One `traj<N>` folder: its success and failed transcripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryGroup {
    /// Folder name, e.g. `traj3`.
    pub name: String,
    /// The `N` parsed from the folder name.
    pub index: u64,
    /// Transcripts from `success/`, sorted by file name.
    pub success: Vec<Transcript>,
    /// Transcripts from `failed/`, sorted by file name.
    pub failed: Vec<Transcript>,
}

impl TrajectoryGroup {
    /// Transcripts for one outcome.
    #[must_use]
    pub fn transcripts(&self, outcome: Outcome) -> &[Transcript] {
        match outcome {
            Outcome::Success => &self.success,
            Outcome::Failed => &self.failed,
        }
    }

    /// Total number of transcripts on both sides.
    #[must_use]
    pub fn transcript_count(&self) -> usize {
        self.success.len() + self.failed.len()
    }
}
