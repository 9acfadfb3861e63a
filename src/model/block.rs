//! Block types produced by the transcript parser.
//!
//! This module defines all 4 block types:
//! - `plain_text`: untagged text between recognized tags
//! - `reasoning`: the body of a `<think>` region
//! - `function_call`: a `<function=NAME>` region with its parameters
//! - `command_result`: the bracketed execution-result triple

use serde::{Deserialize, Serialize};

use super::parameters::ParameterSet;

/// Untagged text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Trimmed text content.
    pub content: String,
}

/// Agent reasoning from a `<think>` region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningBlock {
    /// Trimmed reasoning content.
    pub content: String,
}

/// A function invocation from a `<function=NAME>` region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name, verbatim from the opening tag.
    pub name: String,

    /// Parameters keyed by name.
    #[serde(default)]
    pub parameters: ParameterSet,

    /// Untagged text found inside the call body, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_segments: Vec<String>,
}

impl FunctionCall {
    /// Check if the call carries an `old_str`/`new_str` edit pair.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.parameters.edit_pair().is_some()
    }
}

/// Outcome of a shell command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Directory the command ran in.
    pub working_directory: String,
    /// Execution time as reported (e.g. `1.2s`).
    pub execution_time: String,
    /// Exit code as reported. Kept as text because the format does not
    /// guarantee a number.
    pub exit_code: String,
}

impl CommandResult {
    /// Check if the command exited with code `0`.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit_code == "0"
    }
}

/// A parsed unit of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Untagged text.
    PlainText(TextBlock),

    /// Reasoning region.
    Reasoning(ReasoningBlock),

    /// Function invocation.
    FunctionCall(FunctionCall),

    /// Shell command outcome.
    CommandResult(CommandResult),
}

impl Block {
    /// Create a plain text block.
    #[must_use]
    pub fn plain(content: impl Into<String>) -> Self {
        Self::PlainText(TextBlock {
            content: content.into(),
        })
    }

    /// Create a reasoning block.
    #[must_use]
    pub fn reasoning(content: impl Into<String>) -> Self {
        Self::Reasoning(ReasoningBlock {
            content: content.into(),
        })
    }

    /// Get the type name of this block.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::PlainText(_) => "plain_text",
            Self::Reasoning(_) => "reasoning",
            Self::FunctionCall(_) => "function_call",
            Self::CommandResult(_) => "command_result",
        }
    }

    /// Get the text content of a plain text or reasoning block.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::PlainText(t) => Some(&t.content),
            Self::Reasoning(r) => Some(&r.content),
            _ => None,
        }
    }

    /// Get the function call, if this is one.
    #[must_use]
    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Self::FunctionCall(call) => Some(call),
            _ => None,
        }
    }

    /// Get the command result, if this is one.
    #[must_use]
    pub fn as_command_result(&self) -> Option<&CommandResult> {
        match self {
            Self::CommandResult(result) => Some(result),
            _ => None,
        }
    }
}

/// Block counts for one or more transcripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    /// Plain text blocks.
    pub plain_text: usize,
    /// Reasoning blocks.
    pub reasoning: usize,
    /// Function calls.
    pub function_calls: usize,
    /// Command results.
    pub command_results: usize,
    /// Command results with a non-zero exit code.
    pub failed_commands: usize,
}

impl BlockSummary {
    /// Summarize a block sequence.
    #[must_use]
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let mut summary = Self::default();
        for block in blocks {
            summary.record(block);
        }
        summary
    }

    /// Count one block.
    pub fn record(&mut self, block: &Block) {
        match block {
            Block::PlainText(_) => self.plain_text += 1,
            Block::Reasoning(_) => self.reasoning += 1,
            Block::FunctionCall(_) => self.function_calls += 1,
            Block::CommandResult(result) => {
                self.command_results += 1;
                if !result.succeeded() {
                    self.failed_commands += 1;
                }
            }
        }
    }

    /// Add another summary into this one.
    pub fn merge(&mut self, other: &Self) {
        self.plain_text += other.plain_text;
        self.reasoning += other.reasoning;
        self.function_calls += other.function_calls;
        self.command_results += other.command_results;
        self.failed_commands += other.failed_commands;
    }

    /// Total number of blocks.
    #[must_use]
    pub fn total(&self) -> usize {
        self.plain_text + self.reasoning + self.function_calls + self.command_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(exit_code: &str) -> Block {
        Block::CommandResult(CommandResult {
            working_directory: "/repo".to_string(),
            execution_time: "0.1s".to_string(),
            exit_code: exit_code.to_string(),
        })
    }

    #[test]
    fn test_block_serializes_with_type_tag() {
        let json = serde_json::to_value(Block::reasoning("plan")).unwrap();
        assert_eq!(json["type"], "reasoning");
        assert_eq!(json["content"], "plan");

        let json = serde_json::to_value(command("1")).unwrap();
        assert_eq!(json["type"], "command_result");
        assert_eq!(json["exit_code"], "1");
    }

    #[test]
    fn test_block_deserializes_from_tagged_json() {
        let block: Block =
            serde_json::from_str(r#"{"type":"plain_text","content":"hi"}"#).unwrap();
        assert_eq!(block, Block::plain("hi"));
    }

    #[test]
    fn test_summary_counts_failed_commands() {
        let blocks = vec![
            Block::plain("a"),
            Block::reasoning("b"),
            command("0"),
            command("2"),
        ];
        let summary = BlockSummary::from_blocks(&blocks);
        assert_eq!(summary.plain_text, 1);
        assert_eq!(summary.reasoning, 1);
        assert_eq!(summary.command_results, 2);
        assert_eq!(summary.failed_commands, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Block::plain("x").as_text(), Some("x"));
        assert!(command("0").as_text().is_none());
        assert!(command("0").as_command_result().unwrap().succeeded());
        assert_eq!(command("0").type_name(), "command_result");
    }
}
