//! Transcript parsing.
//!
//! Segments a raw agent transcript into ordered [`Block`]s. Four tag shapes
//! are recognized, byte-for-byte and case-sensitive:
//!
//! - `<think>BODY</think>`
//! - `<function=NAME>BODY</function>`, with `<parameter=NAME>BODY</parameter>`
//!   spans inside the body
//! - `[Current working directory: D] [Execution time: T] [Command finished with exit code E]`
//!
//! Anything else is plain text. Unterminated or malformed tags are not errors;
//! they simply fail to match and fall through as text.
//!
//! # Example
//!
//! ```rust
//! use trajview::model::Block;
//! use trajview::parser::parse;
//!
//! let blocks = parse("<think>look first</think>ls");
//! assert_eq!(blocks, vec![Block::reasoning("look first"), Block::plain("ls")]);
//! ```

mod function;
mod rank;

pub use function::{parse_function_body, parse_function_call};
pub use rank::{select, TagKind};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::model::{Block, BlockSummary, CommandResult};

static THINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>(.*?)</think>").expect("think pattern is valid"));

static FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<function=([^>]+)>(.*?)</function>").expect("function pattern is valid")
});

static COMMAND_RESULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)\[Current working directory: (.*?)\]\s*\[Execution time: (.*?)\]\s*\[Command finished with exit code (.*?)\]",
    )
    .expect("command result pattern is valid")
});

/// Parse a transcript into blocks.
///
/// The scan keeps a cursor into `text`. Each step looks ahead for all three
/// top-level tag shapes and lets [`select`] pick the earliest. Text before
/// that tag becomes a trimmed [`Block::PlainText`] (dropped when blank). When
/// nothing matches, the end of the text acts as the next tag position, so the
/// remainder is emitted the same way.
#[must_use]
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];
        let think = THINK.captures(rest);
        let function = FUNCTION.captures(rest);
        let command = COMMAND_RESULT.captures(rest);

        let candidates: Vec<(TagKind, usize)> = [
            (TagKind::Think, &think),
            (TagKind::Function, &function),
            (TagKind::CommandResult, &command),
        ]
        .into_iter()
        .filter_map(|(kind, caps)| Some((kind, match_start(caps.as_ref()?)?)))
        .collect();

        let next = select(&candidates);
        let next_start = next.map_or(text.len(), |(_, start)| i + start);

        if next_start > i {
            push_text(&mut blocks, &text[i..next_start]);
            i = next_start;
            continue;
        }

        let Some((kind, _)) = next else { break };
        let caps = match kind {
            TagKind::Think => think,
            TagKind::Function => function,
            TagKind::CommandResult => command,
        };
        let Some(caps) = caps else { break };
        let Some(whole) = caps.get(0) else { break };

        trace!(?kind, offset = i, len = whole.len(), "Consuming tag");
        if let Some(block) = consume(kind, &caps) {
            blocks.push(block);
        }
        i += whole.end();
    }

    debug!(bytes = text.len(), blocks = blocks.len(), "Parsed transcript");
    blocks
}

/// Turn a tag match into a block. Whitespace-only reasoning yields nothing.
fn consume(kind: TagKind, caps: &Captures<'_>) -> Option<Block> {
    let group = |n: usize| caps.get(n).map_or("", |m| m.as_str());

    match kind {
        TagKind::Think => {
            let content = group(1).trim();
            (!content.is_empty()).then(|| Block::reasoning(content))
        }
        TagKind::Function => Some(Block::FunctionCall(parse_function_call(group(1), group(2)))),
        TagKind::CommandResult => Some(Block::CommandResult(CommandResult {
            working_directory: group(1).trim().to_string(),
            execution_time: group(2).trim().to_string(),
            exit_code: group(3).trim().to_string(),
        })),
    }
}

fn match_start(caps: &Captures<'_>) -> Option<usize> {
    caps.get(0).map(|m| m.start())
}

fn push_text(blocks: &mut Vec<Block>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        blocks.push(Block::plain(text));
    }
}

/// Parser that keeps running block counts across transcripts.
#[derive(Debug, Default)]
pub struct TranscriptParser {
    /// Number of transcripts parsed.
    transcripts: usize,
    /// Accumulated block counts.
    summary: BlockSummary,
}

impl TranscriptParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one transcript and record its block counts.
    pub fn parse(&mut self, text: &str) -> Vec<Block> {
        let blocks = parse(text);
        self.transcripts += 1;
        self.summary.merge(&BlockSummary::from_blocks(&blocks));
        blocks
    }

    /// Number of transcripts parsed so far.
    #[must_use]
    pub fn transcripts_parsed(&self) -> usize {
        self.transcripts
    }

    /// Block counts over everything parsed so far.
    #[must_use]
    pub fn summary(&self) -> &BlockSummary {
        &self.summary
    }
}
