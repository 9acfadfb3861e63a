//! Parse command implementation.
//!
//! Prints the blocks of one transcript, for inspecting how text is split.

use std::io::{self, Read, Write};
use std::path::Path;

use crate::cli::{Cli, OutputFormat, ParseArgs};
use crate::error::{Result, ViewerError};
use crate::model::{Block, BlockSummary, ParameterView};
use crate::parser;

/// Run the parse command.
pub fn run(cli: &Cli, args: &ParseArgs) -> Result<()> {
    let text = read_input(&args.file)?;
    let blocks = parser::parse(&text);

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_blocks(cli.effective_output(), &blocks, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| ViewerError::io("Failed to read stdin", e))?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|e| {
        ViewerError::from_io_at(path, format!("Failed to read {}", path.display()), e)
    })
}

fn write_blocks<W: Write>(format: OutputFormat, blocks: &[Block], writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(writer, "{}", serde_json::to_string_pretty(blocks)?)?;
        }
        OutputFormat::Tsv => {
            writeln!(writer, "index\ttype\tdetail")?;
            for (i, block) in blocks.iter().enumerate() {
                writeln!(writer, "{i}\t{}\t{}", block.type_name(), one_line(block))?;
            }
        }
        OutputFormat::Text => {
            for (i, block) in blocks.iter().enumerate() {
                writeln!(writer, "[{i}] {}", block.type_name())?;
                write_block_detail(block, writer)?;
            }
            let summary = BlockSummary::from_blocks(blocks);
            writeln!(
                writer,
                "{} blocks: {} text, {} reasoning, {} calls, {} results",
                summary.total(),
                summary.plain_text,
                summary.reasoning,
                summary.function_calls,
                summary.command_results
            )?;
        }
    }
    Ok(())
}

fn write_block_detail<W: Write>(block: &Block, writer: &mut W) -> Result<()> {
    match block {
        Block::PlainText(text) => indent(writer, &text.content)?,
        Block::Reasoning(reasoning) => indent(writer, &reasoning.content)?,
        Block::FunctionCall(call) => {
            writeln!(writer, "    name: {}", call.name)?;
            for view in call.parameters.views() {
                match view {
                    ParameterView::Paired { old, new } => {
                        writeln!(writer, "    old_str:")?;
                        indent(writer, old)?;
                        writeln!(writer, "    new_str:")?;
                        indent(writer, new)?;
                    }
                    ParameterView::Single { name, content } => {
                        writeln!(writer, "    {name}:")?;
                        indent(writer, content)?;
                    }
                }
            }
            for segment in &call.raw_segments {
                writeln!(writer, "    (raw)")?;
                indent(writer, segment)?;
            }
        }
        Block::CommandResult(result) => {
            writeln!(writer, "    cwd: {}", result.working_directory)?;
            writeln!(writer, "    time: {}", result.execution_time)?;
            writeln!(writer, "    exit: {}", result.exit_code)?;
        }
    }
    Ok(())
}

fn indent<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    for line in text.lines() {
        writeln!(writer, "      {line}")?;
    }
    Ok(())
}

fn one_line(block: &Block) -> String {
    let detail = match block {
        Block::PlainText(text) => text.content.clone(),
        Block::Reasoning(reasoning) => reasoning.content.clone(),
        Block::FunctionCall(call) => {
            let names: Vec<_> = call.parameters.iter().map(|(name, _)| name).collect();
            format!("{}({})", call.name, names.join(","))
        }
        Block::CommandResult(result) => format!(
            "cwd={} time={} exit={}",
            result.working_directory, result.execution_time, result.exit_code
        ),
    };
    detail.replace(['\t', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Let me look.\n<think>check\nfiles</think><function=bash><parameter=command>ls</parameter></function>";

    #[test]
    fn test_text_listing() {
        let mut out = Vec::new();
        write_blocks(OutputFormat::Text, &parser::parse(SAMPLE), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("[0] plain_text"));
        assert!(text.contains("[1] reasoning"));
        assert!(text.contains("      files"));
        assert!(text.contains("    name: bash"));
        assert!(text.contains("3 blocks: 1 text, 1 reasoning, 1 calls, 0 results"));
    }

    #[test]
    fn test_tsv_flattens_newlines() {
        let mut out = Vec::new();
        write_blocks(OutputFormat::Tsv, &parser::parse(SAMPLE), &mut out).unwrap();
        let tsv = String::from_utf8(out).unwrap();

        assert_eq!(tsv.lines().nth(2), Some("1\treasoning\tcheck files"));
        assert_eq!(tsv.lines().nth(3), Some("2\tfunction_call\tbash(command)"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_input(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, ViewerError::FileNotFound { .. }));
    }
}
