//! List command implementation.
//!
//! Lists trajectory groups in navigation order with transcript and block
//! counts.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::{Cli, ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::model::{Outcome, TrajectoryGroup};
use crate::parser::TranscriptParser;
use crate::store::TrajectoryStore;

use super::resolve_root;

/// Run the list command.
pub fn run(cli: &Cli, config: &Config, args: &ListArgs) -> Result<()> {
    let root = resolve_root(args.root.as_ref(), config);
    let store = TrajectoryStore::load(&root)?;

    let rows: Vec<GroupRow> = store
        .groups()
        .iter()
        .enumerate()
        .map(|(position, group)| GroupRow::from_group(position, group))
        .collect();

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_rows(cli.effective_output(), &rows, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// One line of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRow {
    /// Position in navigation order.
    pub position: usize,
    /// Folder name.
    pub name: String,
    /// Number parsed from the folder name.
    pub index: u64,
    /// Transcripts under `success/`.
    pub success: usize,
    /// Transcripts under `failed/`.
    pub failed: usize,
    /// Function calls across all transcripts.
    pub function_calls: usize,
    /// Command results across all transcripts.
    pub command_results: usize,
    /// Command results with a non-zero exit code.
    pub failed_commands: usize,
}

impl GroupRow {
    fn from_group(position: usize, group: &TrajectoryGroup) -> Self {
        let mut parser = TranscriptParser::new();
        for outcome in Outcome::ALL {
            for transcript in group.transcripts(outcome) {
                parser.parse(&transcript.text);
            }
        }
        let summary = parser.summary();

        Self {
            position,
            name: group.name.clone(),
            index: group.index,
            success: group.success.len(),
            failed: group.failed.len(),
            function_calls: summary.function_calls,
            command_results: summary.command_results,
            failed_commands: summary.failed_commands,
        }
    }
}

fn write_rows<W: Write>(format: OutputFormat, rows: &[GroupRow], writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(writer, "{}", serde_json::to_string_pretty(rows)?)?;
        }
        OutputFormat::Tsv => {
            writeln!(
                writer,
                "position\tname\tsuccess\tfailed\tfunction_calls\tcommand_results\tfailed_commands"
            )?;
            for row in rows {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    row.position,
                    row.name,
                    row.success,
                    row.failed,
                    row.function_calls,
                    row.command_results,
                    row.failed_commands
                )?;
            }
        }
        OutputFormat::Text => {
            if rows.is_empty() {
                writeln!(writer, "No trajectory groups found.")?;
                return Ok(());
            }

            writeln!(writer, "Trajectory groups ({} found):", rows.len())?;
            writeln!(writer)?;
            for row in rows {
                write!(
                    writer,
                    "  [{}] {:<10} {} success, {} failed, {} calls",
                    row.position, row.name, row.success, row.failed, row.function_calls
                )?;
                if row.failed_commands > 0 {
                    write!(writer, " ({} failed commands)", row.failed_commands)?;
                }
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transcript;

    fn group() -> TrajectoryGroup {
        TrajectoryGroup {
            name: "traj4".to_string(),
            index: 4,
            success: vec![Transcript::new(
                "a.txt",
                "<function=bash><parameter=command>ls</parameter></function>",
            )],
            failed: vec![Transcript::new(
                "b.txt",
                "[Current working directory: /w]\n[Execution time: 1s]\n[Command finished with exit code 2]",
            )],
        }
    }

    #[test]
    fn test_row_counts() {
        let row = GroupRow::from_group(0, &group());
        assert_eq!(row.success, 1);
        assert_eq!(row.failed, 1);
        assert_eq!(row.function_calls, 1);
        assert_eq!(row.command_results, 1);
        assert_eq!(row.failed_commands, 1);
    }

    #[test]
    fn test_text_output() {
        let rows = vec![GroupRow::from_group(0, &group())];
        let mut out = Vec::new();
        write_rows(OutputFormat::Text, &rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Trajectory groups (1 found)"));
        assert!(text.contains("traj4"));
        assert!(text.contains("(1 failed commands)"));
    }

    #[test]
    fn test_tsv_and_json_output() {
        let rows = vec![GroupRow::from_group(0, &group())];

        let mut out = Vec::new();
        write_rows(OutputFormat::Tsv, &rows, &mut out).unwrap();
        let tsv = String::from_utf8(out).unwrap();
        assert_eq!(tsv.lines().nth(1), Some("0\ttraj4\t1\t1\t1\t1\t1"));

        let mut out = Vec::new();
        write_rows(OutputFormat::Json, &rows, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["name"], "traj4");
    }

    #[test]
    fn test_empty_listing() {
        let mut out = Vec::new();
        write_rows(OutputFormat::Text, &[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No trajectory groups found.\n");
    }
}
