//! Selection among competing tag matches.
//!
//! The scanner looks ahead for all three top-level tag shapes at once and
//! consumes whichever starts first. Ties are broken by a fixed priority:
//! function beats think, and both beat an execution result.

/// Top-level tag shapes recognized by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `<function=NAME>...</function>`
    Function,
    /// `<think>...</think>`
    Think,
    /// `[Current working directory: ...] ... [Command finished with exit code ...]`
    CommandResult,
}

impl TagKind {
    /// Tie-break rank; lower wins.
    const fn priority(self) -> u8 {
        match self {
            Self::Function => 0,
            Self::Think => 1,
            Self::CommandResult => 2,
        }
    }
}

/// Pick the candidate to consume next.
///
/// Each candidate is a tag kind and the offset where its first match starts.
/// Returns the candidate with the smallest offset, ties going to the kind
/// with the higher priority. Input order does not matter.
#[must_use]
pub fn select(candidates: &[(TagKind, usize)]) -> Option<(TagKind, usize)> {
    candidates
        .iter()
        .copied()
        .min_by_key(|&(kind, start)| (start, kind.priority()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_no_candidates() {
        assert_eq!(select(&[]), None);
    }

    #[test]
    fn test_earliest_start_wins() {
        let picked = select(&[
            (TagKind::Function, 30),
            (TagKind::Think, 10),
            (TagKind::CommandResult, 20),
        ]);
        assert_eq!(picked, Some((TagKind::Think, 10)));
    }

    #[rstest]
    #[case(&[(TagKind::Think, 5), (TagKind::Function, 5)], TagKind::Function)]
    #[case(&[(TagKind::Function, 5), (TagKind::Think, 5)], TagKind::Function)]
    #[case(&[(TagKind::CommandResult, 5), (TagKind::Think, 5)], TagKind::Think)]
    #[case(&[(TagKind::CommandResult, 5), (TagKind::Function, 5)], TagKind::Function)]
    #[case(
        &[(TagKind::CommandResult, 5), (TagKind::Think, 5), (TagKind::Function, 5)],
        TagKind::Function
    )]
    fn test_tie_break(#[case] candidates: &[(TagKind, usize)], #[case] expected: TagKind) {
        assert_eq!(select(candidates), Some((expected, 5)));
    }

    #[test]
    fn test_command_result_strictly_earlier_wins() {
        let picked = select(&[
            (TagKind::Think, 8),
            (TagKind::Function, 9),
            (TagKind::CommandResult, 7),
        ]);
        assert_eq!(picked, Some((TagKind::CommandResult, 7)));
    }
}
