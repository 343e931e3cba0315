// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use crate::error::{ClintError, CommitError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for the conventional commit header: `type(scope)!: subject`.
    static ref HEADER_REGEX: Regex = Regex::new(
        r"^(?P<type>\w*)(?:\((?P<scope>[^()\r\n]*)\))?(?P<breaking>!)?:[ \t]*(?P<subject>.*)$"
    ).unwrap();

    /// A git trailer line (`Token: value`, `Token #value`).
    static ref TRAILER_REGEX: Regex =
        Regex::new(r"^(?:BREAKING[ -]CHANGE|[A-Za-z][\w-]*)(?:: | #)\S").unwrap();

    /// A breaking change note.
    static ref BREAKING_REGEX: Regex = Regex::new(r"^BREAKING[ -]CHANGE: ").unwrap();
}

/// Marker line below which git discards the message in `--verbose` commits.
const SCISSORS: &str = "# ------------------------ >8 ------------------------";

/// A parsed commit message.
///
/// Every section is optional: a header that does not follow the
/// conventional grammar still parses, with type, scope and subject absent,
/// so that the rules can report what is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    /// The message with comments removed.
    pub raw: String,
    /// First line.
    pub header: String,
    /// Commit type (feat, fix, etc.), exactly as written.
    pub commit_type: Option<String>,
    /// Optional scope.
    pub scope: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Optional body.
    pub body: Option<String>,
    /// Optional footer (trailers, breaking change notes).
    pub footer: Option<String>,
    /// Whether this is a breaking change.
    pub is_breaking: bool,
    /// 1-based line number of the first body line.
    pub body_line: Option<usize>,
    /// 1-based line number of the first footer line.
    pub footer_line: Option<usize>,
}

impl CommitMessage {
    /// Parse a commit message from a string.
    pub fn parse(message: &str) -> Result<Self> {
        let raw = strip_comments(message);

        if raw.trim().is_empty() {
            return Err(ClintError::Commit(CommitError::EmptyMessage));
        }

        let lines: Vec<&str> = raw.lines().collect();
        let header = lines[0].to_string();

        let (commit_type, scope, subject, mut is_breaking) = match HEADER_REGEX.captures(&header)
        {
            Some(captures) => (
                captures
                    .name("type")
                    .map(|m| m.as_str().to_string())
                    .filter(|s| !s.is_empty()),
                captures
                    .name("scope")
                    .map(|m| m.as_str().to_string())
                    .filter(|s| !s.is_empty()),
                captures
                    .name("subject")
                    .map(|m| m.as_str().to_string())
                    .filter(|s| !s.trim().is_empty()),
                captures.name("breaking").is_some(),
            ),
            None => (None, None, None, false),
        };

        let footer_start = find_footer_start(&lines);

        let (body, body_line) = section(&lines, 1, footer_start);
        let (footer, footer_line) = section(&lines, footer_start, lines.len());

        if lines[footer_start.min(lines.len())..]
            .iter()
            .any(|line| BREAKING_REGEX.is_match(line))
        {
            is_breaking = true;
        }

        tracing::debug!(
            "Parsed commit: type={:?} scope={:?} breaking={} body={} footer={}",
            commit_type,
            scope,
            is_breaking,
            body.is_some(),
            footer.is_some()
        );

        Ok(Self {
            raw,
            header,
            commit_type,
            scope,
            subject,
            body,
            footer,
            is_breaking,
            body_line,
            footer_line,
        })
    }

    /// Get the header length in code points.
    pub fn header_len(&self) -> usize {
        self.header.chars().count()
    }

    /// Get a raw line by its 1-based number.
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|index| self.raw.lines().nth(index))
    }

    /// Body lines paired with their 1-based line numbers.
    pub fn body_lines(&self) -> Vec<(usize, &str)> {
        numbered_lines(self.body.as_deref(), self.body_line)
    }

    /// Footer lines paired with their 1-based line numbers.
    pub fn footer_lines(&self) -> Vec<(usize, &str)> {
        numbered_lines(self.footer.as_deref(), self.footer_line)
    }
}

impl std::str::FromStr for CommitMessage {
    type Err = ClintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Remove git comment lines and everything below the scissors marker, then
/// trim blank lines around the message.
fn strip_comments(message: &str) -> String {
    let kept: Vec<&str> = message
        .lines()
        .take_while(|line| *line != SCISSORS)
        .filter(|line| !line.starts_with('#'))
        .map(|line| line.trim_end_matches('\r'))
        .collect();

    let start = kept
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(kept.len());
    let end = kept
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(start);

    kept[start..end].join("\n")
}

/// Index of the first footer line, or `lines.len()` when there is no footer.
///
/// A breaking change note starts the footer wherever it appears. Otherwise the
/// footer is the final paragraph when it consists only of trailers and their
/// indented continuation lines.
fn find_footer_start(lines: &[&str]) -> usize {
    let breaking = lines
        .iter()
        .skip(1)
        .position(|line| BREAKING_REGEX.is_match(line))
        .map(|i| i + 1);

    let paragraph_start = lines
        .iter()
        .rposition(|line| line.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(1);

    let trailers = if paragraph_start < lines.len()
        && TRAILER_REGEX.is_match(lines[paragraph_start])
        && lines[paragraph_start..]
            .iter()
            .all(|line| TRAILER_REGEX.is_match(line) || line.starts_with([' ', '\t']))
    {
        Some(paragraph_start)
    } else {
        None
    };

    match (breaking, trailers) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => lines.len(),
    }
}

/// Join `lines[start..end]` with surrounding blank lines removed.
///
/// Returns the text and the 1-based line number of its first line.
fn section(lines: &[&str], start: usize, end: usize) -> (Option<String>, Option<usize>) {
    if start >= end || start >= lines.len() {
        return (None, None);
    }

    let slice = &lines[start..end];
    let Some(first) = slice.iter().position(|line| !line.trim().is_empty()) else {
        return (None, None);
    };
    let last = slice
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .unwrap_or(first);

    (
        Some(slice[first..=last].join("\n")),
        Some(start + first + 1),
    )
}

fn numbered_lines(text: Option<&str>, first_line: Option<usize>) -> Vec<(usize, &str)> {
    match (text, first_line) {
        (Some(text), Some(first)) => text
            .lines()
            .enumerate()
            .map(|(i, line)| (first + i, line))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_message_parse() {
        let msg = CommitMessage::parse("feat(core): add new feature").unwrap();
        assert_eq!(msg.commit_type.as_deref(), Some("feat"));
        assert_eq!(msg.scope.as_deref(), Some("core"));
        assert_eq!(msg.subject.as_deref(), Some("add new feature"));
        assert!(msg.body.is_none());
        assert!(msg.footer.is_none());
    }

    #[test]
    fn test_commit_message_parse_keeps_type_case() {
        let msg = CommitMessage::parse("Fix: Something.").unwrap();
        assert_eq!(msg.commit_type.as_deref(), Some("Fix"));
        assert_eq!(msg.subject.as_deref(), Some("Something."));
    }

    #[test]
    fn test_commit_message_parse_empty_subject() {
        let msg = CommitMessage::parse("feat:").unwrap();
        assert_eq!(msg.commit_type.as_deref(), Some("feat"));
        assert!(msg.subject.is_none());
    }

    #[test]
    fn test_commit_message_parse_with_body() {
        let msg = CommitMessage::parse("fix: fix bug\n\nThis is the body").unwrap();
        assert_eq!(msg.body.as_deref(), Some("This is the body"));
        assert_eq!(msg.body_line, Some(3));
        assert!(msg.footer.is_none());
    }

    #[test]
    fn test_commit_message_parse_footer() {
        let msg = CommitMessage::parse(
            "fix: handle timeout\n\nRetry once before giving up.\n\nCloses #12\nReviewed-by: Ana",
        )
        .unwrap();
        assert_eq!(msg.body.as_deref(), Some("Retry once before giving up."));
        assert_eq!(msg.footer.as_deref(), Some("Closes #12\nReviewed-by: Ana"));
        assert_eq!(msg.footer_line, Some(5));
        assert_eq!(msg.footer_lines(), vec![(5, "Closes #12"), (6, "Reviewed-by: Ana")]);
    }

    #[test]
    fn test_body_prose_is_not_a_footer() {
        let msg = CommitMessage::parse(
            "docs: explain\n\nNote: this paragraph is prose\nand continues here",
        )
        .unwrap();
        assert!(msg.footer.is_none());
        assert!(msg.body.is_some());
    }

    #[test]
    fn test_commit_message_parse_breaking() {
        let msg = CommitMessage::parse("feat!: breaking change").unwrap();
        assert!(msg.is_breaking);

        let msg =
            CommitMessage::parse("feat: new api\n\nBREAKING CHANGE: drops v1 endpoints").unwrap();
        assert!(msg.is_breaking);
        assert!(msg.body.is_none());
        assert_eq!(msg.footer.as_deref(), Some("BREAKING CHANGE: drops v1 endpoints"));
    }

    #[test]
    fn test_non_conventional_header() {
        let msg = CommitMessage::parse("not a conventional commit").unwrap();
        assert!(msg.commit_type.is_none());
        assert!(msg.subject.is_none());
        assert_eq!(msg.header, "not a conventional commit");
    }

    #[test]
    fn test_strip_comments_and_scissors() {
        let input = concat!(
            "# Please enter the commit message\n",
            "feat: add login flow\n",
            "\n",
            "# Changes:\n",
            "# ------------------------ >8 ------------------------\n",
            "diff --git a/x b/x\n",
        );
        let msg = CommitMessage::parse(input).unwrap();
        assert_eq!(msg.raw, "feat: add login flow");
        assert!(msg.body.is_none());
    }

    #[test]
    fn test_empty_message() {
        assert!(CommitMessage::parse("").is_err());
        assert!(CommitMessage::parse("# only a comment\n\n").is_err());
    }

    #[test]
    fn test_header_len_counts_code_points() {
        let msg = CommitMessage::parse("feat: añadir").unwrap();
        assert_eq!(msg.header_len(), 12);
    }

    #[test]
    fn test_line_lookup() {
        let msg = CommitMessage::parse("feat: x\nbody without blank").unwrap();
        assert_eq!(msg.line(2), Some("body without blank"));
        assert_eq!(msg.line(0), None);
        assert_eq!(msg.body_line, Some(2));
    }
}
