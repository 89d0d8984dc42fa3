// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit selection
//!
//! Picks the commits to convert out of a newest-first history walk, either by
//! an explicit list of SHA prefixes or by an inclusive range of two prefixes.

use crate::commit::Commit;
use crate::error::GitError;
use tracing::debug;

/// Which commits to pick out of history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitSelection {
    /// Every commit whose SHA starts with one of these prefixes
    Hashes(Vec<String>),
    /// The inclusive span from `end` (newer) back to `start` (older)
    Range {
        /// Prefix of the oldest commit to include
        start: String,
        /// Prefix of the newest commit to include
        end: String,
    },
}

impl CommitSelection {
    /// Select commits by SHA prefixes
    #[must_use]
    pub fn hashes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Hashes(prefixes.into_iter().map(Into::into).collect())
    }

    /// Select the inclusive range between two SHA prefixes
    #[must_use]
    pub fn range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Range {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Select commits from a newest-first history walk
///
/// The result is ordered oldest first. Hash-list selection reads the whole
/// history; range selection stops as soon as the start boundary is included.
///
/// # Errors
///
/// Returns `GitError::RangeStartNotFound` if history runs out after the end
/// boundary matched but before the start boundary did. Errors yielded by the
/// walk are propagated as-is.
pub fn select_commits<I>(history: I, selection: &CommitSelection) -> Result<Vec<Commit>, GitError>
where
    I: IntoIterator<Item = Result<Commit, GitError>>,
{
    let mut selected = match selection {
        CommitSelection::Hashes(prefixes) => {
            let mut selected = Vec::new();
            for commit in history {
                let commit = commit?;
                if prefixes.iter().any(|p| commit.matches_prefix(p)) {
                    debug!(sha = commit.short_sha(), "Selected commit");
                    selected.push(commit);
                }
            }
            selected
        }
        CommitSelection::Range { start, end } => select_range(history, start, end)?,
    };

    selected.reverse();
    Ok(selected)
}

fn select_range<I>(history: I, start: &str, end: &str) -> Result<Vec<Commit>, GitError>
where
    I: IntoIterator<Item = Result<Commit, GitError>>,
{
    let mut selected = Vec::new();
    let mut in_range = false;

    for commit in history {
        let commit = commit?;
        if !in_range && commit.matches_prefix(end) {
            debug!(sha = commit.short_sha(), "Reached range end");
            in_range = true;
        }
        if in_range {
            let reached_start = commit.matches_prefix(start);
            selected.push(commit);
            if reached_start {
                return Ok(selected);
            }
        }
    }

    if in_range {
        return Err(GitError::RangeStartNotFound {
            start: start.to_string(),
        });
    }

    debug!(end, "Range end never matched, nothing selected");
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use similar_asserts::assert_eq;

    /// Build newest-first history where commit `i` has SHA `<i repeated>...`
    fn history(n: usize) -> Vec<Commit> {
        (0..n)
            .rev()
            .map(|i| Commit {
                sha: format!("{:x}", i % 16).repeat(40),
                message: format!("commit {i}"),
                author: "Tester".to_string(),
                timestamp: DateTime::from_timestamp(1_000 * i as i64, 0).expect("ts"),
            })
            .collect()
    }

    fn ok(commits: Vec<Commit>) -> impl Iterator<Item = Result<Commit, GitError>> {
        commits.into_iter().map(Ok)
    }

    fn messages(commits: &[Commit]) -> Vec<&str> {
        commits.iter().map(|c| c.message.as_str()).collect()
    }

    #[test]
    fn test_hashes_oldest_first_regardless_of_order() {
        let selection = CommitSelection::hashes(["5", "1", "3"]);
        let selected = select_commits(ok(history(6)), &selection).expect("select");
        assert_eq!(messages(&selected), vec!["commit 1", "commit 3", "commit 5"]);
    }

    #[test]
    fn test_hashes_no_match_is_empty() {
        let selection = CommitSelection::hashes(["f"]);
        let selected = select_commits(ok(history(4)), &selection).expect("select");
        assert!(selected.is_empty());
    }

    #[test]
    fn test_range_inclusive() {
        let selection = CommitSelection::range("1", "4");
        let selected = select_commits(ok(history(6)), &selection).expect("select");
        assert_eq!(
            messages(&selected),
            vec!["commit 1", "commit 2", "commit 3", "commit 4"]
        );
    }

    #[test]
    fn test_range_single_commit() {
        let selection = CommitSelection::range("2", "2");
        let selected = select_commits(ok(history(5)), &selection).expect("select");
        assert_eq!(messages(&selected), vec!["commit 2"]);
    }

    #[test]
    fn test_range_stops_reading_after_start() {
        // Anything past the start boundary must not be consumed.
        let mut walk: Vec<Result<Commit, GitError>> = history(4).into_iter().map(Ok).collect();
        walk.push(Err(GitError::Git2(git2::Error::from_str("unreachable"))));
        let selection = CommitSelection::range("0", "2");
        let selected = select_commits(walk, &selection).expect("select");
        assert_eq!(messages(&selected), vec!["commit 0", "commit 1", "commit 2"]);
    }

    #[test]
    fn test_range_start_not_found() {
        // start is newer than end, so history runs out while in range
        let selection = CommitSelection::range("3", "1");
        let result = select_commits(ok(history(5)), &selection);
        match result {
            Err(GitError::RangeStartNotFound { start }) => assert_eq!(start, "3"),
            other => panic!("Expected RangeStartNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_range_end_not_found_is_empty() {
        let selection = CommitSelection::range("1", "e");
        let selected = select_commits(ok(history(5)), &selection).expect("select");
        assert!(selected.is_empty());
    }

    #[test]
    fn test_walk_error_propagates() {
        let walk = vec![Err(GitError::Git2(git2::Error::from_str("bad object")))];
        let result = select_commits(walk, &CommitSelection::hashes(["a"]));
        assert!(matches!(result, Err(GitError::Git2(_))));
    }
}
