//! Git commit types and operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit as read from history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Commit message, verbatim
    pub message: String,
    /// Author name
    pub author: String,
    /// Authored timestamp
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    /// The message with surrounding whitespace removed, used as an entry description
    #[must_use]
    pub fn description(&self) -> &str {
        self.message.trim()
    }

    /// Check whether `prefix` abbreviates this commit's SHA (ASCII case-insensitive)
    #[must_use]
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.sha.len() >= prefix.len()
            && self.sha.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    }
}
