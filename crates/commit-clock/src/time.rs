// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Local/UTC conversion
//!
//! Every conversion uses one offset, captured once per run from the system's
//! *current* local offset. Timestamps on the other side of a DST change are
//! shifted by the wrong amount; this is accepted.

use chrono::{FixedOffset, Local, NaiveDateTime, Offset, TimeDelta};
use commit_clock_git::Commit;
use thiserror::Error;

/// Wire format for Clockify timestamps (always UTC)
pub const CLOCKIFY_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Time conversion errors
#[derive(Debug, Error)]
pub enum TimeError {
    /// A timestamp from the service did not match the wire format
    #[error("Invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// The offending value
        value: String,
        /// Underlying parse error
        source: chrono::ParseError,
    },
}

/// Shifts naive timestamps between local wall-clock time and UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeConverter {
    offset: FixedOffset,
}

impl TimeConverter {
    /// Use an explicit offset
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Capture the system's local offset as of now
    #[must_use]
    pub fn current() -> Self {
        Self::new(Local::now().offset().fix())
    }

    /// The captured offset
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn shift(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.offset.local_minus_utc()))
    }

    /// Local wall-clock time to UTC
    #[must_use]
    pub fn local_to_utc(&self, local: NaiveDateTime) -> NaiveDateTime {
        local - self.shift()
    }

    /// UTC to local wall-clock time
    #[must_use]
    pub fn utc_to_local(&self, utc: NaiveDateTime) -> NaiveDateTime {
        utc + self.shift()
    }

    /// A commit's authored instant as local wall-clock time
    #[must_use]
    pub fn commit_local_time(&self, commit: &Commit) -> NaiveDateTime {
        self.utc_to_local(commit.timestamp.naive_utc())
    }

    /// Current local wall-clock time under this offset
    #[must_use]
    pub fn now_local(&self) -> NaiveDateTime {
        self.utc_to_local(chrono::Utc::now().naive_utc())
    }
}

/// Format a UTC timestamp for the wire
#[must_use]
pub fn format_utc(utc: NaiveDateTime) -> String {
    utc.format(CLOCKIFY_FORMAT).to_string()
}

/// Parse a UTC timestamp from the wire
///
/// # Errors
///
/// Returns `TimeError::InvalidTimestamp` if `value` is not in `CLOCKIFY_FORMAT`.
pub fn parse_utc(value: &str) -> Result<NaiveDateTime, TimeError> {
    NaiveDateTime::parse_from_str(value, CLOCKIFY_FORMAT).map_err(|source| {
        TimeError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })
}
