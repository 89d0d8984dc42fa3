// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit-to-entry sync pipeline
//!
//! Turns an oldest-first list of commits into back-to-back time entries:
//!
//! 1. Look up the workspace, the user, and the user's most recent entry.
//! 2. If that entry is a running timer, start the cursor at the earlier of
//!    its start and the first commit, then delete it.
//! 3. For each commit after the cursor, create `[cursor, commit)` described
//!    by the commit message and advance the cursor.
//! 4. Restart the timer if one was running.
//!
//! # Example
//!
//! ```no_run
//! use commit_clock::clockify::ClockifyClient;
//! use commit_clock::config::Config;
//! use commit_clock::sync::Syncer;
//! use commit_clock::time::TimeConverter;
//! # async fn demo(config: Config, commits: Vec<commit_clock_git::Commit>) -> anyhow::Result<()> {
//! let run = config.run_config()?;
//! let client = ClockifyClient::new(config.api_url(), config.api_key.as_deref().unwrap_or(""))?;
//! let report = Syncer::new(&client, TimeConverter::current(), &run)
//!     .run(&commits)
//!     .await?;
//! println!("created {} entries", report.created);
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDateTime;
use commit_clock_git::{Commit, GitError, GitRepo, select_commits};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::time::{TimeConverter, format_utc, parse_utc};
use crate::tracker::{ApiError, NewTimeEntry, TimeEntry, TimeTracker};

// ============================================================================
// Error Types
// ============================================================================

/// Sync errors
#[derive(Debug, Error)]
pub enum SyncError {
    /// The time-tracking service failed or refused a call
    #[error("Clockify error: {0}")]
    Api(#[from] ApiError),

    /// The account has no workspace to log time into
    #[error("No Clockify workspace available")]
    NoWorkspace,
}

// ============================================================================
// Selection
// ============================================================================

/// Discover the repository and select the run's commits, oldest first
///
/// This touches nothing remote, so a selection failure leaves the service
/// untouched.
///
/// # Errors
///
/// Returns `GitError` if the repository cannot be found or walked, or if a
/// range's start boundary is never reached.
pub fn load_commits(config: &RunConfig) -> Result<Vec<Commit>, GitError> {
    let repo = GitRepo::discover(&config.repo_path)?;
    select_commits(repo.history()?, &config.selection)
}

// ============================================================================
// Planning
// ============================================================================

/// One entry the pipeline will create, in local time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// Local start (the cursor before this commit)
    pub start: NaiveDateTime,
    /// Local end (the commit's authored time)
    pub end: NaiveDateTime,
    /// Trimmed commit message
    pub description: String,
    /// SHA of the commit that closes this entry
    pub sha: String,
}

impl PlannedEntry {
    /// The create-entry request body for this entry
    #[must_use]
    pub fn to_new_entry(&self, converter: &TimeConverter) -> NewTimeEntry {
        NewTimeEntry {
            start: format_utc(converter.local_to_utc(self.start)),
            end: Some(format_utc(converter.local_to_utc(self.end))),
            description: self.description.clone(),
        }
    }
}

/// Lay out back-to-back entries for `commits` (oldest first) starting at `cursor`
///
/// A commit whose local time does not exceed the cursor produces no entry and
/// leaves the cursor where it is.
#[must_use]
pub fn plan_entries(
    commits: &[Commit],
    mut cursor: NaiveDateTime,
    converter: &TimeConverter,
) -> Vec<PlannedEntry> {
    let mut planned = Vec::with_capacity(commits.len());

    for commit in commits {
        let authored = converter.commit_local_time(commit);
        if authored <= cursor {
            debug!(sha = commit.short_sha(), %authored, %cursor, "Skipping commit at or before cursor");
            continue;
        }

        planned.push(PlannedEntry {
            start: cursor,
            end: authored,
            description: commit.description().to_string(),
            sha: commit.sha.clone(),
        });
        cursor = authored;
    }

    planned
}

/// Pick the entry with the latest start, along with that start
///
/// Entries whose start does not parse are logged and left out, so one
/// malformed old entry cannot hide the running timer.
#[must_use]
pub fn most_recent_entry(entries: &[TimeEntry]) -> Option<(NaiveDateTime, &TimeEntry)> {
    let mut latest: Option<(NaiveDateTime, &TimeEntry)> = None;
    for entry in entries {
        let start = match parse_utc(&entry.time_interval.start) {
            Ok(start) => start,
            Err(e) => {
                warn!(entry = %entry.id, error = %e, "Ignoring entry with unreadable start");
                continue;
            }
        };
        if latest.is_none_or(|(best, _)| start > best) {
            latest = Some((start, entry));
        }
    }
    latest
}

// ============================================================================
// Execution
// ============================================================================

/// Outcome of a sync run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries created (or that would be, in a dry run)
    pub created: usize,
    /// Commits that produced no entry
    pub skipped: usize,
    /// A timer was running when the run started
    pub timer_was_running: bool,
    /// A new running timer was started at the end
    pub timer_restored: bool,
    /// Nothing was changed in the service
    pub dry_run: bool,
}

/// Runs the pipeline against one [`TimeTracker`]
pub struct Syncer<'a, T: TimeTracker + ?Sized> {
    tracker: &'a T,
    converter: TimeConverter,
    config: &'a RunConfig,
}

impl<'a, T: TimeTracker + ?Sized> Syncer<'a, T> {
    /// Create a syncer
    #[must_use]
    pub fn new(tracker: &'a T, converter: TimeConverter, config: &'a RunConfig) -> Self {
        Self {
            tracker,
            converter,
            config,
        }
    }

    /// Convert `commits` (oldest first) into time entries
    ///
    /// With no commits this returns immediately without contacting the
    /// service. Mutations are not rolled back if a later call fails.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` on the first failing remote call.
    pub async fn run(&self, commits: &[Commit]) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport {
            dry_run: self.config.dry_run,
            ..Default::default()
        };

        let Some(first) = commits.first() else {
            warn!("No commits selected, nothing to do");
            return Ok(report);
        };
        info!(count = commits.len(), "Selected commits");

        let workspace_id = self.resolve_workspace().await?;
        let user = self.tracker.current_user().await?;
        debug!(user = %user.id, workspace = %workspace_id, "Resolved Clockify account");

        let entries = self.tracker.time_entries(&workspace_id, &user.id).await?;
        let running = most_recent_entry(&entries).filter(|(_, e)| e.is_running());

        let mut cursor = self.converter.commit_local_time(first);
        if let Some((started, timer)) = running {
            let timer_start = self.converter.utc_to_local(started);
            info!(%timer_start, "Timer is running, splicing it into the commit entries");
            cursor = cursor.min(timer_start);
            report.timer_was_running = true;

            if !self.config.dry_run {
                self.tracker
                    .delete_time_entry(&workspace_id, &timer.id)
                    .await?;
                debug!(entry = %timer.id, "Deleted running timer");
            }
        } else {
            info!("Timer was not running, the first commit is the starting point");
        }

        let planned = plan_entries(commits, cursor, &self.converter);
        report.skipped = commits.len() - planned.len();

        for entry in &planned {
            info!(
                sha = &entry.sha[..7.min(entry.sha.len())],
                start = %entry.start,
                end = %entry.end,
                "{}",
                first_line(&entry.description)
            );
            if !self.config.dry_run {
                self.tracker
                    .create_time_entry(&workspace_id, &entry.to_new_entry(&self.converter))
                    .await
                    .inspect_err(|e| {
                        warn!(created = report.created, error = %e, "Stopped partway through");
                    })?;
                tokio::time::sleep(self.config.delay).await;
            }
            report.created += 1;
        }

        if report.timer_was_running {
            self.restore_timer(&workspace_id, &mut report).await?;
        }

        info!(
            created = report.created,
            skipped = report.skipped,
            timer_restored = report.timer_restored,
            dry_run = report.dry_run,
            "Sync finished"
        );
        Ok(report)
    }

    async fn resolve_workspace(&self) -> Result<String, SyncError> {
        if let Some(id) = &self.config.workspace_id {
            return Ok(id.clone());
        }
        let workspaces = self.tracker.workspaces().await?;
        let workspace = workspaces.into_iter().next().ok_or(SyncError::NoWorkspace)?;
        debug!(name = %workspace.name, "Using first workspace");
        Ok(workspace.id)
    }

    async fn restore_timer(
        &self,
        workspace_id: &str,
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        let now = self.converter.now_local();
        info!(start = %now, "Restarting timer");
        if self.config.dry_run {
            return Ok(());
        }

        let timer = NewTimeEntry {
            start: format_utc(self.converter.local_to_utc(now)),
            end: None,
            description: String::new(),
        };
        self.tracker.create_time_entry(workspace_id, &timer).await?;
        report.timer_restored = true;
        Ok(())
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
