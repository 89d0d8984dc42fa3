// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Time-tracking service collaborator
//!
//! The sync pipeline talks to the service only through [`TimeTracker`], so
//! tests can drive it with an in-memory fake.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the time-tracking service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport, TLS or body decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Clockify returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: StatusCode,
        /// Response body, for diagnostics
        body: String,
    },

    /// The base URL or API key could not be used to build a request
    #[error("Invalid request setup: {0}")]
    InvalidUrl(String),
}

/// A Clockify workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Workspace id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
}

/// The user owning the API key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
}

/// Start and end of an entry, as UTC wire strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Start, `%Y-%m-%dT%H:%M:%SZ`
    pub start: String,
    /// End; `None` while the timer is running
    #[serde(default)]
    pub end: Option<String>,
}

/// A time entry as stored by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    /// Entry id
    pub id: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// When the entry ran
    pub time_interval: TimeInterval,
}

impl TimeEntry {
    /// An entry with no end is a running timer
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.time_interval.end.is_none()
    }
}

/// Body of a create-entry request
///
/// Leaving `end` out asks the service to start a running timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimeEntry {
    /// Start, `%Y-%m-%dT%H:%M:%SZ`
    pub start: String,
    /// End, `%Y-%m-%dT%H:%M:%SZ`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Free-text description
    pub description: String,
}

/// Operations the sync pipeline needs from the time-tracking service
#[async_trait]
pub trait TimeTracker: Send + Sync {
    /// All workspaces visible to the user
    async fn workspaces(&self) -> Result<Vec<Workspace>, ApiError>;

    /// The user owning the credentials
    async fn current_user(&self) -> Result<User, ApiError>;

    /// The user's time entries in a workspace
    ///
    /// The service returns these newest first; callers should not rely on it.
    async fn time_entries(&self, workspace_id: &str, user_id: &str)
    -> Result<Vec<TimeEntry>, ApiError>;

    /// Delete one entry
    async fn delete_time_entry(&self, workspace_id: &str, entry_id: &str) -> Result<(), ApiError>;

    /// Create one entry, returning it as stored
    async fn create_time_entry(
        &self,
        workspace_id: &str,
        entry: &NewTimeEntry,
    ) -> Result<TimeEntry, ApiError>;
}
