// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git history walking
//!
//! This module reads commits from a repository using the `git2` crate,
//! newest first, lazily.

use crate::commit::Commit;
use crate::error::GitError;
use chrono::{DateTime, Utc};
use git2::{Repository, Sort};
use std::path::Path;
use tracing::debug;

/// A git repository wrapper for reading commit history
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        debug!(git_dir = %repo.path().display(), "Discovered repository");
        Ok(Self { repo })
    }

    /// Walk history from HEAD, newest first
    ///
    /// Commits are produced lazily, so a consumer that stops early never
    /// reads the rest of the history.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the walk cannot be started (for example, when
    /// HEAD is unborn). Errors reading individual commits are yielded by the
    /// iterator.
    pub fn history(
        &self,
    ) -> Result<impl Iterator<Item = Result<Commit, GitError>> + '_, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push_head()?;

        Ok(revwalk.map(move |oid_result| {
            let oid = oid_result?;
            let git_commit = self.repo.find_commit(oid)?;
            Ok(extract_commit(&git_commit))
        }))
    }
}

/// Extract commit metadata from a git2 commit, using the author's time
fn extract_commit(git_commit: &git2::Commit<'_>) -> Commit {
    let author = git_commit.author();
    let timestamp = DateTime::from_timestamp(author.when().seconds(), 0).unwrap_or_else(Utc::now);

    Commit {
        sha: git_commit.id().to_string(),
        message: git_commit.message().unwrap_or("").to_string(),
        author: author.name().unwrap_or("Unknown").to_string(),
        timestamp,
    }
}
