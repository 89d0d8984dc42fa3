// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test utilities for commit-clock integration tests
//!
//! This module provides utilities for:
//! - Git repository scaffolding for tests
//! - Environment isolation

#![allow(dead_code)]

use git2::{Repository, Signature, Time};
use tempfile::TempDir;

// ============================================================================
// Git Repository Scaffolding
// ============================================================================

/// A throwaway repository with a linear history, removed when dropped
pub struct ScratchRepo {
    dir: TempDir,
    repo: Repository,
}

impl ScratchRepo {
    /// Initialize an empty repository in a fresh temp directory
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let repo = Repository::init(dir.path()).expect("Failed to init repository");
        Self { dir, repo }
    }

    /// Path to the working directory
    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Commit an empty tree on HEAD authored at `seconds` since the epoch
    ///
    /// Returns the full SHA.
    pub fn commit(&self, message: &str, seconds: i64) -> String {
        let sig = Signature::new("Tester", "tester@example.com", &Time::new(seconds, 0))
            .expect("Failed to build signature");
        let tree_id = self
            .repo
            .index()
            .expect("Failed to open index")
            .write_tree()
            .expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().expect("Failed to peel HEAD")],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .expect("Failed to commit")
            .to_string()
    }
}

// ============================================================================
// Environment Isolation
// ============================================================================

/// Guard for temporarily setting environment variables
///
/// Restores the original value (or removes the variable) when dropped.
pub struct EnvGuard {
    key: String,
    original: Option<String>,
}

impl EnvGuard {
    /// Set an environment variable, returning a guard that restores it on drop
    pub fn set(key: &str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: We're in test code and control the environment variable access
        unsafe { std::env::set_var(key, value) };
        Self {
            key: key.to_string(),
            original,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: We're in test code and control the environment variable access
        unsafe {
            match &self.original {
                Some(val) => std::env::set_var(&self.key, val),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}
