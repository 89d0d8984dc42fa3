// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! commit-clock-git: Git history access for commit-clock
//!
//! This library crate walks a local git history and selects the commits that
//! commit-clock turns into time entries.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use commit_clock_git::{CommitSelection, GitRepo, select_commits};
//!
//! let repo = GitRepo::discover(".").expect("open repo");
//! let selection = CommitSelection::range("1945ab9", "c460aeb");
//! let commits = select_commits(repo.history().expect("walk"), &selection)
//!     .expect("select commits");
//!
//! for c in commits {
//!     println!("{} - {}", c.short_sha(), c.description());
//! }
//! ```

pub mod commit;
pub mod error;
pub mod history;
pub mod select;

pub use commit::Commit;
pub use error::GitError;
pub use history::GitRepo;
pub use select::{CommitSelection, select_commits};
