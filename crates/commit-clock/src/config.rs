//! Configuration for commit-clock
//!
//! This module provides the command-line surface and the explicit
//! [`RunConfig`] the sync pipeline is driven by.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use commit_clock_git::CommitSelection;

use crate::clockify::DEFAULT_API_URL;

/// Pause after each entry-creation call unless overridden
pub const DEFAULT_DELAY_SECS: u64 = 5;

/// Commit Clock - log git commits as Clockify time entries
///
/// Each selected commit closes a time entry that starts where the previous
/// one ended. A running Clockify timer is folded into the sequence and
/// restarted afterwards.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "commit-clock")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Commit hash(es) to convert, abbreviated or full
    #[arg(
        value_name = "COMMIT",
        value_parser = parse_hash_prefix,
        required_unless_present = "range",
        conflicts_with = "range"
    )]
    pub commits: Vec<String>,

    /// Convert every commit from START (older) to END (newer), inclusive
    #[arg(
        long,
        num_args = 2,
        value_names = ["START", "END"],
        value_parser = parse_hash_prefix
    )]
    pub range: Option<Vec<String>>,

    /// Path inside the git repository to analyze
    ///
    /// The repository is discovered upward from here. Defaults to the
    /// current directory.
    #[arg(short, long = "repo-location", env = "COMMIT_CLOCK_REPO")]
    pub repo_location: Option<PathBuf>,

    /// Clockify API key
    #[arg(long, env = "CLOCKIFY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Clockify API base URL
    #[arg(long, env = "CLOCKIFY_API_URL")]
    pub api_url: Option<String>,

    /// Clockify workspace id (defaults to the first workspace)
    #[arg(long, env = "CLOCKIFY_WORKSPACE")]
    pub workspace: Option<String>,

    /// Seconds to wait after each entry is created
    #[arg(long, value_name = "SECONDS")]
    pub delay: Option<u64>,

    /// Compute and log the entries without changing anything in Clockify
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Everything the sync pipeline needs to know about one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Where to look for the repository
    pub repo_path: PathBuf,
    /// Which commits to convert
    pub selection: CommitSelection,
    /// Explicit workspace, or `None` for the first one
    pub workspace_id: Option<String>,
    /// Pause after each entry-creation call
    pub delay: Duration,
    /// Skip every mutating call
    pub dry_run: bool,
}

impl Config {
    /// Get the repository path, using the current directory as default
    #[must_use]
    pub fn repo_path(&self) -> PathBuf {
        self.repo_location
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the API base URL, using the public Clockify API as default
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Get the pause after each created entry
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay.unwrap_or(DEFAULT_DELAY_SECS))
    }

    /// Get the commit selection from the positional hashes or `--range`
    #[must_use]
    pub fn selection(&self) -> Option<CommitSelection> {
        match self.range.as_deref() {
            Some([start, end]) => Some(CommitSelection::range(start.clone(), end.clone())),
            Some(_) => None,
            None if self.commits.is_empty() => None,
            None => Some(CommitSelection::Hashes(self.commits.clone())),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key was given
    /// - The repository path doesn't exist
    /// - No commits were selected
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            return Err(ConfigError::MissingApiKey);
        }

        let repo_path = self.repo_path();
        if !repo_path.exists() {
            return Err(ConfigError::RepositoryNotFound(repo_path));
        }

        if self.selection().is_none() {
            return Err(ConfigError::NoCommits);
        }

        Ok(())
    }

    /// Validate and turn the parsed arguments into a [`RunConfig`]
    ///
    /// # Errors
    ///
    /// Returns the first error found by [`Config::validate`].
    pub fn run_config(&self) -> Result<RunConfig, ConfigError> {
        self.validate()?;
        let selection = self.selection().ok_or(ConfigError::NoCommits)?;
        Ok(RunConfig {
            repo_path: self.repo_path(),
            selection,
            workspace_id: self.workspace.clone(),
            delay: self.delay(),
            dry_run: self.dry_run,
        })
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Accept a non-empty hex SHA prefix of at most 40 characters, lowercased
///
/// # Errors
///
/// Returns a message suitable for clap if the value is not a SHA prefix.
pub fn parse_hash_prefix(value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err("commit hash must not be empty".to_string());
    }
    if value.len() > 40 {
        return Err(format!("commit hash is longer than 40 characters: {value}"));
    }
    if !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("not a hexadecimal commit hash: {value}"));
    }
    Ok(value.to_ascii_lowercase())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No API key on the command line or in the environment
    #[error("No Clockify API key: pass --api-key or set CLOCKIFY_API_KEY")]
    MissingApiKey,

    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepositoryNotFound(PathBuf),

    /// Neither commit hashes nor a range were given
    #[error("No commits given: pass commit hashes or --range START END")]
    NoCommits,
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn with_key() -> Config {
        Config {
            api_key: Some("key".to_string()),
            commits: vec!["abc123".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.commits.is_empty());
        assert!(config.range.is_none());
        assert!(config.repo_location.is_none());
        assert!(!config.dry_run);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_repo_path_default() {
        assert_eq!(Config::default().repo_path(), PathBuf::from("."));
    }

    #[test]
    fn test_api_url_default() {
        assert_eq!(Config::default().api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_delay_default_and_custom() {
        assert_eq!(Config::default().delay(), Duration::from_secs(5));
        let config = Config {
            delay: Some(10),
            ..Default::default()
        };
        assert_eq!(config.delay(), Duration::from_secs(10));
    }

    #[test]
    fn test_selection_from_hashes() {
        assert_eq!(
            with_key().selection(),
            Some(CommitSelection::Hashes(vec!["abc123".to_string()]))
        );
    }

    #[test]
    fn test_selection_from_range() {
        let config = Config {
            range: Some(vec!["aaa".to_string(), "bbb".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            config.selection(),
            Some(CommitSelection::range("aaa", "bbb"))
        );
    }

    #[test]
    fn test_validate_missing_api_key() {
        let config = Config {
            api_key: None,
            ..with_key()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));

        let blank = Config {
            api_key: Some("  ".to_string()),
            ..with_key()
        };
        assert!(matches!(blank.validate(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_validate_nonexistent_repo() {
        let config = Config {
            repo_location: Some(PathBuf::from("/nonexistent/path/12345")),
            ..with_key()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RepositoryNotFound(_))
        ));
    }

    #[test]
    fn test_validate_no_commits() {
        let config = Config {
            commits: vec![],
            ..with_key()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoCommits)));
    }

    #[test]
    fn test_run_config() {
        let config = Config {
            workspace: Some("ws1".to_string()),
            delay: Some(0),
            dry_run: true,
            ..with_key()
        };
        let run = config.run_config().expect("valid config");
        assert_eq!(
            run,
            RunConfig {
                repo_path: PathBuf::from("."),
                selection: CommitSelection::Hashes(vec!["abc123".to_string()]),
                workspace_id: Some("ws1".to_string()),
                delay: Duration::ZERO,
                dry_run: true,
            }
        );
    }

    #[test]
    fn test_parse_hash_prefix() {
        assert_eq!(parse_hash_prefix("ABC123"), Ok("abc123".to_string()));
        assert!(parse_hash_prefix("").is_err());
        assert!(parse_hash_prefix("xyz").is_err());
        assert!(parse_hash_prefix(&"a".repeat(41)).is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(Config::default().log_level(), tracing::Level::INFO);
        let verbose = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(verbose.log_level(), tracing::Level::DEBUG);
        let quiet = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(quiet.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
