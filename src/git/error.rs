//! git-well error types and formatting helpers
//!
//! Library code returns `GitError` or `UrlError`; commands use anyhow for
//! propagation and the helpers below for user-facing messages.

use std::path::Path;

use crate::styling::{ERROR, ERROR_BOLD, ERROR_EMOJI, HINT, HINT_EMOJI};

/// Failure running `git` or reading its output.
#[derive(Debug)]
pub enum GitError {
    /// The command could not be spawned or exited non-zero (carries stderr)
    CommandFailed(String),
    /// Output did not have the expected shape
    ParseError(String),
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::CommandFailed(msg) => write!(f, "{}", msg.trim_end()),
            GitError::ParseError(msg) => write!(f, "Failed to parse git output: {msg}"),
        }
    }
}

impl std::error::Error for GitError {}

/// Failure in the remote URL model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The string matched none of the recognized URL forms
    Parse { url: String },
    /// A conversion was requested to a protocol outside git/https/ssh/scp
    UnsupportedProtocol { protocol: String },
}

impl std::fmt::Display for UrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlError::Parse { url } => write!(f, "Unrecognized git remote URL: {url:?}"),
            UrlError::UnsupportedProtocol { protocol } => write!(
                f,
                "Unsupported protocol {protocol:?} (expected git, https, ssh or scp)"
            ),
        }
    }
}

impl std::error::Error for UrlError {}

// =============================================================================
// Error formatting helpers
// =============================================================================

/// Generic formatted error message
pub fn error_message(msg: impl std::fmt::Display) -> anyhow::Error {
    anyhow::anyhow!("{ERROR_EMOJI} {ERROR}{msg}{ERROR:#}")
}

/// Error message followed by a dimmed hint line
pub fn error_with_hint(msg: impl std::fmt::Display, hint: impl std::fmt::Display) -> anyhow::Error {
    anyhow::anyhow!("{ERROR_EMOJI} {ERROR}{msg}{ERROR:#}\n\n{HINT_EMOJI} {HINT}{hint}{HINT:#}")
}

/// Not inside a git repository
pub fn not_a_repository(path: &Path) -> anyhow::Error {
    error_with_hint(
        format!("Not a git repository: {}", path.display()),
        "Run inside a repository or pass -C <path>",
    )
}

/// No interactive terminal to ask on
pub fn not_interactive(what: &str) -> anyhow::Error {
    error_with_hint(
        format!("Cannot prompt for {what}: stdin is not a terminal"),
        format!("Pass the {what} explicitly"),
    )
}

/// Files still containing conflict markers
pub fn unresolved_conflicts(paths: &[impl AsRef<Path>]) -> anyhow::Error {
    let list = paths
        .iter()
        .map(|p| format!("  {ERROR_BOLD}{}{ERROR_BOLD:#}", p.as_ref().display()))
        .collect::<Vec<_>>()
        .join("\n");
    error_with_hint(
        format!("Paths still have unresolved conflicts:{ERROR:#}\n{list}{ERROR}"),
        "Resolve the conflict markers, then run again",
    )
}
