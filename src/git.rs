//! Git repository access and the remote URL model.
//!
//! Everything that shells out to `git` lives on [`Repository`]. The parsing
//! modules (`url`, `dev_branch`, `rebase_status`, `remote_protocol`,
//! `upstream`) are pure and operate on strings `Repository` hands them.

use std::path::{Path, PathBuf};

use crate::shell_exec::Cmd;

pub mod dev_branch;
mod error;
pub mod rebase_status;
pub mod remote_protocol;
pub mod upstream;
mod url;

pub use error::{
    GitError, UrlError, error_message, error_with_hint, not_a_repository, not_interactive,
    unresolved_conflicts,
};
pub use url::{GitUrl, Protocol, UrlComponent, UrlForm, UrlInfo};

/// Repository context for git operations.
///
/// # Examples
///
/// ```no_run
/// use git_well::git::Repository;
///
/// let repo = Repository::current();
/// let branch = repo.current_branch()?;
/// let remotes = repo.remotes()?;
/// # Ok::<(), git_well::git::GitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a repository context for the current directory.
    pub fn current() -> Self {
        Self::at(".")
    }

    /// Get the path this repository context operates on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that the path is inside a work tree.
    pub fn is_repository(&self) -> bool {
        self.run_command(&["rev-parse", "--is-inside-work-tree"])
            .is_ok_and(|out| out.trim() == "true")
    }

    /// Get the worktree root directory (top-level of the working tree).
    pub fn worktree_root(&self) -> Result<PathBuf, GitError> {
        let stdout = self.run_command(&["rev-parse", "--show-toplevel"])?;
        Ok(PathBuf::from(stdout.trim()))
    }

    /// Get the git common directory (the actual .git directory for the repository).
    pub fn git_common_dir(&self) -> Result<PathBuf, GitError> {
        let stdout = self.run_command(&["rev-parse", "--git-common-dir"])?;
        let dir = PathBuf::from(stdout.trim());
        // Relative output is relative to the directory git ran in
        Ok(if dir.is_absolute() {
            dir
        } else {
            self.path.join(dir)
        })
    }

    /// Path of the repository's `config` file.
    pub fn config_path(&self) -> Result<PathBuf, GitError> {
        Ok(self.git_common_dir()?.join("config"))
    }

    /// Names of all configured remotes.
    pub fn remotes(&self) -> Result<Vec<String>, GitError> {
        let stdout = self.run_command(&["remote"])?;
        Ok(non_empty_lines(&stdout))
    }

    /// All fetch URLs configured for a remote.
    pub fn remote_urls(&self, remote: &str) -> Result<Vec<String>, GitError> {
        let stdout = self.run_command(&["remote", "get-url", "--all", remote])?;
        Ok(non_empty_lines(&stdout))
    }

    /// Register a new remote.
    pub fn add_remote(&self, name: &str, url: &str) -> Result<(), GitError> {
        self.run_command(&["remote", "add", name, url])?;
        Ok(())
    }

    /// Get the current branch name, or None if in detached HEAD state.
    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        let stdout = self.run_command(&["branch", "--show-current"])?;
        let branch = stdout.trim();

        if branch.is_empty() {
            Ok(None) // Detached HEAD
        } else {
            Ok(Some(branch.to_string()))
        }
    }

    /// Get all local branch names.
    pub fn local_branches(&self) -> Result<Vec<String>, GitError> {
        let stdout = self.run_command(&["branch", "--format=%(refname:short)"])?;
        Ok(non_empty_lines(&stdout))
    }

    /// Get remote-tracking branch names (e.g. `origin/main`).
    pub fn remote_branches(&self) -> Result<Vec<String>, GitError> {
        let stdout = self.run_command(&["branch", "-r", "--format=%(refname:short)"])?;
        Ok(non_empty_lines(&stdout))
    }

    /// Local branches merged into `target`.
    pub fn merged_branches(&self, target: &str) -> Result<Vec<String>, GitError> {
        let stdout =
            self.run_command(&["branch", "--merged", target, "--format=%(refname:short)"])?;
        Ok(non_empty_lines(&stdout))
    }

    /// Force-delete local branches.
    pub fn delete_branches(&self, branches: &[String]) -> Result<(), GitError> {
        if branches.is_empty() {
            return Ok(());
        }
        let mut args = vec!["branch", "-D"];
        args.extend(branches.iter().map(String::as_str));
        self.run_command(&args)?;
        Ok(())
    }

    pub fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.run_command(&["checkout", branch])?;
        Ok(())
    }

    /// Get the upstream tracking branch for the given branch.
    pub fn upstream_branch(&self, branch: &str) -> Result<Option<String>, GitError> {
        let result = self.run_command(&["rev-parse", "--abbrev-ref", &format!("{}@{{u}}", branch)]);

        match result {
            Ok(upstream) => {
                let trimmed = upstream.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
            Err(_) => Ok(None), // No upstream configured
        }
    }

    pub fn set_upstream(&self, branch: &str, upstream: &str) -> Result<(), GitError> {
        self.run_command(&[
            "branch",
            &format!("--set-upstream-to={upstream}"),
            branch,
        ])?;
        Ok(())
    }

    /// Human-readable `git status` output, forced to the C locale so it can be parsed.
    pub fn status_text(&self) -> Result<String, GitError> {
        self.run_command(&["status"])
    }

    /// Stage the given paths.
    pub fn add(&self, paths: &[PathBuf]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add".to_string(), "--".to_string()];
        args.extend(paths.iter().map(|p| p.to_string_lossy().into_owned()));
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_command(&args)?;
        Ok(())
    }

    /// Run `git rebase --continue`, showing git's output to the user.
    ///
    /// Returns false if the rebase stopped again (for example at the next conflict).
    pub fn rebase_continue(&self, skip_editor: bool) -> Result<bool, GitError> {
        let mut cmd = self.git_cmd();
        if skip_editor {
            cmd = cmd.args(["-c", "core.editor=true"]);
        }
        cmd.args(["rebase", "--continue"])
            .run_inherited()
            .map_err(|e| GitError::CommandFailed(e.to_string()))
    }

    fn git_cmd(&self) -> Cmd {
        let context = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        Cmd::new("git")
            .current_dir(&self.path)
            .context(context)
            .env("LC_ALL", "C")
    }

    /// Run a git command in this repository and return stdout.
    pub fn run_command(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self
            .git_cmd()
            .args(args.iter().copied())
            .run()
            .map_err(|e| GitError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed(stderr.to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

fn non_empty_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
