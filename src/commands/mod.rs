pub mod branch_cleanup;
pub mod branch_upgrade;
pub mod discover_remote;
pub mod prompt;
pub mod rebase_add_continue;
pub mod remote_protocol;
pub mod track_upstream;
pub mod url;

use std::path::Path;

use anyhow::Context;
use git_well::config::UserConfig;
use git_well::git::{Repository, not_a_repository};

/// Open the repository at `-C <dir>` (or the current directory) and load config.
pub fn repo_and_config(repo_dir: Option<&Path>) -> anyhow::Result<(Repository, UserConfig)> {
    let repo = match repo_dir {
        Some(dir) => Repository::at(dir),
        None => Repository::current(),
    };
    if !repo.is_repository() {
        return Err(not_a_repository(repo.path()));
    }
    let config = UserConfig::load().context("failed to load git-well config")?;
    Ok((repo, config))
}
