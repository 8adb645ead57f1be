use std::path::PathBuf;

use anyhow::Context;
use git_well::config::UserConfig;
use git_well::git::rebase_status::{has_conflict_markers, parse_rebase_status};
use git_well::git::{Repository, unresolved_conflicts};
use git_well::styling::{eprintln, info_message, progress_message, success_message, warning_message};

pub fn handle_rebase_add_continue(
    repo: &Repository,
    config: &UserConfig,
    edit: bool,
) -> anyhow::Result<()> {
    let status = parse_rebase_status(&repo.status_text()?)?;
    let (modified, both_modified, unstaged) = status.counts();
    log::debug!("modified={modified} both_modified={both_modified} unstaged={unstaged}");

    let paths = status.paths_to_add();
    let conflicts = find_conflicts(repo, &paths)?;
    if !conflicts.is_empty() {
        return Err(unresolved_conflicts(&conflicts));
    }
    eprintln!("{}", info_message("No unresolved conflicts detected"));

    if !paths.is_empty() {
        eprintln!(
            "{}",
            progress_message(format!("Staging {} path(s)", paths.len()))
        );
        repo.add(&paths)?;
    }

    eprintln!("{}", progress_message("Continuing rebase"));
    if repo.rebase_continue(config.skip_editor && !edit)? {
        eprintln!("{}", success_message("Rebase step complete"));
    } else {
        eprintln!("{}", warning_message("Rebase is still in progress"));
    }
    Ok(())
}

/// Paths (relative to the repository directory) whose contents still hold conflict markers.
///
/// Directories are submodules and are not scanned.
fn find_conflicts(repo: &Repository, paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut conflicts = Vec::new();
    for path in paths {
        let full = repo.path().join(path);
        if full.is_dir() || !full.exists() {
            continue;
        }
        let bytes =
            std::fs::read(&full).with_context(|| format!("failed to read {}", full.display()))?;
        if has_conflict_markers(&String::from_utf8_lossy(&bytes)) {
            conflicts.push(path.clone());
        }
    }
    Ok(conflicts)
}
