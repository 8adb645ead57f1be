use color_print::cformat;
use git_well::config::UserConfig;
use git_well::git::Repository;
use git_well::git::dev_branch::{KeepRules, cleanup_candidates, dev_branches, stale_local_branches};
use git_well::styling::{eprintln, format_with_gutter, info_message, success_message};

use super::prompt::{PromptResponse, prompt_yes_no};

pub struct CleanupOptions {
    pub keep_last: Option<usize>,
    pub remove_merged: bool,
    pub yes: bool,
}

pub fn handle_branch_cleanup(
    repo: &Repository,
    config: &UserConfig,
    opts: CleanupOptions,
) -> anyhow::Result<()> {
    let keep_last = opts.keep_last.unwrap_or(config.keep_last);
    let branches = dev_branches(
        &config.dev_branch_prefix,
        &repo.local_branches()?,
        &repo.remote_branches()?,
        &repo.remotes()?,
    );
    let stale = stale_local_branches(&branches, keep_last);

    let merged = if opts.remove_merged {
        merged_into_main(repo, &config.main_branch)?
    } else {
        Vec::new()
    };

    let current = repo.current_branch()?;
    let keep = KeepRules {
        main_branch: &config.main_branch,
        protected: &config.protected_branches,
        current: current.as_deref(),
    };
    let remove = cleanup_candidates(&stale, &merged, &keep);

    if remove.is_empty() {
        eprintln!("{}", info_message("Local dev branches are already clean"));
        return Ok(());
    }

    eprintln!("{}", info_message("Branches to delete:"));
    eprintln!("{}", format_with_gutter(&remove.join("\n")));
    if !opts.yes && prompt_yes_no("Delete these branches?")? == PromptResponse::Declined {
        eprintln!("{}", info_message("Nothing deleted"));
        return Ok(());
    }

    repo.delete_branches(&remove)?;
    eprintln!(
        "{}",
        success_message(cformat!(
            "Deleted <bold>{}</> branch{}",
            remove.len(),
            if remove.len() == 1 { "" } else { "es" }
        ))
    );
    Ok(())
}

/// Branches merged into `main`, or into `origin/<main>` when there is no local main branch.
fn merged_into_main(repo: &Repository, main_branch: &str) -> anyhow::Result<Vec<String>> {
    match repo.merged_branches(main_branch) {
        Ok(merged) => Ok(merged),
        Err(err) => {
            log::debug!("No local {main_branch} ({err}), trying origin/{main_branch}");
            Ok(repo.merged_branches(&format!("origin/{main_branch}"))?)
        }
    }
}
