use color_print::cformat;
use git_well::config::UserConfig;
use git_well::git::Repository;
use git_well::git::dev_branch::{dev_branches, latest};
use git_well::git::error_with_hint;
use git_well::styling::{eprintln, hint_message, info_message, success_message};

pub fn handle_branch_upgrade(repo: &Repository, config: &UserConfig) -> anyhow::Result<()> {
    let prefix = &config.dev_branch_prefix;
    let branches = dev_branches(
        prefix,
        &repo.local_branches()?,
        &repo.remote_branches()?,
        &repo.remotes()?,
    );
    let Some(newest) = latest(&branches) else {
        return Err(error_with_hint(
            format!("No versioned branches matching {prefix}<version>"),
            "Fetch from your remotes, or set dev-branch-prefix in config",
        ));
    };

    let current = repo.current_branch()?;
    if newest.is_local() && current.as_deref() == Some(newest.branch_name.as_str()) {
        eprintln!(
            "{}",
            info_message(cformat!("Already on the latest dev branch <bold>{}</>", newest.branch_name))
        );
        return Ok(());
    }

    if !newest.is_local() {
        eprintln!(
            "{}",
            hint_message(format!(
                "Latest is only on a remote ({}); fetch first to be sure it is current",
                newest.full_name()
            ))
        );
    }
    // A remote-only branch is checked out by its short name so git creates a tracking branch
    repo.checkout(&newest.branch_name)?;
    eprintln!(
        "{}",
        success_message(cformat!("Switched to <bold>{}</>", newest.branch_name))
    );
    Ok(())
}
