use color_print::cformat;
use git_well::git::upstream::{RemoteInfo, choose_upstream};
use git_well::git::{Repository, error_message};
use git_well::styling::{eprintln, info_message, success_message};

pub fn handle_track_upstream(repo: &Repository) -> anyhow::Result<()> {
    let Some(branch) = repo.current_branch()? else {
        return Err(error_message("HEAD is detached; check out a branch first"));
    };

    if let Some(upstream) = repo.upstream_branch(&branch)? {
        eprintln!(
            "{}",
            info_message(cformat!(
                "<bold>{branch}</> already tracks <bold>{upstream}</>; nothing to do"
            ))
        );
        return Ok(());
    }

    let remotes = repo
        .remotes()?
        .into_iter()
        .map(|name| -> anyhow::Result<RemoteInfo> {
            let urls = repo.remote_urls(&name)?;
            Ok(RemoteInfo { name, urls })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let upstream = choose_upstream(&branch, &remotes, &repo.remote_branches()?)
        .map_err(error_message)?;

    repo.set_upstream(&branch, &upstream)?;
    eprintln!(
        "{}",
        success_message(cformat!("<bold>{branch}</> now tracks <bold>{upstream}</>"))
    );
    Ok(())
}
