use anyhow::Context;
use color_print::cformat;
use git_well::config::UserConfig;
use git_well::git::remote_protocol::{
    ProtocolChange, RemoteUrl, apply_changes, candidate_groups, partition_parseable,
    plan_protocol_changes,
};
use git_well::git::{Protocol, Repository, UrlError, error_message};
use git_well::styling::{eprintln, format_with_gutter, info_message, success_message, warning_message};

use super::prompt::prompt_choice;

pub fn handle_remote_protocol(
    repo: &Repository,
    config: &UserConfig,
    group: &str,
    protocol: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let target = match protocol {
        Some(name) => name.parse::<Protocol>().map_err(|_| UrlError::UnsupportedProtocol {
            protocol: name.to_string(),
        })?,
        None => config.default_protocol,
    };

    let mut urls = Vec::new();
    for remote in repo.remotes()? {
        for url in repo.remote_urls(&remote)? {
            urls.push(RemoteUrl::new(remote.clone(), url));
        }
    }
    let (urls, failed) = partition_parseable(urls);
    for (remote, err) in failed {
        eprintln!("{}", warning_message(format!("Skipping remote {remote}: {err}")));
    }

    let group = if group == "auto" {
        let groups = candidate_groups(&urls);
        match groups.as_slice() {
            [] => return Err(error_message("No remote URLs with a recognizable group")),
            [only] => only.clone(),
            _ => prompt_choice("group", &groups)?,
        }
    } else {
        group.to_string()
    };
    log::debug!("Converting remotes of group {group} to {target}");

    let changes = plan_protocol_changes(&urls, &group, target)?;
    if changes.is_empty() {
        eprintln!(
            "{}",
            info_message(cformat!("Remotes of <bold>{group}</> already use {target}"))
        );
        return Ok(());
    }

    eprintln!("{}", info_message(cformat!("Changes for <bold>{group}</>:")));
    eprintln!("{}", format_with_gutter(&describe_changes(&changes)));
    if dry_run {
        return Ok(());
    }

    let config_path = repo.config_path()?;
    let text = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    std::fs::write(&config_path, apply_changes(&text, &changes))
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    eprintln!(
        "{}",
        success_message(format!(
            "Updated {} remote URL{} to {target}",
            changes.len(),
            if changes.len() == 1 { "" } else { "s" }
        ))
    );
    Ok(())
}

fn describe_changes(changes: &[ProtocolChange]) -> String {
    changes
        .iter()
        .map(|c| format!("{}: {} -> {}", c.remote, c.old, c.new))
        .collect::<Vec<_>>()
        .join("\n")
}
