//! Planning protocol changes for a repository's remotes.
//!
//! Given every `(remote, url)` pair of a repository, work out which URLs to
//! rewrite so that one group (organization or user) uses a target protocol.
//! Applying the plan is a literal substring replacement on the repository's
//! `config` file text.

use super::{GitUrl, Protocol, UrlError};

/// One URL configured on a remote.
#[derive(Debug, Clone)]
pub struct RemoteUrl {
    pub remote: String,
    pub url: GitUrl,
}

impl RemoteUrl {
    pub fn new(remote: impl Into<String>, url: impl Into<GitUrl>) -> Self {
        Self {
            remote: remote.into(),
            url: url.into(),
        }
    }
}

/// A single URL rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolChange {
    pub remote: String,
    pub old: String,
    pub new: String,
}

/// Split remote URLs into those that parse and the parse errors of the rest.
pub fn partition_parseable(urls: Vec<RemoteUrl>) -> (Vec<RemoteUrl>, Vec<(String, UrlError)>) {
    let mut parsed = Vec::new();
    let mut failed = Vec::new();
    for remote_url in urls {
        match remote_url.url.info() {
            Ok(_) => parsed.push(remote_url),
            Err(err) => failed.push((remote_url.remote, err)),
        }
    }
    (parsed, failed)
}

/// Distinct groups across parseable URLs, in first-seen order.
pub fn candidate_groups(urls: &[RemoteUrl]) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for group in urls.iter().filter_map(|u| u.url.info().ok()).map(|i| &i.group) {
        if !groups.contains(group) {
            groups.push(group.clone());
        }
    }
    groups
}

/// Rewrites needed to move every URL of `group` to `target`.
///
/// URLs already in the target protocol, belonging to another group, or whose
/// conversion would not change the string are left alone.
pub fn plan_protocol_changes(
    urls: &[RemoteUrl],
    group: &str,
    target: Protocol,
) -> Result<Vec<ProtocolChange>, UrlError> {
    let mut changes = Vec::new();
    for RemoteUrl { remote, url } in urls {
        let info = url.info()?;
        if info.protocol == target || info.group != group {
            continue;
        }
        let new = info.convert(target);
        if new.as_str() == url.as_str() {
            continue;
        }
        changes.push(ProtocolChange {
            remote: remote.clone(),
            old: url.as_str().to_string(),
            new: new.as_str().to_string(),
        });
    }
    Ok(changes)
}

/// Apply changes to git config file text by literal replacement.
pub fn apply_changes(config_text: &str, changes: &[ProtocolChange]) -> String {
    changes
        .iter()
        .fold(config_text.to_string(), |text, change| {
            text.replace(&change.old, &change.new)
        })
}
