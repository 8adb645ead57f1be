//! Choosing a sensible upstream for a branch that has none.
//!
//! Remotes pointing at the same URLs are treated as one candidate. Within such
//! a group `origin` is preferred, then the alphabetically first remote.

use std::collections::BTreeSet;
use std::fmt;

/// Why no upstream could be chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    NoCandidates { branch: String },
    /// Remotes with different URLs all have the branch
    Ambiguous { branch: String, remotes: Vec<String> },
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::NoCandidates { branch } => {
                write!(f, "No remote has a branch named {branch:?}")
            }
            UpstreamError::Ambiguous { branch, remotes } => write!(
                f,
                "Upstream for {branch:?} is ambiguous between remotes: {}",
                remotes.join(", ")
            ),
        }
    }
}

impl std::error::Error for UpstreamError {}

/// A remote with its fetch URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub name: String,
    pub urls: Vec<String>,
}

/// Pick `<remote>/<branch>` among remotes that have a branch named `branch`.
///
/// `remote_refs` are remote-tracking refs such as `origin/main`. Fails when no
/// remote has the branch, or when remotes with distinct URL sets both have it.
pub fn choose_upstream(
    branch: &str,
    remotes: &[RemoteInfo],
    remote_refs: &[String],
) -> Result<String, UpstreamError> {
    let with_branch: Vec<&RemoteInfo> = remotes
        .iter()
        .filter(|remote| {
            let wanted = format!("{}/{branch}", remote.name);
            remote_refs.iter().any(|r| *r == wanted)
        })
        .collect();

    // Group by URL set, keeping groups in order of first appearance
    let mut groups: Vec<(BTreeSet<&str>, Vec<&str>)> = Vec::new();
    for remote in with_branch {
        let urls: BTreeSet<&str> = remote.urls.iter().map(String::as_str).collect();
        match groups.iter_mut().find(|(key, _)| *key == urls) {
            Some((_, names)) => names.push(remote.name.as_str()),
            None => groups.push((urls, vec![remote.name.as_str()])),
        }
    }

    match groups.as_slice() {
        [] => Err(UpstreamError::NoCandidates {
            branch: branch.to_string(),
        }),
        [(_, names)] => {
            let remote = preferred_remote(names);
            Ok(format!("{remote}/{branch}"))
        }
        _ => Err(UpstreamError::Ambiguous {
            branch: branch.to_string(),
            remotes: groups
                .iter()
                .map(|(_, names)| preferred_remote(names).to_string())
                .collect(),
        }),
    }
}

fn preferred_remote<'a>(names: &[&'a str]) -> &'a str {
    if names.contains(&"origin") {
        return "origin";
    }
    names.iter().min().copied().unwrap_or_default()
}
