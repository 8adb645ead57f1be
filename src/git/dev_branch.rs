//! Versioned development branches (`dev/<version>`).
//!
//! Branch names come from `git branch` output; nothing here runs git.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Dotted numeric version taken from a branch name, e.g. `1.2.0` or `v0.4`.
///
/// Missing trailing components compare as zero, so `1.2` == `1.2.0`.
#[derive(Debug, Clone)]
pub struct DevVersion {
    parts: Vec<u64>,
    raw: String,
}

impl DevVersion {
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for DevVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('v').unwrap_or(s);
        let parts = digits
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| format!("not a version: {s:?}"))?;
        Ok(Self {
            parts,
            raw: s.to_string(),
        })
    }
}

impl Ord for DevVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| {
                let a = self.parts.get(i).copied().unwrap_or(0);
                let b = other.parts.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for DevVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DevVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DevVersion {}

impl fmt::Display for DevVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A dev branch found locally or on a remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevBranch {
    /// Remote name for remote-tracking branches, `None` for local branches
    pub remote: Option<String>,
    /// Branch name without the remote prefix, e.g. `dev/1.2.0`
    pub branch_name: String,
    pub version: DevVersion,
}

impl DevBranch {
    pub fn is_local(&self) -> bool {
        self.remote.is_none()
    }

    /// Name as git shows it, e.g. `origin/dev/1.2.0`.
    pub fn full_name(&self) -> String {
        match &self.remote {
            Some(remote) => format!("{remote}/{}", self.branch_name),
            None => self.branch_name.clone(),
        }
    }
}

/// Collect dev branches sorted by ascending version.
///
/// Remote-tracking refs are attributed to the longest matching remote name;
/// refs such as `origin` (the short form of `origin/HEAD`) are skipped.
/// For equal versions remote branches sort before local ones.
pub fn dev_branches(
    prefix: &str,
    local: &[String],
    remote_refs: &[String],
    remotes: &[String],
) -> Vec<DevBranch> {
    let parse = |remote: Option<&str>, branch_name: &str| {
        let version = branch_name.strip_prefix(prefix)?.rsplit('/').next()?;
        let version = version.parse().ok()?;
        Some(DevBranch {
            remote: remote.map(str::to_string),
            branch_name: branch_name.to_string(),
            version,
        })
    };

    let remote_branches = remote_refs.iter().filter_map(|full| {
        let remote = remotes
            .iter()
            .filter(|r| full.starts_with(&format!("{r}/")))
            .max_by_key(|r| r.len())?;
        parse(Some(remote), &full[remote.len() + 1..])
    });
    let local_branches = local.iter().filter_map(|name| parse(None, name));

    let mut branches: Vec<DevBranch> = remote_branches.chain(local_branches).collect();
    branches.sort_by(|a, b| a.version.cmp(&b.version));
    branches
}

/// The newest dev branch, preferring a local branch over remote ones of the same version.
pub fn latest(branches: &[DevBranch]) -> Option<&DevBranch> {
    let newest = branches.iter().map(|b| &b.version).max()?;
    let candidates: Vec<&DevBranch> = branches.iter().filter(|b| &b.version == newest).collect();
    candidates
        .iter()
        .rev()
        .find(|b| b.is_local())
        .or_else(|| candidates.last())
        .copied()
}

/// Local dev branch names older than the newest `keep_last`.
pub fn stale_local_branches(branches: &[DevBranch], keep_last: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for branch in branches.iter().filter(|b| b.is_local()) {
        if !names.contains(&branch.branch_name) {
            names.push(branch.branch_name.clone());
        }
    }
    let remove = names.len().saturating_sub(keep_last);
    names.truncate(remove);
    names
}

/// Branches that must survive a cleanup.
#[derive(Debug, Clone, Default)]
pub struct KeepRules<'a> {
    pub main_branch: &'a str,
    pub protected: &'a [String],
    pub current: Option<&'a str>,
}

/// Merge stale dev branches and merged branches into one deletion list.
///
/// Order follows the inputs; the main, protected and current branches are never included.
pub fn cleanup_candidates(stale: &[String], merged: &[String], keep: &KeepRules<'_>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in stale.iter().chain(merged) {
        let kept = name == keep.main_branch
            || keep.protected.contains(name)
            || keep.current == Some(name.as_str());
        if !kept && !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}
