//! Parsing `git status` output during an interactive rebase.
//!
//! `git status` output is grouped into sections ("Unmerged paths:", "Changes
//! not staged for commit:", ...), each followed by hint lines in parentheses
//! and then one indented line per path. A blank line ends a section.
//! The text must come from git running under the C locale.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use super::GitError;

/// Paths reported by `git status` while a rebase is stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebaseStatus {
    /// Staged changes ("Changes to be committed")
    pub modified: Vec<PathBuf>,
    /// Conflicted paths ("Unmerged paths")
    pub both_modified: Vec<PathBuf>,
    /// Unstaged changes ("Changes not staged for commit")
    pub unstaged: Vec<PathBuf>,
}

impl RebaseStatus {
    /// Paths that need `git add` before the rebase can continue.
    pub fn paths_to_add(&self) -> Vec<PathBuf> {
        self.both_modified
            .iter()
            .chain(&self.unstaged)
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.modified.len(),
            self.both_modified.len(),
            self.unstaged.len(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Commands,
    Staged,
    Unmerged,
    Unstaged,
    Untracked,
}

/// Whether the status output says a rebase is in progress.
pub fn is_rebasing(status: &str) -> bool {
    status
        .lines()
        .take(2)
        .any(|line| line.contains("rebase in progress"))
}

/// Parse `git status` output into the paths of each section.
///
/// Fails if no rebase is in progress or a section contains a line the parser
/// does not understand; silently guessing would risk staging the wrong files.
pub fn parse_rebase_status(status: &str) -> Result<RebaseStatus, GitError> {
    if !is_rebasing(status) {
        return Err(GitError::ParseError("Not currently rebasing".to_string()));
    }

    let mut parsed = RebaseStatus::default();
    let mut section: Option<Section> = None;

    for (line_idx, line) in status.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            section = None;
            continue;
        }

        if let Some(next) = section_header(line) {
            section = Some(next);
            continue;
        }

        let Some(current) = section else { continue };
        // Hint lines, e.g. (use "git add <file>..." to mark resolution)
        if trimmed.starts_with('(') {
            continue;
        }

        let unhandled = || {
            GitError::ParseError(format!(
                "unhandled line {line_idx} in {current:?} section: {line:?}"
            ))
        };

        match current {
            Section::Commands | Section::Untracked => {}
            Section::Staged => {
                let (kind, path) = split_entry(trimmed).ok_or_else(unhandled)?;
                match kind {
                    "modified" | "new file" | "deleted" => parsed.modified.push(path),
                    "renamed" | "copied" => parsed.modified.push(rename_target(path)),
                    _ => return Err(unhandled()),
                }
            }
            Section::Unmerged => {
                let (kind, path) = split_entry(trimmed).ok_or_else(unhandled)?;
                match kind {
                    "both modified" | "both added" => parsed.both_modified.push(path),
                    _ => return Err(unhandled()),
                }
            }
            Section::Unstaged => {
                let (kind, path) = split_entry(trimmed).ok_or_else(unhandled)?;
                match kind {
                    "modified" | "new file" | "deleted" => parsed.unstaged.push(path),
                    _ => return Err(unhandled()),
                }
            }
        }
    }

    Ok(parsed)
}

fn section_header(line: &str) -> Option<Section> {
    // "Last command done" / "Last commands done", likewise for "Next"
    if line.starts_with("Last command") || line.starts_with("Next command") {
        Some(Section::Commands)
    } else if line.starts_with("Changes to be committed:") {
        Some(Section::Staged)
    } else if line.starts_with("Unmerged paths:") {
        Some(Section::Unmerged)
    } else if line.starts_with("Changes not staged for commit:") {
        Some(Section::Unstaged)
    } else if line.starts_with("Untracked files:") {
        Some(Section::Untracked)
    } else {
        None
    }
}

/// Trailing annotation on submodule entries, e.g. `(modified content, untracked content)`
static SUBMODULE_NOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+\((?:new commits|modified content|untracked content)[^)]*\)$").unwrap()
});

/// Split `modified:   path/to/file` into its kind and path.
fn split_entry(entry: &str) -> Option<(&str, PathBuf)> {
    let (kind, path) = entry.split_once(':')?;
    let path = SUBMODULE_NOTE.replace(path.trim(), "");
    if path.is_empty() {
        return None;
    }
    Some((kind.trim(), PathBuf::from(path.into_owned())))
}

fn rename_target(path: PathBuf) -> PathBuf {
    let text = path.to_string_lossy();
    match text.split_once(" -> ") {
        Some((_, target)) => PathBuf::from(target),
        None => path.clone(),
    }
}

static CONFLICT_MARKERS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"(?m)^<{7} HEAD$",
        r"(?m)^>{7} HEAD$",
        r"(?m)^>{7} [0-9a-f]{7,} \(.*\)$",
        r"(?m)^<{7} [0-9a-f]{7,} \(.*\)$",
    ]
    .map(|pattern| Regex::new(pattern).unwrap())
});

/// Whether `text` still contains conflict markers written by a rebase.
pub fn has_conflict_markers(text: &str) -> bool {
    CONFLICT_MARKERS.iter().any(|re| re.is_match(text))
}
