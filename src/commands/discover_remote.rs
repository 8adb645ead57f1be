//! Register an ssh remote that mirrors this checkout's location on another host.
//!
//! The remote machine must keep repositories at the same place relative to the
//! home directory, so `~/code/repo` here is `host:code/repo/.git` there.

use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use color_print::cformat;
use git_well::git::{GitUrl, Repository, error_message, error_with_hint};
use git_well::shell_exec::Cmd;
use git_well::styling::{eprintln, format_with_gutter, progress_message, success_message};

pub struct DiscoverRemoteOptions {
    pub host: String,
    pub remote: Option<String>,
    pub home: Option<PathBuf>,
    pub remote_cwd: Option<String>,
    pub forward_agent: bool,
    pub test_remote: bool,
}

/// Path of `root` relative to `home`, or `None` if `root` is not under `home`.
fn relative_to_home(root: &Path, home: &Path) -> Option<PathBuf> {
    let root = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let home = dunce::canonicalize(home).unwrap_or_else(|_| home.to_path_buf());
    let rel = pathdiff::diff_paths(&root, &home)?;
    if rel.components().any(|c| matches!(c, Component::ParentDir)) || rel.is_absolute() {
        return None;
    }
    Some(rel)
}

/// `<remote_cwd>/.git`, written with forward slashes for the remote shell.
fn remote_gitdir(remote_cwd: &str) -> String {
    let cwd = remote_cwd.trim_end_matches('/');
    if cwd.is_empty() || cwd == "." {
        ".git".to_string()
    } else {
        format!("{cwd}/.git")
    }
}

/// Remote URL in explicit-directory scp form, `host:path/repo/.git`.
pub fn remote_url(host: &str, remote_cwd: &str) -> GitUrl {
    GitUrl::new(format!("{host}:{}", remote_gitdir(remote_cwd)))
}

pub fn handle_discover_remote(repo: &Repository, opts: DiscoverRemoteOptions) -> anyhow::Result<()> {
    let remote_cwd = match opts.remote_cwd {
        Some(cwd) => cwd,
        None => {
            let root = repo.worktree_root()?;
            let home = match opts.home {
                Some(home) => home,
                None => etcetera::home_dir().context("failed to find home directory")?,
            };
            let rel = relative_to_home(&root, &home).ok_or_else(|| {
                error_with_hint(
                    format!(
                        "Repository {} is not under home directory {}",
                        root.display(),
                        home.display()
                    ),
                    "Pass --home or --remote-cwd",
                )
            })?;
            log::debug!("home={} root={}", home.display(), root.display());
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        }
    };
    let gitdir = remote_gitdir(&remote_cwd);

    if opts.test_remote {
        eprintln!(
            "{}",
            progress_message(cformat!("Checking <bold>{}</> for {gitdir}", opts.host))
        );
        let mut ssh = Cmd::new("ssh").context("discover-remote");
        if opts.forward_agent {
            ssh = ssh.arg("-A");
        }
        let output = ssh
            .arg(&opts.host)
            .arg(format!("test -e {gitdir}"))
            .run()
            .context("failed to run ssh")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut msg = format!("{} is not reachable or has no repository at {gitdir}", opts.host);
            if !stderr.trim().is_empty() {
                msg = format!("{msg}\n{}", format_with_gutter(stderr.trim()));
            }
            return Err(error_message(msg));
        }
    }

    let url = remote_url(&opts.host, &remote_cwd);
    let name = opts.remote.unwrap_or_else(|| opts.host.clone());
    repo.add_remote(&name, url.as_str())?;
    eprintln!(
        "{}",
        success_message(cformat!("Added remote <bold>{name}</> at {url}"))
    );
    Ok(())
}
