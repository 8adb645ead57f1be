use std::path::PathBuf;

use clap::{Parser, Subcommand};
use git_well::git::UrlComponent;

#[derive(Parser, Debug)]
#[command(
    name = "git-well",
    version,
    about = "Git helpers for remotes, dev branches and rebases",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Operate on a repository at the given path (like `git -C`).
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub repo_dir: Option<PathBuf>,

    /// Path to the config TOML (defaults to `~/.config/git-well/config.toml`).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show debug logs, including every git command run.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a git remote URL and print its components.
    Url {
        /// Remote URL, e.g. `git@github.com:Org/repo.git`.
        url: String,
        /// Print only this component.
        #[arg(value_enum)]
        component: Option<UrlComponent>,
        /// Convert the URL to this protocol first (git, https, ssh or scp).
        #[arg(long)]
        protocol: Option<String>,
    },

    /// Switch the protocol of every remote URL belonging to a group.
    #[command(visible_alias = "permit")]
    RemoteProtocol {
        /// Organization or user whose URLs change; `auto` picks or asks.
        #[arg(default_value = "auto")]
        group: String,
        /// Target protocol (defaults to `default-protocol` from config).
        protocol: Option<String>,
        /// Print the planned rewrites without touching the config file.
        #[arg(long)]
        dry_run: bool,
    },

    /// Add a remote pointing at this repository's checkout on an ssh host.
    DiscoverRemote {
        /// Host as understood by ssh, e.g. `workstation` or `me@10.0.0.2`.
        host: String,
        /// Remote name (defaults to the host).
        #[arg(long)]
        remote: Option<String>,
        /// Home directory the repository path is made relative to.
        #[arg(long, value_name = "PATH")]
        home: Option<PathBuf>,
        /// Repository path on the host, relative to the remote home.
        #[arg(long, value_name = "PATH", conflicts_with = "home")]
        remote_cwd: Option<String>,
        /// Forward the ssh agent when testing the remote.
        #[arg(short = 'A', long)]
        forward_agent: bool,
        /// Skip checking that the repository exists on the host.
        #[arg(long)]
        no_test_remote: bool,
    },

    /// Check out the newest versioned dev branch.
    BranchUpgrade,

    /// Delete old dev branches and, optionally, merged branches.
    BranchCleanup {
        /// Number of newest local dev branches to keep.
        #[arg(long)]
        keep_last: Option<usize>,
        /// Also delete branches merged into the main branch.
        #[arg(long)]
        remove_merged: bool,
        /// Delete without asking.
        #[arg(short, long)]
        yes: bool,
    },

    /// Stage resolved files and continue a stopped rebase.
    RebaseAddContinue {
        /// Open the commit message editor on continue.
        #[arg(long)]
        edit: bool,
    },

    /// Set the current branch's upstream when one remote is the obvious choice.
    TrackUpstream,
}
