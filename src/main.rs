use std::io::Write;

use clap::Parser;
use git_well::styling::{HINT, eprintln};

mod cli;
mod commands;

use cli::{Cli, Command};
use commands::branch_cleanup::{CleanupOptions, handle_branch_cleanup};
use commands::branch_upgrade::handle_branch_upgrade;
use commands::discover_remote::{DiscoverRemoteOptions, handle_discover_remote};
use commands::rebase_add_continue::handle_rebase_add_continue;
use commands::remote_protocol::handle_remote_protocol;
use commands::repo_and_config;
use commands::track_upstream::handle_track_upstream;
use commands::url::handle_url;

/// Logs go to stderr, dimmed, without timestamps. `-v` enables debug;
/// `RUST_LOG` takes precedence when set.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format(|buf, record| writeln!(buf, "{HINT}{}{HINT:#}", record.args()))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = cli.config {
        git_well::config::set_config_path(path);
    }
    let repo_dir = cli.repo_dir.as_deref();

    match cli.command {
        Command::Url {
            url,
            component,
            protocol,
        } => handle_url(&url, component, protocol.as_deref()),
        Command::RemoteProtocol {
            group,
            protocol,
            dry_run,
        } => {
            let (repo, config) = repo_and_config(repo_dir)?;
            handle_remote_protocol(&repo, &config, &group, protocol.as_deref(), dry_run)
        }
        Command::DiscoverRemote {
            host,
            remote,
            home,
            remote_cwd,
            forward_agent,
            no_test_remote,
        } => {
            let (repo, _) = repo_and_config(repo_dir)?;
            handle_discover_remote(
                &repo,
                DiscoverRemoteOptions {
                    host,
                    remote,
                    home,
                    remote_cwd,
                    forward_agent,
                    test_remote: !no_test_remote,
                },
            )
        }
        Command::BranchUpgrade => {
            let (repo, config) = repo_and_config(repo_dir)?;
            handle_branch_upgrade(&repo, &config)
        }
        Command::BranchCleanup {
            keep_last,
            remove_merged,
            yes,
        } => {
            let (repo, config) = repo_and_config(repo_dir)?;
            handle_branch_cleanup(
                &repo,
                &config,
                CleanupOptions {
                    keep_last,
                    remove_merged,
                    yes,
                },
            )
        }
        Command::RebaseAddContinue { edit } => {
            let (repo, config) = repo_and_config(repo_dir)?;
            handle_rebase_add_continue(&repo, &config, edit)
        }
        Command::TrackUpstream => {
            let (repo, _) = repo_and_config(repo_dir)?;
            handle_track_upstream(&repo)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        // Styled errors from the helpers already carry their emoji
        let msg = format!("{err:#}");
        if msg.starts_with(git_well::styling::ERROR_EMOJI) {
            eprintln!("{msg}");
        } else {
            eprintln!("{}", git_well::git::error_message(msg));
        }
        std::process::exit(1);
    }
}
