use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

/// Environment applied to every git and git-well process so the host's
/// configuration cannot leak into tests.
fn isolate(cmd: &mut Command, config_path: &Path) {
    cmd.env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_SYSTEM", "/dev/null")
        .env("GIT_AUTHOR_DATE", "2025-01-01T00:00:00Z")
        .env("GIT_COMMITTER_DATE", "2025-01-01T00:00:00Z")
        .env("LC_ALL", "C")
        .env("LANG", "C")
        .env("GIT_WELL_CONFIG_PATH", config_path)
        .env_remove("RUST_LOG");
}

pub struct TestRepo {
    temp_dir: TempDir,
    root: PathBuf,
}

impl TestRepo {
    /// Create a repository with one commit on `main`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("repo");
        std::fs::create_dir(&root).expect("Failed to create repo directory");
        // Canonicalize to resolve symlinks (important on macOS where /var is symlink to /private/var)
        let root = root
            .canonicalize()
            .expect("Failed to canonicalize temp path");

        let repo = Self { temp_dir, root };
        repo.git(&["init", "-b", "main"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.commit("file.txt", "initial\n", "Initial commit");
        repo
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Scratch directory next to the repository, removed with it.
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("git-well.toml")
    }

    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.config_path(), contents).expect("Failed to write config");
    }

    /// Run git in the repository, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let output = self.git_output(args);
        if !output.status.success() {
            panic!(
                "git {} failed:\nstdout: {}\nstderr: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Run git in the repository, returning the raw output.
    pub fn git_output(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.root);
        isolate(&mut cmd, &self.config_path());
        cmd.output().expect("Failed to run git")
    }

    /// Write `path` and commit it.
    pub fn commit(&self, path: &str, contents: &str, message: &str) {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&full, contents).expect("Failed to write file");
        self.git(&["add", path]);
        self.git(&["commit", "-m", message]);
    }

    pub fn branches(&self) -> Vec<String> {
        self.git(&["branch", "--format=%(refname:short)"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn current_branch(&self) -> String {
        self.git(&["branch", "--show-current"])
    }

    /// Create a bare clone next to the repository and register it as `name`.
    ///
    /// Returns the path of the bare repository.
    pub fn add_bare_remote(&self, name: &str) -> PathBuf {
        let bare = self.temp_dir.path().join(format!("{name}.git"));
        self.git(&["clone", "--bare", ".", bare.to_str().unwrap()]);
        self.git(&["remote", "add", name, bare.to_str().unwrap()]);
        self.git(&["fetch", name]);
        bare
    }

    /// A `git-well` command running in this repository.
    pub fn git_well(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin("git-well"));
        cmd.current_dir(&self.root);
        isolate(&mut cmd, &self.config_path());
        cmd
    }
}

/// A `git-well` command outside of any repository.
pub fn git_well_command(dir: &Path) -> Command {
    let mut cmd = Command::new(get_cargo_bin("git-well"));
    cmd.current_dir(dir);
    isolate(&mut cmd, &dir.join("git-well.toml"));
    cmd
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
