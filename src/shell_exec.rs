//! External command execution with logging
//!
//! Every `git`/`ssh` invocation goes through [`Cmd`], which logs the command
//! line at debug level before running it and a trace line with the duration
//! and outcome afterwards. Run with `-v` (or `RUST_LOG=debug`) to see them.

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;
use std::time::Instant;

/// Monotonic epoch for trace timestamps.
static TRACE_EPOCH: OnceLock<Instant> = OnceLock::new();

fn trace_epoch() -> &'static Instant {
    TRACE_EPOCH.get_or_init(Instant::now)
}

/// Builder for running an external command.
///
/// ```no_run
/// use git_well::shell_exec::Cmd;
///
/// let output = Cmd::new("git")
///     .args(["remote", "-v"])
///     .current_dir(".")
///     .context("remotes")
///     .run()?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    context: Option<String>,
    envs: Vec<(String, String)>,
}

impl Cmd {
    /// Create a new command builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            context: None,
            envs: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the command.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set the logging context (typically the repository directory name).
    pub fn context(mut self, ctx: impl Into<String>) -> Self {
        self.context = Some(ctx.into());
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.envs.push((key.into(), val.into()));
        self
    }

    /// The command line as it is logged, e.g. `git remote -v`.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    fn build(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        for (key, val) in &self.envs {
            cmd.env(key, val);
        }
        cmd
    }

    fn log_start(&self) -> (String, Instant) {
        let cmd_str = self.command_line();
        match &self.context {
            Some(ctx) => log::debug!("$ {} [{}]", cmd_str, ctx),
            None => log::debug!("$ {}", cmd_str),
        }
        (cmd_str, Instant::now())
    }

    fn log_finish(&self, cmd_str: &str, t0: Instant, outcome: Result<bool, &std::io::Error>) {
        let ts = t0.duration_since(*trace_epoch()).as_micros() as u64;
        let dur_us = t0.elapsed().as_micros() as u64;
        let ctx = self.context.as_deref().unwrap_or("-");
        match outcome {
            Ok(ok) => log::debug!(
                "[gw-trace] ts={ts} context={ctx} cmd=\"{cmd_str}\" dur_us={dur_us} ok={ok}"
            ),
            Err(e) => log::debug!(
                "[gw-trace] ts={ts} context={ctx} cmd=\"{cmd_str}\" dur_us={dur_us} err=\"{e}\""
            ),
        }
    }

    /// Execute the command and capture its output.
    pub fn run(self) -> std::io::Result<Output> {
        let (cmd_str, t0) = self.log_start();
        let result = self.build().output();
        self.log_finish(
            &cmd_str,
            t0,
            result.as_ref().map(|output| output.status.success()),
        );
        result
    }

    /// Execute the command with stdio inherited from this process.
    ///
    /// Used when git may open an editor or print progress the user should see.
    /// Returns whether the command exited successfully.
    pub fn run_inherited(self) -> std::io::Result<bool> {
        let (cmd_str, t0) = self.log_start();
        let result = self
            .build()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();
        self.log_finish(&cmd_str, t0, result.as_ref().map(|status| status.success()));
        result.map(|status| status.success())
    }
}
