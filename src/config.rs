//! User configuration
//!
//! Stored as TOML at `~/.config/git-well/config.toml` (platform config dir),
//! with `GIT_WELL_*` environment variables layered on top:
//!
//! ```toml
//! default-protocol = "git"
//! main-branch = "main"
//! dev-branch-prefix = "dev/"
//! keep-last = 1
//! protected-branches = ["release"]
//! skip-editor = true
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::git::Protocol;

/// Environment variable naming the config file, used by tests for isolation
pub const CONFIG_PATH_ENV: &str = "GIT_WELL_CONFIG_PATH";

/// Override for the config path, set via the --config CLI flag
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Set the config path override (called from CLI --config flag)
pub fn set_config_path(path: PathBuf) {
    CONFIG_PATH.set(path).ok();
}

/// Get the user config file path.
///
/// Priority:
/// 1. CLI --config flag (set via `set_config_path`)
/// 2. GIT_WELL_CONFIG_PATH environment variable
/// 3. Platform-specific default location
pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = CONFIG_PATH.get() {
        return Some(path.clone());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    // choose_base_strategy uses XDG on Linux and macOS, %APPDATA% on Windows
    use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("git-well").join("config.toml"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct UserConfig {
    /// Protocol `remote-protocol` converts to when none is given
    pub default_protocol: Protocol,
    /// Branch that `branch-cleanup --remove-merged` checks merges against
    pub main_branch: String,
    /// Prefix of versioned development branches
    pub dev_branch_prefix: String,
    /// Number of newest dev branches `branch-cleanup` keeps
    pub keep_last: usize,
    /// Branches `branch-cleanup` never deletes
    pub protected_branches: Vec<String>,
    /// Skip the commit message editor on `rebase --continue`
    pub skip_editor: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            default_protocol: Protocol::Git,
            main_branch: "main".to_string(),
            dev_branch_prefix: "dev/".to_string(),
            keep_last: 1,
            protected_branches: vec!["release".to_string()],
            skip_editor: true,
        }
    }
}

impl UserConfig {
    /// Load from the resolved config path, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::load_layers(None),
        }
    }

    /// Load from a specific file (which need not exist).
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            log::debug!("Loading config from {}", path.display());
            Self::load_layers(Some(path))
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Self::load_layers(None)
        }
    }

    fn load_layers(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = toml::to_string(&Self::default())
            .map_err(|e| ConfigError::Message(format!("Failed to serialize defaults: {e}")))?;

        let mut builder = Config::builder().add_source(File::from_str(&defaults, FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        // GIT_WELL_MAIN_BRANCH=trunk overrides main-branch
        builder = builder.add_source(
            Environment::with_prefix("GIT_WELL")
                .prefix_separator("_")
                .convert_case(config::Case::Kebab)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("protected-branches"),
        );

        builder.build()?.try_deserialize()
    }
}
