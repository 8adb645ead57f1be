//! Git remote URL parsing and protocol conversion.
//!
//! Parses git remote URLs into structured components (host, group, repo) and
//! re-serializes them into any of the supported protocols.
//!
//! # Supported URL formats
//!
//! Forms are tried in this order; the first form that claims a URL decides how
//! it is parsed:
//!
//! 1. `https://<host>/<group>/<repo>.git`
//! 2. `git@<host>:<group>/<repo>.git`
//! 3. `ssh://[<user>@]<host>/<group>/<repo>.git`
//! 4. `<host>:<path>/<to>/<repo>/.git` (explicit `.git` directory)
//! 5. `<host>:<group>/<repo>.git` (no `//` and no `@`)

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use super::error::UrlError;

/// Protocol family of a remote URL.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Protocol {
    /// `https://<host>/<group>/<repo>.git`
    Https,
    /// `git@<host>:<group>/<repo>.git`
    Git,
    /// `ssh://[<user>@]<host>/<group>/<repo>.git` or `<host>:<group>/<repo>.git`
    Ssh,
    /// `<host>:<path>/<repo>/.git`
    Scp,
}

/// The grammar a URL was recognized by.
///
/// Several forms map onto the same [`Protocol`]: both `ssh://` URLs and bare
/// `host:group/repo` shorthands are `ssh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlForm {
    Https,
    GitShorthand,
    SshUrl,
    ScpExplicitDir,
    BareSsh,
}

impl UrlForm {
    /// All forms in precedence order.
    pub const PRECEDENCE: [UrlForm; 5] = [
        UrlForm::Https,
        UrlForm::GitShorthand,
        UrlForm::SshUrl,
        UrlForm::ScpExplicitDir,
        UrlForm::BareSsh,
    ];

    /// Find the first form that claims `url`.
    pub fn detect(url: &str) -> Option<Self> {
        let url = url.trim();
        Self::PRECEDENCE.into_iter().find(|form| form.matches(url))
    }

    /// Whether this form's marker is present, ignoring precedence.
    pub fn matches(self, url: &str) -> bool {
        match self {
            UrlForm::Https => url.starts_with("https://"),
            UrlForm::GitShorthand => url.starts_with("git@"),
            UrlForm::SshUrl => url.starts_with("ssh://"),
            UrlForm::ScpExplicitDir => url.ends_with("/.git"),
            UrlForm::BareSsh => !url.contains("//") && !url.contains('@'),
        }
    }

    pub fn protocol(self) -> Protocol {
        match self {
            UrlForm::Https => Protocol::Https,
            UrlForm::GitShorthand => Protocol::Git,
            UrlForm::SshUrl | UrlForm::BareSsh => Protocol::Ssh,
            UrlForm::ScpExplicitDir => Protocol::Scp,
        }
    }

    /// Parse `raw` with this form's grammar.
    ///
    /// The form must already have claimed the URL; a URL with the right
    /// marker but the wrong shape is a parse error, not a fall-through.
    pub fn parse(self, raw: &str) -> Result<UrlInfo, UrlError> {
        let url = raw.trim();
        let err = || UrlError::Parse {
            url: raw.to_string(),
        };

        let parts = match self {
            UrlForm::Https => {
                let rest = url.strip_prefix("https://").ok_or_else(err)?;
                let mut parts = rest.splitn(3, '/');
                let host = parts.next().ok_or_else(err)?;
                let group = parts.next().ok_or_else(err)?;
                let endpoint = parts.next().ok_or_else(err)?;
                Parts::normalized(host, group, endpoint, None)
            }
            UrlForm::GitShorthand => {
                let rest = url.strip_prefix("git@").ok_or_else(err)?;
                let (host, path) = rest.split_once(':').ok_or_else(err)?;
                let (group, endpoint) = path.split_once('/').ok_or_else(err)?;
                Parts::normalized(host, group, endpoint, Some("git"))
            }
            UrlForm::SshUrl => {
                let rest = url.strip_prefix("ssh://").ok_or_else(err)?;
                let mut parts = rest.splitn(3, '/');
                let authority = parts.next().ok_or_else(err)?;
                let group = parts.next().ok_or_else(err)?;
                let endpoint = parts.next().ok_or_else(err)?;
                let (user, host) = match authority.split_once('@') {
                    Some((user, host)) => (Some(user), host),
                    None => (None, authority),
                };
                Parts::normalized(host, group, endpoint, user)
            }
            UrlForm::ScpExplicitDir => {
                // Fixed-position split: the last two components are `<repo>/.git`,
                // everything before them is the group.
                let (host, path) = url.split_once(':').unwrap_or(("", url));
                let components: Vec<&str> = path.split('/').collect();
                let repo_idx = components.len().checked_sub(2).ok_or_else(err)?;
                let repo_name = components[repo_idx];
                Parts {
                    host: host.to_string(),
                    group: components[..repo_idx].join("/"),
                    repo_name: repo_name.to_string(),
                    repo_endpoint: format!("{repo_name}/.git"),
                    user: None,
                }
            }
            UrlForm::BareSsh => {
                let (host, path) = url.split_once(':').ok_or_else(err)?;
                let (group, endpoint) = path.split_once('/').ok_or_else(err)?;
                Parts::normalized(host, group, endpoint, None)
            }
        };

        let degraded_allowed = self == UrlForm::ScpExplicitDir;
        if parts.repo_name.is_empty()
            || (!degraded_allowed && (parts.host.is_empty() || parts.group.is_empty()))
        {
            return Err(err());
        }

        Ok(UrlInfo {
            host: parts.host,
            group: parts.group,
            repo_name: parts.repo_name,
            repo_endpoint: parts.repo_endpoint,
            user: parts.user,
            protocol: self.protocol(),
            url: raw.to_string(),
        })
    }
}

struct Parts {
    host: String,
    group: String,
    repo_name: String,
    repo_endpoint: String,
    user: Option<String>,
}

impl Parts {
    /// Build parts, deriving `repo_name`/`repo_endpoint` from the `.git` suffix.
    fn normalized(host: &str, group: &str, endpoint: &str, user: Option<&str>) -> Self {
        let (repo_name, repo_endpoint) = match endpoint.strip_suffix(".git") {
            Some(name) => (name.to_string(), endpoint.to_string()),
            None => (endpoint.to_string(), format!("{endpoint}.git")),
        };
        Self {
            host: host.to_string(),
            group: group.to_string(),
            repo_name,
            repo_endpoint,
            user: user.map(str::to_string),
        }
    }
}

/// Structured components of a parsed remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlInfo {
    pub host: String,
    pub group: String,
    /// Repository name without the `.git` suffix.
    pub repo_name: String,
    /// Repository path as it appears when embedded in a URL (e.g. `repo.git`).
    pub repo_endpoint: String,
    pub user: Option<String>,
    pub protocol: Protocol,
    /// The original URL string.
    pub url: String,
}

impl UrlInfo {
    pub fn to_git(&self) -> GitUrl {
        GitUrl::new(format!(
            "git@{}:{}/{}",
            self.host, self.group, self.repo_endpoint
        ))
    }

    pub fn to_ssh(&self) -> GitUrl {
        let user = self
            .user
            .as_deref()
            .map(|u| format!("{u}@"))
            .unwrap_or_default();
        GitUrl::new(format!(
            "ssh://{user}{}/{}/{}",
            self.host, self.group, self.repo_endpoint
        ))
    }

    pub fn to_https(&self) -> GitUrl {
        GitUrl::new(format!(
            "https://{}/{}/{}",
            self.host, self.group, self.repo_endpoint
        ))
    }

    /// Serialize into `protocol`. `scp` is written in `ssh://` form.
    pub fn convert(&self, protocol: Protocol) -> GitUrl {
        match protocol {
            Protocol::Git => self.to_git(),
            Protocol::Https => self.to_https(),
            Protocol::Ssh | Protocol::Scp => self.to_ssh(),
        }
    }

    /// Look up a single component by name.
    pub fn component(&self, component: UrlComponent) -> Option<&str> {
        match component {
            UrlComponent::Host => Some(&self.host),
            UrlComponent::Group => Some(&self.group),
            UrlComponent::RepoName => Some(&self.repo_name),
            UrlComponent::RepoEndpoint => Some(&self.repo_endpoint),
            UrlComponent::User => self.user.as_deref(),
            UrlComponent::Protocol => Some(<&'static str>::from(self.protocol)),
            UrlComponent::Url => Some(&self.url),
        }
    }
}

/// Named field of [`UrlInfo`], as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, clap::ValueEnum)]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum UrlComponent {
    Host,
    Group,
    RepoName,
    RepoEndpoint,
    User,
    Protocol,
    Url,
}

/// A git remote URL, parsed on first access.
///
/// Equality, hashing and display use the raw string only.
///
/// # Examples
///
/// ```
/// use git_well::git::GitUrl;
///
/// let url = GitUrl::new("https://foo.bar/user/repo.git");
/// assert_eq!(url.info()?.repo_name, "repo");
/// assert_eq!(url.to_git()?.as_str(), "git@foo.bar:user/repo.git");
/// # Ok::<(), git_well::git::UrlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GitUrl {
    raw: String,
    info: OnceLock<Result<UrlInfo, UrlError>>,
}

impl GitUrl {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            info: OnceLock::new(),
        }
    }

    /// Create and parse immediately, failing on an unrecognized URL.
    pub fn parse(raw: impl Into<String>) -> Result<Self, UrlError> {
        let url = Self::new(raw);
        url.info()?;
        Ok(url)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn form(&self) -> Option<UrlForm> {
        UrlForm::detect(&self.raw)
    }

    /// Parsed components, computed once and cached.
    pub fn info(&self) -> Result<&UrlInfo, UrlError> {
        self.info
            .get_or_init(|| parse_info(&self.raw))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn protocol(&self) -> Result<Protocol, UrlError> {
        Ok(self.info()?.protocol)
    }

    pub fn to_git(&self) -> Result<GitUrl, UrlError> {
        Ok(self.info()?.to_git())
    }

    pub fn to_ssh(&self) -> Result<GitUrl, UrlError> {
        Ok(self.info()?.to_ssh())
    }

    pub fn to_https(&self) -> Result<GitUrl, UrlError> {
        Ok(self.info()?.to_https())
    }

    /// Convert to the protocol named `name` (`git`, `https`, `ssh` or `scp`).
    pub fn to_protocol(&self, name: &str) -> Result<GitUrl, UrlError> {
        let protocol = Protocol::from_str(name).map_err(|_| UrlError::UnsupportedProtocol {
            protocol: name.to_string(),
        })?;
        Ok(self.info()?.convert(protocol))
    }
}

fn parse_info(raw: &str) -> Result<UrlInfo, UrlError> {
    let form = UrlForm::detect(raw).ok_or_else(|| UrlError::Parse {
        url: raw.to_string(),
    })?;
    log::trace!("{raw:?} recognized as {form:?}");
    form.parse(raw)
}

impl PartialEq for GitUrl {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for GitUrl {}

impl Hash for GitUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for GitUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for GitUrl {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for GitUrl {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for GitUrl {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl FromStr for GitUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
