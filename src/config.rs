//! Repository list loading.
//!
//! The input file is a TOML document with a top-level `repos` array. Each
//! entry names a GitHub repository and, optionally, the release assets whose
//! `.sha256sum` sidecars should be recorded:
//!
//! ```toml
//! [[repos]]
//! repo = "v2fly/geoip"
//!
//! [[repos]]
//! repo = "v2fly/domain-list-community"
//! assets = ["dlc.dat"]
//! ```
//!
//! Entries are validated one by one so that error messages can point at the
//! offending index.

use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use thiserror::Error;
use toml::{Table, Value};

/// Assets recorded when an entry omits the `assets` key.
pub const DEFAULT_ASSETS: [&str; 2] = ["geoip.dat", "geosite.dat"];

/// Errors arising from loading the repository list.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML.
    #[error("failed to parse {path}: {reason}")]
    Syntax {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// The document has no `repos` array.
    #[error("{path} must contain a 'repos' array")]
    MissingRepos {
        /// Path of the configuration file.
        path: Utf8PathBuf,
    },

    /// An element of `repos` is not a table.
    #[error("repos[{index}] must be a table")]
    EntryNotTable {
        /// Position of the entry in the `repos` array.
        index: usize,
    },

    /// The `repo` key is missing, not a string, or not `owner/name`.
    #[error("repos[{index}].repo must be like 'owner/name'")]
    InvalidRepo {
        /// Position of the entry in the `repos` array.
        index: usize,
    },

    /// The `assets` key is present but is not an array of strings.
    #[error("repos[{index}].assets must be a string array")]
    InvalidAssets {
        /// Position of the entry in the `repos` array.
        index: usize,
    },

    /// An asset name is empty.
    #[error("repos[{index}].assets[{asset_index}] must not be empty")]
    EmptyAsset {
        /// Position of the entry in the `repos` array.
        index: usize,
        /// Position of the asset in the entry's `assets` array.
        asset_index: usize,
    },
}

/// A validated `owner/name` GitHub repository identifier.
///
/// # Examples
///
/// ```
/// use release_hashes::config::RepoName;
///
/// let repo = RepoName::try_from("v2fly/geoip").expect("valid repo");
/// assert_eq!(repo.owner(), "v2fly");
/// assert_eq!(repo.name(), "geoip");
/// assert!(RepoName::try_from("geoip").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoName(String);

/// Rejection returned when a string is not an `owner/name` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("repository \"{value}\" must be like 'owner/name'")]
pub struct InvalidRepoName {
    /// The rejected value.
    pub value: String,
}

impl RepoName {
    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The account or organisation half of the identifier.
    #[must_use]
    pub fn owner(&self) -> &str {
        self.split().0
    }

    /// The repository half of the identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        self.0.split_once('/').unwrap_or((self.0.as_str(), ""))
    }
}

impl TryFrom<&str> for RepoName {
    type Error = InvalidRepoName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let well_formed = value.split_once('/').is_some_and(|(owner, name)| {
            !owner.is_empty() && !name.is_empty() && !name.contains('/')
        });
        if well_formed {
            Ok(Self(value.to_owned()))
        } else {
            Err(InvalidRepoName {
                value: value.to_owned(),
            })
        }
    }
}

impl AsRef<str> for RepoName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One configured repository and the assets to record for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    repo: RepoName,
    assets: Vec<String>,
}

impl RepoSpec {
    /// Create a spec from an already validated repository name.
    #[must_use]
    pub fn new(repo: RepoName, assets: Vec<String>) -> Self {
        Self { repo, assets }
    }

    /// The repository identifier.
    #[must_use]
    pub fn repo(&self) -> &RepoName {
        &self.repo
    }

    /// Asset names in configuration order.
    #[must_use]
    pub fn assets(&self) -> &[String] {
        &self.assets
    }
}

/// Read and validate the repository list at `path`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, is not valid TOML, or
/// any entry violates the expected shape.
pub fn load_repos(path: &Utf8Path) -> Result<Vec<RepoSpec>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_repos(&contents, path)
}

/// Validate a repository list held in memory.
///
/// `path` is only used to label error messages.
///
/// # Errors
///
/// Returns [`ConfigError`] if `contents` is not valid TOML or any entry
/// violates the expected shape.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use release_hashes::config::parse_repos;
///
/// let repos = parse_repos(
///     "[[repos]]\nrepo = \"v2fly/geoip\"\n",
///     Utf8Path::new("repos.toml"),
/// )
/// .expect("valid config");
/// assert_eq!(repos[0].assets(), ["geoip.dat", "geosite.dat"]);
/// ```
pub fn parse_repos(contents: &str, path: &Utf8Path) -> Result<Vec<RepoSpec>, ConfigError> {
    let document: Table = toml::from_str(contents).map_err(|e| ConfigError::Syntax {
        path: path.to_owned(),
        reason: e.message().to_owned(),
    })?;

    let Some(Value::Array(entries)) = document.get("repos") else {
        return Err(ConfigError::MissingRepos {
            path: path.to_owned(),
        });
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect()
}

fn parse_entry(index: usize, entry: &Value) -> Result<RepoSpec, ConfigError> {
    let Value::Table(table) = entry else {
        return Err(ConfigError::EntryNotTable { index });
    };

    let repo = table
        .get("repo")
        .and_then(Value::as_str)
        .and_then(|value| RepoName::try_from(value).ok())
        .ok_or(ConfigError::InvalidRepo { index })?;

    let assets = match table.get("assets") {
        None => DEFAULT_ASSETS.iter().map(|&asset| asset.to_owned()).collect(),
        Some(value) => parse_assets(index, value)?,
    };

    Ok(RepoSpec::new(repo, assets))
}

fn parse_assets(index: usize, value: &Value) -> Result<Vec<String>, ConfigError> {
    let Value::Array(items) = value else {
        return Err(ConfigError::InvalidAssets { index });
    };

    items
        .iter()
        .enumerate()
        .map(|(asset_index, item)| match item.as_str() {
            None => Err(ConfigError::InvalidAssets { index }),
            Some("") => Err(ConfigError::EmptyAsset { index, asset_index }),
            Some(asset) => Ok(asset.to_owned()),
        })
        .collect()
}
