//! GitHub release lookup and checksum sidecar download.
//!
//! Provides a trait-based abstraction over the two endpoints the tool
//! consumes, so that the pipeline can be exercised without network access:
//!
//! - `GET {api}/repos/{repo}/releases/latest` for the latest release tag.
//! - `GET {download}/{repo}/releases/download/{tag}/{asset}.sha256sum` for
//!   the checksum of a single asset.

use crate::config::RepoName;
use crate::error::Result;
use crate::token::GitHubToken;
use log::debug;
use std::time::Duration;
use thiserror::Error;

/// Default base URL of the GitHub REST API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default base URL for release asset downloads.
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://github.com";

/// Media type requested from the release endpoint.
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Timeout applied to every request, covering connection and body transfer.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors arising from an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status} while fetching {url}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// The response status code.
        status: u16,
    },

    /// The request failed before a status was received, or the body could
    /// not be read.
    #[error("network error while fetching {url}: {reason}")]
    Transport {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },
}

/// Errors arising from a release payload that lacks the expected fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseShapeError {
    /// `tag_name` is absent, not a string, or empty.
    #[error("missing tag_name in latest release for {repo} from {url}")]
    MissingTag {
        /// Repository whose release was queried.
        repo: RepoName,
        /// The URL that was requested.
        url: String,
    },

    /// The body is not JSON.
    #[error("malformed latest release for {repo} from {url}: {reason}")]
    Malformed {
        /// Repository whose release was queried.
        repo: RepoName,
        /// The URL that was requested.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Base URLs of the two upstream services.
///
/// # Examples
///
/// ```
/// use release_hashes::config::RepoName;
/// use release_hashes::github::Endpoints;
///
/// let repo = RepoName::try_from("v2fly/geoip").expect("valid repo");
/// let endpoints = Endpoints::default();
/// assert_eq!(
///     endpoints.latest_release_url(&repo),
///     "https://api.github.com/repos/v2fly/geoip/releases/latest",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    download_base: String,
}

impl Endpoints {
    /// Create endpoints from explicit base URLs. Trailing slashes are ignored.
    #[must_use]
    pub fn new(api_base: &str, download_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_owned(),
            download_base: download_base.trim_end_matches('/').to_owned(),
        }
    }

    /// URL of the latest-release metadata for `repo`.
    #[must_use]
    pub fn latest_release_url(&self, repo: &RepoName) -> String {
        format!("{}/repos/{repo}/releases/latest", self.api_base)
    }

    /// URL of the `.sha256sum` sidecar for `asset` in release `tag`.
    #[must_use]
    pub fn checksum_url(&self, repo: &RepoName, tag: &str, asset: &str) -> String {
        format!(
            "{}/{repo}/releases/download/{tag}/{asset}.sha256sum",
            self.download_base
        )
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_DOWNLOAD_BASE)
    }
}

/// Source of release tags and checksum sidecars.
///
/// Abstractions allow tests to stub HTTP behaviour without network access.
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseSource {
    /// Resolve the tag of the latest release of `repo`.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error if the request fails, or a response-shape error
    /// if the payload has no usable `tag_name`.
    fn latest_tag(&self, repo: &RepoName) -> Result<String>;

    /// Download the `.sha256sum` sidecar for `asset` in release `tag`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not 2xx.
    fn checksum_text(
        &self,
        repo: &RepoName,
        tag: &str,
        asset: &str,
    ) -> std::result::Result<String, HttpError>;
}

/// HTTP-based release source using a single `ureq` agent.
///
/// The agent pools connections for the lifetime of this value; dropping it
/// closes them.
pub struct HttpReleaseSource {
    agent: ureq::Agent,
    endpoints: Endpoints,
    token: Option<GitHubToken>,
}

impl HttpReleaseSource {
    /// Create a source for the given endpoints.
    ///
    /// `token`, when present, is sent only with release lookups.
    #[must_use]
    pub fn new(endpoints: Endpoints, token: Option<GitHubToken>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            endpoints,
            token,
        }
    }
}

impl ReleaseSource for HttpReleaseSource {
    fn latest_tag(&self, repo: &RepoName) -> Result<String> {
        let url = self.endpoints.latest_release_url(repo);
        debug!("fetching {url}");
        let mut request = self
            .agent
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", GITHUB_JSON);
        if let Some(token) = &self.token {
            request = request.header("Authorization", token.bearer());
        }
        let body = read_body(&url, request.call())?;
        Ok(extract_tag(repo, &url, &body)?)
    }

    fn checksum_text(
        &self,
        repo: &RepoName,
        tag: &str,
        asset: &str,
    ) -> std::result::Result<String, HttpError> {
        let url = self.endpoints.checksum_url(repo, tag, asset);
        debug!("fetching {url}");
        let outcome = self.agent.get(&url).header("User-Agent", USER_AGENT).call();
        read_body(&url, outcome)
    }
}

/// Turn a request outcome into the response body text.
///
/// Invalid UTF-8 is replaced rather than rejected; whatever the body holds
/// beyond the digest is left for the parser to ignore.
fn read_body(
    url: &str,
    outcome: std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> std::result::Result<String, HttpError> {
    let response = outcome.map_err(|e| map_ureq_error(url, &e))?;
    let bytes = response
        .into_body()
        .read_to_vec()
        .map_err(|e| map_ureq_error(url, &e))?;
    Ok(decode_body(&bytes))
}

fn decode_body(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Map a ureq error to an [`HttpError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> HttpError {
    match err {
        ureq::Error::StatusCode(status) => HttpError::Status {
            url: url.to_owned(),
            status: *status,
        },
        other => HttpError::Transport {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

/// Pull a non-empty `tag_name` string out of a release payload.
fn extract_tag(
    repo: &RepoName,
    url: &str,
    body: &str,
) -> std::result::Result<String, ResponseShapeError> {
    let payload: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ResponseShapeError::Malformed {
            repo: repo.clone(),
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
    payload
        .get("tag_name")
        .and_then(serde_json::Value::as_str)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ResponseShapeError::MissingTag {
            repo: repo.clone(),
            url: url.to_owned(),
        })
}
