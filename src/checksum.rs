//! SHA-256 sidecar parsing.
//!
//! Release assets are published alongside a `<asset>.sha256sum` file in
//! `sha256sum` output format: the hex digest is the first token of the first
//! line, usually followed by the file name. Everything after that token is
//! ignored.

use crate::config::RepoName;
use std::fmt;
use thiserror::Error;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// Reasons a string is not a canonical SHA-256 hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    /// The value does not have exactly 64 characters.
    #[error("expected 64 hex characters, got {len}")]
    Length {
        /// Number of characters found.
        len: usize,
    },

    /// The value contains a character outside `[0-9a-fA-F]`.
    #[error("non-hex character '{character}'")]
    NonHex {
        /// The first offending character.
        character: char,
    },

    /// The value contains uppercase hex digits.
    #[error("digest must be lowercase")]
    Uppercase,
}

/// Errors arising from parsing a checksum sidecar body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumParseError {
    /// The body is empty or only whitespace.
    #[error("empty checksum response for {repo} {asset}")]
    Empty {
        /// Repository the sidecar belongs to.
        repo: RepoName,
        /// Asset the sidecar describes.
        asset: String,
    },

    /// The first token is not a 64-character hex digest.
    #[error("invalid sha256 in checksum response for {repo} {asset}: {source}")]
    InvalidDigest {
        /// Repository the sidecar belongs to.
        repo: RepoName,
        /// Asset the sidecar describes.
        asset: String,
        /// Why the token was rejected.
        #[source]
        source: DigestError,
    },
}

/// A validated lowercase hex-encoded SHA-256 digest.
///
/// # Examples
///
/// ```
/// use release_hashes::checksum::Sha256Digest;
///
/// let hex = "a".repeat(64);
/// let digest = Sha256Digest::try_from(hex.as_str()).expect("valid digest");
/// assert_eq!(digest.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = DigestError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate_sha256(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Sha256Digest {
    type Error = DigestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_sha256(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_sha256(value: &str) -> Result<(), DigestError> {
    let len = value.chars().count();
    if len != DIGEST_HEX_LEN {
        return Err(DigestError::Length { len });
    }
    if let Some(character) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(DigestError::NonHex { character });
    }
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(DigestError::Uppercase);
    }
    Ok(())
}

/// Extract the digest from a `sha256sum`-format body.
///
/// Mixed-case digests are accepted and normalised to lowercase.
///
/// # Errors
///
/// Returns [`ChecksumParseError::Empty`] for blank bodies and
/// [`ChecksumParseError::InvalidDigest`] when the first token is not a
/// 64-character hex string.
///
/// # Examples
///
/// ```
/// use release_hashes::checksum::parse_sha256sum;
/// use release_hashes::config::RepoName;
///
/// let repo = RepoName::try_from("v2fly/geoip").expect("valid repo");
/// let body = format!("{}  geoip.dat\n", "AB".repeat(32));
/// let digest = parse_sha256sum(&body, &repo, "geoip.dat").expect("valid body");
/// assert_eq!(digest.as_str(), "ab".repeat(32));
/// ```
pub fn parse_sha256sum(
    text: &str,
    repo: &RepoName,
    asset: &str,
) -> Result<Sha256Digest, ChecksumParseError> {
    let Some(candidate) = text
        .trim()
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().next())
    else {
        return Err(ChecksumParseError::Empty {
            repo: repo.clone(),
            asset: asset.to_owned(),
        });
    };

    Sha256Digest::try_from(candidate.to_ascii_lowercase()).map_err(|source| {
        ChecksumParseError::InvalidDigest {
            repo: repo.clone(),
            asset: asset.to_owned(),
            source,
        }
    })
}
