//! The consolidated result document and its JSON writer.
//!
//! Maps are `BTreeMap`s and struct fields are declared in lexicographic
//! order, so serialisation sorts keys at every level.

use crate::checksum::Sha256Digest;
use crate::config::RepoName;
use crate::integrity::{EncodeError, sha256_hex_to_sri};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors arising from emitting the result document.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The document could not be serialised.
    #[error("failed to serialise result document: {0}")]
    Serialise(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Destination path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Checksums recorded for one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetHash {
    /// Lowercase hex digest.
    pub sha256_hex: String,
    /// `sha256-<base64>` integrity string.
    pub sha256_sri: String,
}

impl AssetHash {
    /// Derive both encodings from a validated digest.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if the digest cannot be decoded.
    pub fn from_digest(digest: Sha256Digest) -> Result<Self, EncodeError> {
        let sha256_sri = sha256_hex_to_sri(digest.as_str())?;
        Ok(Self {
            sha256_hex: digest.into_inner(),
            sha256_sri,
        })
    }
}

/// The release tag and asset checksums recorded for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoRelease {
    /// Checksums keyed by asset name.
    pub assets: BTreeMap<String, AssetHash>,
    /// Tag of the latest release.
    pub release: String,
}

impl RepoRelease {
    /// Start a record for release `tag` with no assets.
    #[must_use]
    pub fn new(tag: String) -> Self {
        Self {
            assets: BTreeMap::new(),
            release: tag,
        }
    }
}

/// All repositories processed in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultDocument {
    /// Records keyed by `owner/name`.
    pub repos: BTreeMap<String, RepoRelease>,
}

impl ResultDocument {
    /// Record `release` under `repo`, replacing any earlier record.
    pub fn insert(&mut self, repo: &RepoName, release: RepoRelease) {
        self.repos.insert(repo.as_str().to_owned(), release);
    }

    /// Render the document as pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Serialise`] if serialisation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use release_hashes::report::ResultDocument;
    ///
    /// let json = ResultDocument::default().to_json().expect("serialisable");
    /// assert_eq!(json, "{\n  \"repos\": {}\n}\n");
    /// ```
    pub fn to_json(&self) -> Result<String, WriteError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Write the document to `path` in a single write, replacing any
    /// existing file.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] if serialisation or the write fails.
    pub fn write_to(&self, path: &Utf8Path) -> Result<(), WriteError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| WriteError::Io {
            path: path.to_owned(),
            source,
        })
    }
}
