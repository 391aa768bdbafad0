//! Error types for the release hash fetcher.
//!
//! Each stage of the run owns a focused error enum; [`HashesError`] gathers
//! them so that any failure can travel to `main` through `?` and be reported
//! as a single `error: <message>` line.

use crate::checksum::ChecksumParseError;
use crate::config::ConfigError;
use crate::github::{HttpError, ResponseShapeError};
use crate::integrity::EncodeError;
use crate::report::WriteError;
use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum HashesError {
    /// The input configuration could not be read or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An HTTP request failed at the transport level or returned a non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A release lookup succeeded but its payload lacked the expected fields.
    #[error(transparent)]
    ResponseShape(#[from] ResponseShapeError),

    /// A checksum sidecar file did not contain a valid SHA-256 digest.
    #[error(transparent)]
    Parse(#[from] ChecksumParseError),

    /// A digest could not be converted into an integrity string.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The result document could not be serialised or written.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Result type alias using [`HashesError`].
pub type Result<T> = std::result::Result<T, HashesError>;
