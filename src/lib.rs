//! Release hash fetcher library.
//!
//! Resolves the latest GitHub release of each configured repository,
//! downloads the `.sha256sum` sidecar of every configured asset, and emits a
//! JSON document pinning each repository to its release tag and per-asset
//! digests. It is used by the `release-hashes` binary and can be driven
//! programmatically with a stub [`github::ReleaseSource`] for testing.
//!
//! # Modules
//!
//! - [`checksum`] - `sha256sum` sidecar parsing and the digest newtype
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Repository list loading and validation
//! - [`error`] - Crate-level error type
//! - [`github`] - Release lookup and checksum download over HTTP
//! - [`integrity`] - Subresource-integrity encoding
//! - [`pipeline`] - Run orchestration
//! - [`report`] - Result document and JSON writer
//! - [`token`] - GitHub credential lookup

pub mod checksum;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod integrity;
pub mod pipeline;
pub mod report;
pub mod token;
