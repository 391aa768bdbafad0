//! Run orchestration: load → resolve → fetch → parse → encode → write.
//!
//! Repositories and their assets are processed strictly in configuration
//! order. The first failure aborts the run before anything is written.

use crate::checksum::parse_sha256sum;
use crate::config::{RepoName, RepoSpec, load_repos};
use crate::error::Result;
use crate::github::ReleaseSource;
use crate::report::{AssetHash, RepoRelease, ResultDocument};
use camino::Utf8PathBuf;
use log::info;

/// Input and output paths for a run.
///
/// Upstream endpoints and credentials belong to the [`ReleaseSource`] passed
/// alongside these settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Path of the TOML repository list.
    pub input: Utf8PathBuf,
    /// Path of the JSON document to write.
    pub output: Utf8PathBuf,
}

/// Load the repository list, collect every checksum, and write the result.
///
/// # Errors
///
/// Returns the first error raised by any stage; the output file is left
/// untouched in that case.
pub fn run(settings: &RunSettings, source: &dyn ReleaseSource) -> Result<()> {
    let repos = load_repos(&settings.input)?;
    info!(
        "loaded {} repositories from {}",
        repos.len(),
        settings.input
    );
    let document = collect_hashes(&repos, source)?;
    document.write_to(&settings.output)?;
    info!("wrote {}", settings.output);
    Ok(())
}

/// Resolve the latest release of each repository and record its checksums.
///
/// # Errors
///
/// Returns the first lookup, download, parse, or encoding error.
pub fn collect_hashes(repos: &[RepoSpec], source: &dyn ReleaseSource) -> Result<ResultDocument> {
    let mut document = ResultDocument::default();
    for spec in repos {
        let release = hash_release(spec, source)?;
        document.insert(spec.repo(), release);
    }
    Ok(document)
}

fn hash_release(spec: &RepoSpec, source: &dyn ReleaseSource) -> Result<RepoRelease> {
    let repo = spec.repo();
    let tag = source.latest_tag(repo)?;
    info!("{repo}: latest release {tag}");

    let mut release = RepoRelease::new(tag);
    for asset in spec.assets() {
        let hash = hash_asset(source, repo, &release.release, asset)?;
        release.assets.insert(asset.clone(), hash);
    }
    Ok(release)
}

fn hash_asset(
    source: &dyn ReleaseSource,
    repo: &RepoName,
    tag: &str,
    asset: &str,
) -> Result<AssetHash> {
    let text = source.checksum_text(repo, tag, asset)?;
    let digest = parse_sha256sum(&text, repo, asset)?;
    Ok(AssetHash::from_digest(digest)?)
}
