//! BDD tests for collecting release checksums through a stub release source.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use release_hashes::config::{DEFAULT_ASSETS, RepoName, RepoSpec};
use release_hashes::error::Result as HashesResult;
use release_hashes::github::{Endpoints, HttpError, ReleaseSource, ResponseShapeError};
use release_hashes::pipeline::collect_hashes;
use release_hashes::report::ResultDocument;

/// How the stub responds to release lookups.
#[derive(Clone)]
enum ReleaseBehaviour {
    /// Return the given tag.
    Tag(String),
    /// Return an HTTP 404 for the repository's API URL.
    NotFound,
    /// Return a payload without `tag_name`.
    NoTag,
}

/// How the stub responds to checksum downloads.
#[derive(Clone)]
enum ChecksumBehaviour {
    /// A lowercase `sha256sum` line naming the asset.
    Valid,
    /// An uppercase `sha256sum` line naming the asset.
    Uppercase,
    /// The given body verbatim.
    Literal(String),
}

struct StubSource {
    release: ReleaseBehaviour,
    checksum: ChecksumBehaviour,
}

impl ReleaseSource for StubSource {
    fn latest_tag(&self, repo: &RepoName) -> HashesResult<String> {
        match &self.release {
            ReleaseBehaviour::Tag(tag) => Ok(tag.clone()),
            ReleaseBehaviour::NotFound => Err(HttpError::Status {
                url: Endpoints::default().latest_release_url(repo),
                status: 404,
            }
            .into()),
            ReleaseBehaviour::NoTag => Err(ResponseShapeError::MissingTag {
                repo: repo.clone(),
                url: Endpoints::default().latest_release_url(repo),
            }
            .into()),
        }
    }

    fn checksum_text(
        &self,
        _repo: &RepoName,
        _tag: &str,
        asset: &str,
    ) -> std::result::Result<String, HttpError> {
        Ok(match &self.checksum {
            ChecksumBehaviour::Valid => format!("{}  {asset}\n", "0123456789abcdef".repeat(4)),
            ChecksumBehaviour::Uppercase => {
                format!("{}  {asset}\n", "0123456789ABCDEF".repeat(4))
            }
            ChecksumBehaviour::Literal(body) => body.clone(),
        })
    }
}

#[derive(Default)]
struct HashesWorld {
    repos: Vec<RepoSpec>,
    release: Option<ReleaseBehaviour>,
    checksum: Option<ChecksumBehaviour>,
    result: Option<std::result::Result<ResultDocument, String>>,
}

impl HashesWorld {
    fn document(&self) -> &ResultDocument {
        match self.result.as_ref().expect("result set") {
            Ok(document) => document,
            Err(message) => panic!("expected success, got error: {message}"),
        }
    }
}

#[fixture]
fn world() -> HashesWorld {
    HashesWorld::default()
}

#[given("a repository list containing \"{repo}\"")]
fn given_repository(world: &mut HashesWorld, repo: String) {
    let name = RepoName::try_from(repo.as_str()).expect("valid repo");
    let assets = DEFAULT_ASSETS.iter().map(|&asset| asset.to_owned()).collect();
    world.repos.push(RepoSpec::new(name, assets));
}

#[given("the latest release is \"{tag}\"")]
fn given_latest_release(world: &mut HashesWorld, tag: String) {
    world.release = Some(ReleaseBehaviour::Tag(tag));
}

#[given("the release lookup returns not found")]
fn given_release_not_found(world: &mut HashesWorld) {
    world.release = Some(ReleaseBehaviour::NotFound);
}

#[given("the release lookup returns no tag")]
fn given_release_without_tag(world: &mut HashesWorld) {
    world.release = Some(ReleaseBehaviour::NoTag);
}

#[given("every checksum sidecar contains a valid digest")]
fn given_valid_checksums(world: &mut HashesWorld) {
    world.checksum = Some(ChecksumBehaviour::Valid);
}

#[given("every checksum sidecar contains an uppercase digest")]
fn given_uppercase_checksums(world: &mut HashesWorld) {
    world.checksum = Some(ChecksumBehaviour::Uppercase);
}

#[given("every checksum sidecar contains \"{body}\"")]
fn given_literal_checksums(world: &mut HashesWorld, body: String) {
    world.checksum = Some(ChecksumBehaviour::Literal(format!("{body}\n")));
}

#[given("every checksum sidecar is empty")]
fn given_empty_checksums(world: &mut HashesWorld) {
    world.checksum = Some(ChecksumBehaviour::Literal(String::new()));
}

#[when("the hashes are collected")]
fn when_hashes_collected(world: &mut HashesWorld) {
    let source = StubSource {
        release: world.release.clone().expect("release behaviour set"),
        checksum: world.checksum.clone().unwrap_or(ChecksumBehaviour::Valid),
    };
    let result = collect_hashes(&world.repos, &source).map_err(|err| err.to_string());
    world.result = Some(result);
}

#[then("the result records release \"{tag}\" for \"{repo}\"")]
fn then_release_recorded(world: &mut HashesWorld, tag: String, repo: String) {
    let release = world.document().repos.get(&repo).expect("repo recorded");
    assert_eq!(release.release, tag);
}

#[then("the result records {count} assets for \"{repo}\"")]
fn then_asset_count(world: &mut HashesWorld, count: usize, repo: String) {
    let release = world.document().repos.get(&repo).expect("repo recorded");
    assert_eq!(release.assets.len(), count);
    for hash in release.assets.values() {
        assert_eq!(hash.sha256_hex.len(), 64);
        assert!(hash.sha256_sri.starts_with("sha256-"));
    }
}

#[then("every recorded digest is lowercase")]
fn then_digests_lowercase(world: &mut HashesWorld) {
    let document = world.document();
    let hashes = document
        .repos
        .values()
        .flat_map(|release| release.assets.values());
    for hash in hashes {
        assert_eq!(hash.sha256_hex, hash.sha256_hex.to_ascii_lowercase());
    }
}

#[then("the run fails mentioning \"{keyword}\"")]
fn then_run_fails_mentioning(world: &mut HashesWorld, keyword: String) {
    match world.result.as_ref().expect("result set") {
        Err(message) => assert!(
            message.contains(&keyword),
            "expected error to contain '{keyword}', got: {message}"
        ),
        Ok(document) => panic!("expected failure, got {document:?}"),
    }
}

#[scenario(
    path = "tests/features/collect_hashes.feature",
    name = "Latest release checksums are recorded"
)]
fn scenario_checksums_recorded(world: HashesWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/collect_hashes.feature",
    name = "Mixed-case digests are normalised"
)]
fn scenario_mixed_case(world: HashesWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/collect_hashes.feature",
    name = "Missing release aborts the run"
)]
fn scenario_missing_release(world: HashesWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/collect_hashes.feature",
    name = "Release without a tag aborts the run"
)]
fn scenario_release_without_tag(world: HashesWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/collect_hashes.feature",
    name = "Malformed checksum aborts the run"
)]
fn scenario_malformed_checksum(world: HashesWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/collect_hashes.feature",
    name = "Empty checksum aborts the run"
)]
fn scenario_empty_checksum(world: HashesWorld) {
    let _ = world;
}
