//! CLI argument definitions for the release hash fetcher.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::github::{DEFAULT_API_BASE, DEFAULT_DOWNLOAD_BASE, Endpoints};
use crate::pipeline::RunSettings;
use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

/// Default repository list path.
pub const DEFAULT_INPUT: &str = "repos.toml";

/// Default output document path.
pub const DEFAULT_OUTPUT: &str = "hashes.json";

/// Fetch latest GitHub release tags and .sha256sum values and write JSON.
#[derive(Parser, Debug, Clone)]
#[command(name = "release-hashes")]
#[command(version, about)]
#[command(long_about = concat!(
    "Fetch latest GitHub release tags and .sha256sum values and write JSON.\n\n",
    "For each repository listed in the input TOML file, the latest release is ",
    "resolved through the GitHub API and the `<asset>.sha256sum` file published ",
    "with each configured asset is downloaded. The digests are recorded as hex ",
    "and as `sha256-<base64>` integrity strings.\n\n",
    "Set GITHUB_TOKEN or GH_TOKEN to authenticate release lookups.",
))]
#[command(after_help = concat!(
    "INPUT FORMAT:\n",
    "  [[repos]]\n",
    "  repo = \"v2fly/geoip\"                 # required, owner/name\n",
    "  assets = [\"geoip.dat\", \"cn.dat\"]     # optional, default geoip.dat + geosite.dat\n\n",
    "EXAMPLES:\n",
    "  Use repos.toml and write hashes.json:\n",
    "    $ release-hashes\n\n",
    "  Explicit paths with progress logging:\n",
    "    $ release-hashes -i pins/repos.toml -o pins/hashes.json -v",
))]
pub struct Cli {
    /// Input TOML file.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_INPUT)]
    pub input: Utf8PathBuf,

    /// Output JSON file.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: Utf8PathBuf,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,

    /// Base URL of the GitHub REST API.
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE, hide = true)]
    pub api_url: String,

    /// Base URL for release asset downloads.
    #[arg(long, value_name = "URL", default_value = DEFAULT_DOWNLOAD_BASE, hide = true)]
    pub download_url: String,
}

impl Cli {
    /// Log level implied by `-v` and `-q`.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Input and output paths for the run.
    #[must_use]
    pub fn settings(&self) -> RunSettings {
        RunSettings {
            input: self.input.clone(),
            output: self.output.clone(),
        }
    }

    /// Upstream base URLs, honouring the hidden overrides.
    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.api_url, &self.download_url)
    }
}
