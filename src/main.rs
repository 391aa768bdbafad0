//! Release hash fetcher CLI entrypoint.
//!
//! Reads the repository list, records the latest release checksums, and
//! writes the JSON document. Any failure is reported as a single
//! `error: <message>` line on stderr with exit status 1.

use clap::Parser;
use release_hashes::cli::Cli;
use release_hashes::error::Result;
use release_hashes::github::HttpReleaseSource;
use release_hashes::pipeline;
use release_hashes::token::github_token;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run(&cli), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .format_target(false)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    // The agent lives for the whole run and is dropped on every exit path.
    let source = HttpReleaseSource::new(cli.endpoints(), github_token());
    pipeline::run(&cli.settings(), &source)
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format_args!("error: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}
