//! GitHub credential lookup.

use std::fmt;

/// Environment variables consulted for a token, in priority order.
pub const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// A bearer token for the GitHub API.
///
/// The `Debug` output is redacted so the value never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct GitHubToken(String);

impl GitHubToken {
    /// Wrap a raw token, returning `None` when it is blank.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// The `Authorization` header value for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for GitHubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GitHubToken(<redacted>)")
    }
}

/// Read the token from the process environment.
#[must_use]
pub fn github_token() -> Option<GitHubToken> {
    token_from(&|name| std::env::var(name).ok())
}

/// Resolve the token through `lookup`, skipping unset and blank variables.
///
/// # Examples
///
/// ```
/// use release_hashes::token::token_from;
///
/// let token = token_from(&|name| (name == "GH_TOKEN").then(|| "abc".to_owned()));
/// assert_eq!(token.map(|t| t.bearer()), Some("Bearer abc".to_owned()));
/// ```
pub fn token_from(lookup: &dyn Fn(&str) -> Option<String>) -> Option<GitHubToken> {
    TOKEN_VARS
        .iter()
        .find_map(|name| lookup(name).and_then(|raw| GitHubToken::new(&raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::github_token_wins(Some("primary"), Some("secondary"), Some("Bearer primary"))]
    #[case::falls_back_to_gh_token(None, Some("secondary"), Some("Bearer secondary"))]
    #[case::blank_is_ignored(Some("  "), Some("secondary"), Some("Bearer secondary"))]
    #[case::neither_set(None, None, None)]
    #[case::both_blank(Some(""), Some(""), None)]
    fn github_token_respects_priority(
        #[case] github: Option<&str>,
        #[case] gh: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        temp_env::with_vars([("GITHUB_TOKEN", github), ("GH_TOKEN", gh)], || {
            let token = github_token();
            assert_eq!(token.map(|t| t.bearer()).as_deref(), expected);
        });
    }

    #[test]
    fn debug_output_is_redacted() {
        let token = GitHubToken::new("ghp_secret").expect("non-blank token");
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("ghp_secret"));
    }
}
