use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::domain::errors::{DomainError, DomainResult};

static REPOSITORY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/([a-zA-Z0-9_.-]+)/([a-zA-Z0-9_.-]+)$")
        .expect("repository URL pattern is valid")
});

static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.-]+$").expect("segment pattern is valid"));

/// An `owner/repo` pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> DomainResult<Self> {
        let owner = owner.into();
        let repo = repo.into();
        for (what, value) in [("owner", &owner), ("repository name", &repo)] {
            if !SEGMENT.is_match(value) {
                return Err(DomainError::InvalidRepositoryReference(format!(
                    "invalid {what} '{value}'"
                )));
            }
        }
        Ok(Self { owner, repo })
    }

    /// Parse `https://github.com/{owner}/{repo}`.
    pub fn from_url(url: &str) -> DomainResult<Self> {
        let captures = REPOSITORY_URL.captures(url).ok_or_else(|| {
            DomainError::InvalidRepositoryReference(format!("'{url}' is not a GitHub repository URL"))
        })?;
        Ok(Self {
            owner: captures[1].to_string(),
            repo: captures[2].to_string(),
        })
    }

    /// Resolve the repository from a URL and optional owner/repo overrides.
    ///
    /// The URL must be well formed even when overrides are given. The two
    /// overrides must be supplied together; when they are, they win.
    pub fn resolve(url: &str, owner: Option<&str>, repo: Option<&str>) -> DomainResult<Self> {
        let from_url = Self::from_url(url)?;
        match (owner, repo) {
            (Some(owner), Some(repo)) => Self::new(owner, repo),
            (None, None) => Ok(from_url),
            _ => Err(DomainError::InvalidRepositoryReference(
                "owner (-o) and repo (-r) must be used together, e.g. -o octocat -r Hello-World"
                    .to_string(),
            )),
        }
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url_valid() {
        let repo = RepositoryRef::from_url("https://github.com/neovim/neovim").unwrap();
        assert_eq!(repo.owner, "neovim");
        assert_eq!(repo.repo, "neovim");
        assert_eq!(repo.to_string(), "neovim/neovim");
        assert_eq!(repo.html_url(), "https://github.com/neovim/neovim");
    }

    #[test]
    fn test_from_url_allows_dots_dashes_underscores() {
        let repo = RepositoryRef::from_url("https://github.com/octo-cat/Hello_World.rs").unwrap();
        assert_eq!(repo.owner, "octo-cat");
        assert_eq!(repo.repo, "Hello_World.rs");
    }

    #[test]
    fn test_from_url_rejects_malformed() {
        for url in [
            "",
            "github.com/neovim/neovim",
            "http://github.com/neovim/neovim",
            "https://gitlab.com/neovim/neovim",
            "https://github.com/neovim",
            "https://github.com/neovim/neovim/issues",
            "https://github.com/neo vim/neovim",
        ] {
            assert!(
                matches!(
                    RepositoryRef::from_url(url),
                    Err(DomainError::InvalidRepositoryReference(_))
                ),
                "expected '{url}' to be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_with_overrides() {
        let repo = RepositoryRef::resolve(
            "https://github.com/neovim/neovim",
            Some("octocat"),
            Some("Hello-World"),
        )
        .unwrap();
        assert_eq!(repo.to_string(), "octocat/Hello-World");
    }

    #[test]
    fn test_resolve_requires_both_overrides() {
        let url = "https://github.com/neovim/neovim";
        assert!(RepositoryRef::resolve(url, Some("octocat"), None).is_err());
        assert!(RepositoryRef::resolve(url, None, Some("Hello-World")).is_err());
    }

    #[test]
    fn test_resolve_validates_url_first() {
        assert!(RepositoryRef::resolve("not a url", Some("o"), Some("r")).is_err());
    }

    #[test]
    fn test_new_rejects_slash() {
        assert!(RepositoryRef::new("octo/cat", "repo").is_err());
    }
}
