//! Choosing a component source from invocation flags
//!
//! Precedence is fixed: a direct URL beats a GitHub repository, which beats a
//! registry location, which beats the embedded catalog.

use super::catalog::EmbeddedCatalog;
use super::fetch::{Fetch, GITHUB_RAW_HOST};
use super::local::LocalRegistry;
use super::remote::HttpRegistry;
use super::Registry;
use crate::error::{ScaffoldError, ScaffoldResult};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// A GitHub repository addressed as `owner/repo[@branch]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRef {
    owner: String,
    repo: String,
    branch: String,
    base: Url,
}

impl GitHubRef {
    pub const DEFAULT_BRANCH: &'static str = "main";

    pub fn parse(spec: &str) -> ScaffoldResult<Self> {
        let invalid = |reason: &str| ScaffoldError::InvalidSource {
            value: spec.to_string(),
            reason: reason.to_string(),
        };

        let spec_trimmed = spec.trim();
        let (path, branch) = match spec_trimmed.split_once('@') {
            Some((_, "")) => return Err(invalid("branch after '@' is empty")),
            Some((path, branch)) => (path, branch),
            None => (spec_trimmed, Self::DEFAULT_BRANCH),
        };

        let mut parts = path.split('/');
        let (owner, repo) = match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
                (owner, repo)
            }
            _ => return Err(invalid("expected owner/repo or owner/repo@branch")),
        };

        let base = Url::parse(&format!("https://{GITHUB_RAW_HOST}/{owner}/{repo}/{branch}"))
            .map_err(|e| invalid(&e.to_string()))?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            base,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Raw-content base URL the repository is served from
    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl fmt::Display for GitHubRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)
    }
}

/// Value of `--registry`: an HTTP base URL or a path on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryLocation {
    Remote(Url),
    Local(String),
}

impl RegistryLocation {
    pub fn parse(spec: &str) -> Self {
        match Url::parse(spec) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            _ => Self::Local(spec.to_string()),
        }
    }

    pub fn open(&self, fetch: Arc<dyn Fetch>) -> Box<dyn Registry> {
        match self {
            Self::Remote(url) => Box::new(HttpRegistry::new(url.clone(), fetch)),
            Self::Local(path) => Box::new(LocalRegistry::open(path)),
        }
    }
}

/// Where `add` takes a component from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// A single stub file
    Direct(Url),
    Repository(GitHubRef),
    Registry(RegistryLocation),
    Catalog,
}

impl SourceSpec {
    /// Pick the source from the optional flags, honouring precedence
    pub fn select(
        url: Option<&str>,
        repo: Option<&str>,
        registry: Option<&str>,
    ) -> ScaffoldResult<Self> {
        if let Some(url) = given(url) {
            return match Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(Self::Direct(parsed)),
                Ok(_) => Err(ScaffoldError::InvalidSource {
                    value: url.to_string(),
                    reason: "only http and https URLs are supported".to_string(),
                }),
                Err(e) => Err(ScaffoldError::InvalidSource {
                    value: url.to_string(),
                    reason: e.to_string(),
                }),
            };
        }
        if let Some(repo) = given(repo) {
            return GitHubRef::parse(repo).map(Self::Repository);
        }
        if let Some(registry) = given(registry) {
            return Ok(Self::Registry(RegistryLocation::parse(registry)));
        }
        Ok(Self::Catalog)
    }

    /// Flag that demands a component name, for sources that cannot infer one
    pub fn name_flag(&self) -> Option<&'static str> {
        match self {
            Self::Repository(_) => Some("--repo"),
            Self::Registry(_) => Some("--registry"),
            Self::Direct(_) | Self::Catalog => None,
        }
    }

    /// Registry that names resolve against; `None` for a direct URL
    pub fn registry(&self, fetch: Arc<dyn Fetch>) -> Option<Box<dyn Registry>> {
        match self {
            Self::Direct(_) => None,
            Self::Repository(repo) => Some(Box::new(HttpRegistry::new(repo.base().clone(), fetch))),
            Self::Registry(location) => Some(location.open(fetch)),
            Self::Catalog => Some(Box::new(EmbeddedCatalog)),
        }
    }
}

/// A flag's value, treating blank as absent
fn given(flag: Option<&str>) -> Option<&str> {
    flag.map(str::trim).filter(|v| !v.is_empty())
}
