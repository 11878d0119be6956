//! Repository URL resolution.

use crate::error::Error;

/// A repository identified by host, owner and name.
///
/// Parsed once from the URL given on the command line; every API call is
/// derived from the owner/name pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RepoLocator {
    /// Parse a repository URL. Accepts URLs with or without a scheme:
    ///
    /// - `https://github.com/owner/repo`
    /// - `github.com/owner/repo`
    /// - `github.com/owner/repo.git`
    ///
    /// A scheme-less URL is assumed to be `https`. Fails with
    /// [`Error::InvalidUrl`] when fewer than two path segments remain after
    /// trimming slashes.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidUrl {
            url: raw.to_string(),
        };
        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("https://{raw}")
        };
        let url = url::Url::parse(&with_scheme).map_err(|_| invalid())?;
        let host = url.host_str().ok_or_else(invalid)?.to_string();
        let segments: Vec<&str> = url
            .path()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if segments.len() < 2 {
            return Err(invalid());
        }
        let owner = segments[0].to_string();
        let name = segments[1].trim_end_matches(".git").to_string();
        Ok(Self { host, owner, name })
    }

    /// Check that the resolved host is one this tool supports.
    pub fn ensure_supported(&self) -> Result<(), Error> {
        if self.host == "github.com" || self.host.ends_with(".github.com") {
            Ok(())
        } else {
            Err(Error::UnsupportedHost {
                host: self.host.clone(),
            })
        }
    }
}

impl std::fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
