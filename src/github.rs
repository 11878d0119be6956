//! The GitHub API client.
//!
//! One blocking client instance serves every remote call in a command:
//! visibility check, default-branch lookup, recursive tree listing, and the
//! per-file content fetches. Nothing is retried; the first failure aborts.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{Local, TimeZone};
use serde::Deserialize;

use crate::config::Config;
use crate::error::Error;
use crate::plan::{FetchMethod, FetchTarget, Visibility};
use crate::repo::RepoLocator;
use crate::tree::{TreeEntry, TreeListing};

const API_ROOT: &str = "https://api.github.com";

/// `GET /repos/{owner}/{repo}` — the fields this tool cares about.
#[derive(Debug, Deserialize)]
struct RepoInfo {
    private: bool,
    #[serde(default)]
    default_branch: String,
}

/// `GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1`.
#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

/// `GET /repos/{owner}/{repo}/contents/{path}` for a single file.
#[derive(Debug, Deserialize)]
struct ContentResponse {
    encoding: String,
    content: String,
}

pub struct GitHubClient {
    http: reqwest::blocking::Client,
    token: Option<String>,
}

impl GitHubClient {
    /// Build a client from the explicit configuration. The user agent and
    /// timeout apply to every request the client makes.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            token: config.token.clone(),
        })
    }

    /// Whether the repository is public or private. Callers treat any error
    /// here as "cannot access repository" and abort.
    pub fn visibility(&self, repo: &RepoLocator) -> Result<Visibility, Error> {
        let info = self.repo_info(repo)?;
        Ok(if info.private {
            Visibility::Private
        } else {
            Visibility::Public
        })
    }

    /// The repository's default branch name. Callers fall back to `master`
    /// with a warning when this fails.
    pub fn default_branch(&self, repo: &RepoLocator) -> Result<String, Error> {
        branch_of(self.repo_info(repo)?)
    }

    /// The full recursive tree listing for a branch, flat, plus the
    /// provider's truncation flag.
    pub fn list_tree(&self, repo: &RepoLocator, branch: &str) -> Result<TreeListing, Error> {
        let url = tree_url(repo, branch);
        let response: TreeResponse = self.api_get(url.as_str())?.json()?;
        Ok(TreeListing {
            entries: response.tree,
            truncated: response.truncated,
        })
    }

    /// Retrieve the bytes for one planned target, by whichever method the
    /// planner selected.
    pub fn fetch_target(
        &self,
        repo: &RepoLocator,
        branch: &str,
        target: &FetchTarget,
    ) -> Result<Vec<u8>, Error> {
        match &target.method {
            FetchMethod::Raw { url } => self.raw_content(url),
            FetchMethod::Contents { path } => self.file_content(repo, branch, path),
        }
    }

    /// Anonymous raw-content fetch, yielding the bytes directly.
    fn raw_content(&self, url: &str) -> Result<Vec<u8>, Error> {
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(Error::Provider {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }

    /// Authenticated contents fetch. The payload arrives base64-encoded with
    /// embedded newlines; strip them before decoding and write the decoded
    /// bytes verbatim.
    fn file_content(&self, repo: &RepoLocator, branch: &str, path: &str) -> Result<Vec<u8>, Error> {
        let url = contents_url(repo, branch, path);
        let content: ContentResponse = self.api_get(url.as_str())?.json()?;
        if content.encoding != "base64" {
            return Err(Error::UnexpectedEncoding {
                encoding: content.encoding,
            });
        }
        let compact: String = content
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        Ok(BASE64.decode(compact)?)
    }

    fn repo_info(&self, repo: &RepoLocator) -> Result<RepoInfo, Error> {
        let url = api_url(&["repos", &repo.owner, &repo.name]);
        Ok(self.api_get(url.as_str())?.json()?)
    }

    /// Shared API request path: headers, credential, and error
    /// classification. A 403 is either abuse detection or rate limiting;
    /// everything else non-2xx becomes a [`Error::Provider`] with the body
    /// passed through.
    fn api_get(&self, url: &str) -> Result<reqwest::blocking::Response, Error> {
        let mut request = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("token {token}"));
        }
        let response = request.send()?;
        let status = response.status();

        if status == reqwest::StatusCode::FORBIDDEN {
            let reset = response
                .headers()
                .get("x-ratelimit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<i64>().ok())
                .map(format_reset_instant);
            let body = response.text().unwrap_or_default();
            if body.to_lowercase().contains("abuse") {
                return Err(Error::AbuseDetected);
            }
            return Err(Error::RateLimited {
                authenticated: self.token.is_some(),
                reset,
            });
        }

        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(Error::Provider {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }

        Ok(response)
    }
}

/// Repository metadata with no default branch named is a distinct condition,
/// not an HTTP failure; callers fall back to `master` with a warning.
fn branch_of(info: RepoInfo) -> Result<String, Error> {
    if info.default_branch.is_empty() {
        Err(Error::MissingDefaultBranch)
    } else {
        Ok(info.default_branch)
    }
}

/// Build an API URL from the root and a list of path segments. Each segment
/// is percent-encoded, so repository paths and branch names containing `#`,
/// `?`, `/` or spaces reach the API literally instead of being cut short at
/// a URL metacharacter.
fn api_url(segments: &[&str]) -> url::Url {
    // The root is a constant https URL, so both of these are infallible
    let mut url = url::Url::parse(API_ROOT).expect("API root is a valid URL");
    url.path_segments_mut()
        .expect("API root is a base URL")
        .extend(segments);
    url
}

fn tree_url(repo: &RepoLocator, branch: &str) -> url::Url {
    let mut url = api_url(&["repos", &repo.owner, &repo.name, "git", "trees", branch]);
    url.query_pairs_mut().append_pair("recursive", "1");
    url
}

fn contents_url(repo: &RepoLocator, branch: &str, path: &str) -> url::Url {
    let mut url = api_url(&["repos", &repo.owner, &repo.name, "contents", path]);
    url.query_pairs_mut().append_pair("ref", branch);
    url
}

/// Render an `X-RateLimit-Reset` epoch as a local human-readable instant.
/// Falls back to the raw epoch when it is out of range.
fn format_reset_instant(epoch: i64) -> String {
    match Local.timestamp_opt(epoch, 0).single() {
        Some(instant) => instant.to_rfc2822(),
        None => format!("epoch {epoch}"),
    }
}


#[cfg(test)]
mod test_urls {
    use super::*;

    fn locator() -> RepoLocator {
        RepoLocator {
            host: "github.com".to_string(),
            owner: "owner".to_string(),
            name: "repo".to_string(),
        }
    }

    #[test]
    fn contents_url_escapes_url_metacharacters_in_path() {
        let url = contents_url(&locator(), "main", "docs/a#b.txt");
        // '#' must not start a fragment and the ref pin must survive
        assert!(url.fragment().is_none());
        assert_eq!(url.query(), Some("ref=main"));
        assert!(url.path().ends_with("/contents/docs%2Fa%23b.txt"));
    }

    #[test]
    fn contents_url_escapes_question_mark_and_space() {
        let url = contents_url(&locator(), "main", "notes/why?.md");
        assert_eq!(url.query(), Some("ref=main"));
        assert!(url.path().contains("why%3F.md"));

        let url = contents_url(&locator(), "main", "docs/read me.txt");
        assert!(url.path().contains("read%20me.txt"));
    }

    #[test]
    fn contents_url_targets_the_repository() {
        let url = contents_url(&locator(), "main", "src/lib.rs");
        assert_eq!(url.host_str(), Some("api.github.com"));
        assert!(url.path().starts_with("/repos/owner/repo/contents/"));
    }

    #[test]
    fn tree_url_escapes_branch_and_keeps_recursive_flag() {
        let url = tree_url(&locator(), "feature/x");
        assert_eq!(url.query(), Some("recursive=1"));
        assert!(url.path().ends_with("/git/trees/feature%2Fx"));
    }

    #[test]
    fn tree_url_plain_branch() {
        let url = tree_url(&locator(), "main");
        assert_eq!(url.path(), "/repos/owner/repo/git/trees/main");
        assert_eq!(url.query(), Some("recursive=1"));
    }
}
