//! Fetch planning: decide how each matched blob is retrieved and where it
//! lands on disk.
//!
//! The retrieval method follows repository visibility. Public repositories
//! are served from `raw.githubusercontent.com`, which needs no credential and
//! consumes no API rate-limit credit. Private repositories are only reachable
//! through the authenticated contents endpoint, which is rate-limited and
//! returns a base64 payload, so the raw path is preferred whenever visibility
//! allows it.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Error;
use crate::tree::{self, TreeEntry};

/// Repository visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// How a single blob will be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchMethod {
    /// Anonymous GET of a predictable raw-content URL.
    Raw { url: String },
    /// Authenticated GET of the contents endpoint for this repository path;
    /// the payload is base64 and must be decoded before writing.
    Contents { path: String },
}

/// One file to retrieve: where it lives remotely, where it is written
/// locally, and how it is fetched. Derived and discarded within a single
/// download pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub remote_path: String,
    pub local_path: PathBuf,
    pub method: FetchMethod,
}

/// Computes fetch targets for a resolved repository, branch and destination.
#[derive(Debug)]
pub struct Planner<'a> {
    owner: &'a str,
    repo: &'a str,
    branch: &'a str,
    visibility: Visibility,
    dest: &'a Path,
}

impl<'a> Planner<'a> {
    pub fn new(
        owner: &'a str,
        repo: &'a str,
        branch: &'a str,
        visibility: Visibility,
        dest: &'a Path,
    ) -> Self {
        Self {
            owner,
            repo,
            branch,
            visibility,
            dest,
        }
    }

    /// Fail with [`Error::AuthRequired`] when the repository is private and
    /// no credential is configured. Called once, before any per-file work.
    pub fn check_credential(&self, config: &Config) -> Result<(), Error> {
        match self.visibility {
            Visibility::Private if !config.has_token() => Err(Error::AuthRequired),
            _ => Ok(()),
        }
    }

    /// Plan a single matched file. The file's ancestor directories are
    /// discarded: it lands directly in the destination under its base name.
    pub fn plan_file(&self, entry: &TreeEntry) -> FetchTarget {
        FetchTarget {
            remote_path: entry.path.clone(),
            local_path: self.dest.join(entry.base_name()),
            method: self.method_for(&entry.path),
        }
    }

    /// Plan every blob under a matched directory. Each target keeps its path
    /// relative to the matched directory and is re-rooted under
    /// `dest/<base name of the matched directory>`. Entries not nested under
    /// `matched_dir` are skipped.
    pub fn plan_subtree(&self, matched_dir: &str, blobs: &[&TreeEntry]) -> Vec<FetchTarget> {
        let prefix = format!("{matched_dir}/");
        let local_root = self.dest.join(tree::base_name(matched_dir));
        blobs
            .iter()
            .filter_map(|blob| {
                let relative = blob.path.strip_prefix(&prefix)?;
                Some(FetchTarget {
                    remote_path: blob.path.clone(),
                    local_path: local_root.join(relative),
                    method: self.method_for(&blob.path),
                })
            })
            .collect()
    }

    fn method_for(&self, path: &str) -> FetchMethod {
        match self.visibility {
            Visibility::Public => FetchMethod::Raw {
                url: format!(
                    "https://raw.githubusercontent.com/{}/{}/{}/{}",
                    self.owner, self.repo, self.branch, path
                ),
            },
            Visibility::Private => FetchMethod::Contents {
                path: path.to_string(),
            },
        }
    }
}
