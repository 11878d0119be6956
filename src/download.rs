//! Download execution: one blocking round trip per target, written straight
//! to disk. Targets are executed sequentially by the caller; a failure
//! mid-directory aborts the command and files already written remain.

use std::io::Write;
use std::path::Path;

use crate::error::Error;
use crate::github::GitHubClient;
use crate::plan::FetchTarget;
use crate::repo::RepoLocator;

/// Fetch one target and write it to its planned local path, creating parent
/// directories as needed. Returns the path written.
pub fn download<'a>(
    client: &GitHubClient,
    repo: &RepoLocator,
    branch: &str,
    target: &'a FetchTarget,
) -> Result<&'a Path, Error> {
    let bytes = client.fetch_target(repo, branch, target)?;
    write_local(&target.local_path, &bytes)?;
    Ok(&target.local_path)
}

fn write_local(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    file.write_all(bytes)?;
    Ok(())
}
