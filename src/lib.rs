//! Fetch a single file or directory subtree from a GitHub repository without
//! cloning the whole repository.
//!
//! The pipeline is sequential: resolve the repository URL, check visibility,
//! resolve the branch, list the recursive tree, match the requested name,
//! plan a fetch per blob, then download each target in turn.
//!
//! # Core pieces
//!
//! - [`repo::RepoLocator`] — parse a repository URL into host/owner/name.
//! - [`tree`] — the tree listing data model plus the name matcher and
//!   subtree filter, all pure functions over the listed entries.
//! - [`plan::Planner`] — decide the retrieval method from repository
//!   visibility and compute each target's local destination.
//! - [`github::GitHubClient`] — the blocking API client the plan is executed
//!   against.
//!
//! # Usage
//!
//! ```no_run
//! use snip::{Config, EntryKind, GitHubClient, Planner, RepoLocator, tree};
//!
//! # fn main() -> Result<(), snip::Error> {
//! let locator = RepoLocator::parse("github.com/rust-lang/rust")?;
//! locator.ensure_supported()?;
//!
//! let config = Config::from_env();
//! let client = GitHubClient::new(&config)?;
//! let visibility = client.visibility(&locator)?;
//! let branch = client.default_branch(&locator)?;
//! let listing = client.list_tree(&locator, &branch)?;
//!
//! let matches = tree::find_by_name(&listing.entries, "main.rs", EntryKind::Blob);
//! if let Some((entry, _discarded)) = tree::select_first(matches) {
//!     let dest = std::path::Path::new(".");
//!     let planner = Planner::new(&locator.owner, &locator.name, &branch, visibility, dest);
//!     planner.check_credential(&config)?;
//!     let target = planner.plan_file(entry);
//!     snip::download(&client, &locator, &branch, &target)?;
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod download;
mod error;
pub mod github;
pub mod plan;
pub mod repo;
pub mod tree;

#[doc(inline)]
pub use crate::config::Config;
#[doc(inline)]
pub use crate::download::download;
#[doc(inline)]
pub use crate::error::Error;
pub use crate::github::GitHubClient;
pub use crate::plan::{FetchMethod, FetchTarget, Planner, Visibility};
pub use crate::repo::RepoLocator;
pub use crate::tree::{EntryKind, TreeEntry, TreeListing};
