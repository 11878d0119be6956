//! The repository tree listing and the lookups performed over it.
//!
//! GitHub's recursive tree endpoint returns a flat list of every object in
//! the repository. All matching here is done client-side over that snapshot:
//! a bare name is matched against the final path segment of each entry, and a
//! confirmed directory match is expanded to the blobs nested under it.

use serde::Deserialize;

/// Kind of object in a tree listing. `Commit` entries are submodule pointers;
/// they are listed by the API but never matched or fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
    Commit,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "file"),
            Self::Tree => write!(f, "directory"),
            Self::Commit => write!(f, "submodule"),
        }
    }
}

/// One listed object. Paths are `/`-separated with no leading slash.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Size in bytes; present for blobs only.
    #[serde(default)]
    pub size: Option<u64>,
}

impl TreeEntry {
    /// The final path segment.
    pub fn base_name(&self) -> &str {
        base_name(&self.path)
    }
}

/// A tree listing plus the provider's truncation flag. A truncated listing is
/// incomplete but still usable; the caller warns and proceeds.
#[derive(Debug)]
pub struct TreeListing {
    pub entries: Vec<TreeEntry>,
    pub truncated: bool,
}

/// The final segment of a `/`-separated path.
pub(crate) fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Find every entry of the requested kind whose final path segment equals
/// `name` exactly (case-sensitive). Listing order is preserved; an empty
/// result means nothing matched.
pub fn find_by_name<'a>(
    entries: &'a [TreeEntry],
    name: &str,
    kind: EntryKind,
) -> Vec<&'a TreeEntry> {
    entries
        .iter()
        .filter(|e| e.kind == kind && e.base_name() == name)
        .collect()
}

/// Select every blob nested under `dir_path`. The prefix comparison is
/// segment-aligned: `src/` matches `src/app.rs` but not `src-extra/app.rs`.
/// An empty result signals an empty directory, which is not an error.
pub fn blobs_under<'a>(entries: &'a [TreeEntry], dir_path: &str) -> Vec<&'a TreeEntry> {
    let prefix = format!("{dir_path}/");
    entries
        .iter()
        .filter(|e| e.kind == EntryKind::Blob && e.path.starts_with(&prefix))
        .collect()
}

/// Split a match set into the selected entry and the discarded alternatives.
///
/// The first entry in listing order wins. The listing order comes straight
/// from the provider and carries no stability guarantee across calls, so the
/// caller is expected to name the discarded alternatives in a warning rather
/// than treat the choice as deterministic.
pub fn select_first<'a>(matches: Vec<&'a TreeEntry>) -> Option<(&'a TreeEntry, Vec<&'a TreeEntry>)> {
    let mut iter = matches.into_iter();
    let selected = iter.next()?;
    Some((selected, iter.collect()))
}

#[cfg(test)]
fn entry(path: &str, kind: EntryKind) -> TreeEntry {
    TreeEntry {
        path: path.to_string(),
        kind,
        size: matches!(kind, EntryKind::Blob).then_some(0),
    }
}

#[cfg(test)]
mod test_find_by_name {
    use super::*;

    fn listing() -> Vec<TreeEntry> {
        vec![
            entry("src", EntryKind::Tree),
            entry("src/app.go", EntryKind::Blob),
            entry("src/lib", EntryKind::Tree),
            entry("src/lib/util.go", EntryKind::Blob),
            entry("docs", EntryKind::Tree),
            entry("docs/readme.md", EntryKind::Blob),
            entry("vendored", EntryKind::Commit),
        ]
    }

    #[test]
    fn matches_only_requested_kind() {
        let entries = listing();
        let dirs = find_by_name(&entries, "src", EntryKind::Tree);
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs[0].path, "src");
        assert!(find_by_name(&entries, "src", EntryKind::Blob).is_empty());
    }

    #[test]
    fn matches_final_segment_not_substring() {
        let entries = listing();
        let files = find_by_name(&entries, "util.go", EntryKind::Blob);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "src/lib/util.go");
        // "lib" is a segment of util.go's path but not its final segment
        assert!(find_by_name(&entries, "lib", EntryKind::Blob).is_empty());
    }

    #[test]
    fn match_is_case_sensitive() {
        let entries = listing();
        assert!(find_by_name(&entries, "Src", EntryKind::Tree).is_empty());
        assert!(find_by_name(&entries, "README.md", EntryKind::Blob).is_empty());
    }

    #[test]
    fn no_match_yields_empty_set() {
        let entries = listing();
        assert!(find_by_name(&entries, "missing", EntryKind::Tree).is_empty());
    }

    #[test]
    fn multiple_matches_preserve_listing_order() {
        let entries = vec![
            entry("a/utils", EntryKind::Tree),
            entry("b/utils", EntryKind::Tree),
        ];
        let matches = find_by_name(&entries, "utils", EntryKind::Tree);
        let paths: Vec<&str> = matches.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["a/utils", "b/utils"]);
    }

    #[test]
    fn submodule_entries_never_match() {
        let entries = listing();
        assert!(find_by_name(&entries, "vendored", EntryKind::Tree).is_empty());
        assert!(find_by_name(&entries, "vendored", EntryKind::Blob).is_empty());
    }
}

#[cfg(test)]
mod test_blobs_under {
    use super::*;

    fn listing() -> Vec<TreeEntry> {
        vec![
            entry("src/app.go", EntryKind::Blob),
            entry("src/lib", EntryKind::Tree),
            entry("src/lib/util.go", EntryKind::Blob),
            entry("src-extra/sneaky.go", EntryKind::Blob),
            entry("docs/readme.md", EntryKind::Blob),
        ]
    }

    #[test]
    fn selects_all_nested_blobs() {
        let entries = listing();
        let blobs = blobs_under(&entries, "src");
        let paths: Vec<&str> = blobs.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["src/app.go", "src/lib/util.go"]);
    }

    #[test]
    fn nested_directory_match_selects_only_its_subtree() {
        let entries = listing();
        let blobs = blobs_under(&entries, "src/lib");
        let paths: Vec<&str> = blobs.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["src/lib/util.go"]);
    }

    #[test]
    fn sibling_sharing_string_prefix_is_excluded() {
        let entries = listing();
        let blobs = blobs_under(&entries, "src");
        assert!(blobs.iter().all(|e| !e.path.starts_with("src-extra")));
    }

    #[test]
    fn excludes_tree_entries() {
        let entries = listing();
        let blobs = blobs_under(&entries, "src");
        assert!(blobs.iter().all(|e| e.kind == EntryKind::Blob));
    }

    #[test]
    fn empty_directory_yields_empty_set() {
        let entries = vec![entry("empty", EntryKind::Tree)];
        assert!(blobs_under(&entries, "empty").is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let entries = listing();
        let first: Vec<String> = blobs_under(&entries, "src")
            .iter()
            .map(|e| e.path.clone())
            .collect();
        let second: Vec<String> = blobs_under(&entries, "src")
            .iter()
            .map(|e| e.path.clone())
            .collect();
        assert_eq!(first, second);
    }
}


#[cfg(test)]
mod test_deserialize {
    use super::*;

    #[test]
    fn decodes_api_entry_shapes() {
        let json = r#"[
            {"path": "src", "mode": "040000", "type": "tree", "sha": "abc"},
            {"path": "src/main.rs", "mode": "100644", "type": "blob", "sha": "def", "size": 123},
            {"path": "vendored", "mode": "160000", "type": "commit", "sha": "fff"}
        ]"#;
        let entries: Vec<TreeEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].kind, EntryKind::Tree);
        assert_eq!(entries[0].size, None);
        assert_eq!(entries[1].kind, EntryKind::Blob);
        assert_eq!(entries[1].size, Some(123));
        assert_eq!(entries[2].kind, EntryKind::Commit);
    }
}
