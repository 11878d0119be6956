use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use snip::{Config, EntryKind, Error, GitHubClient, Planner, RepoLocator, Visibility, tree};

#[derive(Debug, Parser)]
#[command(name = "snip", version)]
#[command(about = "Get just the directory or file you need from a repository")]
#[command(
    long_about = "Snip downloads a single directory or file from a repository without cloning the entire repo."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Snip a directory or file from a repository
    Repo {
        /// Repository URL, e.g. https://github.com/owner/repo
        repo_url: String,

        #[command(flatten)]
        select: Select,

        /// Branch to use (default: the repository's default branch)
        #[arg(long, value_name = "NAME")]
        branch: Option<String>,

        /// Destination directory to write files
        #[arg(long, value_name = "PATH", default_value = ".")]
        dest: PathBuf,
    },
}

/// Exactly one of `--dir` / `--file` is required.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct Select {
    /// Name of a directory to snip (searches the entire repo)
    #[arg(long, value_name = "NAME")]
    dir: Option<String>,

    /// Name of a file to snip (searches the entire repo)
    #[arg(long, value_name = "NAME")]
    file: Option<String>,
}

const TRUNCATION_WARNING: &str = "⚠️  Tree listing truncated: the repository is large and GitHub \
     limited the response; results may be incomplete. You can retry with a GITHUB_TOKEN set to \
     raise the limit.";

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    match cli.command {
        Command::Repo {
            repo_url,
            select,
            branch,
            dest,
        } => run_repo(&repo_url, &select, branch, &dest),
    }
}

fn run_repo(
    repo_url: &str,
    select: &Select,
    branch: Option<String>,
    dest: &std::path::Path,
) -> Result<(), anyhow::Error> {
    let locator = RepoLocator::parse(repo_url)?;
    locator.ensure_supported()?;

    let config = Config::from_env();
    let client = GitHubClient::new(&config)?;

    let visibility = client
        .visibility(&locator)
        .context("cannot access repository; ensure the URL is correct and accessible")?;
    match visibility {
        Visibility::Private => println!("🔒 Private repository detected."),
        Visibility::Public => println!("🌍 Public repository detected."),
    }

    let branch = match branch {
        Some(name) => name,
        None => match client.default_branch(&locator) {
            Ok(name) => name,
            Err(err) => {
                eprintln!("⚠️  Could not detect default branch, using 'master': {err}");
                "master".to_string()
            }
        },
    };

    let planner = Planner::new(&locator.owner, &locator.name, &branch, visibility, dest);
    // Private repos need a credential; fail before any network work for content
    planner.check_credential(&config)?;

    println!("🔍 Listing repository tree for {locator} (branch: {branch})...");
    let listing = client
        .list_tree(&locator, &branch)
        .context("failed to list repository tree")?;
    if listing.truncated {
        eprintln!("{TRUNCATION_WARNING}");
    }

    let targets = match (&select.dir, &select.file) {
        (Some(dir_name), None) => {
            let matches = tree::find_by_name(&listing.entries, dir_name, EntryKind::Tree);
            let Some((selected, discarded)) = tree::select_first(matches) else {
                return Err(Error::NotFound {
                    kind: "directory",
                    name: dir_name.clone(),
                }
                .into());
            };
            warn_ambiguous("directories", dir_name, &selected.path, &discarded);
            println!("📦 Snipping directory: {}", selected.path);
            let blobs = tree::blobs_under(&listing.entries, &selected.path);
            if blobs.is_empty() {
                println!("⚠️  Directory is empty.");
                return Ok(());
            }
            planner.plan_subtree(&selected.path, &blobs)
        }
        (None, Some(file_name)) => {
            let matches = tree::find_by_name(&listing.entries, file_name, EntryKind::Blob);
            let Some((selected, discarded)) = tree::select_first(matches) else {
                return Err(Error::NotFound {
                    kind: "file",
                    name: file_name.clone(),
                }
                .into());
            };
            warn_ambiguous("files", file_name, &selected.path, &discarded);
            vec![planner.plan_file(selected)]
        }
        // clap's arg group guarantees exactly one selector
        _ => unreachable!("--dir/--file group is required and mutually exclusive"),
    };

    for target in &targets {
        let path = snip::download(&client, &locator, &branch, target)
            .with_context(|| format!("failed to download '{}'", target.remote_path))?;
        println!("⬇️  Downloaded: {}", path.display());
    }
    println!("✅ Done.");
    Ok(())
}

fn warn_ambiguous(what: &str, name: &str, selected: &str, discarded: &[&snip::TreeEntry]) {
    if discarded.is_empty() {
        return;
    }
    let alternatives: Vec<&str> = discarded.iter().map(|e| e.path.as_str()).collect();
    eprintln!(
        "⚠️  Multiple {what} named '{name}' found; selecting the first match '{selected}' (ignoring: {})",
        alternatives.join(", ")
    );
}

#[cfg(test)]
mod test_warnings {
    use super::TRUNCATION_WARNING;

    #[test]
    fn truncation_warning_tells_how_to_retry() {
        assert!(TRUNCATION_WARNING.contains("truncated"));
        assert!(TRUNCATION_WARNING.contains("GITHUB_TOKEN"));
    }
}
