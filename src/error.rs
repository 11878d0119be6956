/// The main error enum for this crate.
///
/// One variant per failure category the command can abort with, so the binary
/// can report each with a precise user-facing message. Remote failures are
/// never retried; the first error aborts the command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The repository URL could not be parsed into host/owner/name.
    #[error("invalid repository URL '{url}': expected <host>/<owner>/<repo>")]
    InvalidUrl { url: String },

    /// The URL parsed but points at a host this tool does not speak to.
    #[error("unsupported host '{host}': only github.com is supported")]
    UnsupportedHost { host: String },

    /// No entry with the requested name exists anywhere in the listing.
    #[error("no {kind} named '{name}' found in repository")]
    NotFound { kind: &'static str, name: String },

    /// The repository is private and no credential is configured.
    #[error("private repository access requires the GITHUB_TOKEN environment variable")]
    AuthRequired,

    /// The repository metadata response did not name a default branch.
    /// Callers fall back to `master` with a warning rather than aborting.
    #[error("default branch not found")]
    MissingDefaultBranch,

    /// A non-2xx response from GitHub, message passed through verbatim.
    #[error("GitHub API error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The API rate limit was exhausted. The remedy differs depending on
    /// whether the request was authenticated, and `reset` carries the
    /// provider's retry-after hint when one was given.
    #[error("{} GitHub API rate limit exceeded{}{}",
        if *authenticated { "authenticated" } else { "unauthenticated" },
        reset.as_deref().map(|t| format!("; try again after {t}")).unwrap_or_default(),
        if *authenticated { "" } else { "\ntip: set GITHUB_TOKEN to increase your rate limit" })]
    RateLimited {
        authenticated: bool,
        reset: Option<String>,
    },

    /// GitHub's secondary abuse detection fired.
    #[error("GitHub API abuse detection triggered; slow down and try again later")]
    AbuseDetected,

    /// The contents endpoint returned a payload in an encoding other than base64.
    #[error("unexpected content encoding '{encoding}'")]
    UnexpectedEncoding { encoding: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] base64::DecodeError),
}
