use thiserror::Error;

/// Unified error type for git-bump operations
#[derive(Error, Debug)]
pub enum GitBumpError {
    #[error("invalid version: {0}")]
    InvalidVersion(String),

    #[error(
        "missing required message parameter\n\
         -----------------------------------\n\
         template:\n{template}\n\
         -----------------------------------\n\
         required:\n{}\n\
         -----------------------------------\n\
         missing: {missing}",
        .required.join(",")
    )]
    MissingRequiredField {
        template: String,
        required: Vec<String>,
        missing: String,
    },

    /// The tagged commit is not reachable while walking back from HEAD.
    #[error("commit not found: tagged commit is not reachable from HEAD")]
    CommitNotFound,

    #[error("no tag found in the history of the current branch")]
    TagNotFound,

    #[error("no commits found on the current branch")]
    NoCommits,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-bump
pub type Result<T> = std::result::Result<T, GitBumpError>;

impl GitBumpError {
    /// Create an invalid version error for the given input
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        GitBumpError::InvalidVersion(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitBumpError::Config(msg.into())
    }

    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        GitBumpError::Template(msg.into())
    }

    /// Whether this error only means "nothing changed since the last release".
    pub fn is_benign(&self) -> bool {
        matches!(self, GitBumpError::CommitNotFound)
    }
}
