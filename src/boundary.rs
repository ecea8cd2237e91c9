use std::fmt;

/// Non-fatal conditions met while resolving a release from history.
/// These are reported to the user on stderr without failing the command.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No commits since the latest tag
    NoUnreleasedCommits { latest_tag: String },
    /// Latest tag cannot be parsed as a semantic version
    NonVersionTag { tag: String, reason: String },
    /// Commits that do not match the commit template were ignored
    SkippedCommits { count: usize },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoUnreleasedCommits { latest_tag } => {
                write!(f, "No new commits since tag '{}'", latest_tag)
            }
            BoundaryWarning::NonVersionTag { tag, reason } => {
                write!(f, "Latest tag '{}' is not a version: {}", tag, reason)
            }
            BoundaryWarning::SkippedCommits { count } => {
                let noun = if *count == 1 { "commit" } else { "commits" };
                write!(
                    f,
                    "Ignored {} {} not matching the commit template",
                    count, noun
                )
            }
        }
    }
}
