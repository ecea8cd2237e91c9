//! Locates the latest tag on the current branch and the commits made since.
//!
//! "Latest" means the tag on the newest commit, in committer-time order, that
//! carries at least one tag. When that commit carries several tags, the
//! highest valid version wins and a release beats its own pre-releases;
//! without any valid version the lexicographically first name is used.

use crate::domain::Version;
use crate::error::{GitBumpError, Result};
use crate::git::{Git2Repository, Repository};
use git2::Oid;
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::path::Path;
use tracing::{debug, info, warn};

/// The tag a release is computed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestTag {
    pub commit: Oid,
    pub name: String,
}

/// Whether `candidate` should replace `current` as the latest version
fn outranks(candidate: &Version, current: &Version) -> bool {
    if candidate.is_greater(current) {
        return true;
    }
    let same_core = (candidate.major, candidate.minor, candidate.patch)
        == (current.major, current.minor, current.patch);
    same_core && current.is_pre_release() && !candidate.is_pre_release()
}

/// Reads tags and history through a [Repository]
pub struct HistoryResolver<R: Repository> {
    repo: R,
}

impl HistoryResolver<Git2Repository> {
    /// Open the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(HistoryResolver::new(Git2Repository::open(path)?))
    }
}

impl<R: Repository> HistoryResolver<R> {
    pub fn new(repo: R) -> Self {
        HistoryResolver { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// The newest tagged commit and all of its tag names, sorted
    ///
    /// # Returns
    /// * `Ok((Oid, Vec<String>))` - Tagged commit and its tags (never empty)
    /// * `Err(TagNotFound)` - If no tag resolves to a commit in HEAD's history
    pub fn latest_tags(&self) -> Result<(Oid, Vec<String>)> {
        let mut by_commit: HashMap<Oid, Vec<String>> = HashMap::new();

        for tag in self.repo.list_tags()? {
            match self.repo.resolve_tag(&tag) {
                Ok(commit) => by_commit.entry(commit).or_default().push(tag.name),
                Err(e) => warn!(tag = %tag.name, error = %e, "skipping tag that does not point to a commit"),
            }
        }

        if by_commit.is_empty() {
            return Err(GitBumpError::TagNotFound);
        }

        let mut found = None;
        self.repo.walk_commits(&mut |commit| match by_commit.remove(&commit.id) {
            Some(names) => {
                found = Some((commit.id, names));
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        })?;

        let (commit, mut names) = found.ok_or(GitBumpError::TagNotFound)?;
        names.sort();
        debug!(commit = %commit, tags = ?names, "found latest tagged commit");

        Ok((commit, names))
    }

    /// The latest tag and the commit it points at
    ///
    /// Among the tags on the newest tagged commit the greatest valid version
    /// wins, and a release beats a pre-release of the same version. Without
    /// any valid version the first name in sorted order is used.
    pub fn latest(&self) -> Result<LatestTag> {
        let (commit, names) = self.latest_tags()?;

        let mut best: Option<(Version, &String)> = None;
        for name in &names {
            match Version::parse(name) {
                Ok(version) => {
                    if best.as_ref().map_or(true, |(current, _)| outranks(&version, current)) {
                        best = Some((version, name));
                    }
                }
                Err(e) => debug!(tag = %name, error = %e, "tag is not a version"),
            }
        }

        let name = match best {
            Some((_, name)) => name.clone(),
            None => names.into_iter().next().ok_or(GitBumpError::TagNotFound)?,
        };

        Ok(LatestTag { commit, name })
    }

    /// Name of the latest tag
    pub fn latest_tag(&self) -> Result<String> {
        Ok(self.latest()?.name)
    }

    /// Messages of the commits after the latest tag, newest first
    ///
    /// Trailing and leading newlines are trimmed from every message. The
    /// tagged commit itself is not included.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Possibly empty list of messages
    /// * `Err(TagNotFound)` - If the repository has no usable tag
    /// * `Err(CommitNotFound)` - If the walk never reaches the tagged commit
    pub fn commits_since_latest_tag(&self) -> Result<Vec<String>> {
        let (tagged, _) = self.latest_tags()?;
        self.commits_since(tagged)
    }

    /// Messages of the commits after `tagged`, newest first
    pub fn commits_since(&self, tagged: Oid) -> Result<Vec<String>> {
        let mut messages = Vec::new();
        let mut reached = false;
        self.repo.walk_commits(&mut |commit| {
            if commit.id == tagged {
                reached = true;
                return ControlFlow::Break(());
            }
            messages.push(commit.message.trim_matches('\n').to_string());
            ControlFlow::Continue(())
        })?;

        if !reached {
            return Err(GitBumpError::CommitNotFound);
        }

        debug!(count = messages.len(), "collected commits since latest tag");
        Ok(messages)
    }

    /// Create a lightweight tag on the newest commit
    ///
    /// # Returns
    /// * `Ok(Oid)` - The tagged commit
    /// * `Err(NoCommits)` - If HEAD has no commits
    pub fn create_tag(&self, name: &str) -> Result<Oid> {
        let mut head = None;
        self.repo.walk_commits(&mut |commit| {
            head = Some(commit.id);
            ControlFlow::Break(())
        })?;

        let target = head.ok_or(GitBumpError::NoCommits)?;
        self.repo.create_tag(name, target)?;
        info!(tag = name, commit = %target, "created tag");

        Ok(target)
    }
}
