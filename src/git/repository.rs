use crate::error::Result;
use crate::git::{CommitInfo, TagRef};
use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort};
use std::ops::ControlFlow;
use std::path::Path;
use tracing::{debug, warn};

const TAG_REF_PREFIX: &str = "refs/tags/";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        debug!(path = %repo.path().display(), "opened repository");

        Ok(Git2Repository { repo })
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let mut tags = Vec::new();

        for reference in self.repo.references_glob(&format!("{}*", TAG_REF_PREFIX))? {
            let reference = reference?;
            let Some(full_name) = reference.name() else {
                warn!("skipping tag with a non UTF-8 name");
                continue;
            };
            let name = full_name.trim_start_matches(TAG_REF_PREFIX).to_string();

            let Some(target) = reference.target() else {
                warn!(tag = %name, "skipping symbolic tag reference");
                continue;
            };

            let is_annotated = self.repo.find_tag(target).is_ok();
            tags.push(TagRef {
                name,
                target,
                is_annotated,
            });
        }

        Ok(tags)
    }

    fn resolve_tag(&self, tag: &TagRef) -> Result<Oid> {
        let commit = self
            .repo
            .find_object(tag.target, None)?
            .peel_to_commit()?;

        Ok(commit.id())
    }

    fn walk_commits(&self, visit: &mut dyn FnMut(CommitInfo) -> ControlFlow<()>) -> Result<()> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;

        match revwalk.push_head() {
            Ok(()) => {}
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                debug!("HEAD has no commits");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

            if visit(CommitInfo { id: oid, message }).is_break() {
                break;
            }
        }

        Ok(())
    }

    fn create_tag(&self, name: &str, target: Oid) -> Result<()> {
        let object = self.repo.find_object(target, None)?;
        self.repo.tag_lightweight(name, &object, false)?;

        Ok(())
    }
}
