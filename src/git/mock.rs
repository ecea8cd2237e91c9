use crate::error::Result;
use crate::git::{CommitInfo, Repository, TagRef};
use git2::Oid;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ops::ControlFlow;

/// In-memory repository for testing without actual git operations
///
/// Commits form a single line of history; the most recently added commit is
/// HEAD.
pub struct MockRepository {
    /// Newest first
    commits: Vec<CommitInfo>,
    tags: Vec<TagRef>,
    /// Annotated tag object -> tagged commit
    tag_objects: HashMap<Oid, Oid>,
    created_tags: RefCell<Vec<(String, Oid)>>,
    walks: Cell<usize>,
    next_id: u32,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
            tag_objects: HashMap::new(),
            created_tags: RefCell::new(Vec::new()),
            walks: Cell::new(0),
            next_id: 1,
        }
    }

    fn fresh_oid(&mut self) -> Oid {
        let mut bytes = [0u8; 20];
        bytes[..4].copy_from_slice(&self.next_id.to_be_bytes());
        self.next_id += 1;
        Oid::from_bytes(&bytes).expect("20 bytes make a valid oid")
    }

    /// Add a commit on top of HEAD and return its id
    pub fn commit(&mut self, message: impl Into<String>) -> Oid {
        let id = self.fresh_oid();
        self.commits.insert(
            0,
            CommitInfo {
                id,
                message: message.into(),
            },
        );
        id
    }

    /// Add a lightweight tag pointing at a commit
    pub fn tag(&mut self, name: impl Into<String>, commit: Oid) {
        self.tags.push(TagRef {
            name: name.into(),
            target: commit,
            is_annotated: false,
        });
    }

    /// Add an annotated tag whose tag object points at a commit
    pub fn annotated_tag(&mut self, name: impl Into<String>, commit: Oid) {
        let object = self.fresh_oid();
        self.tag_objects.insert(object, commit);
        self.tags.push(TagRef {
            name: name.into(),
            target: object,
            is_annotated: true,
        });
    }

    /// Add a tag pointing at a commit outside the current history
    pub fn detached_tag(&mut self, name: impl Into<String>) -> Oid {
        let commit = self.fresh_oid();
        self.tag(name, commit);
        commit
    }

    /// Number of history walks started so far
    pub fn walk_count(&self) -> usize {
        self.walks.get()
    }

    /// Tags created through [Repository::create_tag]
    pub fn created_tags(&self) -> Vec<(String, Oid)> {
        self.created_tags.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        Ok(self.tags.clone())
    }

    fn resolve_tag(&self, tag: &TagRef) -> Result<Oid> {
        if tag.is_annotated {
            return self
                .tag_objects
                .get(&tag.target)
                .copied()
                .ok_or_else(|| git2::Error::from_str("annotated tag object not found").into());
        }
        Ok(tag.target)
    }

    fn walk_commits(&self, visit: &mut dyn FnMut(CommitInfo) -> ControlFlow<()>) -> Result<()> {
        self.walks.set(self.walks.get() + 1);
        for commit in &self.commits {
            if visit(commit.clone()).is_break() {
                break;
            }
        }
        Ok(())
    }

    fn create_tag(&self, name: &str, target: Oid) -> Result<()> {
        let mut created = self.created_tags.borrow_mut();
        let exists = self.tags.iter().any(|t| t.name == name) || created.iter().any(|(n, _)| n == name);
        if exists {
            return Err(git2::Error::from_str(&format!("tag '{}' already exists", name)).into());
        }
        created.push((name.to_string(), target));
        Ok(())
    }
}
