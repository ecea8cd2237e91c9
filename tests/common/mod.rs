#![allow(dead_code)]

use git2::{Commit, Oid, Repository, Signature, Time};
use std::path::Path;
use tempfile::TempDir;

const BASE_TIME: i64 = 1_700_000_000;

/// Temporary git repository with a deterministic commit clock
pub struct TestRepo {
    dir: TempDir,
    repo: Repository,
    clock: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        TestRepo {
            dir,
            repo,
            clock: 0,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&mut self) -> Signature<'static> {
        self.clock += 60;
        Signature::new(
            "Test User",
            "test@example.com",
            &Time::new(BASE_TIME + self.clock, 0),
        )
        .expect("Could not create signature")
    }

    fn head_commit(&self) -> Option<Commit<'_>> {
        self.repo.head().ok().and_then(|h| h.peel_to_commit().ok())
    }

    /// Commit on top of HEAD
    pub fn commit(&mut self, message: &str) -> Oid {
        let sig = self.signature();
        let tree_id = self
            .repo
            .index()
            .expect("Could not get index")
            .write_tree()
            .expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");
        let parents: Vec<Commit<'_>> = self.head_commit().into_iter().collect();
        let parent_refs: Vec<&Commit<'_>> = parents.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    /// Commit on top of HEAD without moving any reference
    pub fn dangling_commit(&mut self, message: &str) -> Oid {
        let sig = self.signature();
        let head = self.head_commit().expect("Repository has no HEAD commit");
        let tree = head.tree().expect("Could not get tree");

        self.repo
            .commit(None, &sig, &sig, message, &tree, &[&head])
            .expect("Could not create commit")
    }

    pub fn tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn annotated_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).expect("Could not find object");
        let sig = Signature::new("Test User", "test@example.com", &Time::new(BASE_TIME, 0))
            .expect("Could not create signature");
        self.repo
            .tag(name, &object, &sig, "release", false)
            .expect("Could not create annotated tag");
    }

    /// Tag names pointing at a commit
    pub fn tags_on(&self, target: Oid) -> Vec<String> {
        let mut names = Vec::new();
        for name in self.repo.tag_names(None).expect("Could not list tags").iter().flatten() {
            let commit = self
                .repo
                .revparse_single(name)
                .and_then(|o| o.peel_to_commit())
                .expect("Could not resolve tag");
            if commit.id() == target {
                names.push(name.to_string());
            }
        }
        names.sort();
        names
    }
}
