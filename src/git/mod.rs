//! Git data abstraction layer
//!
//! This module provides a trait-based abstraction over the few git operations
//! version resolution needs: listing tags, peeling them to commits, walking
//! history from HEAD, and creating a tag.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! Code that resolves history should depend on the [Repository] trait rather
//! than a concrete implementation.
//!
//! ```ignore
//! use std::ops::ControlFlow;
//!
//! let mut newest = None;
//! repo.walk_commits(&mut |commit| {
//!     newest = Some(commit.id);
//!     ControlFlow::Break(())
//! })?;
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;
use std::ops::ControlFlow;

/// Commit information yielded by a history walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: Oid,
    /// Full commit message, untrimmed
    pub message: String,
}

/// A tag reference as stored in `refs/tags/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Short tag name (e.g. "v1.2.0")
    pub name: String,
    /// Object the reference points at: a commit for lightweight tags, a tag
    /// object for annotated ones
    pub target: Oid,
    pub is_annotated: bool,
}

/// Read access to tags and history plus tag creation
///
/// Implementations are not expected to be shared between threads; one
/// resolver owns its repository for the duration of an operation.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]; `git2` failures surface as
/// [crate::error::GitBumpError::Git].
pub trait Repository {
    /// All tag references in the repository, in no particular order
    fn list_tags(&self) -> Result<Vec<TagRef>>;

    /// Commit a tag points at, peeling annotated tags to their target
    ///
    /// # Returns
    /// * `Ok(Oid)` - The tagged commit
    /// * `Err` - If the tag does not (eventually) point at a commit
    fn resolve_tag(&self, tag: &TagRef) -> Result<Oid>;

    /// Visit commits reachable from HEAD, newest committer time first
    ///
    /// The visitor returns [ControlFlow::Break] to stop the walk early. A
    /// repository without commits visits nothing.
    fn walk_commits(&self, visit: &mut dyn FnMut(CommitInfo) -> ControlFlow<()>) -> Result<()>;

    /// Create a lightweight tag pointing at `target`
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists or the target is not a commit
    fn create_tag(&self, name: &str, target: Oid) -> Result<()>;
}
