//! Semantic version state machine
//!
//! Versions follow the shape `[v]MAJOR.MINOR.PATCH[-LABEL.BUILD]`; numbers
//! carry no leading zeros, so formatting reproduces the parsed text. Moving to
//! the next version depends on the detected [`ChangeType`] and on whether a
//! pre-release train is requested:
//!
//! - without a label, the version is bumped and any pre-release is dropped;
//! - with the same label and no more severe change than the one that opened
//!   the train, only the build counter moves;
//! - otherwise a new (or escalated) train starts at build 1.
//!
//! A pre-release version already carries the provisional bump that opened its
//! train, so a change no more severe than that bump only drops the suffix
//! (`1.2.3-rc.2` released as a patch is `1.2.3`). Escalating to a more severe
//! change first reverts the provisional bump. The revert assumes exactly one
//! bump produced the current pre-release; tags made by hand may not honour
//! that.

use crate::domain::change::ChangeType;
use crate::domain::prerelease::PreRelease;
use crate::error::{GitBumpError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(v)?(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(?:-(\S+))?$")
        .expect("version pattern is valid")
});

/// Semantic version with an optional `v` prefix and pre-release train
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub prefixed: bool,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Option<PreRelease>,
}

impl Version {
    /// Create an unprefixed release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            prefixed: false,
            major,
            minor,
            patch,
            pre_release: None,
        }
    }

    /// Same version on the given pre-release train
    pub fn with_pre_release(mut self, label: impl Into<String>, build: u64) -> Self {
        self.pre_release = Some(PreRelease {
            label: label.into(),
            build: build.max(1),
        });
        self
    }

    /// Parse a version from a tag name (e.g. "v1.2.3", "2.0.0-beta.4")
    pub fn parse(s: &str) -> Result<Self> {
        let captures = VERSION_RE
            .captures(s)
            .ok_or_else(|| GitBumpError::invalid_version(s))?;

        let component = |idx: usize, name: &str| -> Result<u64> {
            captures[idx].parse::<u64>().map_err(|e| {
                GitBumpError::invalid_version(format!("{}: parse {}: {}", s, name, e))
            })
        };

        let pre_release = match captures.get(5) {
            Some(suffix) => Some(PreRelease::parse(suffix.as_str()).map_err(|e| match e {
                GitBumpError::InvalidVersion(reason) => {
                    GitBumpError::invalid_version(format!("{}: {}", s, reason))
                }
                other => other,
            })?),
            None => None,
        };

        Ok(Version {
            prefixed: captures.get(1).is_some(),
            major: component(2, "major")?,
            minor: component(3, "minor")?,
            patch: component(4, "patch")?,
            pre_release,
        })
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// Pre-release build counter, `0` for releases
    pub fn build(&self) -> u64 {
        self.pre_release.as_ref().map_or(0, |pr| pr.build)
    }

    fn label(&self) -> Option<&str> {
        self.pre_release.as_ref().map(|pr| pr.label.as_str())
    }

    /// The change that produced this version: its lowest non-zero component
    ///
    /// `1.2.3` was last moved by a patch, `1.3.0` by a minor bump, `2.0.0` by
    /// a major bump and `0.0.0` by nothing.
    pub fn latest_change_type(&self) -> ChangeType {
        if self.patch != 0 {
            ChangeType::Patch
        } else if self.minor != 0 {
            ChangeType::Minor
        } else if self.major != 0 {
            ChangeType::Major
        } else {
            ChangeType::None
        }
    }

    /// Whether `self` is strictly greater than `other`
    ///
    /// Pre-release builds are only compared when both versions share the same
    /// label; versions on different trains are never greater than each other.
    pub fn is_greater(&self, other: &Version) -> bool {
        let core = (self.major, self.minor, self.patch);
        let other_core = (other.major, other.minor, other.patch);
        if core != other_core {
            return core > other_core;
        }
        self.label() == other.label() && self.build() > other.build()
    }

    /// Next version for a detected change, optionally on a pre-release train
    ///
    /// An empty label is treated as no label.
    pub fn next(&self, change: ChangeType, pre_release: Option<&str>) -> Version {
        match pre_release.filter(|label| !label.is_empty()) {
            Some(label) => self.bump_pre_release(change, label),
            None => self.bump(change),
        }
    }

    /// Release version for a detected change
    pub fn bump(&self, change: ChangeType) -> Version {
        let mut next = self.clone();
        next.apply_bump(change);
        next
    }

    /// Pre-release version for a detected change on the `label` train
    pub fn bump_pre_release(&self, change: ChangeType, label: &str) -> Version {
        let mut next = self.clone();
        let same_train = self.label() == Some(label);

        if same_train && change <= self.latest_change_type() {
            next.pre_release = self.pre_release.as_ref().map(PreRelease::increment);
        } else {
            next.apply_bump(change);
            next.pre_release = Some(PreRelease::start(label));
        }
        next
    }

    fn apply_bump(&mut self, change: ChangeType) {
        if self.is_pre_release() {
            self.pre_release = None;
            if change <= self.latest_change_type() {
                return;
            }
            self.revert();
        }

        match change {
            ChangeType::Major => {
                self.major = self.major.saturating_add(1);
                self.minor = 0;
                self.patch = 0;
            }
            ChangeType::Minor => {
                self.minor = self.minor.saturating_add(1);
                self.patch = 0;
            }
            ChangeType::Patch => {
                self.patch = self.patch.saturating_add(1);
            }
            ChangeType::None => {}
        }
    }

    /// Undo the provisional bump that opened the current pre-release train
    fn revert(&mut self) {
        match self.latest_change_type() {
            ChangeType::Major => self.major = self.major.saturating_sub(1),
            ChangeType::Minor => self.minor = self.minor.saturating_sub(1),
            ChangeType::Patch => self.patch = self.patch.saturating_sub(1),
            ChangeType::None => {}
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefixed {
            f.write_str("v")?;
        }
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pr) = &self.pre_release {
            write!(f, "-{}", pr)?;
        }
        Ok(())
    }
}
