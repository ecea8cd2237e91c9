//! Pre-release train handling
//!
//! A pre-release is a free-form label plus a positive build counter, written
//! as `LABEL.BUILD` (e.g. `alpha.1`, `rc.3`). The label may itself contain
//! dots; the build number is always the part after the last one.

use crate::error::{GitBumpError, Result};
use std::fmt;

/// Pre-release label with its build counter
///
/// # Examples
/// - "alpha.1" -> PreRelease { label: "alpha", build: 1 }
/// - "rc.1.4" -> PreRelease { label: "rc.1", build: 4 }
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    pub label: String,
    pub build: u64,
}

impl PreRelease {
    /// Start a new train for `label` at build 1
    pub fn start(label: impl Into<String>) -> Self {
        PreRelease {
            label: label.into(),
            build: 1,
        }
    }

    /// Parse a `LABEL.BUILD` suffix
    ///
    /// # Returns
    /// * `Ok(PreRelease)` - Parsed pre-release
    /// * `Err` - If the label is empty or contains whitespace, or the build is
    ///   missing, non-numeric or zero
    pub fn parse(s: &str) -> Result<Self> {
        let (label, build) = s.rsplit_once('.').ok_or_else(|| {
            GitBumpError::invalid_version(format!("pre-release '{}' has no build number", s))
        })?;

        if label.is_empty() || label.chars().any(char::is_whitespace) {
            return Err(GitBumpError::invalid_version(format!(
                "invalid pre-release label '{}'",
                label
            )));
        }

        let leading_zero = build.len() > 1 && build.starts_with('0');
        if build.is_empty() || leading_zero || !build.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GitBumpError::invalid_version(format!(
                "invalid pre-release build '{}'",
                build
            )));
        }
        let build = build.parse::<u64>().map_err(|e| {
            GitBumpError::invalid_version(format!("invalid pre-release build '{}': {}", build, e))
        })?;
        if build == 0 {
            return Err(GitBumpError::invalid_version(format!(
                "pre-release build of '{}' must be positive",
                s
            )));
        }

        Ok(PreRelease {
            label: label.to_string(),
            build,
        })
    }

    /// Next build on the same train
    pub fn increment(&self) -> Self {
        PreRelease {
            label: self.label.clone(),
            build: self.build.saturating_add(1),
        }
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.label, self.build)
    }
}
