//! Command implementations shared by the binary and tests.
//!
//! Each command returns data instead of printing it. Non-fatal conditions are
//! collected as [BoundaryWarning]s for the caller to report.

use crate::analyzer::MatchMode;
use crate::boundary::BoundaryWarning;
use crate::changelog::render_changelog;
use crate::config::Config;
use crate::domain::{ChangeType, Version};
use crate::error::{GitBumpError, Result};
use crate::git::Repository;
use crate::history::{HistoryResolver, LatestTag};
use tracing::{debug, info};

pub struct App<R: Repository> {
    history: HistoryResolver<R>,
    config: Option<Config>,
    pre_release: Option<String>,
    warnings: Vec<BoundaryWarning>,
}

impl<R: Repository> App<R> {
    /// Create an application over a history resolver
    ///
    /// # Arguments
    /// * `history` - Tag and commit access for the target repository
    /// * `config` - Loaded configuration; only `latest` and `commits` work without one
    /// * `pre_release` - Pre-release label for `next` and `tag`, empty meaning none
    pub fn new(history: HistoryResolver<R>, config: Option<Config>, pre_release: Option<String>) -> Self {
        App {
            history,
            config,
            pre_release: pre_release.filter(|label| !label.is_empty()),
            warnings: Vec::new(),
        }
    }

    pub fn history(&self) -> &HistoryResolver<R> {
        &self.history
    }

    /// Warnings gathered since the last call
    pub fn take_warnings(&mut self) -> Vec<BoundaryWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn config(&self) -> Result<&Config> {
        self.config
            .as_ref()
            .ok_or_else(|| GitBumpError::config("this command needs a configuration file"))
    }

    /// Name of the latest tag, warning when it is not a version
    pub fn latest(&mut self) -> Result<String> {
        let tag = self.history.latest_tag()?;
        if let Err(e) = Version::parse(&tag) {
            self.warnings.push(BoundaryWarning::NonVersionTag {
                tag: tag.clone(),
                reason: e.to_string(),
            });
        }
        Ok(tag)
    }

    /// Latest tag and the messages of the unreleased commits, newest first
    pub fn commits(&self) -> Result<(LatestTag, Vec<String>)> {
        let latest = self.history.latest()?;
        let messages = self.history.commits_since(latest.commit)?;
        Ok((latest, messages))
    }

    /// Commits after `latest`, or none when the tagged commit cannot be reached
    fn unreleased(&self, latest: &LatestTag) -> Result<Vec<String>> {
        match self.history.commits_since(latest.commit) {
            Err(e) if e.is_benign() => {
                debug!(error = %e, "treating unreachable tag as no change");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Dominant change among unreleased commits, skipping non-conforming ones
    pub fn change(&mut self) -> Result<ChangeType> {
        let latest = self.history.latest()?;
        self.change_since(&latest)
    }

    fn change_since(&mut self, latest: &LatestTag) -> Result<ChangeType> {
        let messages = self.unreleased(latest)?;
        let classifier = self.config()?.classifier()?;

        if messages.is_empty() {
            self.warnings.push(BoundaryWarning::NoUnreleasedCommits {
                latest_tag: latest.name.clone(),
            });
            return Ok(ChangeType::None);
        }

        let skipped = classifier.count_non_conforming(&messages);
        if skipped > 0 {
            self.warnings
                .push(BoundaryWarning::SkippedCommits { count: skipped });
        }

        classifier.classify(&messages, MatchMode::Lenient)
    }

    /// Version the next release should carry
    pub fn next(&mut self) -> Result<Version> {
        let latest = self.history.latest()?;
        self.next_from(&latest)
    }

    fn next_from(&mut self, latest: &LatestTag) -> Result<Version> {
        let current = Version::parse(&latest.name)?;
        let change = self.change_since(latest)?;

        let next = current.next(change, self.pre_release.as_deref());
        debug!(current = %current, change = %change, next = %next, "computed next version");
        Ok(next)
    }

    /// Fail on the first unreleased commit that does not match the template
    pub fn verify(&self) -> Result<()> {
        let (_, messages) = self.commits()?;
        let classifier = self.config()?.classifier()?;
        classifier.classify(&messages, MatchMode::Strict)?;
        Ok(())
    }

    /// Changelog of the unreleased commits
    ///
    /// Renders the configured changelog template, or lists the raw messages
    /// when there is none.
    pub fn changelog(&mut self) -> Result<String> {
        let (_, messages) = self.commits()?;
        let config = self.config()?;

        let Some(template) = config.templates.changelog.as_deref() else {
            return Ok(messages.join("\n"));
        };

        let classifier = config.classifier()?;
        let parsed = classifier.parse_all(&messages);
        let skipped = messages.len() - parsed.len();
        let rendered = render_changelog(template, &parsed)?;

        if skipped > 0 {
            self.warnings
                .push(BoundaryWarning::SkippedCommits { count: skipped });
        }
        Ok(rendered)
    }

    /// Tag HEAD with the next version
    ///
    /// # Returns
    /// * `Ok(Some(name))` - The created tag
    /// * `Ok(None)` - The version is unchanged, nothing was tagged
    pub fn tag(&mut self) -> Result<Option<String>> {
        let latest = self.history.latest()?;
        let name = self.next_from(&latest)?.to_string();

        if name == latest.name {
            info!(tag = %latest.name, "version unchanged, not tagging");
            return Ok(None);
        }

        self.history.create_tag(&name)?;
        Ok(Some(name))
    }
}
