use crate::domain::{ChangeType, Message, Template};
use crate::error::Result;
use std::collections::HashMap;
use tracing::debug;

/// How to treat commit messages that do not match the template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The first non-conforming message aborts classification
    Strict,
    /// Non-conforming messages are skipped
    Lenient,
}

/// Field name -> field value -> change type implied by that value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeverityTable {
    fields: HashMap<String, HashMap<String, ChangeType>>,
}

impl SeverityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the severity of a field value; `None` severities are not stored
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>, change: ChangeType) {
        if change == ChangeType::None {
            return;
        }
        self.fields
            .entry(field.into())
            .or_default()
            .insert(value.into(), change);
    }

    /// Severity implied by a field value, `None` when unknown
    pub fn lookup(&self, field: &str, value: &str) -> ChangeType {
        self.fields
            .get(field)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<F, V> FromIterator<(F, V, ChangeType)> for SeverityTable
where
    F: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, V, ChangeType)>>(iter: I) -> Self {
        let mut table = SeverityTable::new();
        for (field, value, change) in iter {
            table.insert(field, value, change);
        }
        table
    }
}

/// Reduces commit messages to the most severe change they describe
pub struct ChangeClassifier {
    template: Template,
    required: Vec<String>,
    table: SeverityTable,
}

impl ChangeClassifier {
    /// Create a new classifier
    pub fn new(template: Template, required: Vec<String>, table: SeverityTable) -> Self {
        ChangeClassifier {
            template,
            required,
            table,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Match one raw commit message against the template
    pub fn parse(&self, raw: &str) -> Result<Message> {
        Message::match_template(&self.template, raw, &self.required)
    }

    /// Most severe change among a message's field values
    pub fn classify_message(&self, message: &Message) -> ChangeType {
        message
            .iter()
            .map(|(field, value)| self.table.lookup(field, value))
            .max()
            .unwrap_or_default()
    }

    /// Most severe change across all commit messages
    ///
    /// # Returns
    /// * `Ok(ChangeType)` - Aggregate change, `None` for no messages
    /// * `Err` - In strict mode, the first message that fails to match
    pub fn classify(&self, messages: &[String], mode: MatchMode) -> Result<ChangeType> {
        let mut change = ChangeType::None;

        for raw in messages {
            let message = match self.parse(raw) {
                Ok(message) => message,
                Err(e) if mode == MatchMode::Lenient => {
                    debug!(summary = first_line(raw), error = %e, "skipping non-conforming commit");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let commit_change = self.classify_message(&message);
            debug!(summary = first_line(raw), change = %commit_change, "classified commit");
            change = change.max(commit_change);
        }

        Ok(change)
    }

    /// Parse every conforming message, skipping the rest
    pub fn parse_all(&self, messages: &[String]) -> Vec<Message> {
        messages
            .iter()
            .filter_map(|raw| self.parse(raw).ok())
            .collect()
    }

    /// Number of messages that fail to match the template
    pub fn count_non_conforming(&self, messages: &[String]) -> usize {
        messages.iter().filter(|raw| self.parse(raw).is_err()).count()
    }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}
