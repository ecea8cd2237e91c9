//! Field extraction from commit messages
//!
//! Matching is greedy and separator-delimited: each placeholder takes the text
//! up to the first occurrence of the literal that follows it in the template.
//! A separator that also occurs inside the intended value therefore cuts the
//! value short. Matching starts at the beginning of the message, so literal
//! text before the first placeholder ends up in the first value. A missing
//! trailing section is not an error by itself; only required fields are
//! enforced.

use crate::domain::template::Template;
use crate::error::{GitBumpError, Result};
use indexmap::IndexMap;
use serde::Serialize;

/// Fields extracted from one commit message, in template order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Message {
    fields: IndexMap<String, String>,
}

impl Message {
    /// Match a raw commit message against a template string
    pub fn parse(template: &str, message: &str, required: &[String]) -> Result<Self> {
        let template = Template::parse(template)?;
        Message::match_template(&template, message, required)
    }

    /// Match a raw commit message against an already tokenised template
    ///
    /// # Returns
    /// * `Ok(Message)` - Extracted fields
    /// * `Err(MissingRequiredField)` - If a required field is absent or empty
    pub fn match_template(template: &Template, message: &str, required: &[String]) -> Result<Self> {
        let mut fields = IndexMap::new();
        let mut cursor = 0;

        for field in template.fields() {
            let remaining = &message[cursor..];
            if remaining.is_empty() {
                break;
            }

            if field.separator.is_empty() {
                fields.insert(field.name.to_string(), remaining.to_string());
                break;
            }

            match remaining.find(field.separator) {
                Some(end) => {
                    fields.insert(field.name.to_string(), remaining[..end].to_string());
                    cursor += end + field.separator.len();
                }
                None => {
                    fields.insert(field.name.to_string(), remaining.to_string());
                    break;
                }
            }
        }

        let message = Message { fields };
        if let Some(missing) = required.iter().find(|name| message.value(name).is_none()) {
            return Err(GitBumpError::MissingRequiredField {
                template: template.source().to_string(),
                required: required.to_vec(),
                missing: missing.clone(),
            });
        }

        Ok(message)
    }

    /// Non-empty value of a field
    pub fn value(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for Message {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Message {
            fields: iter.into_iter().collect(),
        }
    }
}
