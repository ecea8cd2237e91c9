//! Commit message templates
//!
//! A template is free text with `{{.Name}}` placeholders, e.g.
//! `{{.Type}}({{.Scope}}): {{.Message}}`. It is tokenised once into literal
//! and placeholder segments; the literal following a placeholder is the
//! separator used to find where that placeholder's value ends.

use crate::error::{GitBumpError, Result};
use indexmap::IndexMap;

const OPEN: &str = "{{.";
const CLOSE: &str = "}}";

/// One piece of a tokenised template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A placeholder together with the literal text that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: &'a str,
    /// Empty when the placeholder ends the template or is directly followed
    /// by another placeholder
    pub separator: &'a str,
}

/// Tokenised commit message template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Tokenise a template string
    ///
    /// Text that looks like the start of a placeholder but is not a complete
    /// `{{.Name}}` marker stays literal.
    ///
    /// # Returns
    /// * `Ok(Template)` - Tokenised template
    /// * `Err` - If the same placeholder name appears twice
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(start) = rest.find(OPEN) {
            let after_open = &rest[start + OPEN.len()..];
            let name_len = after_open
                .find(|c: char| !is_word_char(c))
                .unwrap_or(after_open.len());
            let name = &after_open[..name_len];

            if name.is_empty() || !after_open[name_len..].starts_with(CLOSE) {
                literal.push_str(&rest[..start + OPEN.len()]);
                rest = after_open;
                continue;
            }

            literal.push_str(&rest[..start]);
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }

            let duplicate = segments
                .iter()
                .any(|s| matches!(s, Segment::Placeholder(existing) if existing == name));
            if duplicate {
                return Err(GitBumpError::template(format!(
                    "placeholder '{}' appears more than once in template",
                    name
                )));
            }
            segments.push(Segment::Placeholder(name.to_string()));

            rest = &after_open[name_len + CLOSE.len()..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Template {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in template order
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Placeholders paired with their separators, in template order
    pub fn fields(&self) -> Vec<Field<'_>> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(idx, segment)| match segment {
                Segment::Placeholder(name) => {
                    let separator = match self.segments.get(idx + 1) {
                        Some(Segment::Literal(text)) => text.as_str(),
                        _ => "",
                    };
                    Some(Field { name, separator })
                }
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute placeholders with values; unknown fields render empty
    pub fn render(&self, values: &IndexMap<String, String>) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Placeholder(name) => values.get(name).map_or("", String::as_str),
            })
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
