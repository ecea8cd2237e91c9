//! Changelog rendering with tera.
//!
//! The template sees two variables:
//! - `messages`: every parsed commit, newest first, as field -> value maps
//! - `fields`: field -> value -> [commit], in first-seen order
//!
//! ```text
//! {% for kind, commits in fields.Type %}
//! ## {{ kind }}
//! {% for c in commits %}- {{ c.Message }}
//! {% endfor %}{% endfor %}
//! ```

use crate::domain::Message;
use crate::error::{GitBumpError, Result};
use indexmap::IndexMap;
use tera::{Context, Tera};

/// field -> value -> messages carrying that value
pub type Grouping<'a> = IndexMap<&'a str, IndexMap<&'a str, Vec<&'a Message>>>;

/// Group messages by each of their non-empty field values
pub fn group_messages(messages: &[Message]) -> Grouping<'_> {
    let mut fields: Grouping<'_> = IndexMap::new();
    for message in messages {
        for (field, value) in message.iter().filter(|(_, value)| !value.is_empty()) {
            fields
                .entry(field)
                .or_default()
                .entry(value)
                .or_default()
                .push(message);
        }
    }
    fields
}

/// Render a changelog template over parsed commit messages
///
/// # Returns
/// * `Ok(String)` - Rendered changelog
/// * `Err(Template)` - If the template is invalid or fails to render
pub fn render_changelog(template: &str, messages: &[Message]) -> Result<String> {
    let mut context = Context::new();
    context.insert("fields", &group_messages(messages));
    context.insert("messages", messages);

    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.render_str(template, &context).map_err(|e| {
        let detail = std::error::Error::source(&e)
            .map(|source| format!("{}: {}", e, source))
            .unwrap_or_else(|| e.to_string());
        GitBumpError::template(detail)
    })
}
