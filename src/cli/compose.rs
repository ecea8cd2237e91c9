//! Interactive commit message composition.

use crate::config::Config;
use crate::error::Result;
use crate::ui;
use indexmap::IndexMap;
use tracing::debug;

/// Ask for every argument and render the commit message
///
/// Arguments with options are chosen from a menu; the rest are typed in.
pub fn compose_message(config: &Config) -> Result<String> {
    let mut values = IndexMap::new();

    for arg in &config.args {
        let value = if arg.options.is_empty() {
            ui::text_input(&arg.name, arg.required, arg.width)?
        } else {
            ui::select(&arg.name, &arg.options)?
        };
        values.insert(arg.name.clone(), value);
    }

    render_message(config, &values)
}

/// Fill the commit template and check the result matches it again
///
/// # Returns
/// * `Ok(String)` - The message, trailing whitespace removed
/// * `Err(MissingRequiredField)` - If a required value is empty
pub fn render_message(config: &Config, values: &IndexMap<String, String>) -> Result<String> {
    let classifier = config.classifier()?;
    let message = classifier.template().render(values).trim_end().to_string();

    classifier.parse(&message)?;
    debug!(summary = message.lines().next().unwrap_or_default(), "composed commit message");

    Ok(message)
}
