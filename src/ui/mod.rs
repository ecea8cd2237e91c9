//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling
//!
//! Prompts are written to stderr so stdout only carries command output.

use std::io::{self, BufRead, Write};

use console::{style, Term};

use crate::error::{GitBumpError, Result};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_commits, display_error, display_status, display_success,
};

/// Something offered in a numbered menu.
pub trait Selection {
    /// Value returned when chosen
    fn field(&self) -> &str;
    /// One-line explanation shown next to the value
    fn doc(&self) -> &str;
}

/// Prompts user to pick one of several options.
///
/// Displays a numbered list and accepts a 1-based index. Pressing Enter picks
/// the first option. Invalid input re-prompts.
///
/// # Arguments
/// * `label` - Name of the value being chosen
/// * `options` - Choices, at least one
///
/// # Returns
/// * `Ok(String)` - The chosen option's value
/// * `Err` - If there is nothing to choose or input ends
pub fn select<S: Selection>(label: &str, options: &[S]) -> Result<String> {
    if options.is_empty() {
        return Err(GitBumpError::config(format!("'{}' has no options", label)));
    }

    let term = Term::stderr();
    term.write_line(&format!("\n{}", style(label).bold()))?;
    let width = options.iter().map(|o| o.field().len()).max().unwrap_or(0);
    for (i, option) in options.iter().enumerate() {
        term.write_line(&format!(
            "  {}. {:<width$}  {}",
            i + 1,
            option.field(),
            style(option.doc()).dim(),
            width = width
        ))?;
    }

    loop {
        let input = prompt(&term, &format!("Select (1-{}) [default: 1]: ", options.len()))?;
        match parse_selection(&input, options.len()) {
            Some(index) => return Ok(options[index].field().to_string()),
            None => term.write_line(&format!("{}", style("Invalid selection").red()))?,
        }
    }
}

/// Prompts user for free text.
///
/// Required values re-prompt until something non-blank is entered. The result
/// is wrapped at `width` columns.
///
/// # Arguments
/// * `label` - Name of the value being entered
/// * `required` - Whether an empty answer is rejected
/// * `width` - Wrap width, 0 disables wrapping
pub fn text_input(label: &str, required: bool, width: usize) -> Result<String> {
    let term = Term::stderr();
    let marker = if required { "*" } else { "" };

    loop {
        let input = prompt(&term, &format!("{}{}: ", style(label).bold(), marker))?;
        let value = input.trim();
        if value.is_empty() && required {
            term.write_line(&format!("{}", style(format!("{} is required", label)).red()))?;
            continue;
        }
        return Ok(wrap_text(value, width));
    }
}

fn prompt(term: &Term, question: &str) -> Result<String> {
    term.write_str(question)?;
    term.flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
    }
    io::stderr().flush()?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Zero-based index for a 1-based menu answer, empty meaning the first entry.
pub fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let input = input.trim();
    let choice = if input.is_empty() {
        1
    } else {
        input.parse::<usize>().ok()?
    };

    (1..=len).contains(&choice).then(|| choice - 1)
}

/// Greedy word wrap that keeps existing line breaks.
///
/// Words longer than `width` are left on their own line unbroken.
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    lines.join("\n")
}
