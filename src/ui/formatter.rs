//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Colours are dropped automatically when the stream is not a terminal.

use console::style;

use crate::boundary::BoundaryWarning;

const SUMMARY_WIDTH: usize = 60;
const MAX_LISTED_COMMITS: usize = 10;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().for_stderr(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
///
/// # Arguments
/// * `warning` - The boundary warning to display
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().for_stderr(), warning);
}

/// Display the unreleased commits since a tag.
///
/// Shows the first line of up to 10 commits; the remainder is summarised.
///
/// # Arguments
/// * `messages` - Commit messages, newest first
/// * `latest_tag` - The tag the commits were counted from
pub fn display_commits(messages: &[String], latest_tag: &str) {
    println!(
        "\n{}",
        style(format!("{} commits since '{}'", messages.len(), latest_tag)).bold()
    );

    for (i, message) in messages.iter().take(MAX_LISTED_COMMITS).enumerate() {
        println!("  {}. {}", i + 1, summarize(message));
    }

    if messages.len() > MAX_LISTED_COMMITS {
        println!("  ... and {} more commits", messages.len() - MAX_LISTED_COMMITS);
    }
}

/// First line of a message, cut to a display width on a char boundary.
pub fn summarize(message: &str) -> String {
    let first_line = message.lines().next().unwrap_or_default();
    if first_line.chars().count() > SUMMARY_WIDTH {
        let cut: String = first_line.chars().take(SUMMARY_WIDTH).collect();
        format!("{}…", cut)
    } else {
        first_line.to_string()
    }
}
