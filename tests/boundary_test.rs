use git_bump::boundary::BoundaryWarning;
use git_bump::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_unreleased_commits_display() {
    let warning = BoundaryWarning::NoUnreleasedCommits {
        latest_tag: "v1.0.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No new commits"),
        "Message should contain 'No new commits', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("v1.0.0"),
        "Message should contain tag 'v1.0.0', got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_non_version_tag_display() {
    let warning = BoundaryWarning::NonVersionTag {
        tag: "nightly".to_string(),
        reason: "invalid version: nightly".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("nightly"),
        "Message should contain tag 'nightly', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("not a version"),
        "Message should explain the problem, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_skipped_commits_display() {
    let one = BoundaryWarning::SkippedCommits { count: 1 }.to_string();
    assert_eq!(one, "Ignored 1 commit not matching the commit template");

    let many = BoundaryWarning::SkippedCommits { count: 3 }.to_string();
    assert_eq!(many, "Ignored 3 commits not matching the commit template");
}

#[test]
fn test_boundary_warning_equality() {
    assert_eq!(
        BoundaryWarning::SkippedCommits { count: 2 },
        BoundaryWarning::SkippedCommits { count: 2 }
    );
    assert_ne!(
        BoundaryWarning::SkippedCommits { count: 2 },
        BoundaryWarning::SkippedCommits { count: 3 }
    );
}

#[test]
fn test_display_boundary_warning() {
    // Visual verification test - output is printed to stderr
    ui::display_boundary_warning(&BoundaryWarning::SkippedCommits { count: 1 });
}

// ============================================================================
// Text Wrapping Tests
// ============================================================================

#[test]
fn test_wrap_text_exact_width() {
    assert_eq!(ui::wrap_text("aaaa bbbb", 9), "aaaa bbbb");
    assert_eq!(ui::wrap_text("aaaa bbbb", 8), "aaaa\nbbbb");
}

#[test]
fn test_wrap_text_collapses_spaces() {
    assert_eq!(ui::wrap_text("a   b", 10), "a b");
}

#[test]
fn test_wrap_text_empty() {
    assert_eq!(ui::wrap_text("", 10), "");
}

#[test]
fn test_parse_selection_whitespace() {
    assert_eq!(ui::parse_selection(" 2 ", 2), Some(1));
}
