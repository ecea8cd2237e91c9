//! Command layer between argument parsing and the library.
//!
//! Keeps the command logic callable programmatically, without clap.

pub mod app;
pub mod compose;

pub use app::App;
pub use compose::{compose_message, render_message};
