//! Analysis engine for determining the change type from commits

pub mod classifier;

pub use classifier::{ChangeClassifier, MatchMode, SeverityTable};
