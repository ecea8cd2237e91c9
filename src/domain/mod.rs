//! Domain logic - pure version and message rules independent of git operations

pub mod change;
pub mod message;
pub mod prerelease;
pub mod template;
pub mod version;

pub use change::ChangeType;
pub use message::Message;
pub use prerelease::PreRelease;
pub use template::{Field, Segment, Template};
pub use version::Version;
