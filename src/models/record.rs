use serde::{Deserialize, Serialize};

/// Placeholder actor until real operator identities exist.
pub const DEFAULT_USER: &str = "local_user";

/// An append-only audit entry recording one completed transition.
///
/// Records reference the source and destination by value (the paths as they
/// were at transition time); they are never updated if the item moves again.
/// The `action` field stays a plain string on the read side so that log
/// files written by other tools, or by older versions, still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionRecord {
    /// ISO-8601 timestamp taken at write time.
    pub timestamp: String,
    pub action: String,
    pub filename: String,
    pub source_directory: String,
    pub destination_directory: String,
    pub user: String,
}
