use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// Metadata for one work item as it sits on disk. Content is not carried
/// here; it is read on demand through the item store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemMeta {
    pub filename: String,
    /// Full path to the file, as supplied back to the mutation endpoints.
    pub filepath: PathBuf,
    pub modified: DateTime<Utc>,
    pub size: u64,
}

/// An item annotated with the category it currently sits in, for the
/// cross-category activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(flatten)]
    pub meta: ItemMeta,
    /// Display label of the owning category at scan time.
    pub directory: String,
}

/// An item annotated with its inferred content kind, for per-category
/// listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListedItem {
    #[serde(flatten)]
    pub meta: ItemMeta,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

/// Full content of one item, returned by the file-view endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemContent {
    pub filename: String,
    pub filepath: PathBuf,
    pub content: String,
}

/// Coarse content kind, inferred by substring search over the raw text.
///
/// This is presentation metadata with no correctness guarantees: the first
/// matching token in a fixed priority order wins, and anything unreadable
/// or unmatched is `Unknown`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Email,
    Whatsapp,
    Social,
    FileDrop,
    Unknown,
}

impl ItemKind {
    /// Sniff the kind from raw content. Case-insensitive; priority order
    /// is email > whatsapp > social > file_drop.
    pub fn infer(content: &str) -> Self {
        let lower = content.to_lowercase();
        if lower.contains("email") {
            Self::Email
        } else if lower.contains("whatsapp") {
            Self::Whatsapp
        } else if lower.contains("social") {
            Self::Social
        } else if lower.contains("file_drop") {
            Self::FileDrop
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Whatsapp => "whatsapp",
            Self::Social => "social",
            Self::FileDrop => "file_drop",
            Self::Unknown => "unknown",
        }
    }
}

/// An operator action. Each kind has a fixed destination category; the
/// source is whatever directory the supplied path points into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Approve,
    Reject,
    SendForApproval,
}

impl ActionKind {
    pub fn destination(&self) -> Category {
        match self {
            Self::Approve => Category::Approved,
            Self::Reject => Category::Rejected,
            Self::SendForApproval => Category::PendingApprovalSocial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::SendForApproval => "send_for_approval",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_inference_follows_priority_order() {
        // "email" beats every later token even when both appear
        assert_eq!(ItemKind::infer("whatsapp thread about an Email"), ItemKind::Email);
        assert_eq!(ItemKind::infer("WhatsApp message"), ItemKind::Whatsapp);
        assert_eq!(ItemKind::infer("social media post"), ItemKind::Social);
        assert_eq!(ItemKind::infer("from the file_drop folder"), ItemKind::FileDrop);
        assert_eq!(ItemKind::infer("plain note"), ItemKind::Unknown);
    }

    #[test]
    fn kind_inference_is_case_insensitive() {
        assert_eq!(ItemKind::infer("EMAIL: quarterly report"), ItemKind::Email);
        assert_eq!(ItemKind::infer("Social calendar"), ItemKind::Social);
    }

    #[test]
    fn actions_map_to_their_destinations() {
        assert_eq!(ActionKind::Approve.destination(), Category::Approved);
        assert_eq!(ActionKind::Reject.destination(), Category::Rejected);
        assert_eq!(
            ActionKind::SendForApproval.destination(),
            Category::PendingApprovalSocial
        );
    }
}
