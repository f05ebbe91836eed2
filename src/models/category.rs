use std::path::Path;

use serde::{Deserialize, Serialize};

/// One workflow state. Each variant maps 1:1 to a directory under the
/// vault root; the directories are disjoint, so category membership is
/// simply "which directory holds the file".
///
/// `PendingApprovalSocial` is a nested sub-category of `PendingApproval`
/// used only for socially-sourced drafts; `SocialDraft` is the staging
/// area those drafts start in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NeedsAction,
    PendingApproval,
    PendingApprovalSocial,
    Approved,
    Done,
    Rejected,
    SocialDraft,
}

impl Category {
    /// Every category with a backing directory.
    pub const ALL: &'static [Category] = &[
        Self::NeedsAction,
        Self::PendingApproval,
        Self::PendingApprovalSocial,
        Self::Approved,
        Self::Done,
        Self::Rejected,
        Self::SocialDraft,
    ];

    /// The five top-level workflow states shown in counts and the
    /// activity feed. Sub-categories and the social staging area are
    /// excluded, matching the dashboard overview.
    pub const PRIMARY: &'static [Category] = &[
        Self::NeedsAction,
        Self::PendingApproval,
        Self::Approved,
        Self::Done,
        Self::Rejected,
    ];

    /// Directory path relative to the vault root.
    pub fn rel_dir(&self) -> &'static Path {
        Path::new(match self {
            Self::NeedsAction => "Needs_Action",
            Self::PendingApproval => "Pending_Approval",
            Self::PendingApprovalSocial => "Pending_Approval/social",
            Self::Approved => "Approved",
            Self::Done => "Done",
            Self::Rejected => "Rejected",
            Self::SocialDraft => "social/Draft",
        })
    }

    /// Human-readable label used in activity feeds.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NeedsAction => "Needs Action",
            Self::PendingApproval => "Pending Approval",
            Self::PendingApprovalSocial => "Pending Approval (Social)",
            Self::Approved => "Approved",
            Self::Done => "Done",
            Self::Rejected => "Rejected",
            Self::SocialDraft => "Social Draft",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NeedsAction => "needs_action",
            Self::PendingApproval => "pending_approval",
            Self::PendingApprovalSocial => "pending_approval_social",
            Self::Approved => "approved",
            Self::Done => "done",
            Self::Rejected => "rejected",
            Self::SocialDraft => "social_draft",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "needs_action" => Some(Self::NeedsAction),
            "pending_approval" => Some(Self::PendingApproval),
            "pending_approval_social" => Some(Self::PendingApprovalSocial),
            "approved" => Some(Self::Approved),
            "done" => Some(Self::Done),
            "rejected" => Some(Self::Rejected),
            "social_draft" => Some(Self::SocialDraft),
            _ => None,
        }
    }
}
