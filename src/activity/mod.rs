use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::VaultConfig;
use crate::error::VaultResult;
use crate::models::{ActivityEntry, Category, ItemKind, ItemMeta, ListedItem};
use crate::store::ItemStore;

/// How many activity entries the feed returns by default.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 20;

/// Item counts for the five top-level workflow states.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCounts {
    pub needs_action: usize,
    pub pending_approval: usize,
    pub approved: usize,
    pub done: usize,
    pub rejected: usize,
}

/// Read-only queries composed from item store listings. No side effects;
/// every absent directory reads as empty.
#[derive(Clone)]
pub struct VaultQueries {
    config: Arc<VaultConfig>,
    store: ItemStore,
}

impl VaultQueries {
    pub fn new(config: Arc<VaultConfig>, store: ItemStore) -> Self {
        Self { config, store }
    }

    /// Item count per primary category.
    pub fn counts(&self) -> VaultResult<CategoryCounts> {
        Ok(CategoryCounts {
            needs_action: self.store.list(Category::NeedsAction)?.len(),
            pending_approval: self.store.list(Category::PendingApproval)?.len(),
            approved: self.store.list(Category::Approved)?.len(),
            done: self.store.list(Category::Done)?.len(),
            rejected: self.store.list(Category::Rejected)?.len(),
        })
    }

    /// The most recently modified items across all primary categories,
    /// newest first, each tagged with the category it sits in.
    pub fn recent_activity(&self, limit: usize) -> VaultResult<Vec<ActivityEntry>> {
        let mut entries = Vec::new();
        for category in Category::PRIMARY {
            for meta in self.store.list(*category)? {
                entries.push(ActivityEntry {
                    meta,
                    directory: category.label().to_string(),
                });
            }
        }
        entries.sort_by(|a, b| b.meta.modified.cmp(&a.meta.modified));
        entries.truncate(limit);
        Ok(entries)
    }

    /// All items in one category, newest first, each tagged with its
    /// inferred content kind. An unreadable item lists as `unknown`
    /// rather than failing the whole listing.
    pub fn category_listing(&self, category: Category) -> VaultResult<Vec<ListedItem>> {
        let mut items = Vec::new();
        for meta in self.store.list(category)? {
            let kind = self
                .store
                .read_item(&meta.filepath)
                .map(|content| ItemKind::infer(&content))
                .unwrap_or(ItemKind::Unknown);
            items.push(ListedItem { meta, kind });
        }
        items.sort_by(|a, b| b.meta.modified.cmp(&a.meta.modified));
        Ok(items)
    }

    /// Staged social drafts, newest first. No kind inference; everything
    /// here is social by construction.
    pub fn social_drafts(&self) -> VaultResult<Vec<ItemMeta>> {
        let mut items = self.store.list(Category::SocialDraft)?;
        items.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(items)
    }

    /// The free-form `Dashboard.md` overview, if one exists. Returned raw;
    /// rendering is the client's concern.
    pub fn dashboard_text(&self) -> Option<String> {
        std::fs::read_to_string(self.config.dashboard_file()).ok()
    }
}
