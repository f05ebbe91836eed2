use std::path::Path;
use std::sync::Arc;

use chrono::Local;

use crate::audit::AuditLog;
use crate::config::VaultConfig;
use crate::error::{VaultError, VaultResult};
use crate::models::{ActionKind, Category, ItemMeta, TransitionRecord, DEFAULT_USER};
use crate::store::ItemStore;

/// Executes workflow transitions: validates the supplied path, delegates
/// the move to the item store, then records it in the audit log.
///
/// The caller supplies an explicit file path rather than a logical
/// (category, filename) pair; whatever sits at that path is the thing
/// moved. The path must resolve inside the vault root.
#[derive(Clone)]
pub struct TransitionEngine {
    config: Arc<VaultConfig>,
    store: ItemStore,
    audit: AuditLog,
}

impl TransitionEngine {
    pub fn new(config: Arc<VaultConfig>, store: ItemStore, audit: AuditLog) -> Self {
        Self {
            config,
            store,
            audit,
        }
    }

    /// Move the item at `raw_path` into `destination` and record the
    /// transition.
    ///
    /// The move is the source of truth; a failure to write the audit
    /// record is reported on the error channel and never rolls back or
    /// fails the completed move.
    pub fn apply(
        &self,
        action: ActionKind,
        raw_path: &str,
        destination: Category,
    ) -> VaultResult<ItemMeta> {
        let trimmed = raw_path.trim();
        if trimmed.is_empty() {
            return Err(VaultError::InvalidInput("no file path provided".to_string()));
        }

        let path = Path::new(trimmed);
        if !self.config.contains(path) {
            return Err(VaultError::InvalidInput(format!(
                "path is outside the vault: {}",
                path.display()
            )));
        }
        if !path.exists() {
            return Err(VaultError::NotFound(format!("{}", path.display())));
        }

        let source_directory = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let moved = self.store.move_item(path, destination)?;

        let record = TransitionRecord {
            timestamp: Local::now().to_rfc3339(),
            action: action.as_str().to_string(),
            filename: moved.filename.clone(),
            source_directory,
            destination_directory: self.config.category_dir(destination).display().to_string(),
            user: DEFAULT_USER.to_string(),
        };
        if let Err(e) = self.audit.append(&record) {
            tracing::error!(
                "failed to log {} of {}: {}",
                record.action,
                record.filename,
                e
            );
        }

        Ok(moved)
    }
}
