use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::VaultConfig;
use crate::error::{VaultError, VaultResult};
use crate::models::{Category, ItemMeta};

/// Document files are markdown only; anything else in a category
/// directory is ignored.
const ITEM_EXTENSION: &str = "md";

/// Directory-backed item storage. Listing, reading and moving all operate
/// on the live filesystem; there is no index to keep in sync.
#[derive(Clone)]
pub struct ItemStore {
    config: Arc<VaultConfig>,
}

impl ItemStore {
    pub fn new(config: Arc<VaultConfig>) -> Self {
        Self { config }
    }

    /// List the document files directly inside a category's directory.
    ///
    /// Non-recursive. A missing directory is an empty category, not an
    /// error. No ordering is guaranteed; callers sort.
    pub fn list(&self, category: Category) -> VaultResult<Vec<ItemMeta>> {
        let dir = self.config.category_dir(category);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut items = Vec::new();
        for entry in entries {
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ITEM_EXTENSION) {
                continue;
            }
            match item_meta(&path) {
                Ok(meta) => items.push(meta),
                Err(e) => {
                    // An entry that vanished or cannot be stat'ed is skipped,
                    // not fatal to the listing.
                    tracing::debug!("skipping unreadable entry {}: {}", path.display(), e);
                }
            }
        }
        Ok(items)
    }

    /// Read an item's full text content.
    pub fn read_item(&self, path: &Path) -> VaultResult<String> {
        fs::read_to_string(path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    VaultError::NotFound(format!("{}", path.display()))
                }
                _ => VaultError::Io(format!("{}: {}", path.display(), e)),
            })
    }

    /// Relocate an item into `destination`, creating the destination
    /// directory as needed. Filename and content are preserved.
    ///
    /// Refuses to overwrite: a same-named file already at the destination
    /// is `AlreadyExists`, and both files are left untouched. A vanished
    /// source is `NotFound`. The rename is the serialization point for
    /// concurrent movers of the same path: exactly one wins.
    pub fn move_item(&self, path: &Path, destination: Category) -> VaultResult<ItemMeta> {
        let filename = path
            .file_name()
            .ok_or_else(|| VaultError::InvalidInput(format!("{}", path.display())))?;

        let dest_dir = self.config.category_dir(destination);
        fs::create_dir_all(&dest_dir)?;
        let dest_path = dest_dir.join(filename);

        if dest_path.exists() {
            return Err(VaultError::AlreadyExists(format!("{}", dest_path.display())));
        }

        if let Err(e) = fs::rename(path, &dest_path) {
            if e.kind() == std::io::ErrorKind::NotFound {
                return Err(VaultError::NotFound(format!("{}", path.display())));
            }
            // Rename failed with the source still present, most likely a
            // cross-filesystem destination. Fall back to copy, verify,
            // then delete the source.
            if !path.exists() {
                return Err(VaultError::NotFound(format!("{}", path.display())));
            }
            copy_then_delete(path, &dest_path)?;
        }

        item_meta(&dest_path)
    }
}

/// Cross-filesystem move fallback: copy, verify the byte count against the
/// source, then remove the source. A failed verify removes the partial
/// destination so the item never exists at both locations.
fn copy_then_delete(source: &Path, dest: &Path) -> VaultResult<()> {
    let expected = fs::metadata(source)?.len();
    let copied = fs::copy(source, dest)?;
    if copied != expected {
        let _ = fs::remove_file(dest);
        return Err(VaultError::Io(format!(
            "short copy of {}: {} of {} bytes",
            source.display(),
            copied,
            expected
        )));
    }
    fs::remove_file(source)?;
    Ok(())
}

/// Stat one item file into its metadata record.
fn item_meta(path: &Path) -> VaultResult<ItemMeta> {
    let metadata = fs::metadata(path)?;
    let modified: DateTime<Utc> = metadata.modified()?.into();
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(ItemMeta {
        filename,
        filepath: path.to_path_buf(),
        modified,
        size: metadata.len(),
    })
}
